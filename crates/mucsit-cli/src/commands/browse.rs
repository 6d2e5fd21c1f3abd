//! Browse command implementation.
//!
//! Reads one instruction per line from stdin and drives a [`ListController`].
//! Each query change spawns its fetch immediately, so a fast sequence of
//! instructions can leave several requests in flight; whichever finishes,
//! only the page for the latest instruction is rendered.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use mucsit_core::{
    Applied, Facet, FetchOutcome, FetchTicket, ListController, ListStatus, PageSize, QueryField,
    Resource, ResourceKind,
};
use mucsit_http::ApiClient;

use super::{QueryArgs, for_kind, parse_sort};
use crate::cli::ApiArgs;
use crate::output;

const HELP: &str = "\
Commands:
  next | n              go to the next page
  prev | p              go to the previous page
  page <N>              go to page N
  sort <KEY>            change the sort key (e.g. -createdAt, title)
  limit <N>             items per page (5, 10, 20, 50)
  search [TERM]         search; no term clears the search
  filter <FACET> [VAL]  filter on a facet; no value clears it
  refresh | r           fetch the current page again
  show                  print the current page
  quit | q              exit";

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Collection to browse
    pub kind: ResourceKind,

    /// Initial query
    #[command(flatten)]
    pub query: QueryArgs,
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Next,
    Previous,
    Page(u32),
    Sort(String),
    Limit(u32),
    Search(Option<String>),
    Filter(Facet, Option<String>),
    Refresh,
    Show,
    Help,
    Quit,
}

pub async fn run(args: BrowseArgs, api: &ApiArgs) -> Result<()> {
    let client = Arc::new(api.client()?);
    for_kind!(args.kind, browse(client, &args))
}

async fn browse<R: Resource>(client: Arc<ApiClient>, args: &BrowseArgs) -> Result<()> {
    let query = args.query.to_query::<R>()?;
    let mut controller = ListController::<R, _>::with_query(client, query);
    let (tx, mut rx) = mpsc::unbounded_channel();

    output::note(&format!(
        "Browsing {}. Type 'help' for commands.",
        R::KIND.label()
    ));
    spawn_fetch(controller.mount(), &tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    None => input_open = false,
                    Some(line) => match parse_input(&line) {
                        Ok(None) => {}
                        Ok(Some(Input::Quit)) => break,
                        Ok(Some(Input::Help)) => println!("{}", HELP),
                        Ok(Some(Input::Show)) => render(&controller),
                        Ok(Some(input)) => match step(&mut controller, input) {
                            Ok(Some(ticket)) => spawn_fetch(ticket, &tx),
                            Ok(None) => output::note("Nothing to do."),
                            Err(e) => output::error(&format!("{:#}", e)),
                        },
                        Err(msg) => output::error(&msg),
                    },
                }
            }
            Some(outcome) = rx.recv() => {
                match controller.apply(outcome) {
                    Applied::Current => render(&controller),
                    Applied::Stale => debug!("Dropped superseded page"),
                }
            }
            else => break,
        }

        // Out of input: wait for the latest request, then stop.
        if !input_open && !controller.is_loading() {
            break;
        }
    }

    Ok(())
}

fn spawn_fetch<R: Resource>(
    ticket: FetchTicket<R, ApiClient>,
    tx: &mpsc::UnboundedSender<FetchOutcome<R>>,
) {
    debug!(seq = ticket.seq(), "Spawning fetch");
    let tx = tx.clone();
    tokio::spawn(async move {
        // The receiver is gone once the session has ended.
        let _ = tx.send(ticket.run().await);
    });
}

/// Turn an instruction into a query change.
fn step<R: Resource>(
    controller: &mut ListController<R, ApiClient>,
    input: Input,
) -> Result<Option<FetchTicket<R, ApiClient>>> {
    let widget = controller.widget();
    let field = match input {
        Input::Next => match widget.next() {
            Some(event) => event.into(),
            None => return Ok(None),
        },
        Input::Previous => match widget.previous() {
            Some(event) => event.into(),
            None => return Ok(None),
        },
        // Once the page count is known, out-of-range pages are ignored.
        Input::Page(page) if controller.result().is_some() => match widget.go_to(page) {
            Some(event) => event.into(),
            None => return Ok(None),
        },
        Input::Page(page) => QueryField::Page(page),
        Input::Sort(param) => QueryField::Sort(parse_sort::<R>(&param)?),
        Input::Limit(size) => QueryField::PageSize(PageSize::try_from(size)?),
        Input::Search(term) => QueryField::Search(term),
        Input::Filter(facet, value) => QueryField::Filter(facet, value),
        Input::Refresh => return Ok(Some(controller.refetch())),
        Input::Show | Input::Help | Input::Quit => return Ok(None),
    };
    Ok(controller.set_query_field(field)?)
}

fn render<R: Resource>(controller: &ListController<R, ApiClient>) {
    match controller.status() {
        ListStatus::Loaded => {
            output::items(controller.items());
            output::footer(&controller.widget());
            output::facets(controller.facets());
        }
        ListStatus::NoResults => {
            output::note("No results.");
            output::footer(&controller.widget());
        }
        ListStatus::Failed => {
            if let Some(err) = controller.error() {
                output::error(&err.to_string());
            }
            if !controller.items().is_empty() {
                output::note(&format!(
                    "Showing the last page that loaded ({} items).",
                    controller.items().len()
                ));
            }
        }
        ListStatus::Loading | ListStatus::NotLoaded => output::note("Loading..."),
    }
}

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let rest_opt = (!rest.is_empty()).then(|| rest.to_string());

    let input = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "next" | "n" => Input::Next,
        "prev" | "previous" | "p" => Input::Previous,
        "page" => Input::Page(parse_number(rest, "page")?),
        "limit" => Input::Limit(parse_number(rest, "limit")?),
        "sort" => Input::Sort(rest_opt.ok_or("usage: sort <KEY>")?),
        "search" => Input::Search(rest_opt),
        "filter" => {
            let (facet, value) = match rest.split_once(char::is_whitespace) {
                Some((facet, value)) => (facet, Some(value.trim().to_string())),
                None => (rest, None),
            };
            let facet = facet.parse::<Facet>().map_err(|e| e.to_string())?;
            Input::Filter(facet, value)
        }
        "refresh" | "r" => Input::Refresh,
        "show" | "ls" => Input::Show,
        "help" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => return Err(format!("unknown command '{}'; type 'help'", other)),
    };
    Ok(Some(input))
}

fn parse_number(s: &str, what: &str) -> Result<u32, String> {
    s.parse()
        .map_err(|_| format!("usage: {} <N>, got '{}'", what, s))
}
