//! Search command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use mucsit_core::{PageSize, ResourceKind, search_all};

use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term
    pub term: String,

    /// Matches to take from each collection
    #[arg(long, default_value_t = PageSize::Five)]
    pub per_kind: PageSize,

    /// Print one JSON hit per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SearchArgs, api: &ApiArgs) -> Result<()> {
    let client = api.client()?;
    let results = search_all(&client, &args.term, args.per_kind).await;

    for (kind, err) in &results.failures {
        output::error(&format!("{}: {}", kind.label(), err));
    }
    if results.failures.len() == ResourceKind::ALL.len() {
        bail!("Search failed for every collection");
    }

    if results.is_empty() {
        output::note("No matches.");
        return Ok(());
    }

    for hit in &results.hits {
        if args.json {
            output::json(hit)?;
        } else {
            println!(
                "{:<14} {}  {}",
                format!("[{}]", hit.kind.noun()).cyan(),
                hit.title.bold(),
                hit.href.dimmed()
            );
        }
    }

    if !args.json {
        output::success(&format!("{} matches", results.hits.len()));
    }
    Ok(())
}
