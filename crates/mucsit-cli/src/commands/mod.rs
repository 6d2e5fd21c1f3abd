//! Subcommand implementations.

mod browse;
mod get;
mod list;
mod search;
mod share;
mod sitemap;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Subcommand;

use mucsit_core::{DetailResolver, Facet, ListQuery, PageSize, QueryField, Resource, SortKey};
use mucsit_http::ApiClient;

use crate::cli::ApiArgs;
use crate::output;

/// Exit status when the requested resource does not exist.
pub const NOT_FOUND_EXIT_CODE: i32 = 2;

pub type Resolver = DetailResolver<ApiClient>;

/// Run a generic command body for the resource type behind a [`ResourceKind`].
///
/// [`ResourceKind`]: mucsit_core::ResourceKind
macro_rules! for_kind {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            mucsit_core::ResourceKind::Notes => $func::<mucsit_core::Note>($($arg),*).await,
            mucsit_core::ResourceKind::Assignments => {
                $func::<mucsit_core::Assignment>($($arg),*).await
            }
            mucsit_core::ResourceKind::OldQuestions => {
                $func::<mucsit_core::OldQuestion>($($arg),*).await
            }
            mucsit_core::ResourceKind::Blogs => $func::<mucsit_core::Blog>($($arg),*).await,
        }
    };
}
pub(crate) use for_kind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of a collection
    List(list::ListArgs),

    /// Fetch a single resource by id
    Get(get::GetArgs),

    /// Print the share payload for a resource
    Share(share::ShareArgs),

    /// Search every collection at once
    Search(search::SearchArgs),

    /// Print the sitemap of the portal's static pages
    Sitemap(sitemap::SitemapArgs),

    /// Interactively page through a collection
    Browse(browse::BrowseArgs),
}

pub async fn handle(cmd: Commands, api: &ApiArgs) -> Result<()> {
    match cmd {
        Commands::List(args) => list::run(args, api).await,
        Commands::Get(args) => get::run(args, api).await,
        Commands::Share(args) => share::run(args, api).await,
        Commands::Search(args) => search::run(args, api).await,
        Commands::Sitemap(args) => sitemap::run(args, api),
        Commands::Browse(args) => browse::run(args, api).await,
    }
}

pub fn resolver(api: &ApiArgs) -> Result<Resolver> {
    Ok(DetailResolver::new(Arc::new(api.client()?), api.site_url.clone()))
}

/// Report a missing resource and exit with [`NOT_FOUND_EXIT_CODE`].
pub fn not_found(title: &str) -> ! {
    output::error(title);
    std::process::exit(NOT_FOUND_EXIT_CODE)
}

/// Query flags shared by `list` and `browse`.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page (5, 10, 20 or 50)
    #[arg(long, default_value_t = PageSize::default())]
    pub limit: PageSize,

    /// Sort key as sent to the backend (e.g. -createdAt, title)
    #[arg(long)]
    pub sort: Option<String>,

    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Facet filter as FACET=VALUE (e.g. subject=Math); repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(Facet, String)>,
}

impl QueryArgs {
    /// Build the list query for `R`, validating the sort key against the
    /// orderings `R` offers.
    pub fn to_query<R: Resource>(&self) -> Result<ListQuery<R::Sort>> {
        let mut query = ListQuery::<R::Sort>::new()
            .with(QueryField::PageSize(self.limit))?
            .with(QueryField::Search(self.search.clone()))?;

        if let Some(sort) = &self.sort {
            query = query.with(QueryField::Sort(parse_sort::<R>(sort)?))?;
        }
        for (facet, value) in &self.filters {
            query = query.with(QueryField::Filter(*facet, Some(value.clone())))?;
        }

        // Page last: every other change resets it to 1.
        query
            .with(QueryField::Page(self.page))
            .context("Invalid page")
    }
}

/// Look up `R`'s sort key by its wire value.
pub fn parse_sort<R: Resource>(param: &str) -> Result<R::Sort> {
    match R::Sort::from_param(param) {
        Some(sort) => Ok(sort),
        None => {
            let offered: Vec<_> = R::Sort::ALL.iter().map(|s| s.as_param()).collect();
            bail!(
                "Unknown sort '{}' for {}; expected one of: {}",
                param,
                R::KIND,
                offered.join(", ")
            )
        }
    }
}

fn parse_filter(s: &str) -> Result<(Facet, String), String> {
    let (facet, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FACET=VALUE, got '{}'", s))?;
    let facet = facet.parse::<Facet>().map_err(|e| e.to_string())?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("empty value for filter '{}'", facet));
    }
    Ok((facet, value.to_string()))
}
