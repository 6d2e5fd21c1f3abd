//! List command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use mucsit_core::{ListController, ListStatus, Resource, ResourceKind};
use mucsit_http::ApiClient;

use super::{QueryArgs, for_kind};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection to list (notes, assignments, old-questions, blogs)
    pub kind: ResourceKind,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, api: &ApiArgs) -> Result<()> {
    let client = Arc::new(api.client()?);
    for_kind!(args.kind, list(client, &args))
}

async fn list<R: Resource>(client: Arc<ApiClient>, args: &ListArgs) -> Result<()> {
    let query = args.query.to_query::<R>()?;
    let mut controller = ListController::<R, _>::with_query(client, query);
    controller.refresh().await;

    if let ListStatus::Failed = controller.status() {
        let err = controller
            .error()
            .cloned()
            .context("Fetch failed without an error")?;
        let label = R::KIND.label().to_lowercase();
        return Err(err).with_context(|| format!("Failed to list {}", label));
    }

    if args.json {
        return output::json_pretty(&controller.result());
    }

    if controller.status() == ListStatus::NoResults {
        output::note(&format!("No {} found.", R::KIND.label().to_lowercase()));
        return Ok(());
    }

    output::items(controller.items());
    println!();
    output::footer(&controller.widget());
    output::facets(controller.facets());

    Ok(())
}
