//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mucsit_core::{DetailPage, Resource, ResourceId, ResourceKind};

use super::{for_kind, not_found};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Collection the resource belongs to
    pub kind: ResourceKind,

    /// Resource id
    pub id: ResourceId,

    /// Print the whole resolved page as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: GetArgs, api: &ApiArgs) -> Result<()> {
    let resolver = super::resolver(api)?;
    for_kind!(args.kind, get(&resolver, &args))
}

async fn get<R: Resource>(resolver: &super::Resolver, args: &GetArgs) -> Result<()> {
    let page = resolver
        .resolve::<R>(&args.id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", R::KIND.noun().to_lowercase(), args.id))?;

    if args.json {
        output::json_pretty(&page)?;
    }

    match page {
        DetailPage::Found {
            meta,
            preview_url,
            resource,
            ..
        } => {
            if !args.json {
                output::field("Page", &meta.title);
                output::opt_field("Description", meta.description);
                output::opt_field("URL", meta.canonical_url);
                output::opt_field("Preview", preview_url);
                println!();
                output::json_pretty(&resource)?;
            }
            Ok(())
        }
        DetailPage::NotFound { meta } => not_found(&meta.title),
    }
}
