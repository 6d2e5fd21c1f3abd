//! Share command implementation.

use anyhow::{Context, Result};
use clap::Args;

use mucsit_core::{DetailPage, Resource, ResourceId, ResourceKind};

use super::{for_kind, not_found};
use crate::cli::ApiArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Collection the resource belongs to
    pub kind: ResourceKind,

    /// Resource id
    pub id: ResourceId,

    /// Print the payload as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShareArgs, api: &ApiArgs) -> Result<()> {
    let resolver = super::resolver(api)?;
    for_kind!(args.kind, share(&resolver, &args))
}

async fn share<R: Resource>(resolver: &super::Resolver, args: &ShareArgs) -> Result<()> {
    let page = resolver
        .resolve::<R>(&args.id)
        .await
        .context("Failed to resolve share link")?;

    match page {
        DetailPage::Found { share, .. } if args.json => output::json(&share),
        DetailPage::Found { share, .. } => {
            output::field("Title", &share.title);
            output::field("Text", &share.text);
            output::field("URL", &share.url);
            Ok(())
        }
        DetailPage::NotFound { meta } => not_found(&meta.title),
    }
}
