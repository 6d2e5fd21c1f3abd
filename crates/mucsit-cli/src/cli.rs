//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use mucsit_core::routes::SITE_DESCRIPTION;
use mucsit_core::{ApiUrl, SiteUrl};
use mucsit_http::ApiClient;

use crate::commands::Commands;

pub const DEFAULT_API_URL: &str = "https://mucsitbackend.onrender.com/api";
pub const DEFAULT_SITE_URL: &str = "https://mucsit.edu";

/// Browse the MUCSIT academic resource portal.
#[derive(Parser, Debug)]
#[command(name = "mucsit")]
#[command(author, version = env!("MUCSIT_VERSION"), about, long_about = SITE_DESCRIPTION)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend connection settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the backend API
    #[arg(long, env = "MUCSIT_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: ApiUrl,

    /// Public site URL used for share links and the sitemap
    #[arg(long, env = "MUCSIT_SITE_URL", default_value = DEFAULT_SITE_URL, global = true)]
    pub site_url: SiteUrl,

    /// Request timeout in seconds
    #[arg(long, env = "MUCSIT_TIMEOUT_SECS", default_value_t = 15, global = true)]
    pub timeout_secs: u64,
}

impl ApiArgs {
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::builder(self.api_url.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(format!("mucsit-cli/{}", env!("MUCSIT_VERSION")))
            .build()
            .context("Failed to build HTTP client")
    }
}
