//! CLI argument definitions.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use userdir_http::{DEFAULT_ENDPOINT, DEFAULT_SITE, DirectoryConfig, DirectoryUrl, RemoteDirectoryClient};

use crate::commands::browse::BrowseArgs;
use crate::commands::fetch::FetchArgs;

/// Browse the StackExchange user directory.
#[derive(Parser, Debug)]
#[command(name = "userdir")]
#[command(author, version = env!("USERDIR_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub directory: DirectoryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the directory interactively
    Browse(BrowseArgs),

    /// Fetch a single page and print it
    Fetch(FetchArgs),
}

/// Where and how to reach the directory.
#[derive(Args, Debug)]
pub struct DirectoryArgs {
    /// Users endpoint URL
    #[arg(long, global = true, env = "USERDIR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// StackExchange site to list users from
    #[arg(long, global = true, env = "USERDIR_SITE", default_value = DEFAULT_SITE)]
    pub site: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl DirectoryArgs {
    /// Build the client configuration.
    pub fn config(&self) -> Result<DirectoryConfig> {
        let endpoint = DirectoryUrl::new(&self.endpoint).context("Invalid endpoint URL")?;
        Ok(DirectoryConfig::new(endpoint)
            .with_site(&self.site)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// Build a directory client.
    pub fn client(&self) -> Result<RemoteDirectoryClient> {
        RemoteDirectoryClient::new(self.config()?).context("Failed to build HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_directory_args_after_subcommand() {
        let cli = Cli::try_parse_from([
            "userdir",
            "fetch",
            "--endpoint",
            "http://localhost:9000/users",
            "--site",
            "superuser",
        ])
        .unwrap();

        assert_eq!(cli.directory.endpoint, "http://localhost:9000/users");
        let config = cli.directory.config().unwrap();
        assert_eq!(config.site, "superuser");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn rejects_plain_http_endpoint() {
        let cli = Cli::try_parse_from(["userdir", "--endpoint", "http://example.com/users", "fetch"])
            .unwrap();
        assert!(cli.directory.config().is_err());
    }

    #[test]
    fn rejects_page_zero() {
        assert!(Cli::try_parse_from(["userdir", "fetch", "--page", "0"]).is_err());
    }
}
