//! Command-line arguments.

use crate::config::Config;
use crate::contributions::Direction;
use clap::Parser;
use std::path::PathBuf;

/// Terminal dashboard for an account's contributions.
#[derive(Debug, Parser)]
#[command(name = "contrib-tui", version)]
pub struct Args {
    /// Config file (defaults to $XDG_CONFIG_HOME/contrib-tui/config.jsonc)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Account slug, overrides `account_slug`
    #[arg(short, long)]
    pub account: Option<String>,

    /// `incoming` or `outgoing`, overrides `direction`
    #[arg(short, long)]
    pub direction: Option<Direction>,

    /// Start from this query string (e.g. `searchTerm=acme&offset=20`)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Forget the stored location for this account before starting
    #[arg(long)]
    pub reset: bool,
}

impl Args {
    /// Apply overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(account) = &self.account {
            config.account_slug = account.clone();
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
    }
}
