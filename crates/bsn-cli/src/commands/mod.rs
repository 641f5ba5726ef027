//! CLI command implementations.

pub mod account;
pub mod accounts;
pub mod annotate;
pub mod balances;
pub mod graph;
pub mod init;
pub mod tags;

use anyhow::{bail, Context, Result};
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

use crate::config::Config;

/// Everything a read command needs: config, the loaded directory and the
/// user's annotations.
pub struct Workspace {
    pub config: Config,
    pub directory: Directory,
    pub state: ClientState,
}

impl Workspace {
    /// Load config and state, then the directory (`data` overrides the
    /// configured document path).
    pub fn open(data: Option<&Path>) -> Result<Self> {
        let config = Config::load()?;
        let state = config.state_store().load();

        let path = data.unwrap_or(config.data.path.as_path()).to_path_buf();
        let cache = config.cache_path();
        if !path.exists() && !cache.exists() {
            bail!(
                "No directory document at {}. Pass {} or set [data] path in bsn.toml.",
                path.display(),
                "--data <file>".cyan()
            );
        }

        let directory = DirectorySource::new(&path)
            .with_cache(cache)
            .load()
            .with_context(|| format!("Failed to load directory: {}", path.display()))?;
        debug!(
            accounts = directory.len(),
            favorites = state.favorites.len(),
            nicknames = state.nicknames.len(),
            "workspace ready"
        );

        Ok(Self {
            config,
            directory,
            state,
        })
    }

    pub fn name(&self, address: &str) -> String {
        self.directory.display_name(address, &self.state)
    }

    /// Star for favorites and a marker for the "me" account.
    pub fn badges(&self, address: &str) -> String {
        let mut badges = String::new();
        if self.state.is_favorite(address) {
            badges.push_str(&format!(" {}", "★".yellow()));
        }
        if self.state.is_me(address) {
            badges.push_str(&format!(" {}", "(me)".magenta()));
        }
        badges
    }
}

/// Load only the client state, for commands that never read the directory.
pub fn open_state() -> Result<(StateStore, ClientState)> {
    let store = Config::load()?.state_store();
    let state = store.load();
    Ok((store, state))
}

/// Render `name  GABC...WXYZ` for list output.
pub fn labelled(name: &str, address: &str) -> String {
    format!("{}  {}", name.white().bold(), shorten_address(address).dimmed())
}
