//! Persistence of [`ClientState`] as a JSON file.

use bsn_core::error::StoreError;
use bsn_core::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File name of the client state inside the state directory.
pub const STATE_FILE: &str = "state.json";

/// Loads and saves user annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/state.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state. A missing file is an empty state; an unreadable or
    /// corrupt one is logged and replaced by an empty state.
    pub fn load(&self) -> ClientState {
        if !self.path.exists() {
            return ClientState::default();
        }
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable client state");
                ClientState::default()
            }
        }
    }

    /// Load the state, reporting read and parse errors.
    pub fn try_load(&self) -> Result<ClientState> {
        let json = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::LoadFailed(format!("{}: {e}", self.path.display())))?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, state: &ClientState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| BsnError::save_failed(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)
            .map_err(|e| BsnError::save_failed(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }

    /// Load, apply `change`, save, and return what `change` returned.
    pub fn update<R>(&self, change: impl FnOnce(&mut ClientState) -> R) -> Result<R> {
        let mut state = self.load();
        let result = change(&mut state);
        self.save(&state)?;
        Ok(result)
    }
}
