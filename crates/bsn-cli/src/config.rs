//! Configuration management for the bsn CLI.

use anyhow::{Context, Result};
use bsn::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for in the current and parent directories.
pub const CONFIG_FILE: &str = "bsn.toml";

/// bsn project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory document (JSON).
    #[serde(default = "default_document")]
    pub path: PathBuf,
    /// Where client state and the document cache are kept.
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

// Default value functions
fn default_document() -> PathBuf { PathBuf::from("bsn.json") }
fn default_state_dir() -> PathBuf { PathBuf::from(".bsn") }
fn default_depth() -> usize { DEFAULT_DEPTH }
fn default_width() -> f64 { DEFAULT_WIDTH }
fn default_height() -> f64 { DEFAULT_HEIGHT }
fn default_limit() -> usize { 50 }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_document(),
            state_dir: default_state_dir(),
        }
    }
}

impl DataConfig {
    fn anchor_to(&mut self, base: &Path) {
        self.path = base.join(&self.path);
        self.state_dir = base.join(&self.state_dir);
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Load bsn.toml from the current or parent directories, then the user
    /// config directory; defaults when none exists.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load a config file. Relative `[data]` paths are taken relative to
    /// the directory holding the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.data.anchor_to(base);
        }
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> bsn::core::error::Result<()> {
        if !(self.graph.width > 0.0) {
            return Err(BsnError::invalid_config(
                "graph.width",
                self.graph.width.to_string(),
                "must be positive",
            ));
        }
        if !(self.graph.height > 0.0) {
            return Err(BsnError::invalid_config(
                "graph.height",
                self.graph.height.to_string(),
                "must be positive",
            ));
        }
        if self.data.path.as_os_str().is_empty() {
            return Err(BsnError::missing_field("data.path"));
        }
        Ok(())
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data.state_dir.join(CACHE_FILE)
    }

    pub fn state_store(&self) -> StateStore {
        StateStore::in_dir(&self.data.state_dir)
    }
}

/// Find bsn.toml in current or parent directories, else in the user config
/// directory (`~/.config/bsn/bsn.toml` on Linux).
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut dir) = std::env::current_dir() {
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                break;
            }
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join("bsn").join(CONFIG_FILE))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.data.path, PathBuf::from("bsn.json"));
        assert_eq!(config.data.state_dir, PathBuf::from(".bsn"));
        assert_eq!(config.graph.depth, 2);
        assert_eq!(config.graph.width, 1200.0);
        assert_eq!(config.graph.height, 800.0);
        assert_eq!(config.search.limit, 50);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str("[graph]\ndepth = 4\n").unwrap();
        assert_eq!(config.graph.depth, 4);
        assert_eq!(config.graph.width, 1200.0);
        assert_eq!(config.search.limit, 50);
    }

    #[test]
    fn rejects_non_positive_canvas() {
        let config: Config = toml::from_str("[graph]\nwidth = 0.0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("graph.width"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.search.limit = 7;
        config.save(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search.limit, 7);
        assert_eq!(loaded.cache_path(), dir.path().join(".bsn").join(CACHE_FILE));
    }

    #[test]
    fn data_paths_resolve_against_config_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let absolute = dir.path().join("elsewhere").join("doc.json");
        std::fs::write(
            &path,
            format!("[data]\npath = {:?}\nstate_dir = \"state\"\n", absolute.display().to_string()),
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.path, absolute);
        assert_eq!(loaded.data.state_dir, dir.path().join("state"));
        assert_eq!(loaded.state_store().path(), dir.path().join("state").join(STATE_FILE));
    }
}
