//! Initialize a bsn project.

use anyhow::{Context, Result};
use bsn::prelude::*;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing bsn project...", "→".blue());

    let config = Config::default();

    // Create state directory
    let state_dir = base_path.join(&config.data.state_dir);
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("Failed to create {}", state_dir.display()))?;
    println!("  {} Created {}", "✓".green(), state_dir.display());

    // Create empty client state
    let store = StateStore::in_dir(&state_dir);
    if !store.path().exists() {
        store.save(&ClientState::default())?;
        println!("  {} Created {}", "✓".green(), store.path().display());
    }

    // Create default config
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    // Keep state and cache out of version control
    let gitignore_path = state_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, format!("{STATE_FILE}\n{CACHE_FILE}\n"))?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} bsn project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  {} Save the directory document as {}",
        "1.".blue(),
        config.data.path.display()
    );
    println!("  {} bsn accounts --query \"name\"", "2.".blue());
    println!("  {} bsn me set <address> && bsn graph", "3.".blue());

    Ok(())
}
