//! Favorites, nicknames and the "me" account.

use anyhow::{bail, Result};
use colored::Colorize;

use super::open_state;

/// Which list a favorites-only switch applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FilterScope {
    Accounts,
    Balances,
}

pub fn toggle_favorite(address: &str) -> Result<()> {
    if address.is_empty() {
        bail!("Address must not be empty");
    }
    let (store, _) = open_state()?;
    let now_favorite = store.update(|state| state.toggle_favorite(address))?;
    if now_favorite {
        println!("{} Added {} to favorites", "✓".green(), address.cyan());
    } else {
        println!("{} Removed {} from favorites", "✓".green(), address.cyan());
    }
    Ok(())
}

pub fn list_favorites() -> Result<()> {
    let (_, state) = open_state()?;
    if state.favorites.is_empty() {
        println!("{} No favorites yet", "•".yellow());
        return Ok(());
    }
    println!("{}", "Favorites".white().bold());
    for address in &state.favorites {
        let nickname = state
            .nicknames
            .get(address)
            .map(|n| format!(" ({n})"))
            .unwrap_or_default();
        println!("  {} {}{}", "★".yellow(), address.cyan(), nickname.dimmed());
    }
    Ok(())
}

pub fn set_favorites_filter(scope: FilterScope, enabled: bool) -> Result<()> {
    let (store, _) = open_state()?;
    store.update(|state| match scope {
        FilterScope::Accounts => state.show_favorites_only = enabled,
        FilterScope::Balances => state.balances_favorites_only = enabled,
    })?;
    let label = match scope {
        FilterScope::Accounts => "accounts",
        FilterScope::Balances => "balances",
    };
    let mode = if enabled { "favorites only" } else { "everyone" };
    println!("{} {} now show {}", "✓".green(), label.cyan(), mode);
    Ok(())
}

pub fn set_nickname(address: &str, nickname: &str) -> Result<()> {
    if address.is_empty() {
        bail!("Address must not be empty");
    }
    let (store, _) = open_state()?;
    store.update(|state| state.set_nickname(address, nickname))?;
    println!("{} {} is now {}", "✓".green(), address.cyan(), nickname.white().bold());
    Ok(())
}

pub fn remove_nickname(address: &str) -> Result<()> {
    let (store, _) = open_state()?;
    match store.update(|state| state.remove_nickname(address))? {
        Some(old) => println!("{} Removed nickname {} from {}", "✓".green(), old.white(), address.cyan()),
        None => println!("{} {} has no nickname", "•".yellow(), address.cyan()),
    }
    Ok(())
}

pub fn list_nicknames() -> Result<()> {
    let (_, state) = open_state()?;
    if state.nicknames.is_empty() {
        println!("{} No nicknames yet", "•".yellow());
        return Ok(());
    }
    println!("{}", "Nicknames".white().bold());
    for (address, nickname) in &state.nicknames {
        println!("  {:<20} {}", nickname.white().bold(), address.dimmed());
    }
    Ok(())
}

pub fn set_me(address: &str) -> Result<()> {
    if address.is_empty() {
        bail!("Address must not be empty");
    }
    let (store, _) = open_state()?;
    store.update(|state| state.set_me(address))?;
    println!("{} You are {}", "✓".green(), address.cyan());
    Ok(())
}

pub fn clear_me() -> Result<()> {
    let (store, _) = open_state()?;
    store.update(|state| state.clear_me())?;
    println!("{} Cleared the me account", "✓".green());
    Ok(())
}

pub fn show_me() -> Result<()> {
    let (_, state) = open_state()?;
    match &state.me {
        Some(address) => println!("{} You are {}", "→".blue(), address.cyan()),
        None => println!(
            "{} No me account. Set one with {}",
            "•".yellow(),
            "bsn me set <address>".cyan()
        ),
    }
    Ok(())
}
