//! Balance ranking.

use anyhow::Result;
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;

use super::{labelled, Workspace};

pub fn run(data: Option<&Path>, token: Option<&str>, favorites: bool) -> Result<()> {
    let ws = Workspace::open(data)?;
    let favorites_only = favorites || ws.state.balances_favorites_only;
    let ranked = rank_balances(&ws.directory, token, favorites_only, &ws.state);

    if ranked.is_empty() {
        println!("{} No balances to show", "•".yellow());
        return Ok(());
    }

    let key = token.filter(|t| !t.is_empty()).unwrap_or("total holdings");
    println!("{} Ranked by {}:", "→".blue(), key.cyan().bold());
    println!();

    for (i, entry) in ranked.iter().enumerate() {
        println!(
            "  {} {}{}",
            format!("{}.", i + 1).blue(),
            labelled(&ws.name(entry.address), entry.address),
            ws.badges(entry.address)
        );
        let holdings: Vec<String> = entry
            .balances
            .iter()
            .map(|(asset, amount)| {
                let text = format!("{asset} {}", format_amount(amount));
                if Some(asset.as_str()) == token {
                    text.cyan().to_string()
                } else {
                    text
                }
            })
            .collect();
        println!("      {}", holdings.join("  ").dimmed());
    }

    println!();
    println!("{} {} accounts", "✓".green(), ranked.len().to_string().cyan());
    Ok(())
}

/// Tokens available for `balances --token`.
pub fn tokens(data: Option<&Path>) -> Result<()> {
    let ws = Workspace::open(data)?;
    println!("{}", "Tokens".white().bold());
    for token in token_choices(&ws.directory) {
        println!("  {} {}", "·".dimmed(), token.cyan());
    }
    Ok(())
}
