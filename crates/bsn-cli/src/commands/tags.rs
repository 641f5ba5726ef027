//! Tag catalogue views.

use anyhow::Result;
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;

use super::{labelled, Workspace};

/// Every tag type with the number of accounts using it.
pub fn list(data: Option<&Path>) -> Result<()> {
    let ws = Workspace::open(data)?;
    let usage = tag_usage(&ws.directory);

    if usage.is_empty() {
        println!("{} No tags in this directory", "•".yellow());
        return Ok(());
    }

    println!("{}", "Tag usage".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    for entry in &usage {
        println!(
            "  {:<28} {}",
            entry.tag_type.cyan(),
            format!("{} accounts", entry.accounts).dimmed()
        );
    }
    println!();
    println!("{} {} tag types", "✓".green(), usage.len().to_string().cyan());
    Ok(())
}

/// Givers and receivers of one tag type.
pub fn show(data: Option<&Path>, tag_type: &str) -> Result<()> {
    let ws = Workspace::open(data)?;
    let details = tag_details(&ws.directory, tag_type);

    if details.givers.is_empty() {
        println!("{} Nobody uses the tag {}", "•".yellow(), tag_type.cyan());
        return Ok(());
    }

    println!("{} {}", "→".blue(), tag_type.cyan().bold());
    println!();
    print_parties(&ws, "Given by", &details.givers);
    print_parties(&ws, "Received by", &details.receivers);
    Ok(())
}

fn print_parties(ws: &Workspace, title: &str, parties: &[TagParty]) {
    println!("{} {}", title.blue().bold(), format!("({})", parties.len()).dimmed());
    for party in parties {
        println!("  {} {}", "·".dimmed(), labelled(&ws.name(&party.address), &party.address));
    }
    println!();
}

/// Accounts named most often as volunteering targets.
pub fn volunteers(data: Option<&Path>) -> Result<()> {
    let ws = Workspace::open(data)?;
    let list = bsn::query::tags::volunteers(&ws.directory);

    if list.is_empty() {
        println!("{} Nobody has tagged {} yet", "•".yellow(), VOLUNTEER_TAG.cyan());
        return Ok(());
    }

    println!("{} Volunteers ({}):", "→".blue(), VOLUNTEER_TAG.cyan());
    println!();
    for (i, volunteer) in list.iter().enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", i + 1).blue(),
            labelled(&ws.name(&volunteer.address), &volunteer.address),
            format!("×{}", volunteer.count).dimmed()
        );
    }
    Ok(())
}
