//! Search and rank accounts.

use anyhow::Result;
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;

use super::{labelled, Workspace};

pub fn run(
    data: Option<&Path>,
    query: Option<&str>,
    favorites: bool,
    with_tags: bool,
    limit: Option<usize>,
) -> Result<()> {
    let ws = Workspace::open(data)?;
    let limit = limit.unwrap_or(ws.config.search.limit);

    let mut filter = AccountFilter::query(query.unwrap_or_default());
    if favorites || ws.state.show_favorites_only {
        filter = filter.favorites_only();
    }
    if with_tags {
        filter = filter.with_tags();
    }

    let ratings = RatingTable::build(&ws.directory);
    let results = search(&ws.directory, &filter, ws.state.favorite_set(), &ratings);

    if results.is_empty() {
        match query {
            Some(q) => println!("{} No accounts match: {}", "•".yellow(), q.cyan()),
            None => println!("{} No accounts to show", "•".yellow()),
        }
        return Ok(());
    }

    let heading = match query.filter(|q| !q.trim().is_empty()) {
        Some(q) => format!("Accounts matching {}", q.cyan().bold()),
        None => "Accounts by rating".to_string(),
    };
    let scope = if filter.favorites_only { " (favorites)" } else { "" };
    println!("{} {}{}:", "→".blue(), heading, scope.dimmed());
    println!();

    for (i, entry) in results.iter().take(limit).enumerate() {
        let rank = format!("{}.", i + 1);
        let rating = ratings.rating(entry.address);
        println!(
            "  {} {} {}{}",
            rank.blue(),
            labelled(&ws.name(entry.address), entry.address),
            format!("(rating {rating})").dimmed(),
            ws.badges(entry.address)
        );

        if filter.tag_mode == TagMode::WithTags {
            for group in given_tag_groups(entry.account) {
                println!(
                    "      {} {}",
                    group.tag_type.cyan(),
                    format!("→ {}", group.addresses.len()).dimmed()
                );
            }
        }
    }

    println!();
    let shown = results.len().min(limit);
    if shown < results.len() {
        println!(
            "{} {} of {} accounts (use {} to see more)",
            "✓".green(),
            shown.to_string().cyan(),
            results.len(),
            "--limit".cyan()
        );
    } else {
        println!("{} {} accounts", "✓".green(), results.len().to_string().cyan());
    }

    Ok(())
}
