//! Show one account in detail.

use anyhow::{bail, Result};
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;

use super::{labelled, Workspace};

pub fn run(data: Option<&Path>, address: &str) -> Result<()> {
    let ws = Workspace::open(data)?;
    let Some(account) = ws.directory.get(address) else {
        bail!(
            "Unknown account: {}. Try {} to find it.",
            address.cyan(),
            "bsn accounts --query".cyan()
        );
    };

    let index = ReceivedIndex::build(&ws.directory);
    let rating = RatingBreakdown::compute(Some(account), index.recognition_count(address));

    println!("{}{}", ws.name(address).white().bold(), ws.badges(address));
    println!("{}", address.dimmed());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Rating".blue().bold());
    println!("  Total:        {}", rating.total.to_string().cyan());
    println!("  Profile:      {}", rating.profile);
    println!("  Activity:     {}", rating.activity);
    println!("  Recognition:  {}", rating.recognition);
    println!();

    if let Some(profile) = &account.profile {
        println!("{}", "Profile".blue().bold());
        for (label, values) in [
            ("Name", &profile.name),
            ("About", &profile.about),
            ("Website", &profile.website),
        ] {
            for value in values.iter().filter(|v| !v.is_empty()) {
                println!("  {:<13} {}", format!("{label}:"), value);
            }
        }
        println!();
    }

    if account.has_balances() {
        println!("{}", "Balances".blue().bold());
        for (asset, amount) in &account.balances {
            println!("  {:<13} {}", asset.cyan(), format_amount(amount));
        }
        println!();
    }

    print_groups(&ws, "Tags given", &given_tag_groups(account));
    print_groups(&ws, "Tags received", &index.groups(address));

    Ok(())
}

fn print_groups(ws: &Workspace, title: &str, groups: &[TagGroup]) {
    if groups.is_empty() {
        return;
    }
    println!("{}", title.blue().bold());
    for group in groups {
        println!(
            "  {} {}",
            group.tag_type.cyan(),
            format!("({})", group.addresses.len()).dimmed()
        );
        for address in &group.addresses {
            println!("    {} {}", "·".dimmed(), labelled(&ws.name(address), address));
        }
    }
    println!();
}
