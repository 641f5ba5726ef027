//! Relationship explorer.

use anyhow::{bail, Context, Result};
use bsn::prelude::*;
use colored::Colorize;
use std::path::Path;

use super::{labelled, Workspace};

/// Options of `bsn graph`; unset values come from bsn.toml.
#[derive(Debug, Default)]
pub struct GraphArgs {
    pub center: Option<String>,
    pub depth: Option<usize>,
    pub tag: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub json: bool,
}

pub fn run(data: Option<&Path>, args: GraphArgs) -> Result<()> {
    let ws = Workspace::open(data)?;

    let Some(center) = args.center.or_else(|| ws.state.me.clone()) else {
        print_center_hint(&ws);
        bail!(
            "No center account. Pass {} or run {}.",
            "--center <address>".cyan(),
            "bsn me set <address>".cyan()
        );
    };

    let mut request = GraphRequest::new(center.as_str())
        .with_depth(args.depth.unwrap_or(ws.config.graph.depth));
    if let Some(tag) = args.tag {
        request = request.with_tag(tag);
    }

    let canvas = CircularLayout::new(
        args.width.unwrap_or(ws.config.graph.width),
        args.height.unwrap_or(ws.config.graph.height),
    );

    let mut graph = build_graph(&ws.directory, &request, &ws.state);
    canvas.apply(&mut graph, &center);

    if args.json {
        let json = serde_json::to_string_pretty(&graph).context("Failed to serialize graph")?;
        println!("{json}");
        return Ok(());
    }

    if !ws.directory.contains(&center) {
        println!(
            "{} {} is not in the directory; showing it alone",
            "•".yellow(),
            center.cyan()
        );
    }

    let tag = request.tag_filter.as_deref().unwrap_or("all tags");
    println!(
        "{} Relationships of {} (depth {}, {})",
        "→".blue(),
        ws.name(&center).cyan().bold(),
        request.depth,
        tag
    );
    println!();

    println!("{}", "Nodes".blue().bold());
    for node in graph.nodes() {
        println!(
            "  {} {} {}",
            labelled(&node.name, &node.address),
            format!("({:.0}, {:.0})", node.position.x, node.position.y).dimmed(),
            format!("{} connections", node.connections).dimmed()
        );
    }
    println!();

    println!("{}", "Edges".blue().bold());
    for edge in graph.edges() {
        let arrow = if edge.bidirectional { "↔" } else { "→" };
        println!(
            "  {} {} {}  {}",
            ws.name(&edge.from),
            arrow.yellow(),
            ws.name(&edge.to),
            edge.types.join(", ").cyan()
        );
    }
    println!();
    println!(
        "{} {} nodes, {} edges",
        "✓".green(),
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan()
    );

    Ok(())
}

fn print_center_hint(ws: &Workspace) {
    let named = named_accounts(&ws.directory, &ws.state);
    if named.is_empty() {
        return;
    }
    println!("{} Accounts with a name:", "→".blue());
    for account in named.iter().take(10) {
        println!("  {} {}", "·".dimmed(), labelled(&account.name, &account.address));
    }
    if named.len() > 10 {
        println!("  {}", format!("… and {} more", named.len() - 10).dimmed());
    }
    println!();
}
