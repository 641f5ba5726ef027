//! bsn Web - JSON API over an account directory.

use anyhow::{Context, Result};
use bsn::prelude::*;
use bsn_web::{routes, AppState};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bsn-web")]
#[command(version, about = "bsn Web - JSON API over an account directory")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory document
    #[arg(short, long, default_value = "bsn.json")]
    data: PathBuf,

    /// Last-good copy used when the document cannot be read
    #[arg(long)]
    cache: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    let mut source = DirectorySource::new(&cli.data);
    if let Some(cache) = cli.cache {
        source = source.with_cache(cache);
    }
    let directory = source
        .load()
        .with_context(|| format!("Failed to load directory: {}", cli.data.display()))?;

    // Create app state
    let state = AppState::new(directory);
    info!(accounts = state.directory.len(), "directory indexed");

    println!("Starting bsn Web API...");
    println!("Listening on http://{}", addr);

    // Build router
    let app = routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
