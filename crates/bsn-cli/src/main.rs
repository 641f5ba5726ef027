//! bsn CLI - explore a blockchain account tag directory.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::annotate::{self, FilterScope};
use commands::graph::GraphArgs;

#[derive(Parser)]
#[command(name = "bsn")]
#[command(author, version, about = "bsn - Social graph explorer for account tag directories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory document to read (overrides [data] path in bsn.toml)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new bsn project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Search and rank accounts
    Accounts {
        /// Match name, about, or address prefix/suffix
        #[arg(short, long)]
        query: Option<String>,

        /// Only favorites
        #[arg(short, long)]
        favorites: bool,

        /// Show each account's given tags
        #[arg(short = 't', long)]
        with_tags: bool,

        /// Maximum accounts to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one account
    Account {
        /// Account address
        address: String,
    },

    /// List tag types by usage
    Tags,

    /// Show who gives and receives a tag
    Tag {
        /// Tag type
        name: String,
    },

    /// Rank volunteering targets
    Volunteers,

    /// Rank accounts by balance
    Balances {
        /// Token to rank by (default: sum of all holdings)
        #[arg(short, long)]
        token: Option<String>,

        /// Only favorites
        #[arg(short, long)]
        favorites: bool,
    },

    /// List tokens available for ranking
    Tokens,

    /// Explore relationships around an account
    Graph {
        /// Center account (default: the me account)
        #[arg(short, long)]
        center: Option<String>,

        /// Traversal depth
        #[arg(long)]
        depth: Option<usize>,

        /// Follow only this tag type
        #[arg(short, long)]
        tag: Option<String>,

        /// Canvas width
        #[arg(long)]
        width: Option<f64>,

        /// Canvas height
        #[arg(long)]
        height: Option<f64>,

        /// Print the laid-out graph as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorites
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Manage nicknames
    Nickname {
        #[command(subcommand)]
        command: NicknameCommands,
    },

    /// Manage the account you identify as
    Me {
        #[command(subcommand)]
        command: MeCommands,
    },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// Add or remove a favorite
    Toggle {
        /// Account address
        address: String,
    },

    /// List favorites
    List,

    /// Show only favorites in a list by default
    Filter {
        /// List the switch applies to
        #[arg(value_enum)]
        scope: FilterScope,

        /// on or off
        #[arg(action = clap::ArgAction::Set, value_parser = parse_switch)]
        enabled: bool,
    },
}

#[derive(Subcommand)]
enum NicknameCommands {
    /// Give an address a nickname
    Set {
        /// Account address
        address: String,
        /// Nickname
        nickname: String,
    },

    /// Remove a nickname
    Remove {
        /// Account address
        address: String,
    },

    /// List nicknames
    List,
}

#[derive(Subcommand)]
enum MeCommands {
    /// Set the me account
    Set {
        /// Account address
        address: String,
    },

    /// Forget the me account
    Clear,

    /// Show the me account
    Show,
}

fn parse_switch(value: &str) -> std::result::Result<bool, String> {
    match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("expected on or off, got {other}")),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data = cli.data.as_deref();
    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Accounts { query, favorites, with_tags, limit } => {
            commands::accounts::run(data, query.as_deref(), favorites, with_tags, limit)
        }
        Commands::Account { address } => commands::account::run(data, &address),
        Commands::Tags => commands::tags::list(data),
        Commands::Tag { name } => commands::tags::show(data, &name),
        Commands::Volunteers => commands::tags::volunteers(data),
        Commands::Balances { token, favorites } => {
            commands::balances::run(data, token.as_deref(), favorites)
        }
        Commands::Tokens => commands::balances::tokens(data),
        Commands::Graph { center, depth, tag, width, height, json } => commands::graph::run(
            data,
            GraphArgs {
                center,
                depth,
                tag,
                width,
                height,
                json,
            },
        ),
        Commands::Favorite { command } => match command {
            FavoriteCommands::Toggle { address } => annotate::toggle_favorite(&address),
            FavoriteCommands::List => annotate::list_favorites(),
            FavoriteCommands::Filter { scope, enabled } => {
                annotate::set_favorites_filter(scope, enabled)
            }
        },
        Commands::Nickname { command } => match command {
            NicknameCommands::Set { address, nickname } => {
                annotate::set_nickname(&address, &nickname)
            }
            NicknameCommands::Remove { address } => annotate::remove_nickname(&address),
            NicknameCommands::List => annotate::list_nicknames(),
        },
        Commands::Me { command } => match command {
            MeCommands::Set { address } => annotate::set_me(&address),
            MeCommands::Clear => annotate::clear_me(),
            MeCommands::Show => annotate::show_me(),
        },
    }
}
