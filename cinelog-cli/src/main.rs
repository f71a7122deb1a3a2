//! cinelog CLI
//!
//! Command-line frontend for the community film-rating ledger: register
//! members, ingest their letterboxd histories, and query aggregates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cinelog_store::{DataPaths, resolve_data_root};

mod commands;
mod error;

use crate::commands::{config, ingest, register, stats, users};

#[derive(Parser)]
#[command(name = "cinelog")]
#[command(about = "Track and aggregate a community's letterboxd ratings", long_about = None)]
struct Cli {
    /// Data directory holding registry.json, ratings.json and cache.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Suppress spinners and progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a member's letterboxd handle and ingest their history
    Register {
        /// Community id (e.g., the chat server id)
        community: String,
        /// Member name within the community
        user: String,
        /// letterboxd handle to scrape
        handle: String,

        /// Register without running the initial scrape
        #[arg(long)]
        no_sync: bool,
    },

    /// Remove a member and scrub their ratings from the community
    Remove {
        community: String,
        user: String,
    },

    /// Re-ingest rating histories for one member or everyone
    Update {
        community: String,
        /// Member to update (defaults to every registered member)
        user: Option<String>,
    },

    /// Show a film's ratings and community average
    Avg {
        community: String,
        /// Film title, with or without the release year
        film: String,
    },

    /// Top-rated films seen by enough members
    Top {
        community: String,

        /// Minimum number of members who logged the film
        #[arg(long, default_value_t = 5)]
        min_members: usize,
    },

    /// List a community's registered members
    Users {
        community: String,
    },

    /// Manage the saved data-directory setting
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved data directory and settings file path
    Show,

    /// Save a data directory as the default
    SetRoot { path: PathBuf },

    /// Clear the saved data directory
    ClearRoot,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let paths = DataPaths::under(&resolve_data_root(cli.data_dir.clone()));

    let result = match cli.command {
        Commands::Register {
            community,
            user,
            handle,
            no_sync,
        } => register::run_register(&paths, &community, &user, &handle, no_sync, cli.quiet),
        Commands::Remove { community, user } => register::run_remove(&paths, &community, &user),
        Commands::Update { community, user } => {
            ingest::run_update(&paths, &community, user.as_deref(), cli.quiet)
        }
        Commands::Avg { community, film } => stats::run_avg(&paths, &community, &film),
        Commands::Top {
            community,
            min_members,
        } => stats::run_top(&paths, &community, min_members),
        Commands::Users { community } => users::run_users(&paths, &community),
        Commands::Config { action } => match action {
            ConfigAction::Show => config::run_show(cli.data_dir),
            ConfigAction::SetRoot { path } => config::run_set_root(&path),
            ConfigAction::ClearRoot => config::run_clear_root(),
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
