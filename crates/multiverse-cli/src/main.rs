//! Multiverse CLI - Interdimensional guess-who in the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{character, compare, play, scores, search};
use multiverse_session::GameMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multiverse")]
#[command(about = "Guess the hidden Rick and Morty character", long_about = None)]
#[command(version)]
struct Cli {
    /// Use a local roster dump (JSON array of characters) instead of the API
    #[arg(long, global = true)]
    offline: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Game mode (normal or hard)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<GameMode>,

        /// Narrow the candidate list automatically after each guess
        #[arg(long)]
        auto_narrow: bool,

        /// Seed for target selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search the roster
    Search {
        /// Text to look for in character names
        #[arg(default_value = "")]
        text: String,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        species: Option<String>,

        /// The catalog's sub-species field
        #[arg(long = "type")]
        subtype: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        origin: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        min_episodes: Option<i64>,

        #[arg(long)]
        max_episodes: Option<i64>,

        /// Constraint preset file (TOML); flags override its keys
        #[arg(long)]
        preset: Option<PathBuf>,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show one character
    Character {
        /// Catalog id
        id: String,
    },

    /// Compare a guess against a target
    Compare {
        /// Catalog id of the target
        target: String,

        /// Catalog id of the guess
        guess: String,
    },

    /// Score ledger operations
    #[command(subcommand)]
    Scores(scores::ScoresCommands),
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    s.parse()
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let offline = cli.offline.as_deref();

    match cli.command {
        Commands::Play {
            mode,
            auto_narrow,
            seed,
        } => play::run(play::PlayArgs {
            offline,
            mode,
            auto_narrow,
            seed,
        }),
        Commands::Search {
            text,
            status,
            species,
            subtype,
            gender,
            origin,
            location,
            min_episodes,
            max_episodes,
            preset,
            format,
        } => search::run(search::SearchArgs {
            offline,
            text,
            status,
            species,
            subtype,
            gender,
            origin,
            location,
            min_episodes,
            max_episodes,
            preset,
            format,
        }),
        Commands::Character { id } => character::run(offline, &id),
        Commands::Compare { target, guess } => compare::run(offline, &target, &guess),
        Commands::Scores(cmd) => scores::run(cmd),
    }
}
