//! Score ledger commands

use super::load_config;
use anyhow::{Context, Result};
use clap::Subcommand;
use multiverse_session::{Score, ScoreLedger};

#[derive(Subcommand)]
pub enum ScoresCommands {
    /// List recorded wins, newest first
    List {
        /// Rank by fewest guesses, then fastest time
        #[arg(long)]
        leaderboard: bool,
    },

    /// Delete every recorded win
    Clear,
}

pub fn run(cmd: ScoresCommands) -> Result<()> {
    let config = load_config()?;
    let path = config
        .ledger_path()
        .context("Cannot locate the home directory; set MULTIVERSE_LEDGER")?;
    let ledger = ScoreLedger::open(&path);

    match cmd {
        ScoresCommands::List { leaderboard } => {
            let scores = if leaderboard {
                ledger.leaderboard()
            } else {
                ledger.list()
            }
            .context("Failed to read scores")?;

            if scores.is_empty() {
                println!("No scores yet.");
                return Ok(());
            }
            for (i, score) in scores.iter().enumerate() {
                println!("{:>3}. {}", i + 1, format_score(score));
            }
        }
        ScoresCommands::Clear => {
            ledger.clear().context("Failed to clear scores")?;
            println!("Cleared {}", path.display());
        }
    }
    Ok(())
}

fn format_score(score: &Score) -> String {
    let time = match score.time_ms {
        Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
        None => "-".to_string(),
    };
    format!(
        "{} guesses  {:<6}  {:>7}  {}",
        score.guesses,
        score.mode.to_string(),
        time,
        score.when.format("%Y-%m-%d %H:%M")
    )
}
