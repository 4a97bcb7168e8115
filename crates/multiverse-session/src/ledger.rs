//! Score ledger
//!
//! Finished games are kept newest-first in a single JSON file, capped at
//! `MAX_ENTRIES`. A missing file is an empty ledger.

use crate::session::GameMode;
use chrono::{DateTime, Utc};
use multiverse_core::{MultiverseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_ENTRIES: usize = 50;

/// One won game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub guesses: u32,
    pub mode: GameMode,
    /// RFC 3339 timestamp of the win
    pub when: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
}

impl Score {
    /// A score stamped with the current time
    pub fn new(guesses: u32, mode: GameMode, time_ms: Option<u64>) -> Self {
        Self {
            guesses,
            mode,
            when: Utc::now(),
            time_ms,
        }
    }
}

/// File-backed score ledger
pub struct ScoreLedger {
    path: PathBuf,
}

impl ScoreLedger {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `~/.multiverse/scores.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".multiverse").join("scores.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest first
    pub fn list(&self) -> Result<Vec<Score>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            MultiverseError::LedgerError(format!(
                "Failed to parse ledger {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Insert a score at the front and drop anything past the cap
    pub fn record(&self, score: Score) -> Result<()> {
        let mut scores = self.list()?;
        scores.insert(0, score);
        scores.truncate(MAX_ENTRIES);
        self.save(&scores)?;
        tracing::debug!(path = %self.path.display(), entries = scores.len(), "score recorded");
        Ok(())
    }

    /// Remove every entry
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Entries ranked by fewest guesses, then shortest time; untimed entries last
    pub fn leaderboard(&self) -> Result<Vec<Score>> {
        let mut scores = self.list()?;
        scores.sort_by_key(|s| (s.guesses, s.time_ms.is_none(), s.time_ms));
        Ok(scores)
    }

    fn save(&self, scores: &[Score]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(scores).map_err(|e| {
            MultiverseError::LedgerError(format!("Failed to serialize scores: {}", e))
        })?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
