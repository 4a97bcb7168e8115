//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `MULTIVERSE_*`
//! 2. Project-local: `.multiverse/config.toml`
//! 3. Global: `~/.multiverse/config.toml`

use crate::ledger::ScoreLedger;
use crate::session::{GameMode, SessionRules};
use multiverse_catalog::DEFAULT_ENDPOINT;
use multiverse_core::{MultiverseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_ENDPOINT: &str = "MULTIVERSE_ENDPOINT";
pub const ENV_MODE: &str = "MULTIVERSE_MODE";
pub const ENV_MAX_GUESSES: &str = "MULTIVERSE_MAX_GUESSES";
pub const ENV_HINT_TOKENS: &str = "MULTIVERSE_HINT_TOKENS";
pub const ENV_AUTO_NARROW: &str = "MULTIVERSE_AUTO_NARROW";
pub const ENV_LEDGER: &str = "MULTIVERSE_LEDGER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Game rule overrides; unset keys fall back to the mode's stock rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub mode: Option<GameMode>,
    #[serde(default)]
    pub max_guesses: Option<u32>,
    #[serde(default)]
    pub hint_tokens: Option<u32>,
    #[serde(default)]
    pub auto_narrow: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiverseConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl MultiverseConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = MultiverseConfig::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        let local_path = PathBuf::from(".multiverse/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            config.merge(local);
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file path only, with env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn endpoint(&self) -> &str {
        self.catalog.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Rules for a game, starting from the stock rules of `mode` (or the
    /// configured mode) and applying any configured overrides
    pub fn rules(&self, mode: Option<GameMode>) -> SessionRules {
        let mode = mode.or(self.game.mode).unwrap_or_default();
        let mut rules = SessionRules::for_mode(mode);
        if let Some(max_guesses) = self.game.max_guesses {
            rules.max_guesses = max_guesses;
        }
        if let Some(hint_tokens) = self.game.hint_tokens {
            rules.hint_tokens = hint_tokens;
        }
        if let Some(auto_narrow) = self.game.auto_narrow {
            rules.auto_narrow = auto_narrow;
        }
        rules
    }

    /// Ledger location, if one can be determined
    pub fn ledger_path(&self) -> Option<PathBuf> {
        self.ledger.path.clone().or_else(ScoreLedger::default_path)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".multiverse").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<MultiverseConfig> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            MultiverseError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, overlay: MultiverseConfig) {
        if overlay.catalog.endpoint.is_some() {
            self.catalog.endpoint = overlay.catalog.endpoint;
        }
        if overlay.game.mode.is_some() {
            self.game.mode = overlay.game.mode;
        }
        if overlay.game.max_guesses.is_some() {
            self.game.max_guesses = overlay.game.max_guesses;
        }
        if overlay.game.hint_tokens.is_some() {
            self.game.hint_tokens = overlay.game.hint_tokens;
        }
        if overlay.game.auto_narrow.is_some() {
            self.game.auto_narrow = overlay.game.auto_narrow;
        }
        if overlay.ledger.path.is_some() {
            self.ledger.path = overlay.ledger.path;
        }
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.catalog.endpoint = Some(endpoint);
        }
        if let Some(mode) = lookup(ENV_MODE) {
            self.game.mode = Some(mode.parse().map_err(MultiverseError::ConfigError)?);
        }
        if let Some(value) = lookup(ENV_MAX_GUESSES) {
            self.game.max_guesses = Some(parse_env(ENV_MAX_GUESSES, &value)?);
        }
        if let Some(value) = lookup(ENV_HINT_TOKENS) {
            self.game.hint_tokens = Some(parse_env(ENV_HINT_TOKENS, &value)?);
        }
        if let Some(value) = lookup(ENV_AUTO_NARROW) {
            self.game.auto_narrow = Some(parse_env(ENV_AUTO_NARROW, &value)?);
        }
        if let Some(path) = lookup(ENV_LEDGER) {
            self.ledger.path = Some(PathBuf::from(path));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MultiverseError::ConfigError(format!("Invalid value for {}: '{}'", key, value)))
}
