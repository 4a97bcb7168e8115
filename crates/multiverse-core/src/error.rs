//! Error types for Multiverse

use thiserror::Error;

/// The main error type for Multiverse operations
#[derive(Debug, Error)]
pub enum MultiverseError {
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Game is already over")]
    GameOver,

    #[error("Character already guessed: {0}")]
    AlreadyGuessed(String),

    #[error("No hint tokens left")]
    NoHintTokens,

    #[error("Field cannot be revealed: {0}")]
    InvalidHint(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Multiverse operations
pub type Result<T> = std::result::Result<T, MultiverseError>;

impl From<toml::de::Error> for MultiverseError {
    fn from(err: toml::de::Error) -> Self {
        MultiverseError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for MultiverseError {
    fn from(err: toml::ser::Error) -> Self {
        MultiverseError::TomlSerError(err.to_string())
    }
}

impl MultiverseError {
    /// Whether the error came from talking to the catalog (worth a retry prompt)
    pub fn is_catalog_failure(&self) -> bool {
        matches!(
            self,
            MultiverseError::CatalogUnavailable(_) | MultiverseError::GraphQl(_)
        )
    }
}
