//! Loading manual filter presets from TOML

use crate::types::Constraints;
use multiverse_core::{MultiverseError, Result};
use std::fs;
use std::path::Path;

/// Parse a constraint record from a TOML string.
///
/// ```toml
/// status = "Alive"
/// type = "Parasite"
/// episode_min = 2
/// ```
pub fn parse_constraints(content: &str) -> Result<Constraints> {
    toml::from_str(content).map_err(|e| {
        MultiverseError::TomlParseError(format!("Failed to parse constraint preset: {}", e))
    })
}

/// Load a constraint record from a TOML file
pub fn load_constraints<P: AsRef<Path>>(path: P) -> Result<Constraints> {
    let content = fs::read_to_string(path)?;
    parse_constraints(&content)
}
