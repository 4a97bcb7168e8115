//! CLI command implementations

pub mod character;
pub mod compare;
pub mod play;
pub mod scores;
pub mod search;

use anyhow::{Context, Result};
use multiverse_catalog::{CatalogSource, GraphQlCatalog, InMemoryCatalog};
use multiverse_core::Character;
use multiverse_hint::Hint;
use multiverse_session::MultiverseConfig;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn load_config() -> Result<MultiverseConfig> {
    MultiverseConfig::load().context("Failed to load config")
}

/// The offline roster when one is given, otherwise the configured endpoint
pub fn open_catalog(offline: Option<&Path>, config: &MultiverseConfig) -> Result<Box<dyn CatalogSource>> {
    match offline {
        Some(path) => {
            let catalog = InMemoryCatalog::load_from_file(path)
                .with_context(|| format!("Failed to load roster {}", path.display()))?;
            Ok(Box::new(catalog))
        }
        None => {
            tracing::debug!(endpoint = config.endpoint(), "using remote catalog");
            Ok(Box::new(GraphQlCatalog::new(config.endpoint())))
        }
    }
}

/// Run a catalog operation, offering to retry when the catalog is unreachable
pub fn with_retry<T>(what: &str, mut op: impl FnMut() -> multiverse_core::Result<T>) -> Result<T> {
    loop {
        let err = match op() {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        if err.is_catalog_failure() && confirm(&format!("{}: {}. Retry?", what, err))? {
            continue;
        }
        return Err(err).context(what.to_string());
    }
}

/// Ask a yes/no question on stdin; end of input means no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Multi-line description of a character
pub fn describe(c: &Character) -> String {
    let field = |v: Option<&str>| match v {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "Unknown".to_string(),
    };
    let mut out = format!("{} (#{})\n", c.name, c.id);
    out.push_str(&format!("  status:   {}\n", field(c.status())));
    out.push_str(&format!("  species:  {}\n", field(c.species())));
    out.push_str(&format!("  type:     {}\n", field(c.subtype())));
    out.push_str(&format!("  gender:   {}\n", field(c.gender())));
    out.push_str(&format!("  origin:   {}\n", field(c.origin_name())));
    out.push_str(&format!("  location: {}\n", field(c.location_name())));
    out.push_str(&format!("  episodes: {}", c.episode_count()));
    if let Some(image) = &c.image {
        out.push_str(&format!("\n  image:    {}", image));
    }
    out
}

/// Hint chips on one line
pub fn format_hints(hints: &[Hint]) -> String {
    hints
        .iter()
        .map(|h| format!("[{}]", h))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiverse_hint::{HintField, HintResult};

    #[test]
    fn test_describe_unknowns() {
        let c = Character::new("7", "Abradolf Lincler").with_species("Human").with_subtype("");
        let text = describe(&c);
        assert!(text.starts_with("Abradolf Lincler (#7)"));
        assert!(text.contains("species:  Human"));
        assert!(text.contains("type:     Unknown"));
        assert!(text.contains("episodes: 0"));
    }

    #[test]
    fn test_format_hints() {
        let hints = [
            Hint::new(HintField::Status, HintResult::Correct),
            Hint::new(HintField::EpisodeCount, HintResult::Higher),
        ];
        assert_eq!(format_hints(&hints), "[status: correct] [episodes: higher]");
    }
}
