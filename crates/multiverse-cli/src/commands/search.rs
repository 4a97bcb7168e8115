//! Search command

use super::{load_config, open_catalog, with_retry};
use anyhow::{bail, Context, Result};
use multiverse_catalog::RosterCache;
use multiverse_constraint::{load_constraints, ConstraintKey, Constraints};
use multiverse_query::{filter_candidates, format_json, format_text, format_toml};
use std::path::{Path, PathBuf};

pub struct SearchArgs<'a> {
    pub offline: Option<&'a Path>,
    pub text: String,
    pub status: Option<String>,
    pub species: Option<String>,
    pub subtype: Option<String>,
    pub gender: Option<String>,
    pub origin: Option<String>,
    pub location: Option<String>,
    pub min_episodes: Option<i64>,
    pub max_episodes: Option<i64>,
    pub preset: Option<PathBuf>,
    pub format: String,
}

pub fn run(args: SearchArgs) -> Result<()> {
    let config = load_config()?;
    let constraints = build_constraints(&args)?;
    let source = open_catalog(args.offline, &config)?;

    let cache = RosterCache::new();
    let roster = with_retry("Failed to load the roster", || cache.get_or_fetch(source.as_ref()))?;
    let candidates = filter_candidates(&roster.characters, &args.text, &constraints);

    let output = match args.format.as_str() {
        "text" => format!(
            "{}{} of {} characters",
            format_text(&candidates),
            candidates.len(),
            roster.characters.len()
        ),
        "json" => format_json(&candidates)?,
        "toml" => format_toml(&candidates)?,
        other => bail!("Unknown format: {}", other),
    };

    println!("{}", output);
    Ok(())
}

fn build_constraints(args: &SearchArgs) -> Result<Constraints> {
    let mut constraints = match &args.preset {
        Some(path) => load_constraints(path)
            .with_context(|| format!("Failed to load preset {}", path.display()))?,
        None => Constraints::new(),
    };

    let flags = [
        (ConstraintKey::Status, &args.status),
        (ConstraintKey::Species, &args.species),
        (ConstraintKey::Subtype, &args.subtype),
        (ConstraintKey::Gender, &args.gender),
        (ConstraintKey::Origin, &args.origin),
        (ConstraintKey::Location, &args.location),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            constraints.set(key, value.as_str());
        }
    }
    if args.min_episodes.is_some() {
        constraints.episode_min = args.min_episodes;
    }
    if args.max_episodes.is_some() {
        constraints.episode_max = args.max_episodes;
    }
    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SearchArgs<'static> {
        SearchArgs {
            offline: None,
            text: String::new(),
            status: None,
            species: None,
            subtype: None,
            gender: None,
            origin: None,
            location: None,
            min_episodes: None,
            max_episodes: None,
            preset: None,
            format: "text".to_string(),
        }
    }

    #[test]
    fn test_flags_become_constraints() {
        let mut a = args();
        a.subtype = Some("Parasite".to_string());
        a.min_episodes = Some(2);
        let cs = build_constraints(&a).unwrap();
        assert_eq!(cs.subtype.as_deref(), Some("Parasite"));
        assert_eq!(cs.episode_min, Some(2));
        assert_eq!(cs.episode_max, None);
    }

    #[test]
    fn test_no_flags_is_empty() {
        assert!(build_constraints(&args()).unwrap().is_empty());
    }
}
