//! Filter choices offered by a roster

use multiverse_core::Character;
use multiverse_hint::HintField;
use serde::Serialize;

/// Episode ceiling offered even when every character appears in fewer episodes
const MIN_EPISODE_CEILING: usize = 10;

/// Distinct values a player can pick from when setting manual filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub species: Vec<String>,
    pub types: Vec<String>,
    pub genders: Vec<String>,
    pub origins: Vec<String>,
    pub locations: Vec<String>,
    pub max_episodes: usize,
}

impl FilterOptions {
    /// Collect distinct non-empty values per field, in first-seen order
    pub fn from_roster(characters: &[Character]) -> Self {
        let max_episodes = characters
            .iter()
            .map(Character::episode_count)
            .max()
            .unwrap_or(0)
            .max(MIN_EPISODE_CEILING);

        Self {
            statuses: distinct(characters, HintField::Status),
            species: distinct(characters, HintField::Species),
            types: distinct(characters, HintField::Subtype),
            genders: distinct(characters, HintField::Gender),
            origins: distinct(characters, HintField::Origin),
            locations: distinct(characters, HintField::Location),
            max_episodes,
        }
    }
}

fn distinct(characters: &[Character], field: HintField) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in characters.iter().filter_map(|c| field.value_of(c)) {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
