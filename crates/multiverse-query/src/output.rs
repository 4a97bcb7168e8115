//! Candidate list formatting

use multiverse_core::{Character, Result};
use serde::Serialize;

/// Format candidates as JSON
pub fn format_json(candidates: &[&Character]) -> Result<String> {
    Ok(serde_json::to_string_pretty(candidates)?)
}

/// Format candidates as TOML
pub fn format_toml(candidates: &[&Character]) -> Result<String> {
    let wrapper = CandidateListWrapper {
        characters: candidates.iter().map(|c| CandidateRow::from(*c)).collect(),
    };
    Ok(toml::to_string_pretty(&wrapper)?)
}

/// Format candidates as one aligned line each, numbered from 1
pub fn format_text(candidates: &[&Character]) -> String {
    let mut out = String::new();
    for (i, c) in candidates.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}. {:<32} {:<8} {:<20} {:>3} ep\n",
            i + 1,
            c.name,
            c.status().unwrap_or("unknown"),
            c.species().unwrap_or("unknown"),
            c.episode_count()
        ));
    }
    out
}

/// TOML has no null, so rows carry flattened, defaulted fields
#[derive(Serialize)]
struct CandidateRow {
    id: String,
    name: String,
    status: String,
    species: String,
    #[serde(rename = "type")]
    subtype: String,
    gender: String,
    origin: String,
    location: String,
    episodes: usize,
}

impl From<&Character> for CandidateRow {
    fn from(c: &Character) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            status: c.status().unwrap_or_default().to_string(),
            species: c.species().unwrap_or_default().to_string(),
            subtype: c.subtype().unwrap_or_default().to_string(),
            gender: c.gender().unwrap_or_default().to_string(),
            origin: c.origin_name().unwrap_or_default().to_string(),
            location: c.location_name().unwrap_or_default().to_string(),
            episodes: c.episode_count(),
        }
    }
}

#[derive(Serialize)]
struct CandidateListWrapper {
    characters: Vec<CandidateRow>,
}
