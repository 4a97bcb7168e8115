//! Hint type definitions

use multiverse_core::Character;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field the comparator reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HintField {
    Status,
    Species,
    /// The catalog's `type` field
    #[serde(rename = "type")]
    Subtype,
    Gender,
    Origin,
    Location,
    EpisodeCount,
}

impl HintField {
    /// Every tracked field, in the order hints are reported
    pub const ALL: [HintField; 7] = [
        HintField::Status,
        HintField::Species,
        HintField::Subtype,
        HintField::Gender,
        HintField::Origin,
        HintField::Location,
        HintField::EpisodeCount,
    ];

    /// Whether the field holds free text (everything except the episode count)
    pub fn is_categorical(&self) -> bool {
        !matches!(self, HintField::EpisodeCount)
    }

    /// Read this field's categorical value from a character.
    ///
    /// Returns `None` for `EpisodeCount`.
    pub fn value_of<'a>(&self, character: &'a Character) -> Option<&'a str> {
        match self {
            HintField::Status => character.status(),
            HintField::Species => character.species(),
            HintField::Subtype => character.subtype(),
            HintField::Gender => character.gender(),
            HintField::Origin => character.origin_name(),
            HintField::Location => character.location_name(),
            HintField::EpisodeCount => None,
        }
    }
}

impl fmt::Display for HintField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintField::Status => write!(f, "status"),
            HintField::Species => write!(f, "species"),
            HintField::Subtype => write!(f, "type"),
            HintField::Gender => write!(f, "gender"),
            HintField::Origin => write!(f, "origin"),
            HintField::Location => write!(f, "location"),
            HintField::EpisodeCount => write!(f, "episodes"),
        }
    }
}

impl FromStr for HintField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(HintField::Status),
            "species" => Ok(HintField::Species),
            "type" | "subtype" => Ok(HintField::Subtype),
            "gender" => Ok(HintField::Gender),
            "origin" => Ok(HintField::Origin),
            "location" => Ok(HintField::Location),
            "episodes" | "episodecount" => Ok(HintField::EpisodeCount),
            other => Err(format!(
                "unknown field '{}'; valid values: status, species, type, gender, origin, location, episodes",
                other
            )),
        }
    }
}

/// How a guessed field relates to the target's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintResult {
    Correct,
    Incorrect,
    /// Only produced for species
    Partial,
    /// Only produced for the episode count: the target has more episodes
    Higher,
    /// Only produced for the episode count: the target has fewer episodes
    Lower,
}

impl fmt::Display for HintResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintResult::Correct => write!(f, "correct"),
            HintResult::Incorrect => write!(f, "incorrect"),
            HintResult::Partial => write!(f, "partial"),
            HintResult::Higher => write!(f, "higher"),
            HintResult::Lower => write!(f, "lower"),
        }
    }
}

/// One per-field verdict for a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub field: HintField,
    pub result: HintResult,
}

impl Hint {
    pub fn new(field: HintField, result: HintResult) -> Self {
        Self { field, result }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wire_names() {
        let json = serde_json::to_string(&HintField::EpisodeCount).unwrap();
        assert_eq!(json, "\"episodeCount\"");
        let json = serde_json::to_string(&HintField::Subtype).unwrap();
        assert_eq!(json, "\"type\"");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Origin".parse::<HintField>(), Ok(HintField::Origin));
        assert_eq!("type".parse::<HintField>(), Ok(HintField::Subtype));
        assert!("hair".parse::<HintField>().is_err());
    }

    #[test]
    fn test_value_of() {
        let c = Character::new("1", "Rick Sanchez")
            .with_species("Human")
            .with_location("Citadel of Ricks");
        assert_eq!(HintField::Species.value_of(&c), Some("Human"));
        assert_eq!(HintField::Location.value_of(&c), Some("Citadel of Ricks"));
        assert_eq!(HintField::Gender.value_of(&c), None);
        assert_eq!(HintField::EpisodeCount.value_of(&c), None);
    }

    #[test]
    fn test_hint_display() {
        let hint = Hint::new(HintField::EpisodeCount, HintResult::Higher);
        assert_eq!(hint.to_string(), "episodes: higher");
    }
}
