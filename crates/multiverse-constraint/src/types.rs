//! Constraint type definitions

use multiverse_hint::HintField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A key the player can set or clear on the constraint record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKey {
    Status,
    Species,
    #[serde(rename = "type")]
    Subtype,
    Gender,
    Origin,
    Location,
    /// Both episode bounds together
    Episodes,
}

impl ConstraintKey {
    pub const ALL: [ConstraintKey; 7] = [
        ConstraintKey::Status,
        ConstraintKey::Species,
        ConstraintKey::Subtype,
        ConstraintKey::Gender,
        ConstraintKey::Origin,
        ConstraintKey::Location,
        ConstraintKey::Episodes,
    ];

    /// The constraint key that narrows on a hint field
    pub fn for_field(field: HintField) -> Self {
        match field {
            HintField::Status => ConstraintKey::Status,
            HintField::Species => ConstraintKey::Species,
            HintField::Subtype => ConstraintKey::Subtype,
            HintField::Gender => ConstraintKey::Gender,
            HintField::Origin => ConstraintKey::Origin,
            HintField::Location => ConstraintKey::Location,
            HintField::EpisodeCount => ConstraintKey::Episodes,
        }
    }
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKey::Status => write!(f, "status"),
            ConstraintKey::Species => write!(f, "species"),
            ConstraintKey::Subtype => write!(f, "type"),
            ConstraintKey::Gender => write!(f, "gender"),
            ConstraintKey::Origin => write!(f, "origin"),
            ConstraintKey::Location => write!(f, "location"),
            ConstraintKey::Episodes => write!(f, "episodes"),
        }
    }
}

impl FromStr for ConstraintKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<HintField>().map(ConstraintKey::for_field)
    }
}

/// Accumulated narrowing predicates.
///
/// Every key is optional; an unset key restricts nothing. Categorical values
/// are compared case-insensitively. Episode bounds are inclusive and signed:
/// a `lower` hint on a zero-episode guess drives `episode_max` to -1, which
/// no character satisfies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_max: Option<i64>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no key is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The categorical value constrained for a key (`None` for `Episodes`)
    pub fn value(&self, key: ConstraintKey) -> Option<&str> {
        match key {
            ConstraintKey::Status => self.status.as_deref(),
            ConstraintKey::Species => self.species.as_deref(),
            ConstraintKey::Subtype => self.subtype.as_deref(),
            ConstraintKey::Gender => self.gender.as_deref(),
            ConstraintKey::Origin => self.origin.as_deref(),
            ConstraintKey::Location => self.location.as_deref(),
            ConstraintKey::Episodes => None,
        }
    }

    /// Set a categorical key. Setting `Episodes` is a no-op; use the bounds.
    pub fn set(&mut self, key: ConstraintKey, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            ConstraintKey::Status => self.status = value,
            ConstraintKey::Species => self.species = value,
            ConstraintKey::Subtype => self.subtype = value,
            ConstraintKey::Gender => self.gender = value,
            ConstraintKey::Origin => self.origin = value,
            ConstraintKey::Location => self.location = value,
            ConstraintKey::Episodes => {}
        }
    }

    /// Clear one key. `Episodes` clears both bounds.
    pub fn clear(&mut self, key: ConstraintKey) {
        match key {
            ConstraintKey::Status => self.status = None,
            ConstraintKey::Species => self.species = None,
            ConstraintKey::Subtype => self.subtype = None,
            ConstraintKey::Gender => self.gender = None,
            ConstraintKey::Origin => self.origin = None,
            ConstraintKey::Location => self.location = None,
            ConstraintKey::Episodes => {
                self.episode_min = None;
                self.episode_max = None;
            }
        }
    }

    /// Active keys with their display values, in `ConstraintKey::ALL` order
    pub fn active(&self) -> Vec<(ConstraintKey, String)> {
        ConstraintKey::ALL
            .iter()
            .filter_map(|&key| {
                let shown = match key {
                    ConstraintKey::Episodes => self.episode_range_label(),
                    _ => self.value(key).map(str::to_string),
                };
                shown.map(|v| (key, v))
            })
            .collect()
    }

    fn episode_range_label(&self) -> Option<String> {
        match (self.episode_min, self.episode_max) {
            (None, None) => None,
            (Some(min), Some(max)) if min == max => Some(min.to_string()),
            (min, max) => Some(format!(
                "{}–{}",
                min.unwrap_or(0),
                max.map(|m| m.to_string()).unwrap_or_else(|| "∞".to_string())
            )),
        }
    }
}
