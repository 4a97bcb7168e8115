//! Character record types

use crate::id::CharacterId;
use serde::{Deserialize, Deserializer, Serialize};

/// Normalize a categorical value for comparison: absent becomes empty,
/// surrounding whitespace is trimmed and the result is lowercased.
pub fn normalize(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed equality. Two absent values are equal.
pub fn same_text(a: Option<&str>, b: Option<&str>) -> bool {
    normalize(a) == normalize(b)
}

/// A reference to a location (origin or last known location)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRef {
    #[serde(default)]
    pub name: Option<String>,
}

/// A reference to one episode the character appears in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    pub id: String,
}

/// One character record from the catalog.
///
/// Every categorical attribute is optional; the catalog regularly returns
/// empty strings or nulls for `type` and unknown places. Accessors return
/// `None` for missing values and the engine treats `None` as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    /// The catalog's `type` field (sub-species, e.g. "Parasite")
    #[serde(default, rename = "type")]
    pub subtype: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub origin: Option<PlaceRef>,
    #[serde(default)]
    pub location: Option<PlaceRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub episode: Vec<EpisodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Character {
    /// Create a character with only an id and a name set
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            species: None,
            subtype: None,
            gender: None,
            origin: None,
            location: None,
            episode: Vec::new(),
            image: None,
        }
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_species(mut self, species: &str) -> Self {
        self.species = Some(species.to_string());
        self
    }

    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.subtype = Some(subtype.to_string());
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_origin(mut self, name: &str) -> Self {
        self.origin = Some(PlaceRef {
            name: Some(name.to_string()),
        });
        self
    }

    pub fn with_location(mut self, name: &str) -> Self {
        self.location = Some(PlaceRef {
            name: Some(name.to_string()),
        });
        self
    }

    /// Give the character `count` synthetic episode appearances
    pub fn with_episode_count(mut self, count: usize) -> Self {
        self.episode = (1..=count)
            .map(|n| EpisodeRef { id: n.to_string() })
            .collect();
        self
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn origin_name(&self) -> Option<&str> {
        self.origin.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().and_then(|p| p.name.as_deref())
    }

    /// Number of episode appearances, the only numeric attribute the game uses
    pub fn episode_count(&self) -> usize {
        self.episode.len()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<EpisodeRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EpisodeRef>>::deserialize(deserializer)?.unwrap_or_default())
}
