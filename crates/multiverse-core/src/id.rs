//! Catalog character identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque character identifier as issued by the catalog.
///
/// The GraphQL catalog uses `ID` scalars, which arrive as strings even though
/// they are ordinal in practice. Identity comparisons never look inside the
/// string.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the identifier for a catalog ordinal (1-based)
    pub fn from_ordinal(ordinal: u32) -> Self {
        Self(ordinal.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterId({})", self.0)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
