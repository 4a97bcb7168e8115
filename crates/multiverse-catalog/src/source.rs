//! Catalog source trait and page types

use multiverse_core::{Character, CharacterId, Result};
use serde::{Deserialize, Serialize};

/// Paging metadata returned with every listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of characters in the catalog
    pub count: u32,
    /// Total number of pages
    pub pages: u32,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
}

/// One page of the character listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    #[serde(default)]
    pub results: Vec<Character>,
}

/// Trait implemented by each character source (GraphQL API, in-memory roster)
pub trait CatalogSource: Send + Sync {
    /// Source name for logging (e.g. "graphql", "memory")
    fn name(&self) -> &str;

    /// Fetch one 1-based page of the listing
    fn fetch_page(&self, page: u32) -> Result<CharacterPage>;

    /// Fetch a single character. `Ok(None)` means the catalog has no such id.
    fn fetch_character(&self, id: &CharacterId) -> Result<Option<Character>>;
}
