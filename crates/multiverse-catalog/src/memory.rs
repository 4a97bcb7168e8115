//! In-memory catalog source
//!
//! Serves a fixed roster with the same paging shape as the public API. Used
//! for offline play from a JSON dump and as the test double for everything
//! that talks to a catalog.

use crate::select::PAGE_SIZE;
use crate::source::{CatalogSource, CharacterPage, PageInfo};
use multiverse_core::{Character, CharacterId, MultiverseError, Result};
use std::path::Path;

/// A catalog backed by a vector of characters
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    characters: Vec<Character>,
    failure: Option<String>,
    lookup_failure: Option<String>,
}

impl InMemoryCatalog {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters,
            failure: None,
            lookup_failure: None,
        }
    }

    /// Load a roster dump: a JSON array of character records
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let characters: Vec<Character> = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            count = characters.len(),
            "loaded offline roster"
        );
        Ok(Self::new(characters))
    }

    /// Make every request fail as if the catalog were unreachable
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Make only fetch-by-id fail, leaving the listing intact
    pub fn failing_lookups(mut self, message: &str) -> Self {
        self.lookup_failure = Some(message.to_string());
        self
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    fn check_available(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(MultiverseError::CatalogUnavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn page_count(&self) -> u32 {
        (self.characters.len() as u32).div_ceil(PAGE_SIZE)
    }
}

impl CatalogSource for InMemoryCatalog {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_page(&self, page: u32) -> Result<CharacterPage> {
        self.check_available()?;

        let pages = self.page_count();
        let start = (page.max(1) as usize - 1) * PAGE_SIZE as usize;
        let results: Vec<Character> = self
            .characters
            .iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect();

        Ok(CharacterPage {
            info: PageInfo {
                count: self.characters.len() as u32,
                pages,
                next: (page < pages).then_some(page + 1),
                prev: (page > 1).then(|| page - 1),
            },
            results,
        })
    }

    fn fetch_character(&self, id: &CharacterId) -> Result<Option<Character>> {
        self.check_available()?;
        if let Some(message) = &self.lookup_failure {
            return Err(MultiverseError::CatalogUnavailable(message.clone()));
        }
        Ok(self.characters.iter().find(|c| &c.id == id).cloned())
    }
}
