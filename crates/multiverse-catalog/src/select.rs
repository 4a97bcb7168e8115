//! Random target selection
//!
//! Picks a random ordinal and fetches it directly. Catalog ids have gaps, so
//! a miss (or a failed lookup) falls back once to a random page of the
//! listing and a random character on it. A failure on the fallback path is
//! returned to the caller; there is no further retry.

use crate::source::CatalogSource;
use multiverse_core::{Character, CharacterId, MultiverseError, Result};
use rand::Rng;

/// Characters per listing page on the public catalog
pub const PAGE_SIZE: u32 = 20;

/// Select a target from a catalog of `population` characters
pub fn select_target<R: Rng + ?Sized>(
    source: &dyn CatalogSource,
    population: u32,
    rng: &mut R,
) -> Result<Character> {
    if population == 0 {
        return Err(MultiverseError::CharacterNotFound(
            "catalog is empty".to_string(),
        ));
    }

    let id = CharacterId::from_ordinal(rng.gen_range(1..=population));
    match source.fetch_character(&id) {
        Ok(Some(character)) => return Ok(character),
        Ok(None) => tracing::warn!(%id, "character not found, falling back to page pick"),
        Err(e) => tracing::warn!(%id, error = %e, "character lookup failed, falling back to page pick"),
    }

    let pages = population.div_ceil(PAGE_SIZE);
    let page_number = rng.gen_range(1..=pages);
    let mut page = source.fetch_page(page_number)?;
    if page.results.is_empty() {
        return Err(MultiverseError::CharacterNotFound(format!(
            "page {} has no characters",
            page_number
        )));
    }

    let index = rng.gen_range(0..page.results.len());
    Ok(page.results.swap_remove(index))
}

/// Learn the population size from the first listing page, then select
pub fn pick_random_character<R: Rng + ?Sized>(
    source: &dyn CatalogSource,
    rng: &mut R,
) -> Result<Character> {
    let first = source.fetch_page(1)?;
    select_target(source, first.info.count, rng)
}
