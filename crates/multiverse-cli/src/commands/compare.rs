//! Compare command

use super::{format_hints, load_config, open_catalog, with_retry};
use anyhow::{anyhow, Result};
use multiverse_catalog::CatalogSource;
use multiverse_core::{Character, CharacterId};
use multiverse_hint::{compare_guess, episode_advice, similarity, Temperature, MAX_SIMILARITY};
use std::path::Path;

pub fn run(offline: Option<&Path>, target_id: &str, guess_id: &str) -> Result<()> {
    let config = load_config()?;
    let source = open_catalog(offline, &config)?;

    let target = fetch(source.as_ref(), target_id)?;
    let guess = fetch(source.as_ref(), guess_id)?;

    let hints = compare_guess(&target, &guess);
    let score = similarity(&target, &guess);

    println!("target: {}", target.name);
    println!("guess:  {}", guess.name);
    println!("{}", format_hints(&hints));
    println!(
        "similarity: {}/{} ({})",
        score,
        MAX_SIMILARITY,
        Temperature::from_score(score)
    );
    if let Some(advice) = episode_advice(&hints) {
        println!("{}", advice);
    }
    Ok(())
}

fn fetch(source: &dyn CatalogSource, id: &str) -> Result<Character> {
    let id = CharacterId::new(id.trim());
    with_retry("Failed to fetch character", || source.fetch_character(&id))?
        .ok_or_else(|| anyhow!("Character not found: {}", id))
}
