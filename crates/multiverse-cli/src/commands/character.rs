//! Character command

use super::{describe, load_config, open_catalog, with_retry};
use anyhow::{bail, Result};
use multiverse_core::CharacterId;
use std::path::Path;

pub fn run(offline: Option<&Path>, id: &str) -> Result<()> {
    let config = load_config()?;
    let source = open_catalog(offline, &config)?;
    let id = CharacterId::new(id.trim());

    match with_retry("Failed to fetch character", || source.fetch_character(&id))? {
        Some(character) => println!("{}", describe(&character)),
        None => bail!("Character not found: {}", id),
    }
    Ok(())
}
