//! Multiverse Core - Foundational types for the guessing game
//!
//! This crate provides the core types that all other Multiverse crates depend on:
//! - `CharacterId` - Catalog identifiers
//! - `Character`, `PlaceRef`, `EpisodeRef` - The normalized character record
//! - `normalize` / `same_text` - The shared case-insensitive equality rule
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{MultiverseError, Result};
pub use id::CharacterId;
pub use types::{normalize, same_text, Character, EpisodeRef, PlaceRef};
