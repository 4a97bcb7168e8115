//! Multiverse Catalog - Character data acquisition
//!
//! Provides a pluggable catalog source (the public GraphQL API or an
//! in-memory roster), a roster cache that fetches the whole catalog at most
//! once at a time, and random target selection with a page-based fallback.

pub mod cache;
pub mod graphql;
pub mod memory;
pub mod select;
pub mod source;

pub use cache::{CacheStatus, Roster, RosterCache};
pub use graphql::{GraphQlCatalog, DEFAULT_ENDPOINT};
pub use memory::InMemoryCatalog;
pub use select::{pick_random_character, select_target, PAGE_SIZE};
pub use source::{CatalogSource, CharacterPage, PageInfo};
