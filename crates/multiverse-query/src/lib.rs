//! Multiverse Query - Candidate pool filtering
//!
//! Narrows the roster by free-text name search and the active constraints,
//! and formats the resulting candidate list.

mod filter;
mod output;

pub use filter::{count_candidates, filter_candidates, name_matches};
pub use output::{format_json, format_text, format_toml};
