//! Candidate filtering over the roster

use multiverse_constraint::{matches, Constraints};
use multiverse_core::Character;

/// Case-insensitive substring match on the display name.
///
/// Search text that is blank after trimming matches every name.
pub fn name_matches(character: &Character, search: &str) -> bool {
    search.trim().is_empty() || character.name.to_lowercase().contains(&search.to_lowercase())
}

/// Keep the characters whose name matches `search` and that satisfy
/// `constraints`, preserving roster order
pub fn filter_candidates<'a>(
    characters: &'a [Character],
    search: &str,
    constraints: &Constraints,
) -> Vec<&'a Character> {
    characters
        .iter()
        .filter(|c| name_matches(c, search))
        .filter(|c| matches(c, constraints))
        .collect()
}

/// Size of the live candidate pool
pub fn count_candidates(characters: &[Character], search: &str, constraints: &Constraints) -> usize {
    characters
        .iter()
        .filter(|c| name_matches(c, search) && matches(c, constraints))
        .count()
}
