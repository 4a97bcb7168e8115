//! Field-by-field comparison of a guess against the target

use crate::types::{Hint, HintField, HintResult};
use multiverse_core::{same_text, Character};
use std::cmp::Ordering;

/// Compare a guess against the target.
///
/// Always returns seven hints in `HintField::ALL` order. Categorical fields
/// use case-insensitive, trimmed equality. A species mismatch is reported as
/// `Partial`, never `Incorrect`. The episode hint points from the guess
/// towards the target: `Higher` means the target appears in more episodes.
pub fn compare_guess(target: &Character, guess: &Character) -> Vec<Hint> {
    HintField::ALL
        .iter()
        .map(|&field| Hint::new(field, compare_field(field, target, guess)))
        .collect()
}

fn compare_field(field: HintField, target: &Character, guess: &Character) -> HintResult {
    match field {
        HintField::EpisodeCount => match target.episode_count().cmp(&guess.episode_count()) {
            Ordering::Equal => HintResult::Correct,
            Ordering::Greater => HintResult::Higher,
            Ordering::Less => HintResult::Lower,
        },
        HintField::Species => {
            if same_text(target.species(), guess.species()) {
                HintResult::Correct
            } else {
                HintResult::Partial
            }
        }
        _ => {
            if same_text(field.value_of(target), field.value_of(guess)) {
                HintResult::Correct
            } else {
                HintResult::Incorrect
            }
        }
    }
}

/// Player-facing advice for the episode hint of a guess, if any
pub fn episode_advice(hints: &[Hint]) -> Option<&'static str> {
    let hint = hints.iter().find(|h| h.field == HintField::EpisodeCount)?;
    match hint.result {
        HintResult::Higher => Some("Try characters with more episodes"),
        HintResult::Lower => Some("Try characters with fewer episodes"),
        _ => None,
    }
}
