//! Folding hints and revealed target values into constraints

use crate::types::{ConstraintKey, Constraints};
use multiverse_core::Character;
use multiverse_hint::{Hint, HintField, HintResult};

/// Fold a guess's hints into a new constraint record.
///
/// The previous record is left untouched. Episode hints move the bounds
/// (`Higher` raises the minimum past the guess, `Lower` drops the maximum
/// below it, `Correct` pins both). A `Correct` categorical hint copies the
/// guess's non-empty value. A species `Partial` also copies the guess's
/// species, so every guess's species ends up constrained.
pub fn apply_hint(constraints: &Constraints, hints: &[Hint], guess: &Character) -> Constraints {
    let mut next = constraints.clone();
    let guessed = guess.episode_count() as i64;

    for hint in hints {
        if hint.field == HintField::EpisodeCount {
            match hint.result {
                HintResult::Higher => {
                    next.episode_min = Some(next.episode_min.unwrap_or(0).max(guessed + 1));
                }
                HintResult::Lower => {
                    next.episode_max = Some(match next.episode_max {
                        Some(max) => max.min(guessed - 1),
                        None => guessed - 1,
                    });
                }
                HintResult::Correct => {
                    next.episode_min = Some(guessed);
                    next.episode_max = Some(guessed);
                }
                _ => {}
            }
            continue;
        }

        let copy_value = hint.result == HintResult::Correct
            || (hint.field == HintField::Species && hint.result == HintResult::Partial);
        if copy_value {
            if let Some(value) = hint.field.value_of(guess).filter(|v| !v.is_empty()) {
                next.set(ConstraintKey::for_field(hint.field), value);
            }
        }
    }

    tracing::debug!(guess = %guess.id, active = next.active().len(), "constraints narrowed");
    next
}

/// Reveal one of the target's attributes directly into the constraints.
///
/// Used when the player spends a hint token. A categorical field keeps its
/// previous constraint when the target has no value for it; the episode
/// count pins both bounds to the target's count.
pub fn reveal(constraints: &Constraints, field: HintField, target: &Character) -> Constraints {
    let mut next = constraints.clone();
    match field {
        HintField::EpisodeCount => {
            let count = target.episode_count() as i64;
            next.episode_min = Some(count);
            next.episode_max = Some(count);
        }
        _ => {
            if let Some(value) = field.value_of(target) {
                next.set(ConstraintKey::for_field(field), value);
            }
        }
    }
    next
}
