//! Constraint evaluation against a single character

use crate::types::{ConstraintKey, Constraints};
use multiverse_core::{same_text, Character};
use multiverse_hint::HintField;

const CATEGORICAL: [(ConstraintKey, HintField); 6] = [
    (ConstraintKey::Status, HintField::Status),
    (ConstraintKey::Species, HintField::Species),
    (ConstraintKey::Subtype, HintField::Subtype),
    (ConstraintKey::Gender, HintField::Gender),
    (ConstraintKey::Origin, HintField::Origin),
    (ConstraintKey::Location, HintField::Location),
];

/// Check whether a character satisfies every set constraint.
///
/// Unset and empty-string values restrict nothing.
pub fn matches(character: &Character, constraints: &Constraints) -> bool {
    let categorical_ok = CATEGORICAL.iter().all(|(key, field)| {
        match constraints.value(*key) {
            Some(wanted) if !wanted.is_empty() => {
                same_text(field.value_of(character), Some(wanted))
            }
            _ => true,
        }
    });
    if !categorical_ok {
        return false;
    }

    let episodes = character.episode_count() as i64;
    if let Some(min) = constraints.episode_min {
        if episodes < min {
            return false;
        }
    }
    if let Some(max) = constraints.episode_max {
        if episodes > max {
            return false;
        }
    }
    true
}
