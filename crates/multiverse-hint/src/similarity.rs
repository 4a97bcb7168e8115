//! Similarity scoring between two characters

use crate::types::HintField;
use multiverse_core::{same_text, Character};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest possible similarity score (one point per categorical field)
pub const MAX_SIMILARITY: u8 = 6;

/// Count the categorical fields two characters share.
///
/// Species is compared strictly here; the comparator's `Partial` relaxation
/// does not earn a point. Episode counts are ignored.
pub fn similarity(a: &Character, b: &Character) -> u8 {
    HintField::ALL
        .iter()
        .filter(|field| field.is_categorical())
        .filter(|field| same_text(field.value_of(a), field.value_of(b)))
        .count() as u8
}

/// Coarse label for a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Temperature {
    Cold,
    Warm,
    Hot,
}

impl Temperature {
    pub fn from_score(score: u8) -> Self {
        if score >= 5 {
            Temperature::Hot
        } else if score >= 3 {
            Temperature::Warm
        } else {
            Temperature::Cold
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Cold => write!(f, "Cold"),
            Temperature::Warm => write!(f, "Warm"),
            Temperature::Hot => write!(f, "Hot"),
        }
    }
}
