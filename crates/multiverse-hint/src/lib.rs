//! Multiverse Hint - Guess evaluation
//!
//! Compares a guessed character against the hidden target field by field and
//! scores how close the guess was.

mod compare;
mod similarity;
mod types;

pub use compare::{compare_guess, episode_advice};
pub use similarity::{similarity, Temperature, MAX_SIMILARITY};
pub use types::{Hint, HintField, HintResult};
