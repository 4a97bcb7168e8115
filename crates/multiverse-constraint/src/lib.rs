//! Multiverse Constraint - Candidate narrowing
//!
//! This crate holds the constraint record that narrows the candidate pool,
//! the predicate that checks a character against it, the reducer that folds
//! a guess's hints into it, and the filter options a roster offers.

mod evaluator;
mod options;
mod preset;
mod reducer;
mod types;

pub use evaluator::matches;
pub use options::FilterOptions;
pub use preset::{load_constraints, parse_constraints};
pub use reducer::{apply_hint, reveal};
pub use types::{ConstraintKey, Constraints};
