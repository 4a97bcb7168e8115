//! Multiverse Session - Playing a game
//!
//! Drives one game from target selection to the final score: the guess and
//! hint-token budgets, constraint updates, layered configuration and the
//! on-disk score ledger.

pub mod config;
pub mod ledger;
pub mod session;

pub use config::MultiverseConfig;
pub use ledger::{Score, ScoreLedger, MAX_ENTRIES};
pub use session::{GameMode, GameSession, GuessRecord, SessionRules, SessionStatus, REVEALABLE};
