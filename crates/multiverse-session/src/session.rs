//! Game session orchestration
//!
//! A `GameSession` owns the hidden target, the guess log and the two budgets
//! (guesses and hint tokens). It calls into the comparator, the scorer and
//! the constraint reducers; it never talks to the catalog itself.

use crate::ledger::Score;
use multiverse_catalog::{pick_random_character, CatalogSource};
use multiverse_constraint::{apply_hint, reveal, ConstraintKey, Constraints};
use multiverse_core::{Character, MultiverseError, Result};
use multiverse_hint::{compare_guess, similarity, Hint, HintField, Temperature};
use multiverse_query::filter_candidates;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Difficulty tag recorded with every score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Normal,
    Hard,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Normal => write!(f, "normal"),
            GameMode::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(GameMode::Normal),
            "hard" => Ok(GameMode::Hard),
            other => Err(format!(
                "unknown mode '{}'; valid values: normal, hard",
                other
            )),
        }
    }
}

/// Budgets and switches for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRules {
    pub max_guesses: u32,
    pub hint_tokens: u32,
    /// Fold every guess's hints into the constraints automatically
    pub auto_narrow: bool,
    pub mode: GameMode,
}

impl SessionRules {
    /// The stock rules for a mode
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Normal => Self {
                max_guesses: 8,
                hint_tokens: 2,
                auto_narrow: false,
                mode,
            },
            GameMode::Hard => Self {
                max_guesses: 6,
                hint_tokens: 0,
                auto_narrow: false,
                mode,
            },
        }
    }
}

impl Default for SessionRules {
    fn default() -> Self {
        Self::for_mode(GameMode::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, SessionStatus::Playing)
    }
}

/// One committed guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub character: Character,
    pub hints: Vec<Hint>,
    pub similarity: u8,
}

impl GuessRecord {
    pub fn temperature(&self) -> Temperature {
        Temperature::from_score(self.similarity)
    }
}

/// Fields a hint token can reveal by default
pub const REVEALABLE: [HintField; 2] = [HintField::Origin, HintField::Subtype];

pub struct GameSession {
    target: Character,
    rules: SessionRules,
    guesses: Vec<GuessRecord>,
    hint_tokens: u32,
    constraints: Constraints,
    status: SessionStatus,
    started: Instant,
    finished: Option<Duration>,
}

impl GameSession {
    pub fn new(target: Character, rules: SessionRules) -> Self {
        tracing::debug!(mode = %rules.mode, max_guesses = rules.max_guesses, "session started");
        Self {
            target,
            hint_tokens: rules.hint_tokens,
            rules,
            guesses: Vec::new(),
            constraints: Constraints::new(),
            status: SessionStatus::Playing,
            started: Instant::now(),
            finished: None,
        }
    }

    /// Pick a random target from `source` and start a session on it
    pub fn start<R: Rng + ?Sized>(
        source: &dyn CatalogSource,
        rules: SessionRules,
        rng: &mut R,
    ) -> Result<Self> {
        let target = pick_random_character(source, rng)?;
        Ok(Self::new(target, rules))
    }

    /// Commit a guess and return its record.
    ///
    /// Fails with `GameOver` once the game has ended and with
    /// `AlreadyGuessed` for a repeat.
    pub fn guess(&mut self, character: Character) -> Result<&GuessRecord> {
        if self.status.is_over() {
            return Err(MultiverseError::GameOver);
        }
        if self.guesses.iter().any(|g| g.character.id == character.id) {
            return Err(MultiverseError::AlreadyGuessed(character.name));
        }

        let hints = compare_guess(&self.target, &character);
        let score = similarity(&self.target, &character);
        if self.rules.auto_narrow {
            self.constraints = apply_hint(&self.constraints, &hints, &character);
        }

        let won = character.id == self.target.id;
        self.guesses.push(GuessRecord {
            character,
            hints,
            similarity: score,
        });

        if won {
            self.finish(SessionStatus::Won);
        } else if self.guesses.len() as u32 >= self.rules.max_guesses {
            self.finish(SessionStatus::Lost);
        }

        let index = self.guesses.len() - 1;
        Ok(&self.guesses[index])
    }

    /// Spend one hint token to reveal a target attribute into the constraints
    pub fn spend_hint(&mut self, field: HintField) -> Result<()> {
        if self.status.is_over() {
            return Err(MultiverseError::GameOver);
        }
        if !field.is_categorical() {
            return Err(MultiverseError::InvalidHint(field.to_string()));
        }
        if self.hint_tokens == 0 {
            return Err(MultiverseError::NoHintTokens);
        }

        self.hint_tokens -= 1;
        self.constraints = reveal(&self.constraints, field, &self.target);
        tracing::debug!(%field, left = self.hint_tokens, "hint token spent");
        Ok(())
    }

    /// End the game early as a loss
    pub fn forfeit(&mut self) {
        if !self.status.is_over() {
            self.finish(SessionStatus::Lost);
        }
    }

    pub fn set_constraints(&mut self, constraints: Constraints) {
        self.constraints = constraints;
    }

    pub fn set_constraint(&mut self, key: ConstraintKey, value: &str) {
        self.constraints.set(key, value);
    }

    pub fn clear_constraint(&mut self, key: ConstraintKey) {
        self.constraints.clear(key);
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The live candidate list for a search over `roster`
    pub fn candidates<'a>(&self, roster: &'a [Character], search: &str) -> Vec<&'a Character> {
        filter_candidates(roster, search, &self.constraints)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.rules
            .max_guesses
            .saturating_sub(self.guesses.len() as u32)
    }

    pub fn hint_tokens(&self) -> u32 {
        self.hint_tokens
    }

    /// Time since start, frozen once the game ends
    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.started.elapsed())
    }

    /// The ledger entry for a won game
    pub fn outcome(&self) -> Option<Score> {
        if self.status != SessionStatus::Won {
            return None;
        }
        let time_ms = self.finished.map(|d| d.as_millis() as u64);
        Some(Score::new(self.guesses.len() as u32, self.rules.mode, time_ms))
    }

    /// The target, once it may be shown
    pub fn reveal_target(&self) -> Option<&Character> {
        self.status.is_over().then_some(&self.target)
    }

    fn finish(&mut self, status: SessionStatus) {
        self.status = status;
        self.finished = Some(self.started.elapsed());
        tracing::info!(?status, guesses = self.guesses.len(), "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiverse_hint::HintResult;

    fn rick() -> Character {
        Character::new("1", "Rick Sanchez")
            .with_status("Alive")
            .with_species("Human")
            .with_gender("Male")
            .with_origin("Earth (C-137)")
            .with_location("Citadel of Ricks")
            .with_episode_count(51)
    }

    fn morty() -> Character {
        Character::new("2", "Morty Smith")
            .with_status("Alive")
            .with_species("Human")
            .with_gender("Male")
            .with_origin("unknown")
            .with_location("Citadel of Ricks")
            .with_episode_count(51)
    }

    fn squanchy() -> Character {
        Character::new("331", "Squanchy")
            .with_status("Alive")
            .with_species("Alien")
            .with_subtype("Cat-Person")
            .with_gender("Male")
            .with_origin("Planet Squanch")
            .with_location("Planet Squanch")
            .with_episode_count(2)
    }

    #[test]
    fn test_mode_rules() {
        let normal = SessionRules::default();
        assert_eq!((normal.max_guesses, normal.hint_tokens), (8, 2));
        let hard = SessionRules::for_mode(GameMode::Hard);
        assert_eq!((hard.max_guesses, hard.hint_tokens), (6, 0));
        assert_eq!("HARD".parse::<GameMode>(), Ok(GameMode::Hard));
        assert!("easy".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_winning_guess() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.guess(morty()).unwrap();
        assert_eq!(session.status(), SessionStatus::Playing);
        assert!(session.reveal_target().is_none());
        assert!(session.outcome().is_none());

        let record = session.guess(rick()).unwrap();
        assert!(record.hints.iter().all(|h| h.result == HintResult::Correct));
        assert_eq!(record.similarity, 6);
        assert_eq!(session.status(), SessionStatus::Won);

        let score = session.outcome().unwrap();
        assert_eq!(score.guesses, 2);
        assert_eq!(score.mode, GameMode::Normal);
        assert!(score.time_ms.is_some());
        assert_eq!(session.reveal_target().map(|t| t.name.as_str()), Some("Rick Sanchez"));
    }

    #[test]
    fn test_guess_budget_exhausted() {
        let rules = SessionRules {
            max_guesses: 2,
            ..SessionRules::default()
        };
        let mut session = GameSession::new(rick(), rules);
        session.guess(morty()).unwrap();
        assert_eq!(session.remaining_guesses(), 1);
        session.guess(squanchy()).unwrap();
        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(session.remaining_guesses(), 0);
        assert!(session.outcome().is_none());

        assert!(matches!(session.guess(rick()), Err(MultiverseError::GameOver)));
    }

    #[test]
    fn test_repeat_guess_rejected() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.guess(morty()).unwrap();
        let err = session.guess(morty()).unwrap_err();
        assert!(matches!(err, MultiverseError::AlreadyGuessed(name) if name == "Morty Smith"));
        assert_eq!(session.guesses().len(), 1);
    }

    #[test]
    fn test_auto_narrow() {
        let rules = SessionRules {
            auto_narrow: true,
            ..SessionRules::default()
        };
        let mut session = GameSession::new(rick(), rules);
        session.guess(squanchy()).unwrap();
        // Squanchy has fewer episodes than Rick, and the species mismatch still pins species
        assert_eq!(session.constraints().episode_min, Some(3));
        assert_eq!(session.constraints().species.as_deref(), Some("Alien"));
        assert_eq!(session.constraints().status.as_deref(), Some("Alive"));
    }

    #[test]
    fn test_manual_mode_leaves_constraints_alone() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.guess(squanchy()).unwrap();
        assert!(session.constraints().is_empty());
    }

    #[test]
    fn test_spend_hint() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.spend_hint(HintField::Origin).unwrap();
        assert_eq!(session.constraints().origin.as_deref(), Some("Earth (C-137)"));
        assert_eq!(session.hint_tokens(), 1);

        // Rick has no subtype, so the constraint stays unset
        session.spend_hint(HintField::Subtype).unwrap();
        assert_eq!(session.constraints().subtype, None);
        assert_eq!(session.hint_tokens(), 0);

        assert!(matches!(
            session.spend_hint(HintField::Origin),
            Err(MultiverseError::NoHintTokens)
        ));
    }

    #[test]
    fn test_hint_rejects_episode_count() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        assert!(matches!(
            session.spend_hint(HintField::EpisodeCount),
            Err(MultiverseError::InvalidHint(_))
        ));
        assert_eq!(session.hint_tokens(), 2);
    }

    #[test]
    fn test_hard_mode_has_no_tokens() {
        let mut session = GameSession::new(rick(), SessionRules::for_mode(GameMode::Hard));
        assert!(matches!(
            session.spend_hint(HintField::Origin),
            Err(MultiverseError::NoHintTokens)
        ));
    }

    #[test]
    fn test_candidates_follow_constraints() {
        let roster = vec![rick(), morty(), squanchy()];
        let mut session = GameSession::new(rick(), SessionRules::default());
        assert_eq!(session.candidates(&roster, "").len(), 3);

        session.set_constraint(ConstraintKey::Location, "citadel of ricks");
        assert_eq!(session.candidates(&roster, "").len(), 2);
        assert_eq!(session.candidates(&roster, "mor").len(), 1);

        session.clear_constraint(ConstraintKey::Location);
        assert_eq!(session.candidates(&roster, "").len(), 3);
    }

    #[test]
    fn test_forfeit() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.forfeit();
        assert_eq!(session.status(), SessionStatus::Lost);
        assert!(session.reveal_target().is_some());
        assert!(matches!(
            session.spend_hint(HintField::Origin),
            Err(MultiverseError::GameOver)
        ));
    }

    #[test]
    fn test_elapsed_frozen_after_finish() {
        let mut session = GameSession::new(rick(), SessionRules::default());
        session.guess(rick()).unwrap();
        let first = session.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(session.elapsed(), first);
    }
}
