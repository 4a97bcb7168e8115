use multiverse_catalog::{CatalogSource, InMemoryCatalog, RosterCache};
use multiverse_core::{Character, CharacterId, MultiverseError};
use multiverse_hint::HintField;
use multiverse_session::{GameMode, GameSession, ScoreLedger, SessionRules, SessionStatus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

const STATUSES: [&str; 3] = ["Alive", "Dead", "unknown"];
const GENDERS: [&str; 3] = ["Male", "Female", "unknown"];
const ORIGINS: [&str; 4] = [
    "Earth (C-137)",
    "Earth (Replacement Dimension)",
    "Gazorpazorp",
    "unknown",
];

fn human_roster(n: u32) -> Vec<Character> {
    (1..=n)
        .map(|i| {
            let k = i as usize;
            Character::new(CharacterId::from_ordinal(i), format!("Citizen {}", i))
                .with_status(STATUSES[k % STATUSES.len()])
                .with_species("Human")
                .with_gender(GENDERS[(k / 3) % GENDERS.len()])
                .with_origin(ORIGINS[k % ORIGINS.len()])
                .with_location(ORIGINS[(k + 1) % ORIGINS.len()])
                .with_episode_count((k * 7) % 13)
        })
        .collect()
}

fn temp_ledger() -> ScoreLedger {
    let dir = std::env::temp_dir().join(format!("multiverse_play_test_{}", uuid::Uuid::new_v4()));
    ScoreLedger::open(dir.join("scores.json"))
}

#[test]
fn test_sweep_roster_until_win_and_record() {
    let catalog = InMemoryCatalog::new(human_roster(30));
    let cache = RosterCache::new();
    let roster = cache.get_or_fetch(&catalog).unwrap();

    let rules = SessionRules {
        max_guesses: 30,
        ..SessionRules::default()
    };
    let mut session = GameSession::start(&catalog, rules, &mut StdRng::seed_from_u64(5)).unwrap();

    for character in &roster.characters {
        session.guess(character.clone()).unwrap();
        if session.status() == SessionStatus::Won {
            break;
        }
    }
    assert_eq!(session.status(), SessionStatus::Won);

    let target = session.reveal_target().unwrap().clone();
    let last = session.guesses().last().unwrap();
    assert_eq!(last.character.id, target.id);
    assert_eq!(last.similarity, 6);

    let ledger = temp_ledger();
    ledger.record(session.outcome().unwrap()).unwrap();
    let scores = ledger.list().unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].guesses as usize, session.guesses().len());
    assert_eq!(scores[0].mode, GameMode::Normal);
    ledger.clear().unwrap();
    std::fs::remove_dir(ledger.path().parent().unwrap()).ok();
}

#[test]
fn test_auto_narrow_never_loses_the_target() {
    let catalog = InMemoryCatalog::new(human_roster(40));
    let roster = RosterCache::new().get_or_fetch(&catalog).unwrap();

    let rules = SessionRules {
        max_guesses: 40,
        auto_narrow: true,
        ..SessionRules::default()
    };
    let mut session = GameSession::start(&catalog, rules, &mut StdRng::seed_from_u64(17)).unwrap();
    let mut guessed = HashSet::new();

    while session.status() == SessionStatus::Playing {
        let pool = session.candidates(&roster.characters, "");
        assert!(!pool.is_empty(), "constraints excluded the target");
        let next = pool
            .into_iter()
            .find(|c| !guessed.contains(&c.id))
            .expect("every remaining candidate was already guessed")
            .clone();
        guessed.insert(next.id.clone());
        session.guess(next).unwrap();
    }

    assert_eq!(session.status(), SessionStatus::Won);
    let target = session.reveal_target().unwrap();
    assert!(session
        .candidates(&roster.characters, "")
        .iter()
        .any(|c| c.id == target.id));
}

#[test]
fn test_hard_mode_loss() {
    let catalog = InMemoryCatalog::new(human_roster(20));
    let mut session = GameSession::start(
        &catalog,
        SessionRules::for_mode(GameMode::Hard),
        &mut StdRng::seed_from_u64(3),
    )
    .unwrap();

    assert!(matches!(
        session.spend_hint(HintField::Origin),
        Err(MultiverseError::NoHintTokens)
    ));

    // Guess a character that never matches a roster id six times over
    for i in 0..6 {
        let decoy = Character::new(format!("decoy-{}", i).as_str(), "Decoy").with_species("Human");
        session.guess(decoy).unwrap();
    }
    assert_eq!(session.status(), SessionStatus::Lost);
    assert!(session.outcome().is_none());
    assert!(session.reveal_target().is_some());
}

#[test]
fn test_hint_tokens_narrow_to_target_origin() {
    let catalog = InMemoryCatalog::new(human_roster(24));
    let roster = RosterCache::new().get_or_fetch(&catalog).unwrap();
    let mut session =
        GameSession::start(&catalog, SessionRules::default(), &mut StdRng::seed_from_u64(8)).unwrap();

    let before = session.candidates(&roster.characters, "").len();
    session.spend_hint(HintField::Origin).unwrap();
    let after = session.candidates(&roster.characters, "");
    assert!(after.len() < before);

    let origin = session.constraints().origin.clone().unwrap();
    assert!(after.iter().all(|c| c.origin_name() == Some(origin.as_str())));
}

#[test]
fn test_offline_catalog_failure_surfaces() {
    let catalog = InMemoryCatalog::new(human_roster(5)).failing("offline");
    assert_eq!(catalog.name(), "memory");
    let err = GameSession::start(&catalog, SessionRules::default(), &mut StdRng::seed_from_u64(1))
        .err()
        .unwrap();
    assert!(err.is_catalog_failure());
}
