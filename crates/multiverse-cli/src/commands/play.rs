//! Interactive game loop
//!
//! Reads one command per line from stdin. Plain text searches the roster, a
//! character name shared by no one else or `#<n>` (from the last listing)
//! commits a guess, and `:`-prefixed commands manage hints and filters.

use super::{describe, format_hints, load_config, open_catalog, with_retry};
use anyhow::Result;
use multiverse_catalog::{select_target, Roster, RosterCache};
use multiverse_constraint::{ConstraintKey, FilterOptions};
use multiverse_core::{Character, CharacterId};
use multiverse_hint::{episode_advice, HintField, Temperature, MAX_SIMILARITY};
use multiverse_query::format_text;
use multiverse_session::{
    GameMode, GameSession, GuessRecord, ScoreLedger, SessionStatus, REVEALABLE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Candidates shown per listing
const LIST_LIMIT: usize = 20;

pub struct PlayArgs<'a> {
    pub offline: Option<&'a Path>,
    pub mode: Option<GameMode>,
    pub auto_narrow: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Text(String),
    Pick(usize),
    Hint(String),
    Filter(String, String),
    Clear(String),
    List,
    Options,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    if let Some(n) = line.strip_prefix('#') {
        return match n.trim().parse() {
            Ok(n) if n > 0 => Input::Pick(n),
            _ => Input::Unknown(line.to_string()),
        };
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "hint" => Input::Hint(rest.to_string()),
        "filter" => match rest.split_once('=') {
            Some((key, value)) => Input::Filter(key.trim().to_string(), value.trim().to_string()),
            None => Input::Unknown(line.to_string()),
        },
        "clear" => Input::Clear(rest.to_string()),
        "list" => Input::List,
        "options" => Input::Options,
        "help" => Input::Help,
        "quit" | "q" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Parse `5`, `3-10`, `3-` or `-10` into inclusive episode bounds
fn parse_episode_range(value: &str) -> Option<(Option<i64>, Option<i64>)> {
    let bound = |s: &str| -> Option<Option<i64>> {
        let s = s.trim();
        if s.is_empty() {
            Some(None)
        } else {
            s.parse().ok().map(Some)
        }
    };
    match value.split_once('-') {
        Some((min, max)) => Some((bound(min)?, bound(max)?)),
        None => {
            let n = value.trim().parse().ok()?;
            Some((Some(n), Some(n)))
        }
    }
}

struct Game<'r> {
    session: GameSession,
    roster: &'r Roster,
    search: String,
    shown: Vec<CharacterId>,
}

impl Game<'_> {
    fn handle(&mut self, input: Input) -> bool {
        let roster = self.roster;
        match input {
            Input::Empty => {}
            Input::Text(text) => match roster.with_name(&text).as_slice() {
                [character] => self.commit((*character).clone()),
                _ => {
                    self.search = text;
                    self.list();
                }
            },
            Input::Pick(n) => {
                let picked = n
                    .checked_sub(1)
                    .and_then(|i| self.shown.get(i))
                    .and_then(|id| roster.get(id))
                    .cloned();
                match picked {
                    Some(character) => self.commit(character),
                    None => println!("No candidate #{} in the last listing", n),
                }
            }
            Input::Hint(field) => self.hint(&field),
            Input::Filter(key, value) => self.filter(&key, &value),
            Input::Clear(key) => {
                if key == "search" {
                    self.search.clear();
                } else {
                    match key.parse::<ConstraintKey>() {
                        Ok(key) => self.session.clear_constraint(key),
                        Err(e) => println!("{}", e),
                    }
                }
                self.list();
            }
            Input::List => self.list(),
            Input::Options => self.options(),
            Input::Help => print_help(),
            Input::Quit => {
                self.session.forfeit();
                return false;
            }
            Input::Unknown(line) => println!("Unknown command: {} (try :help)", line),
        }
        !self.session.status().is_over()
    }

    fn commit(&mut self, character: Character) {
        match self.session.guess(character) {
            Ok(record) => print_record(record),
            Err(e) => println!("{}", e),
        }
        if self.session.rules().auto_narrow && !self.session.status().is_over() {
            self.list();
        }
    }

    fn hint(&mut self, field: &str) {
        let field = match field.parse::<HintField>() {
            Ok(field) if REVEALABLE.contains(&field) => field,
            _ => {
                println!("Hints can reveal: {}", revealable_names());
                return;
            }
        };
        match self.session.spend_hint(field) {
            Ok(()) => {
                let key = ConstraintKey::for_field(field);
                match self.session.constraints().value(key) {
                    Some(value) if !value.is_empty() => println!("The target's {} is {}", field, value),
                    _ => println!("The target has no {}", field),
                }
                self.list();
            }
            Err(e) => println!("{}", e),
        }
    }

    fn filter(&mut self, key: &str, value: &str) {
        let key = match key.parse::<ConstraintKey>() {
            Ok(key) => key,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };
        if key == ConstraintKey::Episodes {
            let Some((min, max)) = parse_episode_range(value) else {
                println!("Episodes take a number or a range such as 3-10");
                return;
            };
            let mut constraints = self.session.constraints().clone();
            constraints.episode_min = min;
            constraints.episode_max = max;
            self.session.set_constraints(constraints);
        } else {
            self.session.set_constraint(key, value);
        }
        self.list();
    }

    fn list(&mut self) {
        let roster = self.roster;
        let candidates = self.session.candidates(&roster.characters, &self.search);
        let shown: Vec<&Character> = candidates.iter().copied().take(LIST_LIMIT).collect();
        self.shown = shown.iter().map(|c| c.id.clone()).collect();

        print!("{}", format_text(&shown));
        if candidates.len() > LIST_LIMIT {
            println!("  ... {} more", candidates.len() - LIST_LIMIT);
        }
        let chips: Vec<String> = self
            .session
            .constraints()
            .active()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        println!(
            "{} candidates{}{}",
            candidates.len(),
            if self.search.is_empty() {
                String::new()
            } else {
                format!(" matching \"{}\"", self.search)
            },
            if chips.is_empty() {
                String::new()
            } else {
                format!(" [{}]", chips.join(", "))
            }
        );
    }

    fn options(&self) {
        let options = FilterOptions::from_roster(&self.roster.characters);
        println!("status:   {}", options.statuses.join(", "));
        println!("species:  {}", options.species.join(", "));
        println!("type:     {} values", options.types.len());
        println!("gender:   {}", options.genders.join(", "));
        println!("origin:   {} values", options.origins.len());
        println!("location: {} values", options.locations.len());
        println!("episodes: 0-{}", options.max_episodes);
    }
}

pub fn run(args: PlayArgs) -> Result<()> {
    let config = load_config()?;
    let source = open_catalog(args.offline, &config)?;

    let mut rules = config.rules(args.mode);
    if args.auto_narrow {
        rules.auto_narrow = true;
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cache = RosterCache::new();
    let roster = with_retry("Failed to load the roster", || cache.get_or_fetch(source.as_ref()))?;
    let target = with_retry("Failed to pick a target", || {
        select_target(source.as_ref(), roster.total_count, &mut rng)
    })?;

    let mut game = Game {
        session: GameSession::new(target, rules),
        roster: roster.as_ref(),
        search: String::new(),
        shown: Vec::new(),
    };

    println!(
        "Guess the character. {} guesses, {} hint tokens, {} mode. Type :help for commands.",
        rules.max_guesses, rules.hint_tokens, rules.mode
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!(
            "[{} left, {} hints] > ",
            game.session.remaining_guesses(),
            game.session.hint_tokens()
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            game.session.forfeit();
            break;
        };
        if !game.handle(parse_input(&line?)) {
            break;
        }
    }

    finish(&game.session, config.ledger_path().map(ScoreLedger::open));
    Ok(())
}

fn finish(session: &GameSession, ledger: Option<ScoreLedger>) {
    let Some(target) = session.reveal_target() else {
        return;
    };
    let seconds = session.elapsed().as_secs_f64();

    match session.status() {
        SessionStatus::Won => {
            println!(
                "You found {} in {} guesses ({:.1}s).",
                target.name,
                session.guesses().len(),
                seconds
            );
            if let (Some(score), Some(ledger)) = (session.outcome(), ledger) {
                if let Err(e) = ledger.record(score) {
                    tracing::warn!(error = %e, "failed to record score");
                }
            }
        }
        SessionStatus::Lost | SessionStatus::Playing => {
            println!("Game over. The character was:");
            println!("{}", describe(target));
        }
    }
}

fn print_record(record: &GuessRecord) {
    println!("{}", record.character.name);
    println!("  {}", format_hints(&record.hints));
    println!(
        "  similarity {}/{} ({})",
        record.similarity,
        MAX_SIMILARITY,
        Temperature::from_score(record.similarity)
    );
    if let Some(advice) = episode_advice(&record.hints) {
        println!("  {}", advice);
    }
}

fn revealable_names() -> String {
    REVEALABLE
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_help() {
    println!("  <text>             search names; a unique exact name guesses");
    println!("  #<n>               guess candidate n from the last listing");
    println!("  :hint {:<12} spend a hint token", revealable_names());
    println!("  :filter key=value  set a filter (status, species, type, gender, origin, location, episodes)");
    println!("  :clear key         clear a filter, or `search`");
    println!("  :list              show the candidates");
    println!("  :options           show the values each filter can take");
    println!("  :quit              give up");
}
