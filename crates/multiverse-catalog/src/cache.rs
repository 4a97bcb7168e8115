//! Roster cache with at-most-one in-flight bulk fetch
//!
//! The cache moves through `Empty -> Fetching -> Populated`. The first caller
//! to find it empty performs the fetch outside the lock; every caller that
//! arrives while that fetch runs blocks on a condition variable and receives
//! the same roster, or the same failure. A failed fetch leaves the cache empty
//! so the next call starts over. Waiters receive the failure as
//! `CatalogUnavailable` carrying the fetcher's message, whatever variant the
//! fetcher itself got. A fetch that unwinds is treated as a failure.

use crate::source::CatalogSource;
use multiverse_core::{Character, CharacterId, MultiverseError, Result};
use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

/// The full, de-duplicated character list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub characters: Vec<Character>,
    /// Population size as reported by the catalog
    pub total_count: u32,
}

impl Roster {
    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    /// Every character with exactly this (case-insensitive) name, in roster
    /// order. The catalog reuses names, so there may be several.
    pub fn with_name(&self, name: &str) -> Vec<&Character> {
        let wanted = name.trim().to_lowercase();
        self.characters
            .iter()
            .filter(|c| c.name.to_lowercase() == wanted)
            .collect()
    }
}

/// Observable lifecycle of the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Fetching,
    Populated,
}

enum CacheState {
    Empty,
    Fetching,
    Populated(Arc<Roster>),
}

struct Inner {
    state: CacheState,
    /// Bumped every time a fetch starts
    generation: u64,
    last_failure: Option<(u64, String)>,
    waiters: usize,
}

/// Shared roster cache. Construct one per process (or per test) and pass it
/// to whoever needs the roster.
pub struct RosterCache {
    inner: Mutex<Inner>,
    ready: Condvar,
}

impl RosterCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: CacheState::Empty,
                generation: 0,
                last_failure: None,
                waiters: 0,
            }),
            ready: Condvar::new(),
        }
    }

    pub fn status(&self) -> CacheStatus {
        match self.lock().state {
            CacheState::Empty => CacheStatus::Empty,
            CacheState::Fetching => CacheStatus::Fetching,
            CacheState::Populated(_) => CacheStatus::Populated,
        }
    }

    /// Number of callers currently blocked on an in-flight fetch
    pub fn waiting(&self) -> usize {
        self.lock().waiters
    }

    /// Return the cached roster, fetching it from `source` if needed
    pub fn get_or_fetch(&self, source: &dyn CatalogSource) -> Result<Arc<Roster>> {
        let mut inner = self.lock();
        loop {
            if let CacheState::Populated(roster) = &inner.state {
                return Ok(Arc::clone(roster));
            }
            if !matches!(inner.state, CacheState::Fetching) {
                break;
            }

            let awaited = inner.generation;
            inner.waiters += 1;
            inner = self
                .ready
                .wait_while(inner, |i| matches!(i.state, CacheState::Fetching))
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            inner.waiters -= 1;

            if let Some((generation, message)) = &inner.last_failure {
                if *generation == awaited && matches!(inner.state, CacheState::Empty) {
                    return Err(MultiverseError::CatalogUnavailable(message.clone()));
                }
            }
        }

        inner.generation += 1;
        let generation = inner.generation;
        inner.state = CacheState::Fetching;
        drop(inner);

        let guard = InFlight {
            cache: self,
            generation,
        };
        tracing::info!(source = source.name(), "fetching full roster");
        let fetched = fetch_roster(source);
        std::mem::forget(guard);

        let mut inner = self.lock();
        let result = match fetched {
            Ok(roster) => {
                let roster = Arc::new(roster);
                inner.state = CacheState::Populated(Arc::clone(&roster));
                Ok(roster)
            }
            Err(e) => {
                tracing::warn!(error = %e, "roster fetch failed");
                inner.state = CacheState::Empty;
                inner.last_failure = Some((generation, e.to_string()));
                Err(e)
            }
        };
        drop(inner);
        self.ready.notify_all();
        result
    }

    /// Drop a populated roster so the next call fetches again
    pub fn invalidate(&self) {
        let mut inner = self.lock();
        if let CacheState::Populated(_) = inner.state {
            inner.state = CacheState::Empty;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resets a `Fetching` cache to `Empty` and wakes waiters if the fetch
/// unwinds before completing. Forgotten on the normal path.
struct InFlight<'a> {
    cache: &'a RosterCache,
    generation: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut inner = self.cache.lock();
        if matches!(inner.state, CacheState::Fetching) && inner.generation == self.generation {
            tracing::warn!(generation = self.generation, "roster fetch aborted");
            inner.state = CacheState::Empty;
            inner.last_failure = Some((self.generation, "roster fetch aborted".to_string()));
        }
        drop(inner);
        self.cache.ready.notify_all();
    }
}

impl Default for RosterCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch every page and de-duplicate by id, keeping the first occurrence
pub fn fetch_roster(source: &dyn CatalogSource) -> Result<Roster> {
    let first = source.fetch_page(1)?;
    let total_pages = first.info.pages;
    let total_count = first.info.count;
    tracing::debug!(total_pages, total_count, "roster listing totals");

    let mut all = first.results;
    for page in 2..=total_pages {
        all.extend(source.fetch_page(page)?.results);
    }

    let fetched = all.len();
    let mut seen = HashSet::new();
    all.retain(|c| seen.insert(c.id.clone()));
    tracing::info!(fetched, unique = all.len(), "roster fetched");

    Ok(Roster {
        characters: all,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;
    use crate::source::CharacterPage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn roster(n: u32) -> Vec<Character> {
        (1..=n)
            .map(|i| Character::new(CharacterId::from_ordinal(i), format!("Character {}", i)))
            .collect()
    }

    /// Counts listing calls and holds page 1 until released
    struct GatedCatalog {
        inner: InMemoryCatalog,
        first_page_calls: AtomicUsize,
        gate: Mutex<bool>,
        opened: Condvar,
        panics: bool,
    }

    impl GatedCatalog {
        fn new(inner: InMemoryCatalog) -> Self {
            Self {
                inner,
                first_page_calls: AtomicUsize::new(0),
                gate: Mutex::new(false),
                opened: Condvar::new(),
                panics: false,
            }
        }

        /// Panic on page 1 once released
        fn panicking(mut self) -> Self {
            self.panics = true;
            self
        }

        fn release(&self) {
            *self.gate.lock().unwrap() = true;
            self.opened.notify_all();
        }
    }

    impl CatalogSource for GatedCatalog {
        fn name(&self) -> &str {
            "gated"
        }

        fn fetch_page(&self, page: u32) -> Result<CharacterPage> {
            if page == 1 {
                self.first_page_calls.fetch_add(1, Ordering::SeqCst);
                let open = self.gate.lock().unwrap();
                let _open = self.opened.wait_while(open, |o| !*o).unwrap();
                if self.panics {
                    panic!("catalog exploded");
                }
            }
            self.inner.fetch_page(page)
        }

        fn fetch_character(&self, id: &CharacterId) -> Result<Option<Character>> {
            self.inner.fetch_character(id)
        }
    }

    fn wait_until(cond: impl Fn() -> bool) {
        for _ in 0..500 {
            if cond() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition not reached");
    }

    #[test]
    fn test_fetches_all_pages() {
        let catalog = InMemoryCatalog::new(roster(45));
        let cache = RosterCache::new();
        assert_eq!(cache.status(), CacheStatus::Empty);

        let fetched = cache.get_or_fetch(&catalog).unwrap();
        assert_eq!(fetched.characters.len(), 45);
        assert_eq!(fetched.total_count, 45);
        assert_eq!(cache.status(), CacheStatus::Populated);
    }

    #[test]
    fn test_deduplicates_keeping_first() {
        let mut chars = roster(3);
        chars.push(Character::new("2", "Impostor"));
        let catalog = InMemoryCatalog::new(chars);

        let fetched = fetch_roster(&catalog).unwrap();
        assert_eq!(fetched.characters.len(), 3);
        assert_eq!(fetched.get(&CharacterId::new("2")).unwrap().name, "Character 2");
    }

    #[test]
    fn test_second_call_uses_cache() {
        let catalog = GatedCatalog::new(InMemoryCatalog::new(roster(5)));
        catalog.release();
        let cache = RosterCache::new();

        let a = cache.get_or_fetch(&catalog).unwrap();
        let b = cache.get_or_fetch(&catalog).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(catalog.first_page_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_callers_share_one_fetch() {
        let catalog = GatedCatalog::new(InMemoryCatalog::new(roster(30)));
        let cache = RosterCache::new();

        std::thread::scope(|s| {
            let first = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.status() == CacheStatus::Fetching);
            let second = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.waiting() == 1);
            catalog.release();

            let a = first.join().unwrap().unwrap();
            let b = second.join().unwrap().unwrap();
            assert!(Arc::ptr_eq(&a, &b));
        });
        assert_eq!(catalog.first_page_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_waiters_share_the_failure() {
        let catalog = GatedCatalog::new(InMemoryCatalog::new(roster(3)).failing("catalog down"));
        let cache = RosterCache::new();

        std::thread::scope(|s| {
            let first = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.status() == CacheStatus::Fetching);
            let second = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.waiting() == 1);
            catalog.release();

            assert!(first.join().unwrap().is_err());
            let err = second.join().unwrap().unwrap_err();
            assert!(err.to_string().contains("catalog down"));
        });
        assert_eq!(catalog.first_page_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.status(), CacheStatus::Empty);
    }

    #[test]
    fn test_failure_then_retry() {
        let cache = RosterCache::new();
        let down = InMemoryCatalog::new(roster(3)).failing("offline");
        assert!(cache.get_or_fetch(&down).is_err());
        assert_eq!(cache.status(), CacheStatus::Empty);

        let up = InMemoryCatalog::new(roster(3));
        assert_eq!(cache.get_or_fetch(&up).unwrap().characters.len(), 3);
    }

    #[test]
    fn test_invalidate() {
        let cache = RosterCache::new();
        let catalog = InMemoryCatalog::new(roster(2));
        cache.get_or_fetch(&catalog).unwrap();
        cache.invalidate();
        assert_eq!(cache.status(), CacheStatus::Empty);
    }

    #[test]
    fn test_with_name() {
        let mut chars = roster(3);
        chars.push(Character::new("38", "Character 3"));
        let fetched = fetch_roster(&InMemoryCatalog::new(chars)).unwrap();

        let ids: Vec<&str> = fetched
            .with_name("  character 3 ")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "38"]);
        assert_eq!(fetched.with_name("Character 1").len(), 1);
        assert!(fetched.with_name("Character").is_empty());
    }

    /// Panics partway through the listing
    struct PanickingCatalog;

    impl CatalogSource for PanickingCatalog {
        fn name(&self) -> &str {
            "panicking"
        }

        fn fetch_page(&self, _page: u32) -> Result<CharacterPage> {
            panic!("catalog exploded");
        }

        fn fetch_character(&self, _id: &CharacterId) -> Result<Option<Character>> {
            Ok(None)
        }
    }

    #[test]
    fn test_panicking_fetch_resets_cache() {
        let cache = RosterCache::new();
        std::thread::scope(|s| {
            let crashed = s.spawn(|| cache.get_or_fetch(&PanickingCatalog));
            assert!(crashed.join().is_err());
        });
        assert_eq!(cache.status(), CacheStatus::Empty);

        let fetched = cache.get_or_fetch(&InMemoryCatalog::new(roster(4))).unwrap();
        assert_eq!(fetched.characters.len(), 4);
    }

    #[test]
    fn test_waiter_released_when_fetch_panics() {
        let catalog = GatedCatalog::new(InMemoryCatalog::new(roster(3))).panicking();
        let cache = RosterCache::new();

        std::thread::scope(|s| {
            let first = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.status() == CacheStatus::Fetching);
            let second = s.spawn(|| cache.get_or_fetch(&catalog));
            wait_until(|| cache.waiting() == 1);
            catalog.release();

            assert!(first.join().is_err());
            let err = second.join().unwrap().unwrap_err();
            assert!(matches!(err, MultiverseError::CatalogUnavailable(_)));
        });
        assert_eq!(cache.status(), CacheStatus::Empty);
    }
}
