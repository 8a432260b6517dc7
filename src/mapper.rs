use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, error, trace};

use crate::catalog::Catalog;
use crate::construct::{Part, QualifiedVerse, SchemeHasher, SchemeId, Verse, VerseSet};
use crate::mapping::SchemeTable;
use crate::source::RuleSource;

// ------------- TableState -------------
/// The terminal state of a scheme in the cache. A scheme starts
/// unattempted (absent from the map) and moves to exactly one of these
/// for the rest of the process lifetime.
#[derive(Debug, Clone)]
pub enum TableState {
    /// The hub scheme, for which no table ever exists nor is attempted.
    Hub,
    Loaded(Arc<SchemeTable>),
    /// The load was attempted and failed, or the scheme is unknown.
    /// Permanent; a restart is required to re-attempt.
    Unavailable,
}

// ------------- MappingCache -------------
/// Process-wide registry of one table state per scheme. Grows
/// monotonically; entries are never evicted or reloaded. The rule source
/// is read at most once per scheme: first-time loads serialize on a
/// dedicated mutex with a double check, while reads of already-resolved
/// entries only take a short read lock and never wait on a load in
/// progress for some other scheme's first access pattern to finish.
#[derive(Debug)]
pub struct MappingCache {
    entries: RwLock<HashMap<SchemeId, TableState, SchemeHasher>>,
    load_lock: Mutex<()>,
}
impl MappingCache {
    pub fn new(hub: SchemeId) -> Self {
        // the hub gets its entry up front so it is never loaded
        let mut entries = HashMap::<SchemeId, TableState, SchemeHasher>::default();
        entries.insert(hub, TableState::Hub);
        Self {
            entries: RwLock::new(entries),
            load_lock: Mutex::new(()),
        }
    }
    pub fn get(&self, scheme: SchemeId) -> Option<TableState> {
        self.entries.read().unwrap().get(&scheme).cloned()
    }
    /// Ensures an entry exists for the scheme: a no-op when one does
    /// (loaded, failed or hub), otherwise a single load attempt whose
    /// outcome is recorded permanently. A failed load is logged here and
    /// never raised to the caller; it only degrades accuracy for this
    /// scheme.
    pub fn ensure(&self, scheme: SchemeId, catalog: &Catalog, source: &dyn RuleSource) {
        if self.entries.read().unwrap().contains_key(&scheme) {
            return;
        }
        let _guard = self.load_lock.lock().unwrap();
        // another caller may have loaded it while we waited for the lock
        if self.entries.read().unwrap().contains_key(&scheme) {
            return;
        }
        let state = match catalog.scheme(scheme) {
            Some(owning) => {
                match SchemeTable::build(&owning, &catalog.hub_scheme(), source) {
                    Ok(table) => TableState::Loaded(Arc::new(table)),
                    Err(e) => {
                        error!(scheme = %owning, %e, "failed to load mapping rules");
                        TableState::Unavailable
                    }
                }
            }
            None => {
                error!(scheme, "scheme not in catalog, no mapping rules will be available");
                TableState::Unavailable
            }
        };
        self.entries.write().unwrap().insert(scheme, state);
    }
}

// ------------- VerseMapper -------------
/// The public entry point of the engine: translates a verse from its
/// scheme into a target scheme through the hub, lazily loading the two
/// mapping tables involved and falling back to a same-coordinates guess
/// for any scheme whose table is unavailable.
pub struct VerseMapper {
    catalog: Arc<Catalog>,
    source: Arc<dyn RuleSource + Send + Sync>,
    cache: MappingCache,
}
impl VerseMapper {
    pub fn new(catalog: Arc<Catalog>, source: Arc<dyn RuleSource + Send + Sync>) -> Self {
        let cache = MappingCache::new(catalog.hub());
        Self {
            catalog,
            source,
            cache,
        }
    }
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
    pub fn cache(&self) -> &MappingCache {
        &self.cache
    }
    /// Maps a verse into the target scheme. Total: never fails for
    /// data-availability reasons, and the result set may be empty or
    /// approximate, never null. An empty set is the designed signal for
    /// "no mapping could be determined".
    pub fn map(&self, verse: &Verse, target: SchemeId) -> VerseSet {
        // identity short-circuit, no hub hop and no cache involvement
        if verse.scheme() == target {
            let mut result = self.catalog.empty_set(target);
            result.push(verse.clone());
            return result;
        }

        self.cache.ensure(verse.scheme(), &self.catalog, self.source.as_ref());
        self.cache.ensure(target, &self.catalog, self.source.as_ref());

        let hub = self.catalog.hub();

        // hop 1: source scheme to hub
        let hub_verses: Vec<QualifiedVerse> = match self.cache.get(verse.scheme()) {
            Some(TableState::Loaded(table)) => table.map(verse),
            _ => {
                // either the source scheme is the hub itself, or no table
                // could be loaded for it; in the latter case we guess that
                // the verse keeps its coordinates in the hub
                if verse.scheme() != hub {
                    debug!(%verse, "no mapping rules for source scheme, assuming identical coordinates in hub");
                }
                vec![QualifiedVerse::mapped(verse.relocate(hub), Part::Whole)]
            }
        };

        if target == hub {
            return self.aggregate_hub(hub_verses);
        }

        // hop 2: hub to target scheme
        match self.cache.get(target) {
            Some(TableState::Loaded(table)) => {
                let mut result = self.catalog.empty_set(target);
                for qualified in &hub_verses {
                    for found in table.unmap(qualified) {
                        result.push(found);
                    }
                }
                result
            }
            _ => self.guess_from_hub(target, &hub_verses),
        }
    }
    /// The target is the hub: union the inner hub verses, dropping the
    /// parts and skipping unmappable entries.
    fn aggregate_hub(&self, hub_verses: Vec<QualifiedVerse>) -> VerseSet {
        let mut result = self.catalog.empty_set(self.catalog.hub());
        for qualified in hub_verses {
            if let QualifiedVerse::Mapped { verse, .. } = qualified {
                result.push(verse);
            }
        }
        result
    }
    /// Last attempt at getting something, on the basis that something is
    /// better than nothing: assume each hub verse keeps its coordinates
    /// in the target scheme and keep those that actually exist there.
    fn guess_from_hub(&self, target: SchemeId, hub_verses: &[QualifiedVerse]) -> VerseSet {
        let mut result = self.catalog.empty_set(target);
        let Some(scheme) = self.catalog.scheme(target) else {
            return result;
        };
        debug!(scheme = %scheme, "no mapping rules for target scheme, assuming identical coordinates");
        for qualified in hub_verses {
            if let QualifiedVerse::Mapped { verse, .. } = qualified {
                match scheme.verse(verse.book(), verse.chapter(), verse.verse()) {
                    Some(found) => {
                        result.push(found);
                    }
                    None => {
                        trace!(%verse, scheme = %scheme, "guessed coordinates do not exist in target scheme");
                    }
                }
            }
        }
        result
    }
}
