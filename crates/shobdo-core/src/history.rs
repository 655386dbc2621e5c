// Recently searched words, most recent first
use shobdo_store::KeyValueStore;
use tracing::{debug, warn};

/// How many searches we remember
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Storage key the history lives under, value is a JSON array of strings
pub const HISTORY_STORAGE_KEY: &str = "shobdo.search-history";

/// Bounded most-recently-used list of search terms
///
/// No two entries compare equal ignoring case, the newest term sits at
/// index 0 and the list never grows past `MAX_HISTORY_ENTRIES`. The casing
/// kept is the one used most recently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted list, enforcing the invariants on the way in
    ///
    /// The stored order is newest first, so later duplicates lose.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut history = Self::new();
        for entry in entries.iter().rev() {
            history.record(entry);
        }
        history
    }

    /// Move `term` to the front. Returns false for blank input.
    pub fn record(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }

        let folded = term.to_lowercase();
        self.entries.retain(|existing| existing.to_lowercase() != folded);
        self.entries.insert(0, term.to_string());
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Search history backed by a durable key-value store
///
/// Every mutation writes the whole list back. Storage failures are logged
/// and otherwise ignored so a broken disk never gets in the way of a lookup.
pub struct HistoryManager {
    store: Box<dyn KeyValueStore>,
    history: SearchHistory,
}

impl HistoryManager {
    /// Read the persisted history, falling back to empty on any failure
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let history = match Self::read(store.as_ref()) {
            Ok(history) => history,
            Err(e) => {
                warn!("Could not load search history, starting fresh: {}", e);
                SearchHistory::new()
            }
        };

        debug!("Loaded {} history entries", history.len());
        Self { store, history }
    }

    fn read(store: &dyn KeyValueStore) -> crate::Result<SearchHistory> {
        match store.get(HISTORY_STORAGE_KEY)? {
            Some(raw) => {
                let entries: Vec<String> = serde_json::from_str(&raw)?;
                Ok(SearchHistory::from_entries(entries))
            }
            None => Ok(SearchHistory::new()),
        }
    }

    /// Record a search and persist. Blank terms are ignored.
    pub fn record(&mut self, term: &str) {
        if self.history.record(term) {
            self.persist();
        }
    }

    /// Forget everything, including the persisted copy
    pub fn clear(&mut self) {
        self.history.clear();
        if let Err(e) = self.store.remove(HISTORY_STORAGE_KEY) {
            warn!("Could not remove persisted search history: {}", e);
        }
    }

    pub fn entries(&self) -> &[String] {
        self.history.entries()
    }

    fn persist(&self) {
        let result = serde_json::to_string(self.history.entries())
            .map_err(crate::Error::from)
            .and_then(|json| {
                self.store
                    .set(HISTORY_STORAGE_KEY, &json)
                    .map_err(crate::Error::from)
            });

        if let Err(e) = result {
            warn!("Could not persist search history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shobdo_store::{MemoryStore, StoreError};
    use std::sync::Arc;

    /// Store whose every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> shobdo_store::Result<Option<String>> {
            Err(StoreError::Poisoned)
        }
        fn set(&self, _key: &str, _value: &str) -> shobdo_store::Result<()> {
            Err(StoreError::Poisoned)
        }
        fn remove(&self, _key: &str) -> shobdo_store::Result<()> {
            Err(StoreError::Poisoned)
        }
    }

    /// Shares one MemoryStore between "runs" to simulate a restart
    struct SharedStore(Arc<MemoryStore>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> shobdo_store::Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> shobdo_store::Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> shobdo_store::Result<()> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_record_puts_term_first() {
        let mut history = SearchHistory::new();
        history.record("apple");
        history.record("banana");
        assert_eq!(history.get(0), Some("banana"));
        assert_eq!(history.entries(), &["banana", "apple"]);
    }

    #[test]
    fn test_record_trims() {
        let mut history = SearchHistory::new();
        history.record("  moon  ");
        assert_eq!(history.entries(), &["moon"]);
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let mut history = SearchHistory::new();
        history.record("sun");
        assert!(!history.record(""));
        assert!(!history.record("   "));
        assert_eq!(history.entries(), &["sun"]);
    }

    #[test]
    fn test_repeat_search_does_not_grow() {
        let mut history = SearchHistory::new();
        history.record("river");
        history.record("river");
        assert_eq!(history.len(), 1);

        history.record("RIVER");
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0), Some("RIVER"));
    }

    #[test]
    fn test_case_insensitive_dedup_latest_casing_wins() {
        let mut history = SearchHistory::new();
        history.record("hello");
        history.record("World");
        history.record("HELLO");
        assert_eq!(history.entries(), &["HELLO", "World"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = SearchHistory::new();
        for i in 0..25 {
            history.record(&format!("word{}", i));
            assert!(history.len() <= MAX_HISTORY_ENTRIES);
        }

        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(history.get(0), Some("word24"));
        assert_eq!(history.get(MAX_HISTORY_ENTRIES - 1), Some("word15"));
        assert!(!history.entries().contains(&"word14".to_string()));
    }

    #[test]
    fn test_from_entries_normalises() {
        let history = SearchHistory::from_entries(vec![
            "Newest".to_string(),
            " ".to_string(),
            "older".to_string(),
            "NEWEST".to_string(),
        ]);
        assert_eq!(history.entries(), &["Newest", "older"]);
    }

    #[test]
    fn test_manager_persists_every_record() {
        let shared = Arc::new(MemoryStore::new());
        let mut manager = HistoryManager::load(Box::new(SharedStore(shared.clone())));

        manager.record("tree");
        manager.record("leaf");

        let raw = shared.get(HISTORY_STORAGE_KEY).unwrap().unwrap();
        let stored: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec!["leaf", "tree"]);
    }

    #[test]
    fn test_manager_reload_after_restart() {
        let shared = Arc::new(MemoryStore::new());
        {
            let mut manager = HistoryManager::load(Box::new(SharedStore(shared.clone())));
            manager.record("cloud");
            manager.record("rain");
        }

        let manager = HistoryManager::load(Box::new(SharedStore(shared)));
        assert_eq!(manager.entries(), &["rain", "cloud"]);
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let shared = Arc::new(MemoryStore::new());
        let mut manager = HistoryManager::load(Box::new(SharedStore(shared.clone())));
        manager.record("stone");
        manager.clear();

        assert!(manager.entries().is_empty());
        assert_eq!(shared.get(HISTORY_STORAGE_KEY).unwrap(), None);

        let reloaded = HistoryManager::load(Box::new(SharedStore(shared)));
        assert!(reloaded.entries().is_empty());
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_STORAGE_KEY, "{not json").unwrap();

        let manager = HistoryManager::load(Box::new(store));
        assert!(manager.entries().is_empty());
    }

    #[test]
    fn test_broken_store_never_fails_the_caller() {
        let mut manager = HistoryManager::load(Box::new(BrokenStore));
        assert!(manager.entries().is_empty());

        manager.record("fire");
        assert_eq!(manager.entries(), &["fire"]);

        manager.clear();
        assert!(manager.entries().is_empty());
    }
}
