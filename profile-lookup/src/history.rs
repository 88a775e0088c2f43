//! Recency list of looked-up usernames.

use crate::page::HistoryShortcut;
use crate::storage::KeyValueStore;
use tracing::{debug, warn};

/// Storage key holding the JSON-encoded history list.
pub const HISTORY_KEY: &str = "gh-profile-history";

/// Default number of entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 6;

/// Bounded, most-recent-first list of lower-cased identifiers.
///
/// Entries are unique; recording an existing identifier moves it to the
/// front. The persisted list never exceeds the configured limit.
#[derive(Debug, Clone)]
pub struct HistoryStore<K> {
    store: K,
    limit: usize,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// Creates a history over `store` keeping [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new(store: K) -> Self {
        Self::with_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Creates a history over `store` keeping at most `limit` entries.
    pub fn with_limit(store: K, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Reads the persisted list.
    ///
    /// Absent, unreadable or malformed values yield an empty list; nothing is
    /// ever surfaced to the caller. Hand-edited lists are normalised: entries
    /// are lower-cased, later duplicates dropped and the list capped at the
    /// limit.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read history, treating as empty");
                return Vec::new();
            }
        };

        decode(&raw, self.limit)
    }

    /// Moves `identifier` (lower-cased) to the front, truncates, persists and
    /// returns the updated list.
    pub fn record(&self, identifier: &str) -> Vec<String> {
        let normalized = identifier.to_lowercase();
        let mut entries = self.load();
        // Loaded entries are already lower-cased.
        entries.retain(|entry| *entry != normalized);
        entries.insert(0, normalized);
        entries.truncate(self.limit);

        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(e) = self.store.set(HISTORY_KEY, &json) {
                    warn!(error = %e, "Failed to persist history");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode history"),
        }

        debug!(entries = entries.len(), "History recorded");
        entries
    }
}

/// Produces one shortcut per entry, in order. An empty list renders nothing.
#[must_use]
pub fn render(entries: &[String]) -> Vec<HistoryShortcut> {
    entries
        .iter()
        .map(|entry| HistoryShortcut {
            identifier: entry.clone(),
        })
        .collect()
}

/// Decodes a persisted list, keeping only string members, lower-cased and
/// unique, at most `limit` of them.
fn decode(raw: &str, limit: usize) -> Vec<String> {
    let items = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(_) => {
            debug!("Stored history is not a list, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "Stored history is malformed, treating as empty");
            return Vec::new();
        }
    };

    let mut entries: Vec<String> = Vec::with_capacity(limit.min(items.len()));
    for item in items {
        if entries.len() >= limit {
            break;
        }
        let serde_json::Value::String(entry) = item else {
            continue;
        };
        let entry = entry.to_lowercase();
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn load_is_empty_when_absent() {
        let history = HistoryStore::new(MemoryStore::new());
        assert!(history.load().is_empty());
    }

    #[test]
    fn load_fails_closed_on_malformed_values() {
        let store = MemoryStore::new();
        let history = HistoryStore::new(store.clone());

        for raw in ["not json", "{\"a\": 1}", "42", "null", "[\"a\""] {
            store.set(HISTORY_KEY, raw).unwrap();
            assert!(history.load().is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn load_drops_non_string_members() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"["octocat", 3, null, "torvalds"]"#).unwrap();

        let history = HistoryStore::new(store);
        assert_eq!(history.load(), vec!["octocat", "torvalds"]);
    }

    #[test]
    fn record_dedups_most_recent_first() {
        let history = HistoryStore::new(MemoryStore::new());

        for id in ["a", "b", "a", "c"] {
            history.record(id);
        }

        assert_eq!(history.load(), vec!["c", "a", "b"]);
    }

    #[test]
    fn record_lowercases_and_matches_case_insensitively() {
        let history = HistoryStore::new(MemoryStore::new());

        history.record("OctoCat");
        let entries = history.record("octocat");

        assert_eq!(entries, vec!["octocat"]);
    }

    #[test]
    fn record_replaces_mixed_case_entries() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"["OctoCat","torvalds"]"#).unwrap();
        let history = HistoryStore::new(store.clone());

        let entries = history.record("octocat");

        assert_eq!(entries, vec!["octocat", "torvalds"]);
        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["octocat","torvalds"]"#)
        );
    }

    #[test]
    fn load_normalises_hand_edited_lists() {
        let store = MemoryStore::new();
        store
            .set(HISTORY_KEY, r#"["a","B","c","b","d","e","f","g","h","a"]"#)
            .unwrap();
        let history = HistoryStore::new(store);

        let entries = history.load();

        assert_eq!(entries, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn load_respects_custom_limit() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, r#"["a","b","c","d"]"#).unwrap();

        assert_eq!(HistoryStore::with_limit(store, 2).load(), vec!["a", "b"]);
    }

    #[test]
    fn record_never_exceeds_limit() {
        let history = HistoryStore::new(MemoryStore::new());

        for i in 0..20 {
            let entries = history.record(&format!("user{i}"));
            assert!(entries.len() <= DEFAULT_HISTORY_LIMIT);
        }

        let entries = history.load();
        assert_eq!(entries.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(entries[0], "user19");
        assert_eq!(entries[5], "user14");
    }

    #[test]
    fn record_recovers_from_malformed_history() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "garbage").unwrap();

        let history = HistoryStore::new(store);
        assert_eq!(history.record("octocat"), vec!["octocat"]);
    }

    #[test]
    fn render_produces_one_shortcut_per_entry() {
        let entries = vec!["c".to_string(), "a".to_string()];

        let shortcuts = render(&entries);

        assert_eq!(shortcuts.len(), 2);
        assert_eq!(shortcuts[0].identifier, "c");
        assert_eq!(shortcuts[1].identifier, "a");
        assert!(render(&[]).is_empty());
    }
}
