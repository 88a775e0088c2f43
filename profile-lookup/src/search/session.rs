//! Search session state.

use std::cell::{Cell, RefCell};

/// Mutable state of one search session: the last successfully searched
/// identifier and the in-flight flag.
#[derive(Debug, Default)]
pub struct SearchSession {
    last_searched: RefCell<String>,
    loading: Cell<bool>,
}

impl SearchSession {
    /// Creates an idle session with no previous search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last successfully searched identifier.
    #[must_use]
    pub fn last_searched(&self) -> String {
        self.last_searched.borrow().clone()
    }

    /// Records a successful search for `identifier`.
    pub fn remember(&self, identifier: &str) {
        *self.last_searched.borrow_mut() = identifier.to_string();
    }

    /// Returns whether a search is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    /// Returns whether an automatic search for `identifier` may start.
    ///
    /// Requires at least `min_len` characters, a change from the last
    /// successful search and no search in flight.
    #[must_use]
    pub fn permits_auto_search(&self, identifier: &str, min_len: usize) -> bool {
        identifier.chars().count() >= min_len
            && *self.last_searched.borrow() != identifier
            && !self.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_queries_are_rejected() {
        let session = SearchSession::new();

        assert!(!session.permits_auto_search("ab", 3));
        assert!(session.permits_auto_search("abc", 3));
    }

    #[test]
    fn length_counts_characters() {
        let session = SearchSession::new();

        assert!(!session.permits_auto_search("éé", 3));
    }

    #[test]
    fn repeat_of_last_search_is_rejected() {
        let session = SearchSession::new();
        session.remember("octocat");

        assert!(!session.permits_auto_search("octocat", 3));
        assert!(session.permits_auto_search("octocats", 3));
    }

    #[test]
    fn in_flight_search_blocks_auto_search() {
        let session = SearchSession::new();
        session.set_loading(true);

        assert!(!session.permits_auto_search("octocat", 3));

        session.set_loading(false);
        assert!(session.permits_auto_search("octocat", 3));
    }
}
