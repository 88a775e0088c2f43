//! Search orchestration.
//!
//! The [`SearchController`] turns user input into profile lookups. It owns
//! the [`SearchSession`], schedules debounced automatic searches, and writes
//! results into the shared [`Document`].
//!
//! A search moves from idle to loading when it is submitted, when a history
//! shortcut is clicked, or when the debounced auto-search fires for a new
//! query of sufficient length while nothing else is loading. It returns to
//! idle on every outcome.

mod outcome;
mod session;

pub use outcome::{SearchOutcome, Trigger};
pub use session::SearchSession;

use crate::client::ProfileSource;
use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::history::{self, HistoryStore};
use crate::page::Document;
use crate::render::{render_profile, render_repositories};
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, info_span, trace, warn, Instrument};

/// Message shown when a search is attempted with blank input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a GitHub username.";

/// Default minimum query length for automatic searches.
pub const DEFAULT_MIN_AUTO_SEARCH_LEN: usize = 3;

/// Tunables for a [`SearchController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Quiescence window before an automatic search fires.
    pub debounce: Duration,
    /// Minimum query length, in characters, for automatic searches.
    pub min_auto_search_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_auto_search_len: DEFAULT_MIN_AUTO_SEARCH_LEN,
        }
    }
}

/// Orchestrates lookups against a [`ProfileSource`].
///
/// Clones share the same session, input and document. The controller is
/// single-threaded; debounced searches run as local tasks, so
/// [`SearchController::input_changed`] must be called inside a
/// [`tokio::task::LocalSet`].
pub struct SearchController<S, K> {
    inner: Rc<Inner<S, K>>,
}

struct Inner<S, K> {
    source: S,
    history: HistoryStore<K>,
    document: Document,
    session: SearchSession,
    input: RefCell<String>,
    debouncer: RefCell<Debouncer>,
    min_auto_search_len: usize,
}

impl<S, K> Clone for SearchController<S, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, K> SearchController<S, K>
where
    S: ProfileSource + 'static,
    K: KeyValueStore + 'static,
{
    /// Creates a controller writing into `document`.
    pub fn new(
        source: S,
        history: HistoryStore<K>,
        document: Document,
        settings: SearchSettings,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                source,
                history,
                document,
                session: SearchSession::new(),
                input: RefCell::new(String::new()),
                debouncer: RefCell::new(Debouncer::new(settings.debounce)),
                min_auto_search_len: settings.min_auto_search_len,
            }),
        }
    }

    /// Paints the persisted history into the document.
    pub fn init(&self) {
        let entries = self.inner.history.load();
        debug!(entries = entries.len(), "Loaded history");
        self.inner
            .document
            .update(|page| page.history = history::render(&entries));
    }

    /// Returns the current input text.
    #[must_use]
    pub fn input(&self) -> String {
        self.inner.input.borrow().clone()
    }

    /// Returns the session state.
    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.inner.session
    }

    /// Returns the document this controller writes into.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// Handles an input change: stores the text, clears the status and
    /// reschedules the debounced automatic search.
    pub fn input_changed(&self, text: &str) {
        self.set_input(text);
        self.set_status("");

        let this = self.clone();
        self.inner.debouncer.borrow_mut().schedule(async move {
            this.search(Trigger::Auto).await;
        });
    }

    /// Waits until no debounced search is waiting or running.
    pub async fn settle(&self) {
        let mut idle = self.inner.debouncer.borrow().idle();
        // The sender lives as long as the controller.
        let _ = idle.wait_for(|count| *count == 0).await;
    }

    /// Searches for the current input.
    pub async fn submit(&self) -> SearchOutcome {
        self.search(Trigger::Submit).await
    }

    /// Replaces the input with `identifier` and searches for it.
    pub async fn select_history(&self, identifier: &str) -> SearchOutcome {
        self.search(Trigger::History(identifier.to_string())).await
    }

    /// Runs a search for the current input.
    ///
    /// Blank input always reports an error without a request. Automatic
    /// searches are additionally skipped for short queries, repeats of the
    /// last successful search, and while another search is in flight.
    /// Manual searches are not guarded against in-flight searches.
    pub async fn search(&self, trigger: Trigger) -> SearchOutcome {
        if let Trigger::History(identifier) = &trigger {
            self.set_input(identifier);
        }

        let identifier = self.inner.input.borrow().trim().to_string();
        if identifier.is_empty() {
            self.set_status(EMPTY_INPUT_MESSAGE);
            return SearchOutcome::EmptyInput;
        }

        if trigger.is_auto()
            && !self
                .inner
                .session
                .permits_auto_search(&identifier, self.inner.min_auto_search_len)
        {
            trace!(login = %identifier, "Automatic search suppressed");
            return SearchOutcome::Suppressed;
        }

        let span = info_span!("search", login = %identifier, trigger = ?trigger);
        self.run(identifier).instrument(span).await
    }

    async fn run(&self, identifier: String) -> SearchOutcome {
        let inner = &self.inner;

        self.set_status("");
        self.set_loading(true);
        info!("Looking up profile");

        let profile = match inner.source.fetch_profile(&identifier).await {
            Ok(profile) => profile,
            Err(e) => {
                let kind = e.kind();
                warn!(error = %e, "Profile lookup failed");
                self.set_loading(false);
                self.set_status(kind.message());
                return SearchOutcome::Failed(kind);
            }
        };

        let repositories = inner.source.fetch_repositories(&identifier).await;

        let profile_view = render_profile(&profile);
        let panel = render_repositories(&repositories);
        inner.document.update(|page| {
            page.profile = Some(profile_view);
            page.repositories = panel;
        });

        let entries = inner.history.record(&identifier);
        inner
            .document
            .update(|page| page.history = history::render(&entries));

        inner.session.remember(&identifier);
        self.set_loading(false);

        info!(repositories = repositories.len(), "Profile rendered");
        SearchOutcome::Found {
            identifier,
            repositories: repositories.len(),
        }
    }

    /// Replaces the input text without scheduling a search.
    pub fn set_input(&self, text: &str) {
        *self.inner.input.borrow_mut() = text.to_string();
    }

    fn set_status(&self, message: &str) {
        self.inner
            .document
            .update(|page| page.status = message.to_string());
    }

    fn set_loading(&self, loading: bool) {
        self.inner.session.set_loading(loading);
        self.inner.document.update(|page| page.loading = loading);
    }
}
