//! Wires the controllers of a lookup session together.

mod error;

pub use error::AppError;

use crate::client::{GitHubClient, ProfileSource};
use crate::config::LookupConfig;
use crate::history::HistoryStore;
use crate::page::Document;
use crate::search::{SearchController, SearchOutcome, Trigger};
use crate::storage::{FileStore, KeyValueStore};
use crate::templates::{PageRenderer, TemplateError};
use crate::theme::{Theme, ThemeController};
use std::path::Path;
use tracing::info;

/// A complete lookup session: one document and the controllers that
/// write into it.
pub struct App<S, K> {
    document: Document,
    search: SearchController<S, K>,
    theme: ThemeController<K>,
    history: HistoryStore<K>,
    renderer: PageRenderer,
}

impl App<GitHubClient, FileStore> {
    /// Builds a session against the GitHub API, persisting to the store file
    /// at `storage_path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if the HTTP client cannot be built.
    pub fn github(
        config: &LookupConfig,
        storage_path: &Path,
        prefers_dark: bool,
    ) -> Result<Self, AppError> {
        info!(
            api_base = %config.api_base,
            store = %storage_path.display(),
            "Starting lookup session"
        );
        let client = GitHubClient::new(&config.api_base, config.repository_page_size)?;
        Ok(Self::new(
            client,
            FileStore::new(storage_path),
            config,
            prefers_dark,
        ))
    }
}

impl<S, K> App<S, K>
where
    S: ProfileSource + 'static,
    K: KeyValueStore + Clone + 'static,
{
    /// Builds a session over the given source and store.
    pub fn new(source: S, store: K, config: &LookupConfig, prefers_dark: bool) -> Self {
        let document = Document::new();
        let history = HistoryStore::with_limit(store.clone(), config.history_limit);
        let search = SearchController::new(
            source,
            history.clone(),
            document.clone(),
            config.search_settings(),
        );
        let theme = ThemeController::new(store, document.clone(), prefers_dark);

        Self {
            document,
            search,
            theme,
            history,
            renderer: PageRenderer::new(),
        }
    }

    /// Applies the initial theme and paints the stored history.
    pub fn init(&self) -> Theme {
        let theme = self.theme.init();
        self.search.init();
        theme
    }

    /// Replaces the input with `identifier` and submits it.
    pub async fn lookup(&self, identifier: &str) -> SearchOutcome {
        self.search.set_input(identifier);
        self.search.search(Trigger::Submit).await
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn search(&self) -> &SearchController<S, K> {
        &self.search
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeController<K> {
        &self.theme
    }

    /// Returns the stored history, most recent first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.load()
    }

    /// Paints the current page as text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if painting fails.
    pub fn paint(&self) -> Result<String, TemplateError> {
        self.renderer.paint(&self.document.snapshot())
    }
}
