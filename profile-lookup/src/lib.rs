#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod app;
pub mod client;
pub mod config;
pub mod debounce;
pub mod history;
pub mod models;
pub mod page;
pub mod render;
pub mod search;
pub mod storage;
pub mod templates;
pub mod theme;

pub use app::{App, AppError};
pub use client::{
    classify_failure, FailureKind, GitHubClient, LookupError, ProfileSource, DEFAULT_API_BASE,
    DEFAULT_REPOSITORY_PAGE_SIZE,
};
pub use config::{
    default_config_path, default_storage_path, load_config, load_config_or_default, ConfigError,
    LookupConfig,
};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use history::{HistoryStore, DEFAULT_HISTORY_LIMIT, HISTORY_KEY};
pub use models::{Profile, RepositorySummary};
pub use page::{Document, Page};
pub use render::{render_profile, render_repositories};
pub use search::{
    SearchController, SearchOutcome, SearchSession, SearchSettings, Trigger, EMPTY_INPUT_MESSAGE,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use templates::{PageRenderer, TemplateError};
pub use theme::{detect_prefers_dark, Theme, ThemeController, THEME_KEY};
