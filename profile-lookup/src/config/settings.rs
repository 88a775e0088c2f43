//! Config file deserialization.

use crate::client::{DEFAULT_API_BASE, DEFAULT_REPOSITORY_PAGE_SIZE};
use crate::config::ConfigError;
use crate::debounce::DEFAULT_DEBOUNCE;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::search::{SearchSettings, DEFAULT_MIN_AUTO_SEARCH_LEN};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Largest page size the repositories endpoint accepts.
const MAX_REPOSITORY_PAGE_SIZE: u8 = 100;

/// Parsed contents of a `config.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LookupConfig {
    /// Users endpoint; profiles live at `{api-base}/{username}`.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Quiet period before an automatic search fires, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum query length for automatic searches.
    #[serde(default = "default_min_auto_search_len")]
    pub min_auto_search_len: usize,

    /// Number of history entries kept.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of repositories requested per profile.
    #[serde(default = "default_repository_page_size")]
    pub repository_page_size: u8,

    /// Store file (optional, defaults to the user data directory).
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Overrides the detected system dark-mode signal (optional).
    #[serde(default)]
    pub prefers_dark: Option<bool>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            debounce_ms: default_debounce_ms(),
            min_auto_search_len: default_min_auto_search_len(),
            history_limit: default_history_limit(),
            repository_page_size: default_repository_page_size(),
            storage_path: None,
            prefers_dark: None,
        }
    }
}

impl LookupConfig {
    /// Parses config from TOML text. `path` is used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is invalid or fails validation.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Validates the config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first invalid value.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        match Url::parse(&self.api_base) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => return Err(invalid(format!("api-base '{}' is not a base URL", self.api_base))),
        }

        if self.min_auto_search_len == 0 {
            return Err(invalid("min-auto-search-len must be at least 1".to_string()));
        }

        if self.history_limit == 0 {
            return Err(invalid("history-limit must be at least 1".to_string()));
        }

        if !(1..=MAX_REPOSITORY_PAGE_SIZE).contains(&self.repository_page_size) {
            return Err(invalid(format!(
                "repository-page-size must be between 1 and {MAX_REPOSITORY_PAGE_SIZE}"
            )));
        }

        Ok(())
    }

    /// Returns the search controller tunables.
    #[must_use]
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            min_auto_search_len: self.min_auto_search_len,
        }
    }
}

pub(crate) fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

pub(crate) fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

pub(crate) fn default_min_auto_search_len() -> usize {
    DEFAULT_MIN_AUTO_SEARCH_LEN
}

pub(crate) fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

pub(crate) fn default_repository_page_size() -> u8 {
    DEFAULT_REPOSITORY_PAGE_SIZE
}
