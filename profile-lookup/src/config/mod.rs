//! Configuration loading.
//!
//! Settings come from an optional `config.toml`:
//! ```toml
//! api-base = "https://api.github.com/users"
//! debounce-ms = 700
//! min-auto-search-len = 3
//! history-limit = 6
//! repository-page-size = 5
//! storage-path = "/home/me/.local/share/profile-lookup/store.json"
//! prefers-dark = true
//! ```
//! Every key is optional.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::LookupConfig;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name used under the user's data and config directories.
const APP_DIR: &str = "profile-lookup";

/// Loads config from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if the file does not exist, or another
/// [`ConfigError`] if it cannot be read, parsed or validated.
pub fn load_config(path: &Path) -> Result<LookupConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = LookupConfig::from_toml(&content, path)?;
    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Loads config from `path`, falling back to defaults when the file does
/// not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if an existing file cannot be read, parsed or
/// validated.
pub fn load_config_or_default(path: &Path) -> Result<LookupConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::MissingFile { .. }) => {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(LookupConfig::default())
        }
        other => other,
    }
}

/// Default config file location: `$XDG_CONFIG_HOME/profile-lookup/config.toml`,
/// then `$HOME/.config/profile-lookup/config.toml`, then `./config.toml`.
#[must_use]
pub fn default_config_path() -> PathBuf {
    user_dir("XDG_CONFIG_HOME", ".config")
        .map(|dir| dir.join(APP_DIR).join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Default store location: `$XDG_DATA_HOME/profile-lookup/store.json`,
/// then `$HOME/.local/share/profile-lookup/store.json`, then
/// `./profile-lookup-store.json`.
#[must_use]
pub fn default_storage_path() -> PathBuf {
    user_dir("XDG_DATA_HOME", ".local/share")
        .map(|dir| dir.join(APP_DIR).join("store.json"))
        .unwrap_or_else(|| PathBuf::from("profile-lookup-store.json"))
}

fn user_dir(xdg_var: &str, home_suffix: &str) -> Option<PathBuf> {
    let non_empty = |var: &str| std::env::var_os(var).filter(|value| !value.is_empty());

    non_empty(xdg_var)
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(home_suffix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();

        let result = load_config(&temp.path().join("config.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();

        let config = load_config_or_default(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, LookupConfig::default());
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = LookupConfig::default();

        assert_eq!(config.api_base, "https://api.github.com/users");
        assert_eq!(config.history_limit, 6);
        assert_eq!(config.repository_page_size, 5);
        assert_eq!(
            config.search_settings().debounce,
            Duration::from_millis(700)
        );
        assert_eq!(config.search_settings().min_auto_search_len, 3);
    }

    #[test]
    fn can_load_partial_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
debounce-ms = 250
storage-path = "/tmp/store.json"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/store.json")));
        assert_eq!(config.history_limit, 6);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "debounce-ms = \"soon\"").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::TomlError { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = LookupConfig::from_toml("token = \"abc\"", Path::new("config.toml"));
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn validation_rejects_bad_values() {
        for content in [
            "api-base = \"not a url\"",
            "api-base = \"mailto:someone@example.com\"",
            "history-limit = 0",
            "min-auto-search-len = 0",
            "repository-page-size = 0",
            "repository-page-size = 101",
        ] {
            let result = LookupConfig::from_toml(content, Path::new("config.toml"));
            assert!(
                matches!(result, Err(ConfigError::ValidationError { .. })),
                "expected validation error for {content}"
            );
        }
    }

    #[test]
    fn storage_path_prefers_xdg_data_home() {
        temp_env::with_vars(
            [
                ("XDG_DATA_HOME", Some("/data")),
                ("HOME", Some("/home/me")),
            ],
            || {
                assert_eq!(
                    default_storage_path(),
                    PathBuf::from("/data/profile-lookup/store.json")
                );
            },
        );
    }

    #[test]
    fn storage_path_falls_back_to_home() {
        temp_env::with_vars(
            [("XDG_DATA_HOME", None::<&str>), ("HOME", Some("/home/me"))],
            || {
                assert_eq!(
                    default_storage_path(),
                    PathBuf::from("/home/me/.local/share/profile-lookup/store.json")
                );
            },
        );
    }

    #[test]
    fn config_path_falls_back_to_working_directory() {
        temp_env::with_vars(
            [("XDG_CONFIG_HOME", None::<&str>), ("HOME", None::<&str>)],
            || {
                assert_eq!(default_config_path(), PathBuf::from("config.toml"));
            },
        );
    }
}
