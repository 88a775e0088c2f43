//! Local key-value storage.
//!
//! Values are plain strings addressed by key, in the manner of a browser's
//! local storage. [`FileStore`] keeps every key in one JSON object on disk;
//! [`MemoryStore`] keeps them in memory for tests and throwaway sessions.

mod error;

pub use error::StorageError;

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A string key-value store.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a temporary file in the same
/// directory, so readers never observe a partially written store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file is created on
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StorageError::IoError {
                    path: self.path.display().to_string(),
                    source: e,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::JsonError {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        let io_error = |source: std::io::Error| StorageError::IoError {
            path: self.path.display().to_string(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_error)?;

        let json = serde_json::to_string_pretty(map).map_err(|e| StorageError::JsonError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.persist(&self.path)
            .map_err(|e| StorageError::PersistError {
                path: self.path.display().to_string(),
                source: e,
            })?;

        debug!(path = %self.path.display(), keys = map.len(), "Store written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.read_map()?;
        Ok(map.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::JsonError { path, source }) => {
                warn!(path = %path, error = %source, "Store is corrupt, starting a fresh one");
                Map::new()
            }
            Err(e) => return Err(e),
        };

        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }
}

/// An in-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("store.json"));

        assert_eq!(store.get("gh-theme").unwrap(), None);
    }

    #[test]
    fn can_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("nested/store.json"));

        store.set("gh-theme", "dark").unwrap();
        store.set("gh-profile-history", r#"["octocat"]"#).unwrap();

        assert_eq!(store.get("gh-theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            store.get("gh-profile-history").unwrap().as_deref(),
            Some(r#"["octocat"]"#)
        );
    }

    #[test]
    fn values_survive_a_new_handle() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");

        FileStore::new(&path).set("gh-theme", "light").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("gh-theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn corrupt_file_is_an_error_on_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("gh-theme"),
            Err(StorageError::JsonError { .. })
        ));
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = FileStore::new(&path);
        store.set("gh-theme", "dark").unwrap();

        assert_eq!(store.get("gh-theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("key", "value").unwrap();

        assert_eq!(other.get("key").unwrap().as_deref(), Some("value"));
    }
}
