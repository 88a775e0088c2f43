//! Storage error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the local store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read or write the backing file.
    #[error("Failed to access store '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a JSON object.
    #[error("Store '{path}' is not a valid JSON object: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to atomically replace the backing file.
    #[error("Failed to persist store '{path}': {source}")]
    PersistError {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
}
