use std::path::PathBuf;

use thiserror::Error;

/// Errors of a single fetch attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
    /// The body is not JSON
    #[error("Failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),
    /// The decorated list could not be encoded for the cache
    #[error("Failed to serialize menu items: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The cache could not be written
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors of the key-value store backing the cache.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file could not be read or written
    #[error("Failed to access store file {}: {source}", path.display())]
    Io {
        /// Store file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The store file exists but is not a JSON object
    #[error("Store file {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Store file
        path: PathBuf,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}
