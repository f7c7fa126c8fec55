use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while aggregating translation files.
///
/// Aggregation is all-or-nothing: the first error aborts it.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// The locales directory is missing or a path lies outside it
    #[error("Invalid locales path: {0}")]
    InvalidPath(String),
    /// A directory entry could not be read during the scan
    #[error("Failed to scan locales directory: {0}")]
    Walk(String),
    /// A translation file could not be read
    #[error("Failed to read translation file {}: {source}", path.display())]
    Io {
        /// Offending file
        path: PathBuf,
        /// Underlying read error
        #[source]
        source: std::io::Error,
    },
    /// A translation file is not valid YAML/JSON
    #[error("Failed to parse translation file {}: {message}", path.display())]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },
    /// The process-wide table was already built
    #[error("Locale messages are already initialized")]
    AlreadyInitialized,
}
