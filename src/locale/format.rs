//! Translation file formats.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use super::LocaleError;

/// A translation file format, identified by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleFormat {
    /// `*.yml`
    Yml,
    /// `*.yaml`
    Yaml,
    /// `*.json`
    Json,
}

impl LocaleFormat {
    /// Groups are merged in this order; a later group wins on key collision.
    pub const MERGE_ORDER: [Self; 3] = [Self::Yml, Self::Yaml, Self::Json];

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Yml => "yml",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Glob matching file names of this format, e.g. `*.yml`.
    #[must_use]
    pub fn file_pattern(self) -> String {
        format!("*.{}", self.extension())
    }

    /// Parse file content into a JSON-like message table.
    ///
    /// `path` is only used for the error message.
    pub fn parse(self, content: &str, path: &Path) -> Result<Value, LocaleError> {
        let parsed = match self {
            Self::Yml | Self::Yaml => {
                serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
            }
            Self::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| LocaleError::Parse { path: path.to_path_buf(), message })
    }
}

impl fmt::Display for LocaleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Unwrap a `default` export envelope.
///
/// Bundled translation modules wrap their payload as `{ "default": { ... } }`.
/// Only an object-valued `default` is treated as an envelope, so a message
/// table that happens to contain a `"default": "..."` string is kept whole.
#[must_use]
pub fn unwrap_default_export(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("default").is_some_and(Value::is_object) => {
            map.remove("default").unwrap_or(Value::Null)
        }
        other => other,
    }
}
