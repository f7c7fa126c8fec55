use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Endpoint returning every meal whose name starts with "c".
pub const DEFAULT_MENU_ENDPOINT: &str = "https://www.themealdb.com/api/json/v1/1/search.php?f=c";

/// Storage key of the decorated menu list.
pub const DEFAULT_CACHE_KEY: &str = "menuItems";

/// One invalid settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "menu.endpoint")
    pub field_path: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ValidationError {
    /// Error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Settings could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more fields are invalid
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.menu-kit.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Locale aggregator settings
    pub locales: LocaleSettings,
    /// Menu fetcher settings
    pub menu: MenuSettings,
}

/// Where translation files are looked up.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Directory holding `*.yml`, `*.yaml` and `*.json` translation files.
    pub dir: PathBuf,
    /// Also scan subdirectories. Keys then keep the relative path (`sub/en`).
    pub recursive: bool,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from("locales"), recursive: false }
    }
}

/// Recipe API access and caching.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuSettings {
    /// Absolute http(s) URL of the search endpoint.
    pub endpoint: String,

    /// When false the store is never read nor written.
    pub cache_enabled: bool,
    /// Store key of the cached list.
    pub cache_key: String,

    /// JSON file backing the persistent key-value store.
    pub store_path: PathBuf,

    /// Upper bound for the whole request, body included.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MENU_ENDPOINT.to_string(),
            cache_enabled: true,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            store_path: PathBuf::from(".menu-kit/storage.json"),
            timeout_secs: 10,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    /// Check every field, collecting all problems.
    ///
    /// # Errors
    /// - Required field is empty
    /// - Endpoint is not an absolute http(s) URL
    /// - Timeout is zero
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales.dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "locales.dir",
                "The directory cannot be empty. Example: \"locales\"",
            ));
        }

        if self.menu.endpoint.is_empty() {
            errors.push(ValidationError::new(
                "menu.endpoint",
                format!("The endpoint cannot be empty. Example: \"{DEFAULT_MENU_ENDPOINT}\""),
            ));
        } else if let Err(e) = reqwest::Url::parse(&self.menu.endpoint) {
            errors.push(ValidationError::new(
                "menu.endpoint",
                format!("Invalid URL '{}': {e}", self.menu.endpoint),
            ));
        } else if !(self.menu.endpoint.starts_with("http://")
            || self.menu.endpoint.starts_with("https://"))
        {
            errors.push(ValidationError::new(
                "menu.endpoint",
                format!("Only http and https are supported, got '{}'", self.menu.endpoint),
            ));
        }

        if self.menu.cache_key.is_empty() {
            errors.push(ValidationError::new(
                "menu.cacheKey",
                format!("The cache key cannot be empty. Example: \"{DEFAULT_CACHE_KEY}\""),
            ));
        }

        if self.menu.cache_enabled && self.menu.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "menu.storePath",
                "A store path is required while the cache is enabled, or set cacheEnabled to false",
            ));
        }

        if self.menu.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "menu.timeoutSecs",
                "The timeout must be at least 1 second",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
