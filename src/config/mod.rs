//! Settings for the locale aggregator and the menu fetcher.
/// Settings file loader
mod loader;
/// Settings manager
mod manager;
/// Settings types and validation
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    DEFAULT_CACHE_KEY,
    DEFAULT_MENU_ENDPOINT,
    LocaleSettings,
    MenuSettings,
    Settings,
    ValidationError,
};
