//! Translation file aggregation.
//!
//! Every `*.yml`, `*.yaml` and `*.json` file of the locales directory becomes
//! one entry of a locale → messages table. Groups are merged in that order, so
//! `en.json` wins over `en.yml`.

/// Merged table and process-wide state
mod catalog;
/// File discovery and locale key derivation
mod discovery;
/// Aggregation errors
mod error;
/// Supported file formats
mod format;

pub use catalog::{
    LocaleEntry,
    Messages,
    aggregate,
    available_locales,
    init,
    load_entries,
    messages,
};
pub use discovery::{
    discover,
    locale_key,
};
pub use error::LocaleError;
pub use format::{
    LocaleFormat,
    unwrap_default_export,
};
