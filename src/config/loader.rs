//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// Name of the settings file looked up in a directory.
pub const CONFIG_FILE_NAME: &str = ".menu-kit.json";

/// Load settings from `.menu-kit.json` inside `dir`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: no settings file in `dir`
/// - `Err(ConfigError)`: read or parse failure
pub(super) fn load_from_dir(dir: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// Load settings from an explicit file. A missing file is an error here.
pub(super) fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", path);

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;

    Ok(settings)
}
