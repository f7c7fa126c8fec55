//! Settings manager.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
    loader,
};

/// Holds the validated settings and where they came from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: Settings,

    /// File the settings were read from, if any
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// A manager holding the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: Settings::default(), source: None }
    }

    /// Load `.menu-kit.json` from `dir`, falling back to defaults when absent.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, dir: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings from directory: {:?}", dir);

        let (settings, source) = match dir {
            Some(dir) => match loader::load_from_dir(dir)? {
                Some(settings) => {
                    tracing::debug!("Loaded settings: {:?}", settings);
                    (settings, Some(dir.join(loader::CONFIG_FILE_NAME)))
                }
                None => (Settings::default(), None),
            },
            None => (Settings::default(), None),
        };

        self.apply(settings, source)
    }

    /// Load an explicit settings file. Unlike [`Self::load_settings`], a missing
    /// file is an error.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(path)?;
        self.apply(settings, Some(path.to_path_buf()))
    }

    /// Replace the settings, e.g. after command-line overrides.
    pub fn update_settings(&mut self, new_settings: Settings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// Validate `settings` and make them current.
    fn apply(&mut self, settings: Settings, source: Option<PathBuf>) -> Result<(), ConfigError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.source = source;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Current settings.
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    /// Settings file in use, `None` for defaults.
    #[must_use]
    pub const fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }
}
