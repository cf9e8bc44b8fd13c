use crate::error::SettingsError;
use crate::sources::config::{self, ConfigContent};
use std::path::{Path, PathBuf};

/// User settings loaded from `~/.invssh.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Inventory used when none is given on the command line.
    pub inventory: Option<PathBuf>,
    /// Destination used when none is given on the command line.
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Destination relative to the home directory when `output` is unset.
    pub const DEFAULT_OUTPUT: &'static str = ".ssh/config.d/invssh";

    /// Load settings from `~/.invssh.json`, or defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Home directory cannot be determined
    /// - Settings file exists but is invalid JSON or fails validation
    pub fn load() -> Result<Self, SettingsError> {
        let content = config::load()?.unwrap_or_default();
        Ok(Self::from_content(content))
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is invalid JSON or fails
    /// validation.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        config::load_from_path(path).map(Self::from_content)
    }

    fn from_content(content: ConfigContent) -> Self {
        Self {
            inventory: content.inventory.as_deref().map(expand_tilde),
            output: content.output.as_deref().map(expand_tilde),
        }
    }

    /// Where the generated config goes when `--output` is not given.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoHomeDir` if `output` is unset and the home
    /// directory cannot be determined.
    pub fn output_path(&self) -> Result<PathBuf, SettingsError> {
        match &self.output {
            Some(path) => Ok(path.clone()),
            None => dirs::home_dir()
                .map(|home| home.join(Self::DEFAULT_OUTPUT))
                .ok_or(SettingsError::NoHomeDir),
        }
    }

    /// Get the path to the settings file.
    pub fn config_path() -> Option<PathBuf> {
        config::config_path()
    }

    /// Ensure the settings file exists, creating a default one if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or if
    /// writing the default settings file fails.
    pub fn ensure_config_exists() -> Result<PathBuf, SettingsError> {
        config::ensure_config_exists()
    }
}

/// Expands a leading `~` to the home directory.
///
/// Paths without one, or when no home directory is known, are returned as is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/'),
        None => None,
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
