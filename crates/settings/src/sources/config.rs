use crate::error::SettingsError;
use inventory::{ValidationResult, validate_with};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_JSON: &str = include_str!("../../../../assets/invssh.default.json");
const SCHEMA_JSON: &str = include_str!("../../../../assets/invssh.schema.json");

/// Internal settings structure for JSON deserialization.
/// All fields are optional - defaults are applied by the Settings struct.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigContent {
    pub inventory: Option<String>,
    pub output: Option<String>,
}

/// Returns the embedded settings JSON schema as a string.
pub fn schema() -> &'static str {
    SCHEMA_JSON
}

/// Returns the settings written by [`ensure_config_exists`].
pub fn default_json() -> &'static str {
    DEFAULT_JSON
}

/// Validates a JSON value against the settings schema.
pub fn validate(value: &Value) -> ValidationResult {
    validate_with(SCHEMA_JSON, value)
}

/// Returns the default settings file path (~/.invssh.json).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".invssh.json"))
}

/// Ensures the settings file exists, creating a default one if missing.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or if
/// writing the default settings file fails.
pub fn ensure_config_exists() -> Result<PathBuf, SettingsError> {
    let path = config_path().ok_or(SettingsError::NoHomeDir)?;

    if !path.exists() {
        fs::write(&path, DEFAULT_JSON)?;
        log::info!("created default settings at {}", path.display());
    }

    Ok(path)
}

/// Loads settings content from a string.
///
/// Validates against the schema first, then deserializes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or fails schema validation.
pub(crate) fn load_from_str(s: &str) -> Result<ConfigContent, SettingsError> {
    let value: Value = serde_json::from_str(s).map_err(SettingsError::ConfigParse)?;

    if let ValidationResult::Invalid(errors) = validate(&value) {
        return Err(SettingsError::ConfigValidation(errors));
    }

    serde_json::from_value(value).map_err(SettingsError::ConfigParse)
}

/// Loads settings content from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is unparseable.
pub(crate) fn load_from_path(path: &Path) -> Result<ConfigContent, SettingsError> {
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Loads settings content from the default path (~/.invssh.json).
///
/// Returns `None` if the settings file doesn't exist (caller should use defaults).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or the JSON is unparseable.
pub(crate) fn load() -> Result<Option<ConfigContent>, SettingsError> {
    let path = config_path().ok_or(SettingsError::NoHomeDir)?;

    if !path.exists() {
        return Ok(None);
    }

    load_from_path(&path).map(Some)
}
