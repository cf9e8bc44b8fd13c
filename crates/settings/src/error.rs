use inventory::{ValidationError, format_validation_errors};
use std::io;
use thiserror::Error;

/// Error type for settings loading operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Home directory not found.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Settings file I/O error.
    #[error("failed to read settings: {0}")]
    ConfigIo(#[from] io::Error),

    /// Settings JSON parse error (not valid JSON at all).
    #[error("invalid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Settings schema validation error.
    #[error("settings validation failed: {}", format_validation_errors(.0))]
    ConfigValidation(Vec<ValidationError>),
}
