use std::fmt;
use std::io;
use thiserror::Error;

// ============================================================================
// Validation Types
// ============================================================================

/// A validation error with path and message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// JSON pointer to the offending value.
    pub path: String,
    /// Human-readable error description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of schema validation.
#[derive(Debug)]
pub enum ValidationResult {
    /// Validation passed with no errors.
    Valid,
    /// Validation failed with one or more errors.
    Invalid(Vec<ValidationError>),
}

/// Joins validation errors into a single line for error messages.
pub fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// Inventory Error
// ============================================================================

/// Error type for inventory loading and host resolution.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Inventory file I/O error.
    #[error("failed to read inventory: {0}")]
    Io(#[from] io::Error),

    /// Inventory is not valid JSON, or does not deserialize.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Inventory does not match the embedded schema.
    #[error("inventory validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A host has neither a usable `host` nor a usable `name`.
    #[error("host #{index} has neither a host address nor a name")]
    MissingRequiredAttribute { index: usize },

    /// A value that would break the stanza it is written into.
    #[error("host #{index} has an invalid {attribute}")]
    InvalidAttribute {
        index: usize,
        attribute: &'static str,
    },

    /// A host reuses a name already taken by an earlier host.
    #[error("host #{index} reuses the name {name:?}")]
    DuplicateName { index: usize, name: String },
}
