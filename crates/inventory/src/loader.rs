use crate::error::{InventoryError, ValidationResult};
use crate::schema::validate;
use crate::types::Inventory;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Loads an inventory from a string.
///
/// Validates against the schema first, then deserializes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or fails schema validation.
pub fn load_from_str(s: &str) -> Result<Inventory, InventoryError> {
    s.parse()
}

/// Loads an inventory from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the inventory is invalid.
pub fn load_from_path(path: &Path) -> Result<Inventory, InventoryError> {
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Loads an inventory from a reader, typically stdin.
///
/// # Errors
///
/// Returns an error if reading fails or the inventory is invalid.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Inventory, InventoryError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    load_from_str(&contents)
}

impl FromStr for Inventory {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;

        if let ValidationResult::Invalid(errors) = validate(&value) {
            return Err(InventoryError::Validation(errors));
        }

        Ok(serde_json::from_value(value)?)
    }
}
