use crate::error::{ValidationError, ValidationResult};
use jsonschema::Validator;
use serde_json::Value;

const INVENTORY_SCHEMA_JSON: &str = include_str!("../../../assets/inventory.schema.json");

/// Returns the embedded inventory JSON schema as a string.
pub fn schema() -> &'static str {
    INVENTORY_SCHEMA_JSON
}

/// Validates a JSON value against the inventory schema.
///
/// # Panics
///
/// Panics if the embedded schema is invalid JSON or not a valid JSON Schema.
pub fn validate(value: &Value) -> ValidationResult {
    validate_with(INVENTORY_SCHEMA_JSON, value)
}

/// Validates a JSON value against an arbitrary embedded schema.
///
/// Shared with the settings loader so both documents report errors the
/// same way.
///
/// # Panics
///
/// Panics if `schema_json` is invalid JSON or not a valid JSON Schema. Only
/// pass compile-time embedded schemas.
pub fn validate_with(schema_json: &str, value: &Value) -> ValidationResult {
    let schema: Value =
        serde_json::from_str(schema_json).expect("embedded schema should be valid JSON");

    let validator = Validator::new(&schema).expect("embedded schema should be a valid JSON Schema");

    let errors: Vec<ValidationError> = validator
        .iter_errors(value)
        .map(|e| ValidationError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(json: &str) -> ValidationResult {
        let value: Value = serde_json::from_str(json).unwrap();
        validate(&value)
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: Value = serde_json::from_str(schema()).unwrap();
        assert!(schema.is_object());
        assert!(schema.get("$schema").is_some());
    }

    #[test]
    fn test_validate_host_list() {
        let result = check(r#"[{"name": "web1", "host": "10.0.0.1", "port": 2222}]"#);
        assert!(matches!(result, ValidationResult::Valid));
    }

    #[test]
    fn test_validate_document_with_defaults() {
        let result = check(
            r#"{
                "defaults": {"user": "deploy", "ansible_connection": "ssh"},
                "hosts": [{"inventory_hostname": "db1", "ansible_host": "db.internal"}]
            }"#,
        );
        assert!(matches!(result, ValidationResult::Valid));
    }

    #[test]
    fn test_validate_common_args_string_or_array() {
        assert!(matches!(
            check(r#"[{"name": "a", "common_args": "-i key"}]"#),
            ValidationResult::Valid
        ));
        assert!(matches!(
            check(r#"[{"name": "a", "commonArgs": ["-i", "key"]}]"#),
            ValidationResult::Valid
        ));
        assert!(matches!(
            check(r#"[{"name": "a", "common_args": 12}]"#),
            ValidationResult::Invalid(_)
        ));
    }

    #[test]
    fn test_validate_port_out_of_range() {
        assert!(matches!(
            check(r#"[{"name": "a", "port": 0}]"#),
            ValidationResult::Invalid(_)
        ));
        assert!(matches!(
            check(r#"[{"name": "a", "port": 70000}]"#),
            ValidationResult::Invalid(_)
        ));
    }

    #[test]
    fn test_validate_unknown_field_rejected() {
        match check(r#"[{"name": "a", "hostname": "typo"}]"#) {
            ValidationResult::Invalid(errors) => assert!(!errors.is_empty()),
            ValidationResult::Valid => panic!("Expected validation error"),
        }
    }

    #[test]
    fn test_validate_document_requires_hosts() {
        assert!(matches!(
            check(r#"{"defaults": {}}"#),
            ValidationResult::Invalid(_)
        ));
    }
}
