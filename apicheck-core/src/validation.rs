//! Structural validation against a JSON Schema.

use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::debug;

use crate::types::ValidationResult;

/// Validates responses against a JSON Schema, stopping at the first violation.
///
/// Only the validator's pass/fail outcome is used. The warnings channel is
/// never populated here.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `response` against `schema`.
    ///
    /// A schema that does not compile is reported as a violation, so this
    /// never fails.
    pub fn validate(&self, response: &Value, schema: &Value) -> ValidationResult {
        let compiled = match JSONSchema::compile(schema) {
            Ok(compiled) => compiled,
            Err(e) => {
                debug!(error = %e, "schema failed to compile");
                return ValidationResult::failed(format!("Invalid schema: {e}"));
            }
        };

        let first_violation = match compiled.validate(response) {
            Ok(()) => None,
            Err(mut errors) => errors.next().map(|e| {
                let path = e.instance_path.to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{e} (at {path})")
                }
            }),
        };

        match first_violation {
            Some(message) => {
                debug!(%message, "structure validation failed");
                ValidationResult::failed(format!("Schema validation failed: {message}"))
            }
            None => ValidationResult::passed(),
        }
    }
}
