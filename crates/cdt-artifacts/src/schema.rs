//! # JSON Schema artifacts
//!
//! Schemas are published as opaque JSON documents; the only structural
//! guarantee the platform gives reviewers is that a published schema
//! compiles under Draft 2020-12. Instance validation is offered for
//! the design tools (preview a credential against its schema) and the
//! test issuer.

use serde_json::Value;

use crate::error::{ArtifactError, SchemaViolation};

/// Check that `document` compiles as a JSON Schema under Draft 2020-12.
///
/// A schema must be an object or a boolean; anything else is rejected
/// before the compiler runs. Compiler diagnostics are passed through
/// verbatim.
pub fn check_schema(document: &Value) -> Result<(), ArtifactError> {
    if !matches!(document, Value::Object(_) | Value::Bool(_)) {
        return Err(ArtifactError::NotASchema);
    }
    jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .build(document)
        .map(|_| ())
        .map_err(|e| ArtifactError::SchemaCompile { reason: e.to_string() })
}

/// Validate `instance` against `document`, collecting every violation.
pub fn validate_instance(document: &Value, instance: &Value) -> Result<(), ArtifactError> {
    let validator = jsonschema::options()
        .with_draft(jsonschema::Draft::Draft202012)
        .build(document)
        .map_err(|e| ArtifactError::SchemaCompile { reason: e.to_string() })?;

    let details: Vec<SchemaViolation> = validator
        .iter_errors(instance)
        .map(|err| SchemaViolation {
            instance_path: err.instance_path.to_string(),
            message: err.to_string(),
        })
        .collect();

    if details.is_empty() {
        Ok(())
    } else {
        Err(ArtifactError::SchemaViolations { count: details.len(), details })
    }
}
