//! Validation errors for artifact documents.

/// A structural problem found in an artifact document before publish.
///
/// These are design-time errors reported back to the tool user, not
/// remote failures. Every variant names the offending field or entry
/// so the UI can point at it.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ArtifactError {
    /// The document does not deserialize into the expected shape.
    #[error("malformed {kind} document: {reason}")]
    Malformed {
        /// Artifact kind label.
        kind: &'static str,
        /// Deserializer diagnostic.
        reason: String,
    },

    /// A required field is missing from the document.
    #[error("missing required field {field}")]
    MissingField {
        /// JSON key of the missing field.
        field: &'static str,
    },

    /// A required field is present but blank.
    #[error("field {field} must not be empty")]
    EmptyField {
        /// JSON key of the blank field.
        field: &'static str,
    },

    /// Two registry entries share an identifier.
    #[error("duplicate entity id {id}")]
    DuplicateEntityId {
        /// The repeated identifier.
        id: String,
    },

    /// The `@context` value is neither an object, an array, nor a URI
    /// string.
    #[error("@context must be a URI, an object, or an array of either")]
    MalformedContext,

    /// The document is not a JSON Schema at all (must be an object or
    /// a boolean).
    #[error("a JSON Schema must be an object or a boolean")]
    NotASchema,

    /// The schema failed to compile under JSON Schema Draft 2020-12.
    #[error("schema does not compile under draft 2020-12: {reason}")]
    SchemaCompile {
        /// Compiler diagnostic.
        reason: String,
    },

    /// An instance failed validation against a compiled schema.
    #[error("{count} schema violation(s)")]
    SchemaViolations {
        /// Number of violations found.
        count: usize,
        /// Individual violations, in document order.
        details: Vec<SchemaViolation>,
    },

    /// A proof template requests no claims at all.
    #[error("proof template requests no claims")]
    NoRequestedClaims,
}

/// One schema violation with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    /// JSON Pointer to the violating value.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "at {}: {}", self.instance_path, self.message)
    }
}
