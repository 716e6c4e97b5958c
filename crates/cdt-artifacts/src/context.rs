//! # JSON-LD context documents
//!
//! Published to `credentials/contexts/` with the `.jsonld` extension.
//! The term definitions themselves stay untyped; the model only pins
//! the envelope and checks the shapes JSON-LD allows for `@context`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

/// A JSON-LD context document: an object with an `@context` member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDocument {
    /// The context value: a URI string, a term-definition object, or
    /// an array mixing both.
    #[serde(rename = "@context")]
    pub context: Value,
}

impl ContextDocument {
    /// Deserialize and validate a context document.
    pub fn parse(document: &Value) -> Result<Self, ArtifactError> {
        let doc: Self = serde_json::from_value(document.clone()).map_err(|e| {
            ArtifactError::Malformed { kind: "JSON-LD context", reason: e.to_string() }
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check that `@context` has one of the shapes JSON-LD permits.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if context_shape_ok(&self.context) {
            Ok(())
        } else {
            Err(ArtifactError::MalformedContext)
        }
    }

    /// Term names defined directly in the context, for display in the
    /// design tool. URI-only contexts define no local terms.
    pub fn term_names(&self) -> Vec<&str> {
        match &self.context {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_object())
                .flat_map(|map| map.keys().map(String::as_str))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn context_shape_ok(context: &Value) -> bool {
    match context {
        Value::String(uri) => !uri.trim().is_empty(),
        Value::Object(_) => true,
        Value::Array(items) => !items.is_empty() && items.iter().all(context_shape_ok),
        _ => false,
    }
}
