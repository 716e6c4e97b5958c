//! # Vocabulary types
//!
//! One file per vocabulary type under `credentials/vocab/`, usually
//! published as a batch in a single commit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

/// A vocabulary type document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabType {
    /// Type name, e.g. `EmployerCredential`.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties credentials of this type carry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<VocabProperty>,
}

/// One property of a vocabulary type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabProperty {
    /// Property name.
    pub name: String,
    /// Value type, e.g. `string`, `date`, `number`.
    #[serde(rename = "type")]
    pub value_type: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VocabType {
    /// Deserialize and validate a vocabulary type document.
    pub fn parse(document: &Value) -> Result<Self, ArtifactError> {
        let doc: Self = serde_json::from_value(document.clone()).map_err(|e| {
            ArtifactError::Malformed { kind: "vocabulary type", reason: e.to_string() }
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check that the type and all its properties are named.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.name.trim().is_empty() {
            return Err(ArtifactError::EmptyField { field: "name" });
        }
        for property in &self.properties {
            if property.name.trim().is_empty() {
                return Err(ArtifactError::EmptyField { field: "properties.name" });
            }
        }
        Ok(())
    }
}
