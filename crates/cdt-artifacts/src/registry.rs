//! # Entity registry
//!
//! The singleton trust list at `credentials/entities/entities.json`.
//! Every publish replaces the whole document, so the model covers the
//! full registry, not a patch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

/// The full entity registry document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Registered entities. Order is preserved as authored.
    pub entities: Vec<EntityEntry>,
}

/// One registered entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityEntry {
    /// Stable registry identifier, unique within the document.
    pub id: String,
    /// Display name.
    pub name: String,
    /// DIDs and other identifiers the entity is known by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<String>,
    /// Roles the entity holds, e.g. `issuer`, `verifier`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl EntityRegistry {
    /// Deserialize and validate a registry document.
    pub fn parse(document: &Value) -> Result<Self, ArtifactError> {
        let doc: Self = serde_json::from_value(document.clone()).map_err(|e| {
            ArtifactError::Malformed { kind: "entity registry", reason: e.to_string() }
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check that every entry has an id and a name, and that ids are
    /// unique across the document.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entities {
            if entry.id.trim().is_empty() {
                return Err(ArtifactError::EmptyField { field: "entities.id" });
            }
            if entry.name.trim().is_empty() {
                return Err(ArtifactError::EmptyField { field: "entities.name" });
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ArtifactError::DuplicateEntityId { id: entry.id.clone() });
            }
        }
        Ok(())
    }

    /// Look up an entry by registry id.
    pub fn find(&self, id: &str) -> Option<&EntityEntry> {
        self.entities.iter().find(|entry| entry.id == id)
    }
}
