//! # Proof templates and presentation definitions
//!
//! A proof template is authored as a small declarative form (which
//! credential type, which claims, why) and published as a DIF
//! Presentation Exchange definition that verifier software can execute
//! directly. The builder here is the single place that mapping lives.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cdt_core::slugify;

use crate::error::ArtifactError;

/// A proof template as authored in the design tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofTemplate {
    /// Template name, e.g. `Age Proof`.
    pub name: String,
    /// Grouping category; prefixes the published filename.
    pub category: String,
    /// What the verifier is trying to establish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The credential type (VCT) the proof draws from.
    pub credential_type: String,
    /// Claims the verifier asks to be disclosed.
    pub requested_claims: Vec<ClaimRequirement>,
}

/// One claim a proof template requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequirement {
    /// Claim name, dotted for nesting, e.g. `address.street`.
    pub claim: String,
    /// Why this claim is needed, shown to the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Whether the holder may withhold the claim.
    #[serde(default)]
    pub optional: bool,
}

// ── DIF Presentation Exchange output ─────────────────────────────────

/// A DIF Presentation Exchange presentation definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationDefinition {
    /// Definition identifier, derived from the template name.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overall purpose, shown to the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Input descriptors; one per credential type requested.
    pub input_descriptors: Vec<InputDescriptor>,
}

/// One input descriptor of a presentation definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Descriptor identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field constraints.
    pub constraints: Constraints,
}

/// Constraints block of an input descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraints {
    /// Required and optional fields.
    pub fields: Vec<FieldConstraint>,
}

/// One field constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConstraint {
    /// JSONPath alternatives locating the field.
    pub path: Vec<String>,
    /// Why this field is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// JSON Schema filter the field value must satisfy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Whether the field may be omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl ProofTemplate {
    /// Deserialize and validate a proof template.
    pub fn parse(document: &Value) -> Result<Self, ArtifactError> {
        let doc: Self = serde_json::from_value(document.clone()).map_err(|e| {
            ArtifactError::Malformed { kind: "proof template", reason: e.to_string() }
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check the template invariants: name, category, and credential
    /// type present, and at least one named claim requested.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.name.trim().is_empty() {
            return Err(ArtifactError::EmptyField { field: "name" });
        }
        if self.category.trim().is_empty() {
            return Err(ArtifactError::EmptyField { field: "category" });
        }
        if self.credential_type.trim().is_empty() {
            return Err(ArtifactError::EmptyField { field: "credential_type" });
        }
        if self.requested_claims.is_empty() {
            return Err(ArtifactError::NoRequestedClaims);
        }
        for requirement in &self.requested_claims {
            if requirement.claim.trim().is_empty() {
                return Err(ArtifactError::EmptyField { field: "requested_claims.claim" });
            }
        }
        Ok(())
    }

    /// Build the presentation definition this template publishes.
    ///
    /// The first field constraint pins the credential type via a
    /// `const` filter on `$.vct`; each requested claim becomes one
    /// field constraint at `$.<claim>`.
    pub fn presentation_definition(&self) -> PresentationDefinition {
        let mut fields = Vec::with_capacity(self.requested_claims.len() + 1);
        fields.push(FieldConstraint {
            path: vec!["$.vct".to_owned()],
            purpose: None,
            filter: Some(serde_json::json!({
                "type": "string",
                "const": self.credential_type,
            })),
            optional: None,
        });
        for requirement in &self.requested_claims {
            fields.push(FieldConstraint {
                path: vec![format!("$.{}", requirement.claim)],
                purpose: requirement.purpose.clone(),
                filter: None,
                optional: requirement.optional.then_some(true),
            });
        }

        PresentationDefinition {
            id: slugify(&self.name),
            name: Some(self.name.clone()),
            purpose: self.description.clone(),
            input_descriptors: vec![InputDescriptor {
                id: slugify(&self.credential_type),
                name: Some(self.credential_type.clone()),
                constraints: Constraints { fields },
            }],
        }
    }

    /// The artifact document published to the governance repo: the
    /// template header plus its rendered presentation definition.
    pub fn to_document(&self) -> Result<Value, ArtifactError> {
        self.validate()?;
        let mut document = serde_json::Map::new();
        document.insert("name".to_owned(), Value::String(self.name.clone()));
        document.insert("category".to_owned(), Value::String(self.category.clone()));
        if let Some(description) = &self.description {
            document.insert("description".to_owned(), Value::String(description.clone()));
        }
        let definition = serde_json::to_value(self.presentation_definition()).map_err(|e| {
            ArtifactError::Malformed { kind: "proof template", reason: e.to_string() }
        })?;
        document.insert("presentation_definition".to_owned(), definition);
        Ok(Value::Object(document))
    }
}
