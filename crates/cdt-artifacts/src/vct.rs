//! # VCT (Verifiable Credential Type) metadata
//!
//! The SD-JWT VC type metadata document published to
//! `credentials/vct/`. The envelope fields are typed; claim paths stay
//! loose JSON because a path segment may be a key, an array index, or
//! `null` for "all elements".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ArtifactError;

/// A VCT metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VctDocument {
    /// The credential type identifier (URI).
    pub vct: String,
    /// Human-readable type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type this one extends, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Per-locale display metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display: Vec<VctDisplay>,
    /// Claim metadata.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub claims: Vec<VctClaim>,
    /// URI of the JSON Schema constraining credentials of this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,
}

/// Display metadata for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VctDisplay {
    /// Language tag, e.g. `en-US`.
    pub lang: String,
    /// Display name in that locale.
    pub name: String,
    /// Description in that locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Metadata for one claim of the credential type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VctClaim {
    /// Claim path. Segments are strings, integers, or `null`.
    pub path: Vec<Value>,
    /// Per-locale display metadata for the claim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display: Vec<VctDisplay>,
    /// Selective-disclosure policy for the claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sd: Option<SdPolicy>,
}

/// Whether a claim may, must, or must not be selectively disclosable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdPolicy {
    /// The claim may be made selectively disclosable.
    Allowed,
    /// The claim must always be selectively disclosable.
    Always,
    /// The claim must never be selectively disclosable.
    Never,
}

impl VctDocument {
    /// Deserialize and validate a VCT document.
    pub fn parse(document: &Value) -> Result<Self, ArtifactError> {
        let doc: Self = serde_json::from_value(document.clone()).map_err(|e| {
            ArtifactError::Malformed { kind: "VCT", reason: e.to_string() }
        })?;
        doc.validate()?;
        Ok(doc)
    }

    /// Check the structural invariants: a non-blank `vct` identifier
    /// and a non-empty path on every claim.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.vct.trim().is_empty() {
            return Err(ArtifactError::EmptyField { field: "vct" });
        }
        for claim in &self.claims {
            if claim.path.is_empty() {
                return Err(ArtifactError::EmptyField { field: "claims.path" });
            }
        }
        Ok(())
    }
}
