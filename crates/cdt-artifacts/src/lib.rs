//! # cdt-artifacts — Publishable credential artifact models
//!
//! Typed models for the artifact kinds the design tools publish to the
//! governance repository. Provides:
//!
//! - **VCT metadata** ([`VctDocument`]) following the SD-JWT VC type
//!   metadata shape, with claim paths and selective-disclosure policy.
//! - **JSON-LD contexts** ([`ContextDocument`]) with shape checks on
//!   `@context`.
//! - **Entity registry** ([`EntityRegistry`]) with unique-id
//!   enforcement across the singleton trust list.
//! - **Vocabulary types** ([`VocabType`]) for batch publication.
//! - **Proof templates** ([`ProofTemplate`]) compiled into DIF
//!   Presentation Exchange definitions.
//! - **JSON Schema checks** ([`check_schema`], [`validate_instance`])
//!   under Draft 2020-12.
//! - **OpenAPI summaries** ([`openapi::summarize`]) for the inspector
//!   tool.
//!
//! Every model offers `parse(&Value)` for payloads arriving off the
//! wire and `validate()` for already-typed values; both report
//! [`ArtifactError`] with the offending field named. The documents
//! themselves stay `serde_json::Value`-friendly: publishing renders
//! the caller's JSON, not a lossy round-trip through these types.

pub mod context;
pub mod error;
pub mod openapi;
pub mod presentation;
pub mod registry;
pub mod schema;
pub mod vct;
pub mod vocab;

// Re-export primary types.
pub use context::ContextDocument;
pub use error::{ArtifactError, SchemaViolation};
pub use openapi::{summarize, DocumentSummary, OperationSummary};
pub use presentation::{
    ClaimRequirement, Constraints, FieldConstraint, InputDescriptor, PresentationDefinition,
    ProofTemplate,
};
pub use registry::{EntityEntry, EntityRegistry};
pub use schema::{check_schema, validate_instance};
pub use vct::{SdPolicy, VctClaim, VctDisplay, VctDocument};
pub use vocab::{VocabProperty, VocabType};
