//! Payload loading shared by the plan, publish, and validate subcommands.
//!
//! A payload file carries the artifact document itself: one JSON object
//! for most kinds, a JSON array of `{name, document}` items for a
//! vocabulary batch. Naming metadata (`--name`, `--category`,
//! `--filename`) comes from flags, not from the file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde_json::Value;

use cdt_artifacts::{
    check_schema, ArtifactError, ContextDocument, EntityRegistry, ProofTemplate, VctDocument,
    VocabType,
};
use cdt_publish::{ArtifactPayload, NamedDocument, VocabItem};

/// Artifact kinds addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayloadKind {
    /// A VCT (verifiable credential type) document.
    Vct,
    /// A JSON Schema document.
    Schema,
    /// A JSON-LD context document.
    Context,
    /// The entity registry singleton.
    Entities,
    /// A batch of vocabulary types.
    Vocab,
    /// A proof template document.
    ProofTemplate,
}

/// Read and parse a JSON payload file.
pub fn load_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))
}

/// Assemble the publish payload from a parsed file and naming flags.
///
/// `--name` is required for every kind except `entities` (fixed
/// singleton path) and `vocab` (names travel inside the batch items).
pub fn build_payload(
    kind: PayloadKind,
    document: Value,
    name: Option<&str>,
    category: Option<&str>,
    filename: Option<&str>,
) -> Result<ArtifactPayload> {
    let named = |document: Value| -> Result<NamedDocument> {
        let Some(name) = name else {
            bail!("--name is required for this artifact kind");
        };
        Ok(NamedDocument {
            name: name.to_string(),
            category: category.map(str::to_string),
            filename: filename.map(str::to_string),
            document,
        })
    };

    match kind {
        PayloadKind::Vct => Ok(ArtifactPayload::Vct(named(document)?)),
        PayloadKind::Schema => Ok(ArtifactPayload::JsonSchema(named(document)?)),
        PayloadKind::Context => Ok(ArtifactPayload::JsonLdContext(named(document)?)),
        PayloadKind::Entities => Ok(ArtifactPayload::EntityRegistry { document }),
        PayloadKind::Vocab => {
            let items: Vec<VocabItem> = serde_json::from_value(document).context(
                "a vocab payload file must be a JSON array of {name, document} items",
            )?;
            Ok(ArtifactPayload::VocabBatch(items))
        }
        PayloadKind::ProofTemplate => Ok(ArtifactPayload::ProofTemplate(named(document)?)),
    }
}

/// Run one kind's semantic checks over a single document.
pub fn check_artifact(kind: PayloadKind, document: &Value) -> Result<(), ArtifactError> {
    match kind {
        PayloadKind::Vct => VctDocument::parse(document).map(|_| ()),
        PayloadKind::Schema => check_schema(document),
        PayloadKind::Context => ContextDocument::parse(document).map(|_| ()),
        PayloadKind::Entities => EntityRegistry::parse(document).map(|_| ()),
        PayloadKind::Vocab => VocabType::parse(document).map(|_| ()),
        PayloadKind::ProofTemplate => ProofTemplate::parse(document).map(|_| ()),
    }
}

/// Validate every document inside an assembled payload.
///
/// Same checks the API service runs before planning, so a publish the
/// service would refuse is refused here with the same reason.
pub fn check_payload(payload: &ArtifactPayload) -> Result<(), ArtifactError> {
    match payload {
        ArtifactPayload::Vct(doc) => VctDocument::parse(&doc.document).map(|_| ()),
        ArtifactPayload::JsonSchema(doc) => check_schema(&doc.document),
        ArtifactPayload::JsonLdContext(doc) => ContextDocument::parse(&doc.document).map(|_| ()),
        ArtifactPayload::EntityRegistry { document } => {
            EntityRegistry::parse(document).map(|_| ())
        }
        ArtifactPayload::VocabBatch(items) => {
            for item in items {
                VocabType::parse(&item.document)?;
            }
            Ok(())
        }
        ArtifactPayload::ProofTemplate(doc) => ProofTemplate::parse(&doc.document).map(|_| ()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_payload_requires_a_name_for_named_kinds() {
        let err = build_payload(PayloadKind::Vct, json!({}), None, None, None).unwrap_err();
        assert!(err.to_string().contains("--name"));
    }

    #[test]
    fn build_payload_entities_needs_no_name() {
        let payload =
            build_payload(PayloadKind::Entities, json!({"entities": []}), None, None, None)
                .unwrap();
        assert!(matches!(payload, ArtifactPayload::EntityRegistry { .. }));
    }

    #[test]
    fn build_payload_parses_a_vocab_batch() {
        let document = json!([
            {"name": "EmployerCredential", "document": {"@context": {}}},
            {"name": "PayrollCredential", "document": {"@context": {}}}
        ]);
        let payload = build_payload(PayloadKind::Vocab, document, None, None, None).unwrap();
        match payload {
            ArtifactPayload::VocabBatch(items) => assert_eq!(items.len(), 2),
            other => panic!("expected a vocab batch, got {other:?}"),
        }
    }

    #[test]
    fn build_payload_rejects_a_non_array_vocab_file() {
        let err = build_payload(PayloadKind::Vocab, json!({"name": "X"}), None, None, None)
            .unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn check_artifact_accepts_a_valid_schema() {
        let document = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object"
        });
        assert!(check_artifact(PayloadKind::Schema, &document).is_ok());
    }

    #[test]
    fn check_artifact_rejects_a_non_schema() {
        assert!(check_artifact(PayloadKind::Schema, &json!(42)).is_err());
    }

    #[test]
    fn load_json_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"not json {{{").unwrap();
        let err = load_json(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
