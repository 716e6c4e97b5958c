//! Artifact placement planning.
//!
//! Planning happens in two stages. [`draft`] is pure: it derives
//! repository paths from the folder conventions and renders payloads to
//! JSON text. [`check_existing`] then asks the remote which planned
//! paths already exist on the base branch, so the write step can send
//! the compare-and-swap SHA for updates and omit it for creates.

use cdt_core::{is_repo_relative, slugify, to_pretty_json, ArtifactKind, FileWriteOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlanError;
use crate::remote::RemoteRepository;

/// A named artifact document, as submitted by a design tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedDocument {
    /// Human-readable artifact name, e.g. `Home Credential`.
    pub name: String,
    /// Grouping category. When present it prefixes the derived
    /// filename, e.g. category `property` and name `Home Credential`
    /// yield `property-home-credential`.
    #[serde(default)]
    pub category: Option<String>,
    /// Explicit filename. Overrides derivation; only the canonical
    /// extension is enforced on it.
    #[serde(default)]
    pub filename: Option<String>,
    /// The artifact content itself.
    pub document: Value,
}

/// One vocabulary type inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabItem {
    /// Vocabulary type name, e.g. `EmployerCredential`.
    pub name: String,
    /// Explicit filename, overriding derivation from the name.
    #[serde(default)]
    pub filename: Option<String>,
    /// The vocabulary document.
    pub document: Value,
}

/// Payload for one publish, tagged by artifact kind.
#[derive(Debug, Clone)]
pub enum ArtifactPayload {
    /// A VCT document.
    Vct(NamedDocument),
    /// A JSON Schema document.
    JsonSchema(NamedDocument),
    /// A JSON-LD context document.
    JsonLdContext(NamedDocument),
    /// The full entity registry document. Always written to the
    /// well-known singleton path.
    EntityRegistry {
        /// The registry content.
        document: Value,
    },
    /// A batch of vocabulary types, published as one commit.
    VocabBatch(Vec<VocabItem>),
    /// A proof template document.
    ProofTemplate(NamedDocument),
}

impl ArtifactPayload {
    /// The artifact kind this payload publishes.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactPayload::Vct(_) => ArtifactKind::Vct,
            ArtifactPayload::JsonSchema(_) => ArtifactKind::JsonSchema,
            ArtifactPayload::JsonLdContext(_) => ArtifactKind::JsonLdContext,
            ArtifactPayload::EntityRegistry { .. } => ArtifactKind::EntityRegistry,
            ArtifactPayload::VocabBatch(_) => ArtifactKind::VocabBatch,
            ArtifactPayload::ProofTemplate(_) => ArtifactKind::ProofTemplate,
        }
    }
}

/// One file of a draft plan, before the existence check.
#[derive(Debug, Clone)]
pub struct DraftFile {
    /// Artifact name that produced this file, for commit messages.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// Rendered JSON text.
    pub content: String,
}

/// Paths and rendered contents for one publish, in write order.
#[derive(Debug, Clone)]
pub struct DraftPlan {
    /// The artifact kind being published.
    pub kind: ArtifactKind,
    /// Slug used in the working-branch name.
    pub slug: String,
    /// Planned files, in the order they will be written.
    pub files: Vec<DraftFile>,
}

/// One file of a completed plan.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// Artifact name that produced this file.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// Rendered JSON text.
    pub content: String,
    /// Blob SHA of the file on the base branch, if it already exists.
    pub previous_sha: Option<String>,
}

/// A draft plan with existence checks resolved against the base branch.
#[derive(Debug, Clone)]
pub struct PlacementPlan {
    /// The artifact kind being published.
    pub kind: ArtifactKind,
    /// Slug used in the working-branch name.
    pub slug: String,
    /// Planned files, in the order they will be written.
    pub files: Vec<PlannedFile>,
}

impl PlacementPlan {
    /// True when every planned path already exists on the base branch,
    /// i.e. this publish updates the artifact rather than adding it.
    pub fn is_update(&self) -> bool {
        !self.files.is_empty() && self.files.iter().all(|file| file.previous_sha.is_some())
    }

    /// Planned paths, in write order.
    pub fn paths(&self) -> Vec<String> {
        self.files.iter().map(|file| file.path.clone()).collect()
    }

    /// Per-file outcomes as they will be reported once written.
    pub fn outcomes(&self) -> Vec<FileWriteOutcome> {
        self.files
            .iter()
            .map(|file| FileWriteOutcome::new(file.path.clone(), file.previous_sha.clone()))
            .collect()
    }
}

/// Derive paths and render contents for `payload`.
///
/// Pure: no remote calls. Path derivation follows the folder
/// conventions of the governance repo, with the canonical extension
/// per kind (`.jsonld` for JSON-LD contexts, `.json` otherwise).
pub fn draft(payload: &ArtifactPayload) -> Result<DraftPlan, PlanError> {
    let kind = payload.kind();
    match payload {
        ArtifactPayload::Vct(doc)
        | ArtifactPayload::JsonSchema(doc)
        | ArtifactPayload::JsonLdContext(doc)
        | ArtifactPayload::ProofTemplate(doc) => {
            let slug = require_slug(&doc.name)?;
            let file_name = derive_file_name(kind, doc)?;
            let path = planned_path(kind, &file_name)?;
            Ok(DraftPlan {
                kind,
                slug,
                files: vec![DraftFile {
                    name: doc.name.clone(),
                    path,
                    content: render_document(&doc.document)?,
                }],
            })
        }
        ArtifactPayload::EntityRegistry { document } => {
            // singleton_path is always Some for this kind
            let path = kind
                .singleton_path()
                .unwrap_or("credentials/entities/entities.json")
                .to_owned();
            Ok(DraftPlan {
                kind,
                slug: "entities".to_owned(),
                files: vec![DraftFile {
                    name: "Entity Registry".to_owned(),
                    path,
                    content: render_document(document)?,
                }],
            })
        }
        ArtifactPayload::VocabBatch(items) => {
            if items.is_empty() {
                return Err(PlanError::EmptyBatch);
            }
            let slug = require_slug(&items[0].name)?;
            let files = items
                .iter()
                .map(|item| {
                    let file_name = match &item.filename {
                        Some(explicit) => {
                            cdt_core::normalize_filename(explicit, kind.canonical_extension())
                        }
                        None => format!("{}{}", require_slug(&item.name)?, kind.canonical_extension()),
                    };
                    Ok(DraftFile {
                        name: item.name.clone(),
                        path: planned_path(kind, &file_name)?,
                        content: render_document(&item.document)?,
                    })
                })
                .collect::<Result<Vec<_>, PlanError>>()?;
            Ok(DraftPlan { kind, slug, files })
        }
    }
}

/// Resolve which planned paths already exist on the base branch.
///
/// One `get_file` per planned path, against the resolved base branch.
/// Absence is the expected case for a first publish; any other failure
/// aborts planning.
pub async fn check_existing(
    remote: &dyn RemoteRepository,
    draft: DraftPlan,
    base_branch: &str,
) -> Result<PlacementPlan, PlanError> {
    let mut files = Vec::with_capacity(draft.files.len());
    for file in draft.files {
        let existing = remote
            .get_file(&file.path, base_branch)
            .await
            .map_err(|source| PlanError::ExistenceCheck { path: file.path.clone(), source })?;
        files.push(PlannedFile {
            name: file.name,
            path: file.path,
            content: file.content,
            previous_sha: existing.map(|found| found.sha),
        });
    }
    Ok(PlacementPlan { kind: draft.kind, slug: draft.slug, files })
}

fn require_slug(name: &str) -> Result<String, PlanError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(PlanError::UnusableName { name: name.to_owned() });
    }
    Ok(slug)
}

// Explicit filenames are caller input and can carry separators, so the
// joined path is checked before it reaches the remote.
fn planned_path(kind: ArtifactKind, file_name: &str) -> Result<String, PlanError> {
    let path = format!("{}/{}", kind.folder(), file_name);
    if !is_repo_relative(&path) {
        return Err(PlanError::UnsafePath { path });
    }
    Ok(path)
}

fn derive_file_name(kind: ArtifactKind, doc: &NamedDocument) -> Result<String, PlanError> {
    let extension = kind.canonical_extension();
    if let Some(explicit) = &doc.filename {
        return Ok(cdt_core::normalize_filename(explicit, extension));
    }
    let slug = require_slug(&doc.name)?;
    let stem = match doc.category.as_deref().map(slugify) {
        Some(category) if !category.is_empty() => format!("{category}-{slug}"),
        _ => slug,
    };
    Ok(format!("{stem}{extension}"))
}

/// Render an artifact document to the text that lands in the repo.
///
/// A string payload is taken verbatim (the design tool already
/// serialized it); anything else is pretty-printed with two-space
/// indentation so diffs in the governance repo stay reviewable.
fn render_document(document: &Value) -> Result<String, PlanError> {
    match document {
        Value::String(raw) => Ok(raw.clone()),
        other => Ok(to_pretty_json(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_remote::FakeRemote;
    use serde_json::json;

    fn schema_doc(name: &str, category: Option<&str>) -> NamedDocument {
        NamedDocument {
            name: name.to_owned(),
            category: category.map(str::to_owned),
            filename: None,
            document: json!({"type": "object"}),
        }
    }

    #[test]
    fn schema_path_joins_category_and_slug() {
        let payload = ArtifactPayload::JsonSchema(schema_doc("Home Credential", Some("property")));

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files.len(), 1);
        assert_eq!(plan.files[0].path, "credentials/schemas/property-home-credential.json");
        assert_eq!(plan.slug, "home-credential");
    }

    #[test]
    fn name_alone_derives_the_filename() {
        let payload = ArtifactPayload::Vct(schema_doc("Employer Badge", None));

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].path, "credentials/vct/employer-badge.json");
    }

    #[test]
    fn explicit_filename_wins_but_extension_is_enforced() {
        let mut doc = schema_doc("Home Credential", Some("property"));
        doc.filename = Some("legacy_home.JSON".to_owned());
        let payload = ArtifactPayload::JsonSchema(doc);

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].path, "credentials/schemas/legacy_home.json");
    }

    #[test]
    fn context_gets_the_jsonld_extension() {
        let payload = ArtifactPayload::JsonLdContext(schema_doc("Residency", None));

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].path, "credentials/contexts/residency.jsonld");
    }

    #[test]
    fn proof_template_filename_carries_the_category() {
        let payload = ArtifactPayload::ProofTemplate(schema_doc("Age Proof", Some("KYC")));

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].path, "credentials/proof-templates/kyc-age-proof.json");
    }

    #[test]
    fn registry_always_targets_the_singleton_path() {
        let payload = ArtifactPayload::EntityRegistry { document: json!({"entities": []}) };

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].path, "credentials/entities/entities.json");
    }

    #[test]
    fn batch_preserves_caller_order() {
        let items = vec![
            VocabItem { name: "Zeta".into(), filename: None, document: json!({}) },
            VocabItem { name: "Alpha".into(), filename: None, document: json!({}) },
            VocabItem { name: "Mid Point".into(), filename: None, document: json!({}) },
        ];
        let payload = ArtifactPayload::VocabBatch(items);

        let plan = draft(&payload).unwrap();

        let paths: Vec<_> = plan.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "credentials/vocab/zeta.json",
                "credentials/vocab/alpha.json",
                "credentials/vocab/mid-point.json",
            ]
        );
    }

    #[test]
    fn empty_batch_is_rejected() {
        let err = draft(&ArtifactPayload::VocabBatch(Vec::new())).unwrap_err();
        assert!(matches!(err, PlanError::EmptyBatch));
    }

    #[test]
    fn unsluggable_name_is_rejected() {
        let payload = ArtifactPayload::Vct(schema_doc("###", None));
        let err = draft(&payload).unwrap_err();
        assert!(matches!(err, PlanError::UnusableName { .. }));
    }

    #[test]
    fn traversing_explicit_filename_is_rejected() {
        let mut doc = schema_doc("Evil", None);
        doc.filename = Some("../../hooks/pre-commit".to_owned());
        let err = draft(&ArtifactPayload::JsonSchema(doc)).unwrap_err();
        assert!(matches!(err, PlanError::UnsafePath { .. }));
    }

    #[test]
    fn object_payloads_render_with_two_space_indent() {
        let payload = ArtifactPayload::Vct(NamedDocument {
            name: "Indent Check".into(),
            category: None,
            filename: None,
            document: json!({"vct": "IndentCheck", "claims": [1]}),
        });

        let plan = draft(&payload).unwrap();

        assert!(plan.files[0].content.contains("{\n  \"vct\""));
        assert!(plan.files[0].content.contains("\n    1\n"));
    }

    #[test]
    fn string_payloads_pass_through_verbatim() {
        let raw = "{\"already\":\"rendered\"}";
        let payload = ArtifactPayload::Vct(NamedDocument {
            name: "Raw".into(),
            category: None,
            filename: None,
            document: Value::String(raw.to_owned()),
        });

        let plan = draft(&payload).unwrap();

        assert_eq!(plan.files[0].content, raw);
    }

    #[tokio::test]
    async fn existence_check_reads_the_base_branch() {
        let remote = FakeRemote::new()
            .with_file("main", "credentials/vct/known.json", "{}", "existing-sha");
        let plan = DraftPlan {
            kind: ArtifactKind::Vct,
            slug: "known".into(),
            files: vec![
                DraftFile { name: "Known".into(), path: "credentials/vct/known.json".into(), content: "{}".into() },
                DraftFile { name: "Fresh".into(), path: "credentials/vct/fresh.json".into(), content: "{}".into() },
            ],
        };

        let placed = check_existing(&remote, plan, "main").await.unwrap();

        assert_eq!(placed.files[0].previous_sha.as_deref(), Some("existing-sha"));
        assert_eq!(placed.files[1].previous_sha, None);
        assert!(!placed.is_update());
        assert_eq!(
            remote.calls(),
            vec![
                "get_file credentials/vct/known.json @ main",
                "get_file credentials/vct/fresh.json @ main",
            ]
        );
    }

    #[tokio::test]
    async fn all_paths_existing_marks_an_update() {
        let remote = FakeRemote::new()
            .with_file("main", "credentials/entities/entities.json", "{}", "reg-sha");
        let plan = draft(&ArtifactPayload::EntityRegistry { document: json!({}) }).unwrap();

        let placed = check_existing(&remote, plan, "main").await.unwrap();

        assert!(placed.is_update());
        assert_eq!(placed.files[0].previous_sha.as_deref(), Some("reg-sha"));
    }

    #[tokio::test]
    async fn existence_check_failure_aborts_planning() {
        let remote = FakeRemote::new().failing_on("get_file");
        let plan = draft(&ArtifactPayload::EntityRegistry { document: json!({}) }).unwrap();

        let err = check_existing(&remote, plan, "main").await.unwrap_err();

        assert!(matches!(err, PlanError::ExistenceCheck { .. }));
    }
}
