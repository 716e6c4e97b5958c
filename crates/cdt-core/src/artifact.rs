//! # Publish Data Model
//!
//! One request shape for every artifact kind. A [`PublishRequest`] is
//! constructed per user action, consumed exactly once by the orchestrator,
//! and discarded; only the terminal [`PublishResult`] is kept where a
//! domain record (a proof template, a VCT project) needs to note that it
//! was published.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The kinds of credential-ecosystem documents the platform publishes.
///
/// Each kind carries its fixed placement conventions: target folder,
/// canonical file extension, and the branch-name prefix used for its
/// working branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// A Verifiable Credential Type description.
    Vct,
    /// A JSON Schema describing a credential's claims.
    JsonSchema,
    /// A JSON-LD context document.
    JsonLdContext,
    /// The registry of known issuing/verifying entities (a singleton file).
    EntityRegistry,
    /// A batch of vocabulary type definitions, committed together.
    VocabBatch,
    /// A DIF Presentation Exchange proof template.
    ProofTemplate,
}

impl ArtifactKind {
    /// Human label used in generated commit messages and PR titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vct => "VCT",
            Self::JsonSchema => "JSON Schema",
            Self::JsonLdContext => "JSON-LD Context",
            Self::EntityRegistry => "Entity Registry",
            Self::VocabBatch => "Vocabulary",
            Self::ProofTemplate => "Proof Template",
        }
    }

    /// Branch-name prefix: working branches are
    /// `<prefix>/<action>-<slug>-<millis>`.
    pub fn branch_prefix(&self) -> &'static str {
        match self {
            Self::Vct => "vct",
            Self::JsonSchema => "schema",
            Self::JsonLdContext => "context",
            Self::EntityRegistry => "entities",
            Self::VocabBatch => "vocab",
            Self::ProofTemplate => "proof-template",
        }
    }

    /// Target folder inside the governance repository, without a trailing
    /// slash.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Vct => "credentials/vct",
            Self::JsonSchema => "credentials/schemas",
            Self::JsonLdContext => "credentials/contexts",
            Self::EntityRegistry => "credentials/entities",
            Self::VocabBatch => "credentials/vocab",
            Self::ProofTemplate => "credentials/proof-templates",
        }
    }

    /// Canonical file extension for this kind, with the leading dot.
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Self::JsonLdContext => ".jsonld",
            _ => ".json",
        }
    }

    /// The fixed repository path for kinds that maintain a single file,
    /// updated in place on every publish.
    pub fn singleton_path(&self) -> Option<&'static str> {
        match self {
            Self::EntityRegistry => Some("credentials/entities/entities.json"),
            _ => None,
        }
    }

    /// Stable string form, matching the serialized representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vct => "vct",
            Self::JsonSchema => "json-schema",
            Self::JsonLdContext => "json-ld-context",
            Self::EntityRegistry => "entity-registry",
            Self::VocabBatch => "vocab-batch",
            Self::ProofTemplate => "proof-template",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a file's bytes travel to the remote contents API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    /// Text content; valid UTF-8.
    Utf8,
    /// Opaque bytes; transported base64-encoded.
    Base64,
}

/// One file to be placed on the working branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFile {
    /// Repository-relative path, e.g. `credentials/schemas/person.json`.
    pub path: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
    /// Transport encoding for the remote write.
    pub encoding: ContentEncoding,
}

impl ArtifactFile {
    /// A UTF-8 text file.
    pub fn utf8(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into().into_bytes(),
            encoding: ContentEncoding::Utf8,
        }
    }

    /// A binary file, transported base64-encoded.
    pub fn binary(path: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content,
            encoding: ContentEncoding::Base64,
        }
    }
}

/// The validated input to one publish action.
///
/// Invariants, enforced at construction: `files` is non-empty, every path
/// is unique and repository-relative, and the commit message and PR title
/// are non-blank (the template layer fills them before this type is
/// built).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Which artifact kind is being published.
    pub artifact_kind: ArtifactKind,
    /// Files to place on the working branch, in write order.
    pub files: Vec<ArtifactFile>,
    /// Commit message for the file write(s).
    pub commit_message: String,
    /// Pull request title.
    pub pr_title: String,
    /// Pull request body.
    pub pr_body: String,
    /// Login handle attributed in the PR body.
    pub author_handle: String,
}

impl PublishRequest {
    /// Build a request, validating the publish invariants.
    pub fn new(
        artifact_kind: ArtifactKind,
        files: Vec<ArtifactFile>,
        commit_message: impl Into<String>,
        pr_title: impl Into<String>,
        pr_body: impl Into<String>,
        author_handle: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::EmptyFiles);
        }

        let mut seen = std::collections::HashSet::new();
        for file in &files {
            if !is_repo_relative(&file.path) {
                return Err(ValidationError::UnsafePath {
                    path: file.path.clone(),
                });
            }
            if !seen.insert(file.path.as_str()) {
                return Err(ValidationError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }

        let commit_message = commit_message.into();
        if commit_message.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "commit_message",
            });
        }

        let pr_title = pr_title.into();
        if pr_title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "pr_title" });
        }

        Ok(Self {
            artifact_kind,
            files,
            commit_message,
            pr_title,
            pr_body: pr_body.into(),
            author_handle: author_handle.into(),
        })
    }

    /// The request's paths, in write order.
    pub fn file_paths(&self) -> Vec<String> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Whether `path` is a safe repository-relative path.
///
/// Rejects empty paths, absolute paths, empty segments, and `..`
/// traversal. The same rule is applied when planners derive paths and
/// again when a [`PublishRequest`] is constructed.
pub fn is_repo_relative(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.split('/').any(|seg| seg.is_empty() || seg == "..")
}

/// Where a publish branches from. Resolved once per publish and never
/// cached: the remote default branch or an override can change between
/// requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseBranchResolution {
    /// The base branch the PR will target.
    pub branch_name: String,
    /// The commit the working branch is forked from.
    pub head_commit_sha: String,
}

/// The planner's create-vs-update decision for one file.
///
/// `previous_sha` is `Some` only when the path already exists on the base
/// branch; the remote write must then include it, or the remote rejects
/// the write as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWriteOutcome {
    /// Repository-relative path.
    pub path: String,
    /// Blob SHA of the existing file on the base branch, if any.
    pub previous_sha: Option<String>,
    /// Whether this write updates an existing file.
    pub is_update: bool,
}

impl FileWriteOutcome {
    /// Record an outcome; `is_update` follows from the SHA's presence.
    pub fn new(path: impl Into<String>, previous_sha: Option<String>) -> Self {
        let is_update = previous_sha.is_some();
        Self {
            path: path.into(),
            previous_sha,
            is_update,
        }
    }
}

/// The terminal, immutable result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    /// Pull request number assigned by the remote.
    pub pr_number: u64,
    /// Web URL of the pull request.
    pub pr_url: String,
    /// Title the PR was opened with.
    pub pr_title: String,
    /// The working branch the PR merges from.
    pub branch_name: String,
    /// Paths written, in the planner's order.
    pub file_paths: Vec<String>,
}
