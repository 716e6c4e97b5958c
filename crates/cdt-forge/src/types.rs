//! Wire types for the forge REST API.
//!
//! Response fields use `#[serde(default)]` for resilience against schema
//! evolution in the live API; `serde(deny_unknown_fields)` is
//! intentionally NOT used. Only the fields the publish workflow consumes
//! are modeled.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// An `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Build a reference from owner and name.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ConfigError::InvalidRepo(s.to_string())),
        }
    }
}

/// Repository metadata, as returned by `GET /repos/{owner}/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub full_name: Option<String>,
    pub default_branch: String,
}

/// A git reference, as returned by the `git/ref` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub r#ref: String,
    pub object: GitObject,
}

/// The object a reference points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
}

/// Request body for `POST /git/refs`.
#[derive(Debug, Serialize)]
pub struct CreateRefRequest {
    #[serde(rename = "ref")]
    pub r#ref: String,
    pub sha: String,
}

/// A file fetched from the contents API, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    /// Decoded file bytes.
    pub content: Vec<u8>,
    /// Blob SHA of this version of the file.
    pub sha: String,
}

/// Raw contents response; `content` is base64 with embedded newlines.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsResponse {
    #[serde(default)]
    pub path: Option<String>,
    pub sha: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Request body for `PUT /contents/{path}`.
#[derive(Debug, Serialize)]
pub struct PutContentsRequest {
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
    pub branch: String,
    /// Blob SHA of the file being replaced; present only for updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Response from `PUT /contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PutContentsResponse {
    pub content: WrittenContent,
    #[serde(default)]
    pub commit: Option<CommitSummary>,
}

/// The written file's new identity.
#[derive(Debug, Clone, Deserialize)]
pub struct WrittenContent {
    #[serde(default)]
    pub path: Option<String>,
    pub sha: String,
}

/// A commit reference inside other responses.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
}

/// Request body for `POST /git/blobs`.
#[derive(Debug, Serialize)]
pub struct CreateBlobRequest {
    pub content: String,
    pub encoding: String,
}

/// Response carrying a newly created object's SHA (`blobs`, `trees`,
/// `commits` creation endpoints all answer with this shape).
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectSha {
    pub sha: String,
}

/// A commit, as returned by `GET /git/commits/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    pub tree: ObjectSha,
    #[serde(default)]
    pub parents: Vec<ObjectSha>,
}

/// One entry in a tree creation request.
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub sha: String,
}

impl TreeEntry {
    /// A regular-file blob entry.
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644".to_string(),
            entry_type: "blob".to_string(),
            sha: sha.into(),
        }
    }
}

/// Request body for `POST /git/trees`.
#[derive(Debug, Serialize)]
pub struct CreateTreeRequest {
    pub base_tree: String,
    pub tree: Vec<TreeEntry>,
}

/// Request body for `POST /git/commits`.
#[derive(Debug, Serialize)]
pub struct CreateCommitRequest {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Request body for `POST /pulls`.
#[derive(Debug, Serialize)]
pub struct CreatePullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// An opened pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_ref_parses_owner_and_name() {
        let repo: RepoRef = "openwallet-labs/credential-governance".parse().unwrap();
        assert_eq!(repo.owner, "openwallet-labs");
        assert_eq!(repo.name, "credential-governance");
        assert_eq!(repo.to_string(), "openwallet-labs/credential-governance");
    }

    #[test]
    fn repo_ref_rejects_malformed_input() {
        for bad in ["", "no-slash", "/name", "owner/", "a/b/c"] {
            assert!(bad.parse::<RepoRef>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn put_contents_omits_sha_for_creates() {
        let req = PutContentsRequest {
            message: "Add file".into(),
            content: "e30=".into(),
            branch: "schema/add-x-1".into(),
            sha: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("sha").is_none());
    }

    #[test]
    fn put_contents_includes_sha_for_updates() {
        let req = PutContentsRequest {
            message: "Update file".into(),
            content: "e30=".into(),
            branch: "schema/update-x-1".into(),
            sha: Some("abc123".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["sha"], "abc123");
    }

    #[test]
    fn tree_entry_blob_uses_file_mode() {
        let entry = TreeEntry::blob("credentials/vocab/a.json", "deadbeef");
        assert_eq!(entry.mode, "100644");
        assert_eq!(entry.entry_type, "blob");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "blob");
    }

    #[test]
    fn git_commit_deserializes_tree_sha() {
        let raw = r#"{
            "sha": "c0ffee",
            "tree": {"sha": "7ree"},
            "parents": [{"sha": "papa"}],
            "message": "ignored"
        }"#;
        let commit: GitCommit = serde_json::from_str(raw).unwrap();
        assert_eq!(commit.tree.sha, "7ree");
        assert_eq!(commit.parents.len(), 1);
    }
}
