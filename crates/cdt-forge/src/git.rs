//! Typed client for the git data API, used only by the vocabulary batch
//! path to build one commit holding N new files.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/repos/{owner}/{name}/git/blobs` | Create a blob |
//! | GET    | `/repos/{owner}/{name}/git/commits/{sha}` | Fetch a commit |
//! | POST   | `/repos/{owner}/{name}/git/trees` | Create a tree |
//! | POST   | `/repos/{owner}/{name}/git/commits` | Create a commit |

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::ForgeError;
use crate::types::{
    CreateBlobRequest, CreateCommitRequest, CreateTreeRequest, GitCommit, ObjectSha, RepoRef,
    TreeEntry,
};

/// Client for the low-level git object endpoints.
#[derive(Debug, Clone)]
pub struct GitDataClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl GitDataClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Store raw bytes as a blob, returning its SHA.
    ///
    /// Calls `POST {base_url}/repos/{owner}/{name}/git/blobs`. Content is
    /// transported base64-encoded regardless of payload type.
    pub async fn create_blob(&self, repo: &RepoRef, content: &[u8]) -> Result<String, ForgeError> {
        let endpoint = format!("POST /repos/{repo}/git/blobs");
        let url = format!(
            "{}repos/{}/{}/git/blobs",
            self.base_url, repo.owner, repo.name
        );

        let body = CreateBlobRequest {
            content: BASE64.encode(content),
            encoding: "base64".to_string(),
        };

        let sha: ObjectSha = self.post_json(&endpoint, &url, &body).await?;
        Ok(sha.sha)
    }

    /// Fetch a commit, primarily for its root tree SHA.
    ///
    /// Calls `GET {base_url}/repos/{owner}/{name}/git/commits/{sha}`.
    pub async fn get_commit(&self, repo: &RepoRef, sha: &str) -> Result<GitCommit, ForgeError> {
        let endpoint = format!("GET /repos/{repo}/git/commits/{sha}");
        let url = format!(
            "{}repos/{}/{}/git/commits/{sha}",
            self.base_url, repo.owner, repo.name
        );

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| ForgeError::Deserialization {
                endpoint,
                source: e,
            })
    }

    /// Create a tree on top of `base_tree_sha` with the given entries,
    /// returning the new tree's SHA. The base tree's existing entries are
    /// preserved; the new entries are added alongside them.
    pub async fn create_tree(
        &self,
        repo: &RepoRef,
        base_tree_sha: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, ForgeError> {
        let endpoint = format!("POST /repos/{repo}/git/trees");
        let url = format!(
            "{}repos/{}/{}/git/trees",
            self.base_url, repo.owner, repo.name
        );

        let body = CreateTreeRequest {
            base_tree: base_tree_sha.to_string(),
            tree: entries,
        };

        let sha: ObjectSha = self.post_json(&endpoint, &url, &body).await?;
        Ok(sha.sha)
    }

    /// Create a commit pointing at `tree_sha` with the given parents,
    /// returning the new commit's SHA.
    pub async fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree_sha: &str,
        parents: Vec<String>,
    ) -> Result<String, ForgeError> {
        let endpoint = format!("POST /repos/{repo}/git/commits");
        let url = format!(
            "{}repos/{}/{}/git/commits",
            self.base_url, repo.owner, repo.name
        );

        let body = CreateCommitRequest {
            message: message.to_string(),
            tree: tree_sha.to_string(),
            parents,
        };

        let sha: ObjectSha = self.post_json(&endpoint, &url, &body).await?;
        Ok(sha.sha)
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        url: &str,
        body: &B,
    ) -> Result<T, ForgeError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| ForgeError::Deserialization {
                endpoint: endpoint.to_string(),
                source: e,
            })
    }
}
