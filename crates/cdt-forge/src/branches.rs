//! Typed client for branch references.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/repos/{owner}/{name}/git/ref/heads/{branch}` | Resolve head SHA |
//! | POST   | `/repos/{owner}/{name}/git/refs` | Create a branch ref |

use crate::error::ForgeError;
use crate::types::{CreateRefRequest, GitRef, RepoRef};

/// Client for branch reference endpoints.
#[derive(Debug, Clone)]
pub struct BranchClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl BranchClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Resolve a branch to its head commit SHA.
    ///
    /// Calls `GET {base_url}/repos/{owner}/{name}/git/ref/heads/{branch}`.
    /// A 404 maps to [`ForgeError::BranchNotFound`].
    pub async fn get_head_sha(&self, repo: &RepoRef, branch: &str) -> Result<String, ForgeError> {
        let endpoint = format!("GET /repos/{repo}/git/ref/heads/{branch}");
        let url = format!(
            "{}repos/{}/{}/git/ref/heads/{branch}",
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

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ForgeError::BranchNotFound {
                repo: repo.to_string(),
                branch: branch.to_string(),
            });
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api {
                endpoint,
                status,
                body,
            });
        }

        let git_ref: GitRef = resp
            .json()
            .await
            .map_err(|e| ForgeError::Deserialization {
                endpoint,
                source: e,
            })?;

        Ok(git_ref.object.sha)
    }

    /// Create a branch pointing at an existing commit.
    ///
    /// Calls `POST {base_url}/repos/{owner}/{name}/git/refs` with
    /// `refs/heads/{branch}`. A 409 or 422 maps to
    /// [`ForgeError::BranchAlreadyExists`] and is fatal: working-branch
    /// names embed a timestamp so collisions indicate a real problem, not
    /// a retryable race.
    pub async fn create(
        &self,
        repo: &RepoRef,
        branch: &str,
        from_sha: &str,
    ) -> Result<(), ForgeError> {
        let endpoint = format!("POST /repos/{repo}/git/refs");
        let url = format!(
            "{}repos/{}/{}/git/refs",
            self.base_url, repo.owner, repo.name
        );

        let body = CreateRefRequest {
            r#ref: format!("refs/heads/{branch}"),
            sha: from_sha.to_string(),
        };

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::CONFLICT
            || status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
        {
            return Err(ForgeError::BranchAlreadyExists {
                repo: repo.to_string(),
                branch: branch.to_string(),
            });
        }

        if !status.is_success() {
            let status = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api {
                endpoint,
                status,
                body,
            });
        }

        Ok(())
    }
}
