//! Typed client for repository metadata.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/repos/{owner}/{name}` | Repository metadata (default branch) |

use crate::error::ForgeError;
use crate::types::{RepoRef, Repository};

/// Client for repository-level endpoints.
#[derive(Debug, Clone)]
pub struct RepoClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl RepoClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Resolve the repository's default branch name.
    ///
    /// Calls `GET {base_url}/repos/{owner}/{name}`. A 404 means the
    /// repository does not exist (or the token cannot see it), which is
    /// fatal for any publish.
    pub async fn get_default_branch(&self, repo: &RepoRef) -> Result<String, ForgeError> {
        let endpoint = format!("GET /repos/{repo}");
        let url = format!("{}repos/{}/{}", self.base_url, repo.owner, repo.name);

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
            return Err(ForgeError::RepoNotFound {
                repo: repo.to_string(),
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

        let repository: Repository =
            resp.json()
                .await
                .map_err(|e| ForgeError::Deserialization {
                    endpoint,
                    source: e,
                })?;

        Ok(repository.default_branch)
    }
}
