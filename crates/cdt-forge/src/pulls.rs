//! Typed client for pull requests.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/repos/{owner}/{name}/pulls` | Open a pull request |

use crate::error::ForgeError;
use crate::types::{CreatePullRequest, PullRequest, RepoRef};

/// Client for pull request endpoints.
#[derive(Debug, Clone)]
pub struct PullsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl PullsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Open a pull request from `head` into `base`.
    ///
    /// Calls `POST {base_url}/repos/{owner}/{name}/pulls`.
    pub async fn create(
        &self,
        repo: &RepoRef,
        title: &str,
        body: &str,
        head: &str,
        base: &str,
    ) -> Result<PullRequest, ForgeError> {
        let endpoint = format!("POST /repos/{repo}/pulls");
        let url = format!("{}repos/{}/{}/pulls", self.base_url, repo.owner, repo.name);

        let payload = CreatePullRequest {
            title: title.to_string(),
            body: body.to_string(),
            head: head.to_string(),
            base: base.to_string(),
        };

        let resp = self
            .http
            .post(&url)
            .json(&payload)
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
}
