//! Typed client for the contents API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/repos/{owner}/{name}/contents/{path}?ref={ref}` | Read a file |
//! | PUT    | `/repos/{owner}/{name}/contents/{path}` | Create or update a file |
//!
//! File bytes travel base64-encoded in both directions. The live API
//! wraps response base64 at 60 columns, so decoding strips embedded
//! whitespace first.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::ForgeError;
use crate::types::{ContentsResponse, PutContentsRequest, PutContentsResponse, RepoFile, RepoRef};

/// Client for file read/write endpoints.
#[derive(Debug, Clone)]
pub struct ContentsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ContentsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch a file at `path` on `reference` (branch, tag, or SHA).
    ///
    /// Returns `Ok(None)` on 404: a missing path is the planner's signal
    /// to create rather than update, not an error.
    pub async fn get_file(
        &self,
        repo: &RepoRef,
        path: &str,
        reference: &str,
    ) -> Result<Option<RepoFile>, ForgeError> {
        let endpoint = format!("GET /repos/{repo}/contents/{path}");
        let url = format!(
            "{}repos/{}/{}/contents/{path}?ref={reference}",
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
            return Ok(None);
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

        let raw: ContentsResponse =
            resp.json()
                .await
                .map_err(|e| ForgeError::Deserialization {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;

        let content = decode_content(&endpoint, &raw)?;
        Ok(Some(RepoFile {
            content,
            sha: raw.sha,
        }))
    }

    /// Create or update a file on `branch`.
    ///
    /// `previous_sha` must be `Some` when the path already exists on the
    /// branch; the remote rejects a mismatched SHA with 409, surfaced as
    /// [`ForgeError::Conflict`] (a stale write).
    pub async fn write_file(
        &self,
        repo: &RepoRef,
        path: &str,
        content: &[u8],
        message: &str,
        branch: &str,
        previous_sha: Option<&str>,
    ) -> Result<String, ForgeError> {
        let endpoint = format!("PUT /repos/{repo}/contents/{path}");
        let url = format!(
            "{}repos/{}/{}/contents/{path}",
            self.base_url, repo.owner, repo.name
        );

        let body = PutContentsRequest {
            message: message.to_string(),
            content: BASE64.encode(content),
            branch: branch.to_string(),
            sha: previous_sha.map(str::to_string),
        };

        let resp = self
            .http
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            return Err(ForgeError::Conflict {
                path: path.to_string(),
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

        let written: PutContentsResponse =
            resp.json()
                .await
                .map_err(|e| ForgeError::Deserialization {
                    endpoint,
                    source: e,
                })?;

        Ok(written.content.sha)
    }
}

/// Decode the base64 `content` field, tolerating the API's line wrapping.
fn decode_content(endpoint: &str, raw: &ContentsResponse) -> Result<Vec<u8>, ForgeError> {
    let Some(encoded) = raw.content.as_deref() else {
        // Directory listings and submodule entries carry no content field.
        return Err(ForgeError::InvalidContent {
            endpoint: endpoint.to_string(),
            detail: "response has no content field (not a file?)".to_string(),
        });
    };

    if let Some(encoding) = raw.encoding.as_deref() {
        if encoding != "base64" {
            return Err(ForgeError::InvalidContent {
                endpoint: endpoint.to_string(),
                detail: format!("unsupported content encoding {encoding:?}"),
            });
        }
    }

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| ForgeError::InvalidContent {
            endpoint: endpoint.to_string(),
            detail: format!("invalid base64 content: {e}"),
        })
}
