//! Typed client for the authenticated-user endpoint.
//!
//! The session layer validates a candidate forge token by asking the forge
//! who it belongs to; the answer becomes the session's staff identity.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/user` | Profile of the token's owner |

use cdt_core::StaffIdentity;

use crate::error::ForgeError;

/// Client for the authenticated-user endpoint.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl UserClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the identity behind the configured bearer token.
    ///
    /// Calls `GET {base_url}/user`. A 401 surfaces as
    /// [`ForgeError::Api`] with the forge's message; callers treat it as
    /// "token invalid".
    pub async fn authenticated_user(&self) -> Result<StaffIdentity, ForgeError> {
        let endpoint = "GET /user";
        let url = format!("{}user", self.base_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ForgeError::RemoteUnavailable {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ForgeError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| ForgeError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })
    }
}
