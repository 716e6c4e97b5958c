//! Typed client for the Orbit issuance endpoints the test issuer uses.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/credential-offers` | Create a credential offer |
//! | GET    | `/credential-offers/{id}` | Poll an offer's state |
//! | GET    | `/credential-definitions` | List registered definitions |

use crate::error::OrbitError;
use crate::types::{CreateOfferRequest, CredentialDefinition, CredentialOffer};

/// Client for credential offer and definition endpoints.
#[derive(Debug, Clone)]
pub struct IssuanceClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl IssuanceClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Create a credential offer against a definition.
    ///
    /// Calls `POST {base_url}/credential-offers`. The returned offer
    /// carries the wallet deep link and the `id` used for polling.
    pub async fn create_offer(
        &self,
        request: &CreateOfferRequest,
    ) -> Result<CredentialOffer, OrbitError> {
        let endpoint = "POST /credential-offers".to_string();
        let url = format!("{}credential-offers", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OrbitError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| OrbitError::Deserialization {
                endpoint,
                source: e,
            })
    }

    /// Fetch an offer by id for status polling.
    ///
    /// Returns `Ok(None)` on 404: Orbit prunes offers after expiry, so a
    /// vanished offer is an expected outcome of polling, not a failure.
    pub async fn get_offer(&self, id: &str) -> Result<Option<CredentialOffer>, OrbitError> {
        let endpoint = format!("GET /credential-offers/{id}");
        let url = format!("{}credential-offers/{id}", self.base_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(offer_id = %id, "offer not found on poll");
            return Ok(None);
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OrbitError::Api {
                endpoint,
                status,
                body,
            });
        }

        let offer = resp
            .json()
            .await
            .map_err(|e| OrbitError::Deserialization {
                endpoint,
                source: e,
            })?;
        Ok(Some(offer))
    }

    /// List the credential definitions available to issue against.
    ///
    /// Calls `GET {base_url}/credential-definitions`.
    pub async fn list_definitions(&self) -> Result<Vec<CredentialDefinition>, OrbitError> {
        let endpoint = "GET /credential-definitions".to_string();
        let url = format!("{}credential-definitions", self.base_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(OrbitError::Api {
                endpoint,
                status,
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| OrbitError::Deserialization {
                endpoint,
                source: e,
            })
    }
}
