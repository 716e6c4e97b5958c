//! # cdt-orbit — Typed Rust client for the Orbit issuance API
//!
//! Covers the subset of Orbit the test issuer and the catalogue import
//! use:
//! - **Issuance** — create credential offers, poll offer state, list
//!   credential definitions
//! - **Catalogue** — scrape credential-definition rows from a public
//!   ledger-explorer page
//!
//! ## Architecture
//!
//! Same shape as the forge client: one facade holding per-endpoint-family
//! sub-clients. Issuance calls carry the Orbit API key; the catalogue
//! scraper uses a separate unauthenticated HTTP client because explorer
//! pages are public and must never see the key. Expected 404s (a pruned
//! offer) are `Ok(None)`, never errors.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod issuance;
pub mod types;

pub use catalogue::{parse_catalogue, CatalogueClient};
pub use config::{ConfigError, OrbitConfig};
pub use error::OrbitError;
pub use types::{
    CatalogueEntry, CreateOfferRequest, CredentialDefinition, CredentialOffer, OfferState,
};

use std::time::Duration;

/// Top-level Orbit client. Holds the issuance sub-client (authenticated)
/// and the catalogue scraper (unauthenticated).
#[derive(Debug, Clone)]
pub struct OrbitClient {
    issuance: issuance::IssuanceClient,
    catalogue: catalogue::CatalogueClient,
}

impl OrbitClient {
    /// Create a new Orbit client from configuration.
    pub fn new(config: OrbitConfig) -> Result<Self, OrbitError> {
        let authed = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("credential-design-tools")
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::HeaderName::from_static("api-key"),
                    reqwest::header::HeaderValue::from_str(&config.api_key)
                        .map_err(|_| OrbitError::Config(ConfigError::MissingApiKey))?,
                );
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| OrbitError::RemoteUnavailable {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            issuance: issuance::IssuanceClient::new(authed, config.api_url),
            catalogue: catalogue::CatalogueClient::standalone(config.timeout_secs)?,
        })
    }

    /// Access the issuance client (offers and definitions).
    pub fn issuance(&self) -> &issuance::IssuanceClient {
        &self.issuance
    }

    /// Access the catalogue scraper client.
    pub fn catalogue(&self) -> &catalogue::CatalogueClient {
        &self.catalogue
    }
}
