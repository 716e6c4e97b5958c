//! Error taxonomy for Orbit API calls.
//!
//! Mirrors the forge client's shape: expected 404s (an offer that does
//! not exist yet, or has been pruned) return `Ok(None)` from the calling
//! method and never appear here. Malformed catalogue rows are skipped
//! with a warning by the scraper, so they have no variant either.

use thiserror::Error;

/// Errors returned by the Orbit clients.
#[derive(Debug, Error)]
pub enum OrbitError {
    /// The network call itself failed (connect, timeout, TLS).
    #[error("orbit unreachable calling {endpoint}: {source}")]
    RemoteUnavailable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any non-success response, surfaced verbatim.
    #[error("orbit API error calling {endpoint}: HTTP {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body did not match the expected schema.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Client construction or configuration failure.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl OrbitError {
    /// The HTTP status carried by this error, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
