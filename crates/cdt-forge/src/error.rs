//! Error taxonomy for forge API calls.
//!
//! Expected 404s never appear here: `get_file` returns `Ok(None)` on a
//! missing path, because a miss signals "create" rather than a failure.
//! The variants below are the genuinely fatal outcomes of each operation.

use thiserror::Error;

/// Errors returned by the forge clients.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The network call itself failed (connect, timeout, TLS).
    #[error("forge unreachable calling {endpoint}: {source}")]
    RemoteUnavailable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The repository does not exist (or the token cannot see it).
    #[error("repository {repo} not found")]
    RepoNotFound { repo: String },

    /// The named branch does not exist on the repository.
    #[error("branch {branch} not found in {repo}")]
    BranchNotFound { repo: String, branch: String },

    /// Branch creation collided with an existing ref. Fatal: working
    /// branch names embed a millisecond timestamp specifically so this
    /// does not happen.
    #[error("branch {branch} already exists in {repo}")]
    BranchAlreadyExists { repo: String, branch: String },

    /// A content write carried a stale `previous_sha`.
    #[error("stale write to {path}: remote content changed since it was read")]
    Conflict { path: String },

    /// Any other non-success response, surfaced verbatim.
    #[error("forge API error calling {endpoint}: HTTP {status}: {body}")]
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

    /// A response field failed post-decoding (e.g. invalid base64 in a
    /// contents payload).
    #[error("invalid content payload from {endpoint}: {detail}")]
    InvalidContent { endpoint: String, detail: String },

    /// Client construction or configuration failure.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl ForgeError {
    /// The HTTP status carried by this error, where one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RepoNotFound { .. } | Self::BranchNotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::BranchAlreadyExists { .. } => Some(422),
            _ => None,
        }
    }
}
