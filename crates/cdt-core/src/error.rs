//! # Error Types
//!
//! Structured errors for the foundational layer. Downstream crates define
//! their own error enums (client, publish, service) and convert from these
//! where a request fails before any remote call.

use thiserror::Error;

/// Validation failures raised while constructing publish inputs.
///
/// These are caller errors: the request never leaves the process, so no
/// remote state exists to clean up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A publish request must carry at least one file.
    #[error("publish request contains no files")]
    EmptyFiles,

    /// Every path within one request must be unique.
    #[error("duplicate file path in publish request: {path}")]
    DuplicatePath {
        /// The repeated repository path.
        path: String,
    },

    /// A required string field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A file path escaped the repository (absolute or `..` segment).
    #[error("file path is not repository-relative: {path}")]
    UnsafePath {
        /// The rejected path.
        path: String,
    },
}

/// Failure while rendering a payload to its committed JSON form.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload could not be serialized to JSON.
    #[error("failed to serialize payload to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
