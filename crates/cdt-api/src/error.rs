//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from cdt-publish, cdt-forge, cdt-orbit, and
//! cdt-artifacts to HTTP status codes. Returns JSON error bodies with an
//! error code, message, and optional details. Internal error details are
//! never exposed to clients; upstream forge failures are, because the
//! user is the one who has to go look at the branch the publish left
//! behind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format for consistency across the API
/// surface. The `details` field carries additional context for client
/// errors (e.g. schema violations) and is omitted otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UPSTREAM_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure, missing or invalid session token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure, insufficient permissions (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current remote or resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A remote the service depends on (forge, Orbit, explorer) failed
    /// (502). The message names the failed step and carries the remote's
    /// own status and body, so the user can recover manually.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// A required collaborator is not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for
    /// this error.
    pub(crate) fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log internal errors for operator visibility.
        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert publish request validation errors to API errors.
impl From<cdt_core::ValidationError> for AppError {
    fn from(err: cdt_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert artifact model errors to API errors.
impl From<cdt_artifacts::ArtifactError> for AppError {
    fn from(err: cdt_artifacts::ArtifactError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert placement-plan errors to API errors. Plans fail on caller
/// input (unusable names, empty batches, escaping paths) before any
/// remote call, except the existence check which is a forge failure.
impl From<cdt_publish::PlanError> for AppError {
    fn from(err: cdt_publish::PlanError) -> Self {
        match &err {
            cdt_publish::PlanError::ExistenceCheck { .. } => Self::Upstream(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

/// Convert publish workflow errors to API errors.
///
/// Pre-flight failures are the caller's to fix (422). Remote conflicts
/// keep their 409. Everything else reports the failed step verbatim,
/// with the forge's status and body chained in the message, because the
/// branch may already exist and the user needs to know where the
/// workflow stopped.
impl From<cdt_publish::PublishError> for AppError {
    fn from(err: cdt_publish::PublishError) -> Self {
        use cdt_publish::{PlanError, PublishError};
        match &err {
            PublishError::Plan(PlanError::ExistenceCheck { .. }) => {
                Self::Upstream(format!("step {}: {}", err.step(), chain(&err)))
            }
            PublishError::Plan(_) | PublishError::Validation(_) => {
                Self::Validation(err.to_string())
            }
            PublishError::BranchCreateFailed { source, .. }
            | PublishError::FileWriteFailed { source, .. }
                if matches!(
                    source,
                    cdt_forge::ForgeError::Conflict { .. }
                        | cdt_forge::ForgeError::BranchAlreadyExists { .. }
                ) =>
            {
                Self::Conflict(format!("step {}: {}", err.step(), chain(&err)))
            }
            _ => Self::Upstream(format!("step {}: {}", err.step(), chain(&err))),
        }
    }
}

/// Convert forge client errors raised outside the publish workflow
/// (session validation, existence probes) to API errors.
impl From<cdt_forge::ForgeError> for AppError {
    fn from(err: cdt_forge::ForgeError) -> Self {
        match err.status() {
            Some(401) => Self::Unauthorized("forge rejected the token".to_string()),
            _ => Self::Upstream(chain(&err)),
        }
    }
}

/// Convert Orbit client errors to API errors.
impl From<cdt_orbit::OrbitError> for AppError {
    fn from(err: cdt_orbit::OrbitError) -> Self {
        Self::Upstream(chain(&err))
    }
}

/// A file-store failure is the service's own disk, not the caller.
impl From<crate::settings::FileStoreError> for AppError {
    fn from(err: crate::settings::FileStoreError) -> Self {
        Self::Internal(chain(&err))
    }
}

/// Flatten an error and its source chain into one message, so the
/// remote's status and body survive into the response.
fn chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
