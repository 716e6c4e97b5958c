//! # Inspector Routes
//!
//! | Method | Path                | Operation |
//! |--------|---------------------|-----------|
//! | POST   | `/api/v1/inspector` | Summarize an OpenAPI document |
//!
//! The body is the document itself, JSON or YAML, any content type.
//! Designers paste documents straight out of editors and proxies, so
//! the handler sniffs the syntax instead of trusting headers.

use axum::routing::post;
use axum::{Json, Router};
use cdt_artifacts::openapi::{summarize, DocumentSummary, OperationSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::parse_json_or_yaml;
use crate::state::AppState;

// ── Response Types ──────────────────────────────────────────────────

/// Condensed view of the posted document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InspectionView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi_version: Option<String>,
    pub servers: Vec<String>,
    pub operation_count: usize,
    /// Operations sorted by path then method.
    pub operations: Vec<OperationView>,
    /// Schema names, sorted.
    pub schemas: Vec<String>,
}

/// One operation row.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OperationView {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl From<OperationSummary> for OperationView {
    fn from(op: OperationSummary) -> Self {
        Self { method: op.method, path: op.path, summary: op.summary }
    }
}

impl From<DocumentSummary> for InspectionView {
    fn from(summary: DocumentSummary) -> Self {
        Self {
            title: summary.title,
            version: summary.version,
            openapi_version: summary.openapi_version,
            servers: summary.servers,
            operation_count: summary.operations.len(),
            operations: summary.operations.into_iter().map(OperationView::from).collect(),
            schemas: summary.schemas,
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/inspector", post(inspect_document))
}

// ── Handler ─────────────────────────────────────────────────────────

/// Summarize an OpenAPI document posted as JSON or YAML.
#[utoipa::path(
    post,
    path = "/api/v1/inspector",
    request_body(content = String, description = "An OpenAPI document, JSON or YAML"),
    responses(
        (status = 200, description = "Document summary", body = InspectionView),
        (status = 400, description = "Body is neither JSON nor YAML"),
        (status = 422, description = "Parsed, but not an OpenAPI document"),
    ),
    tag = "inspector"
)]
pub async fn inspect_document(body: String) -> Result<Json<InspectionView>, AppError> {
    let document = parse_json_or_yaml(&body)?;
    let summary = summarize(&document)?;
    Ok(Json(summary.into()))
}
