//! # Catalogue Routes
//!
//! Credential definitions known to the ledger, imported by scraping an
//! explorer page.
//!
//! | Method | Path                       | Operation |
//! |--------|----------------------------|-----------|
//! | POST   | `/api/v1/catalogue/import` | Scrape an explorer page and upsert entries |
//! | GET    | `/api/v1/catalogue`        | List imported definitions |
//!
//! Imports are additive: rows already known are refreshed in place,
//! keyed by definition id, and nothing is ever dropped by an import.
//! The snapshot is persisted to the catalogue file after each import.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::{AppState, CatalogueRecord};

// ── Request/Response Types ──────────────────────────────────────────

/// Import request. With no `page_url` the configured explorer page is
/// scraped.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ImportRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub page_url: Option<Url>,
}

/// Import outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    /// Rows found on the scraped page.
    pub imported: usize,
    /// Catalogue size after the upsert.
    pub total: usize,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/catalogue", get(list_catalogue))
        .route("/api/v1/catalogue/import", post(import_catalogue))
}

// ── Handlers ────────────────────────────────────────────────────────

/// List imported credential definitions, sorted by name.
#[utoipa::path(
    get,
    path = "/api/v1/catalogue",
    responses(
        (status = 200, description = "Imported definitions", body = [CatalogueRecord]),
    ),
    tag = "catalogue"
)]
pub async fn list_catalogue(State(state): State<AppState>) -> Json<Vec<CatalogueRecord>> {
    let mut records = state.catalogue.list();
    records.sort_by(|a, b| {
        a.name.cmp(&b.name).then_with(|| a.definition_id.cmp(&b.definition_id))
    });
    Json(records)
}

/// Scrape an explorer page and upsert its credential definitions.
#[utoipa::path(
    post,
    path = "/api/v1/catalogue/import",
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Import finished", body = ImportResponse),
        (status = 422, description = "No page URL given and none configured"),
        (status = 502, description = "Explorer page could not be fetched"),
    ),
    tag = "catalogue"
)]
pub async fn import_catalogue(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<ImportResponse>, AppError> {
    let body = extract_json(payload)?;
    let page_url = body
        .page_url
        .or_else(|| state.config.explorer_url.clone())
        .ok_or_else(|| {
            AppError::Validation(
                "no page_url given and no explorer page configured".to_string(),
            )
        })?;

    let entries = state.scraper()?.scrape(&page_url).await?;
    let imported = entries.len();

    let now = Utc::now();
    for entry in entries {
        // Upsert: refresh name/issuer on rows already known, keep the
        // original import attribution.
        let key = entry.definition_id.clone();
        let refreshed = state.catalogue.update(&key, |record| {
            record.name = entry.name.clone();
            record.issuer = entry.issuer.clone();
            record.explorer_url = entry.explorer_url.clone();
        });
        if refreshed.is_none() {
            state.catalogue.insert(
                key,
                CatalogueRecord {
                    definition_id: entry.definition_id,
                    name: entry.name,
                    issuer: entry.issuer,
                    explorer_url: entry.explorer_url,
                    imported_by: caller.user.login.clone(),
                    imported_at: now,
                },
            );
        }
    }
    state.persist_catalogue();

    let total = state.catalogue.len();
    tracing::info!(login = %caller.user.login, imported, total, "catalogue import finished");
    Ok(Json(ImportResponse { imported, total }))
}
