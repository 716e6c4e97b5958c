//! # Test Issuer Routes
//!
//! Issue test credentials through Orbit so designers can try their
//! artifacts against a real wallet.
//!
//! | Method | Path                          | Operation |
//! |--------|-------------------------------|-----------|
//! | GET    | `/api/v1/issuer/settings`     | Current issuer configuration |
//! | PUT    | `/api/v1/issuer/settings`     | Update issuer configuration |
//! | GET    | `/api/v1/issuer/definitions`  | Credential definitions Orbit knows |
//! | POST   | `/api/v1/issuer/offers`       | Create a credential offer |
//! | GET    | `/api/v1/issuer/offers`       | List the caller's offers |
//! | GET    | `/api/v1/issuer/offers/{id}`  | Poll one offer's state |
//!
//! The Orbit API key is written through the settings endpoint and never
//! echoed back; reads only say whether a key is set. Issuer endpoints
//! answer 503 until both the Orbit URL and key are configured.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cdt_orbit::{CreateOfferRequest, CredentialDefinition, OfferState};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::{AppState, IssuerOfferRecord};

// ── Request/Response Types ──────────────────────────────────────────

/// Issuer configuration as shown to callers. The key itself stays in
/// the settings file.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    /// Whether an API key is on file.
    pub api_key_set: bool,
}

/// Settings update. Absent fields keep their current value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub api_url: Option<Url>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// A credential definition, as reported by Orbit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DefinitionView {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}

impl From<CredentialDefinition> for DefinitionView {
    fn from(definition: CredentialDefinition) -> Self {
        Self {
            id: definition.id,
            name: definition.name,
            version: definition.version,
            schema_id: definition.schema_id,
        }
    }
}

/// Offer creation request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOfferBody {
    /// Ledger definition to issue against.
    pub credential_definition_id: String,
    /// Claim name to value map placed into the issued credential.
    #[schema(value_type = Object)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl Validate for CreateOfferBody {
    fn validate(&self) -> Result<(), AppError> {
        if self.credential_definition_id.trim().is_empty() {
            return Err(AppError::Validation(
                "credential_definition_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/issuer/settings", get(get_settings).put(update_settings))
        .route("/api/v1/issuer/definitions", get(list_definitions))
        .route("/api/v1/issuer/offers", get(list_offers).post(create_offer))
        .route("/api/v1/issuer/offers/:id", get(get_offer))
}

// ── Settings Handlers ───────────────────────────────────────────────

/// Current issuer configuration, key redacted.
#[utoipa::path(
    get,
    path = "/api/v1/issuer/settings",
    responses(
        (status = 200, description = "Issuer configuration", body = SettingsView),
    ),
    tag = "issuer"
)]
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    let settings = state.settings.load_or_default();
    Json(SettingsView {
        api_url: settings.api_url.as_ref().map(|u| u.to_string()),
        timeout_secs: settings.timeout_secs,
        api_key_set: settings.api_key.as_deref().is_some_and(|k| !k.is_empty()),
    })
}

/// Update issuer configuration. Only the fields present change.
#[utoipa::path(
    put,
    path = "/api/v1/issuer/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated configuration", body = SettingsView),
    ),
    tag = "issuer"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<UpdateSettingsRequest>, JsonRejection>,
) -> Result<Json<SettingsView>, AppError> {
    let body = extract_json(payload)?;

    let updated = state.settings.modify(|settings| {
        if let Some(api_url) = body.api_url {
            settings.api_url = Some(api_url);
        }
        if let Some(api_key) = body.api_key {
            settings.api_key = Some(api_key);
        }
        if let Some(timeout_secs) = body.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
    })?;
    tracing::info!(login = %caller.user.login, "issuer settings updated");

    Ok(Json(SettingsView {
        api_url: updated.api_url.as_ref().map(|u| u.to_string()),
        timeout_secs: updated.timeout_secs,
        api_key_set: updated.api_key.as_deref().is_some_and(|k| !k.is_empty()),
    }))
}

// ── Issuance Handlers ───────────────────────────────────────────────

/// Credential definitions registered with the issuer.
#[utoipa::path(
    get,
    path = "/api/v1/issuer/definitions",
    responses(
        (status = 200, description = "Definitions", body = [DefinitionView]),
        (status = 502, description = "Orbit call failed"),
        (status = 503, description = "Issuer not configured"),
    ),
    tag = "issuer"
)]
pub async fn list_definitions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DefinitionView>>, AppError> {
    let definitions = state.orbit()?.issuance().list_definitions().await?;
    Ok(Json(definitions.into_iter().map(DefinitionView::from).collect()))
}

/// Create a credential offer and record it for later polling.
#[utoipa::path(
    post,
    path = "/api/v1/issuer/offers",
    request_body = CreateOfferBody,
    responses(
        (status = 201, description = "Offer created", body = IssuerOfferRecord),
        (status = 422, description = "Empty definition id"),
        (status = 502, description = "Orbit call failed"),
        (status = 503, description = "Issuer not configured"),
    ),
    tag = "issuer"
)]
pub async fn create_offer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<CreateOfferBody>, JsonRejection>,
) -> Result<(StatusCode, Json<IssuerOfferRecord>), AppError> {
    let body = extract_validated_json(payload)?;

    let offer = state
        .orbit()?
        .issuance()
        .create_offer(&CreateOfferRequest {
            credential_definition_id: body.credential_definition_id.clone(),
            claims: body.claims,
        })
        .await?;

    let record = IssuerOfferRecord {
        offer_id: offer.id.clone(),
        credential_definition_id: body.credential_definition_id,
        offer_url: offer.offer_url,
        state: offer.state,
        created_by: caller.user.login.clone(),
        created_at: Utc::now(),
    };
    state.offers.insert(record.offer_id.clone(), record.clone());
    tracing::info!(login = %caller.user.login, offer = %record.offer_id, "credential offer created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// List the caller's offers, newest first. Admins see every user's.
#[utoipa::path(
    get,
    path = "/api/v1/issuer/offers",
    responses(
        (status = 200, description = "Offers visible to the caller", body = [IssuerOfferRecord]),
    ),
    tag = "issuer"
)]
pub async fn list_offers(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Json<Vec<IssuerOfferRecord>> {
    let mut records: Vec<IssuerOfferRecord> = state
        .offers
        .list()
        .into_iter()
        .filter(|record| caller.admin || record.created_by == caller.user.login)
        .collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(records)
}

/// Poll one offer's state against Orbit.
///
/// An offer Orbit no longer knows about is treated as lapsed; the
/// record flips to `expired` rather than erroring, since that is what
/// expiry looks like from outside.
#[utoipa::path(
    get,
    path = "/api/v1/issuer/offers/{id}",
    params(("id" = String, Path, description = "Offer id")),
    responses(
        (status = 200, description = "Current offer state", body = IssuerOfferRecord),
        (status = 404, description = "Unknown offer, or created by someone else"),
        (status = 502, description = "Orbit call failed"),
        (status = 503, description = "Issuer not configured"),
    ),
    tag = "issuer"
)]
pub async fn get_offer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<IssuerOfferRecord>, AppError> {
    let record = state
        .offers
        .get(&id)
        .filter(|record| caller.admin || record.created_by == caller.user.login)
        .ok_or_else(|| AppError::NotFound("offer not found".to_string()))?;

    if record.state.is_terminal() {
        return Ok(Json(record));
    }

    let refreshed = match state.orbit()?.issuance().get_offer(&id).await? {
        Some(offer) => state.offers.update(&id, |r| {
            r.state = offer.state;
            r.offer_url = offer.offer_url.clone().or(r.offer_url.take());
        }),
        None => state.offers.update(&id, |r| r.state = OfferState::Expired),
    };
    refreshed
        .map(Json)
        .ok_or_else(|| AppError::NotFound("offer not found".to_string()))
}
