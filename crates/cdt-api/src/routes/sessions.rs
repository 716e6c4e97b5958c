//! # Session Routes
//!
//! Login, identity, and logout.
//!
//! | Method | Path                  | Operation |
//! |--------|-----------------------|-----------|
//! | POST   | `/api/v1/sessions`    | Exchange a forge token for a session |
//! | GET    | `/api/v1/sessions/me` | Identity behind the presented session |
//! | DELETE | `/api/v1/sessions`    | Revoke the presented session |
//!
//! Login validates the candidate forge token by asking the forge who it
//! belongs to; that identity becomes the session's. The forge token is
//! kept with the session so publishes run as their actual author.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use cdt_core::StaffIdentity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response Types ──────────────────────────────────────────

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// A forge personal-access token with repo scope on the governance
    /// repository.
    pub forge_token: String,
}

impl Validate for CreateSessionRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.forge_token.trim().is_empty() {
            return Err(AppError::Validation("forge_token must not be empty".to_string()));
        }
        Ok(())
    }
}

/// The staff profile behind a session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: i64,
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<StaffIdentity> for SessionUser {
    fn from(user: StaffIdentity) -> Self {
        Self {
            id: user.id,
            login: user.login,
            name: user.name,
            email: user.email,
            avatar_url: user.avatar_url,
        }
    }
}

/// Successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// The session token. Shown exactly once; the server keeps only a
    /// digest.
    pub token: String,
    pub user: SessionUser,
}

// ── Routers ─────────────────────────────────────────────────────────

/// The unauthenticated part: login itself.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/api/v1/sessions", post(create_session))
}

/// The authenticated part: identity and logout.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/sessions/me", get(current_session))
        .route("/api/v1/sessions", axum::routing::delete(delete_session))
}

// ── Handlers ────────────────────────────────────────────────────────

/// Exchange a forge token for a session token.
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 401, description = "Forge rejected the token"),
        (status = 422, description = "Empty token"),
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let body = extract_validated_json(payload)?;

    // The forge is the authority on whether the token is any good.
    let forge = state.forge(&body.forge_token)?;
    let user = forge.users().authenticated_user().await?;

    let (token, session) = state.sessions.mint(user, body.forge_token);
    tracing::info!(login = %session.user.login, "session created");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse { token, user: session.user.into() }),
    ))
}

/// Identity behind the presented session.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/me",
    responses(
        (status = 200, description = "The session's staff profile", body = SessionUser),
        (status = 401, description = "No valid session"),
    ),
    tag = "sessions"
)]
pub async fn current_session(caller: CallerIdentity) -> Json<SessionUser> {
    Json(caller.user.into())
}

/// Revoke the presented session.
#[utoipa::path(
    delete,
    path = "/api/v1/sessions",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "No valid session"),
    ),
    tag = "sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    caller: CallerIdentity,
    headers: HeaderMap,
) -> StatusCode {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(token);
        tracing::info!(login = %caller.user.login, "session revoked");
    }
    StatusCode::NO_CONTENT
}

/// The token after `Bearer `, if the header carries one.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
