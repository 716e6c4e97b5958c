//! # cdt-api — HTTP service for Credential Design Tools
//!
//! Staff-facing platform API: design verifiable-credential artifacts,
//! publish them to the governance repository as pull requests, and try
//! them out against the test issuer.
//!
//! ## API Surface
//!
//! | Prefix                     | Module                       | Domain |
//! |----------------------------|------------------------------|--------|
//! | `/api/v1/sessions`         | [`routes::sessions`]         | Login, identity, logout |
//! | `/api/v1/publish/*`        | [`routes::publish`]          | Artifact publishing |
//! | `/api/v1/proof-templates/*`| [`routes::proof_templates`]  | Template authoring |
//! | `/api/v1/catalogue/*`      | [`routes::catalogue`]        | Ledger catalogue |
//! | `/api/v1/issuer/*`         | [`routes::issuer`]           | Test issuance via Orbit |
//! | `/api/v1/inspector`        | [`routes::inspector`]        | OpenAPI inspection |
//! | `/api/v1/access-log`       | [`routes::access_log`]       | Request history (admin) |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → Metrics → AccessLog → Session → RateLimit → Handler
//! ```
//!
//! Login (`POST /api/v1/sessions`) and `/openapi.json` sit outside the
//! session and rate-limit layers; health probes sit outside everything.

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod settings;
pub mod state;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside every layer so they
/// stay answerable even when the middleware stack cannot run.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let limiter = RateLimiter::new(RateLimitConfig::default());

    let api = Router::new()
        // Session-guarded routes.
        .merge(routes::sessions::router())
        .merge(routes::publish::router())
        .merge(routes::proof_templates::router())
        .merge(routes::catalogue::router())
        .merge(routes::issuer::router())
        .merge(routes::inspector::router())
        .merge(routes::access_log::router())
        .layer(from_fn(middleware::rate_limit::rate_limit_middleware))
        .layer(from_fn_with_state(state.clone(), auth::session_middleware))
        // Public: login and the service's own OpenAPI document.
        .merge(routes::sessions::public_router())
        .merge(openapi::router())
        .layer(from_fn_with_state(
            state.clone(),
            middleware::access_log::access_log_middleware,
        ))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .layer(axum::Extension(limiter))
        .with_state(state);

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to
/// serve. Running without a database pool is a supported mode, so
/// readiness does not depend on one.
async fn readiness() -> &'static str {
    "ready"
}
