//! # Access Log Routes
//!
//! | Method | Path                 | Operation |
//! |--------|----------------------|-----------|
//! | GET    | `/api/v1/access-log` | Recent requests, newest first (admin) |

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::{require_admin, CallerIdentity};
use crate::error::AppError;
use crate::middleware::access_log::AccessLogEntry;
use crate::state::AppState;

/// Query parameters for the access-log listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AccessLogQuery {
    /// Maximum entries to return. Defaults to 100, never more than the
    /// ring holds.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/access-log", get(list_access_log))
}

/// Recent requests, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/access-log",
    params(AccessLogQuery),
    responses(
        (status = 200, description = "Recent requests", body = [AccessLogEntry]),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "access-log"
)]
pub async fn list_access_log(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Query(query): Query<AccessLogQuery>,
) -> Result<Json<Vec<AccessLogEntry>>, AppError> {
    require_admin(&caller)?;
    Ok(Json(state.access_log.recent(query.limit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_to_one_hundred() {
        let query: AccessLogQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 100);
    }
}
