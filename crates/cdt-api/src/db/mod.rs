//! Postgres persistence.
//!
//! The in-memory stores stay authoritative while the service runs; the
//! database is the restart story. Without `DATABASE_URL` the service
//! runs memory-only and everything under this module is skipped.

pub mod proof_templates;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect a pool when `DATABASE_URL` is set.
///
/// An unset or empty variable means memory-only operation, not an
/// error. A set-but-unreachable database is an error: starting with
/// silently dropped persistence would lose work on the next restart.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => return Ok(None),
    };

    let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
    Ok(Some(pool))
}
