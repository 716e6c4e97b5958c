//! Proof-template persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `proof_templates`
//! table:
//!
//! ```sql
//! CREATE TABLE proof_templates (
//!     id               UUID PRIMARY KEY,
//!     owner_login      TEXT NOT NULL,
//!     name             TEXT NOT NULL,
//!     category         TEXT NOT NULL,
//!     description      TEXT,
//!     credential_type  TEXT NOT NULL,
//!     requested_claims JSONB NOT NULL,
//!     published        BOOLEAN NOT NULL,
//!     vdr_uri          TEXT,
//!     published_at     TIMESTAMPTZ,
//!     created_at       TIMESTAMPTZ NOT NULL,
//!     updated_at       TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! Ownership checks are enforced at the route layer, not in SQL.

use cdt_artifacts::ClaimRequirement;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::state::ProofTemplateRecord;

/// Serialize the claim list to the JSON stored in `requested_claims`.
fn serialize_claims(claims: &[ClaimRequirement]) -> Result<serde_json::Value, sqlx::Error> {
    serde_json::to_value(claims).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize requested_claims");
        sqlx::Error::Encode(Box::new(e))
    })
}

/// Load every template into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<ProofTemplateRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProofTemplateRow>(
        "SELECT id, owner_login, name, category, description, credential_type,
                requested_claims, published, vdr_uri, published_at, created_at, updated_at
         FROM proof_templates ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ProofTemplateRow::into_record).collect())
}

/// Insert a new template record.
pub async fn insert(pool: &PgPool, record: &ProofTemplateRecord) -> Result<(), sqlx::Error> {
    let claims = serialize_claims(&record.requested_claims)?;

    sqlx::query(
        "INSERT INTO proof_templates (id, owner_login, name, category, description,
             credential_type, requested_claims, published, vdr_uri, published_at,
             created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(record.id)
    .bind(&record.owner_login)
    .bind(&record.name)
    .bind(&record.category)
    .bind(&record.description)
    .bind(&record.credential_type)
    .bind(&claims)
    .bind(record.published)
    .bind(&record.vdr_uri)
    .bind(record.published_at)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Update a template's content fields and publish bookkeeping.
pub async fn update(pool: &PgPool, record: &ProofTemplateRecord) -> Result<bool, sqlx::Error> {
    let claims = serialize_claims(&record.requested_claims)?;

    let result = sqlx::query(
        "UPDATE proof_templates
         SET name = $1, category = $2, description = $3, credential_type = $4,
             requested_claims = $5, published = $6, vdr_uri = $7, published_at = $8,
             updated_at = $9
         WHERE id = $10",
    )
    .bind(&record.name)
    .bind(&record.category)
    .bind(&record.description)
    .bind(&record.credential_type)
    .bind(&claims)
    .bind(record.published)
    .bind(&record.vdr_uri)
    .bind(record.published_at)
    .bind(record.updated_at)
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a template.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM proof_templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a successful publish: flip the flag and store the VDR URI.
pub async fn mark_published(
    pool: &PgPool,
    id: Uuid,
    vdr_uri: &str,
    published_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE proof_templates
         SET published = TRUE, vdr_uri = $1, published_at = $2, updated_at = $2
         WHERE id = $3",
    )
    .bind(vdr_uri)
    .bind(published_at)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ProofTemplateRow {
    id: Uuid,
    owner_login: String,
    name: String,
    category: String,
    description: Option<String>,
    credential_type: String,
    requested_claims: serde_json::Value,
    published: bool,
    vdr_uri: Option<String>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProofTemplateRow {
    fn into_record(self) -> ProofTemplateRecord {
        // Tolerant on the read path: a row written by a newer build may
        // carry claim fields this build does not know. Losing the claim
        // list is logged loudly since the template becomes unpublishable.
        let requested_claims: Vec<ClaimRequirement> =
            serde_json::from_value(self.requested_claims.clone()).unwrap_or_else(|e| {
                tracing::error!(
                    id = %self.id,
                    error = %e,
                    "failed to deserialize requested_claims, defaulting to empty"
                );
                Vec::new()
            });

        ProofTemplateRecord {
            id: self.id,
            owner_login: self.owner_login,
            name: self.name,
            category: self.category,
            description: self.description,
            credential_type: self.credential_type,
            requested_claims,
            published: self.published,
            vdr_uri: self.vdr_uri,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
