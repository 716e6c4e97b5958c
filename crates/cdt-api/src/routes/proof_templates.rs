//! # Proof Template Routes
//!
//! Authoring workspace for proof templates, per user.
//!
//! | Method | Path                                  | Operation |
//! |--------|---------------------------------------|-----------|
//! | GET    | `/api/v1/proof-templates`             | List the caller's templates |
//! | POST   | `/api/v1/proof-templates`             | Create a template |
//! | GET    | `/api/v1/proof-templates/{id}`        | Fetch one template |
//! | PUT    | `/api/v1/proof-templates/{id}`        | Update a template |
//! | DELETE | `/api/v1/proof-templates/{id}`        | Delete a template |
//! | POST   | `/api/v1/proof-templates/{id}/publish`| Publish a template |
//!
//! Templates are owned: a non-owner gets 404, not 403, so template
//! names do not leak across users. Admins see and act on everything.
//! Publishing renders the template as a presentation definition, opens
//! the pull request, then records the VDR location back on the
//! template through the post-PR hook.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use cdt_artifacts::{ClaimRequirement, ProofTemplate};
use cdt_core::{PublishResult, SystemClock};
use cdt_publish::{
    draft, run_publish, ArtifactPayload, HookError, NamedDocument, PublishHook, PublishJob,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::publish::{PublishRequestOptions, PublishResponse};
use crate::state::{AppState, ProofTemplateRecord};

// ── Request Types ───────────────────────────────────────────────────

/// Create/update payload. The same shape serves both.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProofTemplateRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// The credential type (VCT) the proof draws from.
    pub credential_type: String,
    /// Claims the verifier asks to be disclosed.
    #[schema(value_type = Vec<Object>)]
    pub requested_claims: Vec<ClaimRequirement>,
}

impl ProofTemplateRequest {
    fn as_template(&self) -> ProofTemplate {
        ProofTemplate {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            credential_type: self.credential_type.clone(),
            requested_claims: self.requested_claims.clone(),
        }
    }
}

impl Validate for ProofTemplateRequest {
    fn validate(&self) -> Result<(), AppError> {
        self.as_template().validate()?;
        Ok(())
    }
}

/// Publish payload. The body is optional; an empty publish uses the
/// default commit and pull-request text.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PublishTemplateRequest {
    #[serde(default)]
    pub options: PublishRequestOptions,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/proof-templates", get(list_templates).post(create_template))
        .route(
            "/api/v1/proof-templates/:id",
            get(get_template).put(update_template).delete(delete_template),
        )
        .route("/api/v1/proof-templates/:id/publish", post(publish_template))
}

// ── Handlers ────────────────────────────────────────────────────────

/// List the caller's templates, newest first. Admins see every user's.
#[utoipa::path(
    get,
    path = "/api/v1/proof-templates",
    responses(
        (status = 200, description = "Templates visible to the caller", body = [ProofTemplateRecord]),
    ),
    tag = "proof-templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Json<Vec<ProofTemplateRecord>> {
    let mut records: Vec<ProofTemplateRecord> = state
        .proof_templates
        .list()
        .into_iter()
        .filter(|record| caller.admin || record.owner_login == caller.user.login)
        .collect();
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Json(records)
}

/// Create a proof template owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/proof-templates",
    request_body = ProofTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = ProofTemplateRecord),
        (status = 422, description = "Invalid template"),
    ),
    tag = "proof-templates"
)]
pub async fn create_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<ProofTemplateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProofTemplateRecord>), AppError> {
    let body = extract_validated_json(payload)?;

    let now = Utc::now();
    let record = ProofTemplateRecord {
        id: Uuid::new_v4(),
        owner_login: caller.user.login.clone(),
        name: body.name,
        category: body.category,
        description: body.description,
        credential_type: body.credential_type,
        requested_claims: body.requested_claims,
        published: false,
        vdr_uri: None,
        published_at: None,
        created_at: now,
        updated_at: now,
    };

    if let Some(pool) = &state.db_pool {
        crate::db::proof_templates::insert(pool, &record).await.map_err(db_failure)?;
    }
    state.proof_templates.insert(record.id, record.clone());
    tracing::info!(login = %caller.user.login, id = %record.id, "proof template created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Fetch one template.
#[utoipa::path(
    get,
    path = "/api/v1/proof-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 200, description = "The template", body = ProofTemplateRecord),
        (status = 404, description = "Not found, or owned by someone else"),
    ),
    tag = "proof-templates"
)]
pub async fn get_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ProofTemplateRecord>, AppError> {
    owned_template(&state, &caller, &id).map(Json)
}

/// Update a template's content fields. Publish bookkeeping is nulled:
/// an edited template no longer matches what was published.
#[utoipa::path(
    put,
    path = "/api/v1/proof-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    request_body = ProofTemplateRequest,
    responses(
        (status = 200, description = "Updated template", body = ProofTemplateRecord),
        (status = 404, description = "Not found, or owned by someone else"),
        (status = 422, description = "Invalid template"),
    ),
    tag = "proof-templates"
)]
pub async fn update_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    payload: Result<Json<ProofTemplateRequest>, JsonRejection>,
) -> Result<Json<ProofTemplateRecord>, AppError> {
    let body = extract_validated_json(payload)?;
    let existing = owned_template(&state, &caller, &id)?;

    let record = ProofTemplateRecord {
        name: body.name,
        category: body.category,
        description: body.description,
        credential_type: body.credential_type,
        requested_claims: body.requested_claims,
        published: false,
        vdr_uri: None,
        published_at: None,
        updated_at: Utc::now(),
        ..existing
    };

    if let Some(pool) = &state.db_pool {
        crate::db::proof_templates::update(pool, &record).await.map_err(db_failure)?;
    }
    state.proof_templates.insert(record.id, record.clone());
    Ok(Json(record))
}

/// Delete a template.
#[utoipa::path(
    delete,
    path = "/api/v1/proof-templates/{id}",
    params(("id" = Uuid, Path, description = "Template id")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Not found, or owned by someone else"),
    ),
    tag = "proof-templates"
)]
pub async fn delete_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    owned_template(&state, &caller, &id)?;

    if let Some(pool) = &state.db_pool {
        crate::db::proof_templates::delete(pool, id).await.map_err(db_failure)?;
    }
    state.proof_templates.remove(&id);
    tracing::info!(login = %caller.user.login, %id, "proof template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Publish a template to the governance repository.
#[utoipa::path(
    post,
    path = "/api/v1/proof-templates/{id}/publish",
    params(("id" = Uuid, Path, description = "Template id")),
    request_body = PublishTemplateRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 404, description = "Not found, or owned by someone else"),
        (status = 422, description = "Template no longer validates"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "proof-templates"
)]
pub async fn publish_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    payload: Option<Json<PublishTemplateRequest>>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let record = owned_template(&state, &caller, &id)?;
    let options = payload.map(|Json(body)| body.options).unwrap_or_default();

    let template = ProofTemplate {
        name: record.name.clone(),
        category: record.category.clone(),
        description: record.description.clone(),
        credential_type: record.credential_type.clone(),
        requested_claims: record.requested_claims.clone(),
    };
    let document = template.to_document()?;
    let payload = ArtifactPayload::ProofTemplate(NamedDocument {
        name: record.name.clone(),
        category: Some(record.category.clone()),
        filename: None,
        document,
    });
    let job = PublishJob {
        draft: draft(&payload)?,
        author_handle: caller.user.login.clone(),
        options: options.into(),
    };

    let remote = state.remote(&caller.forge_token)?;
    let hook = MarkPublishedHook { state: state.clone(), template_id: id };
    let result = run_publish(&remote, &SystemClock, job, Some(&hook)).await?;
    tracing::info!(
        login = %caller.user.login,
        %id,
        pr = result.pr_number,
        "proof template published"
    );
    Ok((StatusCode::CREATED, Json(result.into())))
}

// ── Publish Hook ────────────────────────────────────────────────────

/// Records the VDR location on the template once the pull request
/// exists. Runs best-effort; a failure here is logged by the
/// orchestrator and never fails the publish.
struct MarkPublishedHook {
    state: AppState,
    template_id: Uuid,
}

#[async_trait::async_trait]
impl PublishHook for MarkPublishedHook {
    async fn mark_published(
        &self,
        result: &PublishResult,
        published_at: DateTime<Utc>,
    ) -> Result<(), HookError> {
        let path = result
            .file_paths
            .first()
            .ok_or("publish produced no file paths")?;
        let vdr_uri = format!(
            "{}/{}",
            self.state.config.vdr_base_url.as_str().trim_end_matches('/'),
            path
        );

        let updated = self.state.proof_templates.update(&self.template_id, |record| {
            record.published = true;
            record.vdr_uri = Some(vdr_uri.clone());
            record.published_at = Some(published_at);
            record.updated_at = published_at;
        });
        if updated.is_none() {
            return Err(format!("template {} was deleted mid-publish", self.template_id).into());
        }

        if let Some(pool) = &self.state.db_pool {
            crate::db::proof_templates::mark_published(pool, self.template_id, &vdr_uri, published_at)
                .await?;
        }
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Fetch a template the caller may see. Absent and not-owned both come
/// back as 404.
fn owned_template(
    state: &AppState,
    caller: &CallerIdentity,
    id: &Uuid,
) -> Result<ProofTemplateRecord, AppError> {
    state
        .proof_templates
        .get(id)
        .filter(|record| caller.admin || record.owner_login == caller.user.login)
        .ok_or_else(|| AppError::NotFound("proof template not found".to_string()))
}

/// A failed database write on a CRUD path is the service's own fault.
fn db_failure(error: sqlx::Error) -> AppError {
    tracing::error!(%error, "proof template database write failed");
    AppError::Internal(error.to_string())
}
