//! # Publish Routes
//!
//! One endpoint per artifact kind, all driving the shared orchestrator.
//!
//! | Method | Path                       | Operation |
//! |--------|----------------------------|-----------|
//! | POST   | `/api/v1/publish/vct`      | Publish a VCT document |
//! | POST   | `/api/v1/publish/schema`   | Publish a JSON Schema |
//! | POST   | `/api/v1/publish/context`  | Publish a JSON-LD context |
//! | POST   | `/api/v1/publish/entities` | Publish the entity registry |
//! | POST   | `/api/v1/publish/vocab`    | Publish a vocabulary batch |
//!
//! Each handler validates the artifact content, drafts a placement
//! plan, and runs the publish against the governance repository using
//! the caller's own forge credential. The response is the opened pull
//! request; review and merge happen on the forge.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use cdt_artifacts::{check_schema, ContextDocument, EntityRegistry, VctDocument, VocabType};
use cdt_core::{PublishResult, SystemClock};
use cdt_publish::{
    draft, run_publish, run_vocab_batch, ArtifactPayload, NamedDocument, PublishJob,
    PublishOptions, VocabItem,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response Types ──────────────────────────────────────────

/// Caller overrides for commit and pull-request text.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PublishRequestOptions {
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub pr_title: Option<String>,
    #[serde(default)]
    pub pr_body: Option<String>,
    /// Target branch override. Skips the default-branch lookup.
    #[serde(default)]
    pub base_branch: Option<String>,
}

impl From<PublishRequestOptions> for PublishOptions {
    fn from(options: PublishRequestOptions) -> Self {
        Self {
            commit_message: options.commit_message,
            pr_title: options.pr_title,
            pr_body: options.pr_body,
            base_branch_override: options.base_branch,
        }
    }
}

/// Publish request for the single-document kinds.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishDocumentRequest {
    /// Human-readable artifact name, e.g. `Home Credential`.
    pub name: String,
    /// Grouping category, prefixed onto the derived filename.
    #[serde(default)]
    pub category: Option<String>,
    /// Explicit filename, overriding derivation from the name.
    #[serde(default)]
    pub filename: Option<String>,
    /// The artifact content.
    #[schema(value_type = Object)]
    pub document: Value,
    #[serde(default)]
    pub options: PublishRequestOptions,
}

impl Validate for PublishDocumentRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
        Ok(())
    }
}

impl PublishDocumentRequest {
    fn into_parts(self) -> (NamedDocument, PublishOptions) {
        let PublishDocumentRequest { name, category, filename, document, options } = self;
        (NamedDocument { name, category, filename, document }, options.into())
    }
}

/// Publish request for the entity registry singleton.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRegistryRequest {
    /// The full registry document.
    #[schema(value_type = Object)]
    pub document: Value,
    #[serde(default)]
    pub options: PublishRequestOptions,
}

/// One vocabulary type inside a batch request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VocabItemRequest {
    pub name: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[schema(value_type = Object)]
    pub document: Value,
}

/// Publish request for a vocabulary batch.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishVocabRequest {
    pub items: Vec<VocabItemRequest>,
    #[serde(default)]
    pub options: PublishRequestOptions,
}

impl Validate for PublishVocabRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.items.is_empty() {
            return Err(AppError::Validation("items must not be empty".to_string()));
        }
        if self.items.iter().any(|i| i.name.trim().is_empty()) {
            return Err(AppError::Validation("every item needs a name".to_string()));
        }
        Ok(())
    }
}

/// The opened pull request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublishResponse {
    pub pr_number: u64,
    pub pr_url: String,
    pub pr_title: String,
    pub branch_name: String,
    /// Repository paths written on the working branch.
    pub file_paths: Vec<String>,
}

impl From<PublishResult> for PublishResponse {
    fn from(result: PublishResult) -> Self {
        Self {
            pr_number: result.pr_number,
            pr_url: result.pr_url,
            pr_title: result.pr_title,
            branch_name: result.branch_name,
            file_paths: result.file_paths,
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/publish/vct", post(publish_vct))
        .route("/api/v1/publish/schema", post(publish_schema))
        .route("/api/v1/publish/context", post(publish_context))
        .route("/api/v1/publish/entities", post(publish_entities))
        .route("/api/v1/publish/vocab", post(publish_vocab))
}

// ── Handlers ────────────────────────────────────────────────────────

/// Publish a VCT document.
#[utoipa::path(
    post,
    path = "/api/v1/publish/vct",
    request_body = PublishDocumentRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 409, description = "Branch or file collision"),
        (status = 422, description = "Invalid document or name"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "publish"
)]
pub async fn publish_vct(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<PublishDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let body = extract_validated_json(payload)?;
    VctDocument::parse(&body.document)?;
    let (doc, options) = body.into_parts();
    run(state, caller, ArtifactPayload::Vct(doc), options).await
}

/// Publish a JSON Schema.
#[utoipa::path(
    post,
    path = "/api/v1/publish/schema",
    request_body = PublishDocumentRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 422, description = "Schema does not compile under Draft 2020-12"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "publish"
)]
pub async fn publish_schema(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<PublishDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let body = extract_validated_json(payload)?;
    check_schema(&body.document)?;
    let (doc, options) = body.into_parts();
    run(state, caller, ArtifactPayload::JsonSchema(doc), options).await
}

/// Publish a JSON-LD context.
#[utoipa::path(
    post,
    path = "/api/v1/publish/context",
    request_body = PublishDocumentRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 422, description = "Document has no @context object"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "publish"
)]
pub async fn publish_context(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<PublishDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let body = extract_validated_json(payload)?;
    ContextDocument::parse(&body.document)?;
    let (doc, options) = body.into_parts();
    run(state, caller, ArtifactPayload::JsonLdContext(doc), options).await
}

/// Publish the entity registry.
#[utoipa::path(
    post,
    path = "/api/v1/publish/entities",
    request_body = PublishRegistryRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 409, description = "Registry changed on the base branch since it was read"),
        (status = 422, description = "Malformed registry"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "publish"
)]
pub async fn publish_entities(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<PublishRegistryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let body = extract_json(payload)?;
    EntityRegistry::parse(&body.document)?;
    let payload = ArtifactPayload::EntityRegistry { document: body.document };
    run(state, caller, payload, body.options.into()).await
}

/// Publish a batch of vocabulary types as one commit.
#[utoipa::path(
    post,
    path = "/api/v1/publish/vocab",
    request_body = PublishVocabRequest,
    responses(
        (status = 201, description = "Pull request opened", body = PublishResponse),
        (status = 422, description = "Empty batch or malformed type"),
        (status = 502, description = "Forge call failed"),
    ),
    tag = "publish"
)]
pub async fn publish_vocab(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<PublishVocabRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let body = extract_validated_json(payload)?;
    for item in &body.items {
        VocabType::parse(&item.document)?;
    }

    let items = body
        .items
        .into_iter()
        .map(|i| VocabItem { name: i.name, filename: i.filename, document: i.document })
        .collect();
    let job = PublishJob {
        draft: draft(&ArtifactPayload::VocabBatch(items))?,
        author_handle: caller.user.login.clone(),
        options: body.options.into(),
    };

    let remote = state.remote(&caller.forge_token)?;
    let result = run_vocab_batch(&remote, &SystemClock, job).await?;
    tracing::info!(
        login = %caller.user.login,
        pr = result.pr_number,
        files = result.file_paths.len(),
        "vocabulary batch published"
    );
    Ok((StatusCode::CREATED, Json(result.into())))
}

/// Draft and run a single-artifact publish as the calling session.
async fn run(
    state: AppState,
    caller: CallerIdentity,
    payload: ArtifactPayload,
    options: PublishOptions,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    let kind = payload.kind();
    let job = PublishJob {
        draft: draft(&payload)?,
        author_handle: caller.user.login.clone(),
        options,
    };

    let remote = state.remote(&caller.forge_token)?;
    let result = run_publish(&remote, &SystemClock, job, None).await?;
    tracing::info!(
        login = %caller.user.login,
        kind = %kind,
        pr = result.pr_number,
        "artifact published"
    );
    Ok((StatusCode::CREATED, Json(result.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_request_requires_a_name() {
        let request: PublishDocumentRequest = serde_json::from_value(json!({
            "name": "  ",
            "document": {"vct": "https://x.example/v"}
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn vocab_request_rejects_an_empty_batch() {
        let request: PublishVocabRequest =
            serde_json::from_value(json!({ "items": [] })).unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn vocab_request_rejects_a_nameless_item() {
        let request: PublishVocabRequest = serde_json::from_value(json!({
            "items": [{"name": "", "document": {"name": "X", "properties": []}}]
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn options_default_to_no_overrides() {
        let request: PublishDocumentRequest = serde_json::from_value(json!({
            "name": "Home Credential",
            "document": {}
        }))
        .unwrap();
        let options: PublishOptions = request.options.into();
        assert!(options.commit_message.is_none());
        assert!(options.base_branch_override.is_none());
    }

    #[test]
    fn options_carry_through_to_the_orchestrator() {
        let request: PublishDocumentRequest = serde_json::from_value(json!({
            "name": "Home Credential",
            "document": {},
            "options": {
                "pr_title": "Custom title",
                "base_branch": "develop"
            }
        }))
        .unwrap();
        let options: PublishOptions = request.options.into();
        assert_eq!(options.pr_title.as_deref(), Some("Custom title"));
        assert_eq!(options.base_branch_override.as_deref(), Some("develop"));
        assert!(options.pr_body.is_none());
    }
}
