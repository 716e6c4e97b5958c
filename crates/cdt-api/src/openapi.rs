//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`. The service's own document round-trips
//! through the inspector, which is how the inspector gets exercised in
//! development.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credential Design Tools API",
        version = "0.1.0",
        description = "Staff-facing platform for designing verifiable-credential \
                       artifacts and publishing them to the governance repository \
                       as pull requests.",
    ),
    paths(
        // Sessions
        crate::routes::sessions::create_session,
        crate::routes::sessions::current_session,
        crate::routes::sessions::delete_session,
        // Publish
        crate::routes::publish::publish_vct,
        crate::routes::publish::publish_schema,
        crate::routes::publish::publish_context,
        crate::routes::publish::publish_entities,
        crate::routes::publish::publish_vocab,
        // Proof templates
        crate::routes::proof_templates::list_templates,
        crate::routes::proof_templates::create_template,
        crate::routes::proof_templates::get_template,
        crate::routes::proof_templates::update_template,
        crate::routes::proof_templates::delete_template,
        crate::routes::proof_templates::publish_template,
        // Catalogue
        crate::routes::catalogue::list_catalogue,
        crate::routes::catalogue::import_catalogue,
        // Test issuer
        crate::routes::issuer::get_settings,
        crate::routes::issuer::update_settings,
        crate::routes::issuer::list_definitions,
        crate::routes::issuer::create_offer,
        crate::routes::issuer::list_offers,
        crate::routes::issuer::get_offer,
        // Inspector
        crate::routes::inspector::inspect_document,
        // Access log
        crate::routes::access_log::list_access_log,
    ),
    components(schemas(
        // State record types
        crate::state::ProofTemplateRecord,
        crate::state::CatalogueRecord,
        crate::state::IssuerOfferRecord,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Session DTOs
        crate::routes::sessions::CreateSessionRequest,
        crate::routes::sessions::SessionUser,
        crate::routes::sessions::SessionResponse,
        // Publish DTOs
        crate::routes::publish::PublishRequestOptions,
        crate::routes::publish::PublishDocumentRequest,
        crate::routes::publish::PublishRegistryRequest,
        crate::routes::publish::VocabItemRequest,
        crate::routes::publish::PublishVocabRequest,
        crate::routes::publish::PublishResponse,
        // Proof template DTOs
        crate::routes::proof_templates::ProofTemplateRequest,
        crate::routes::proof_templates::PublishTemplateRequest,
        // Catalogue DTOs
        crate::routes::catalogue::ImportRequest,
        crate::routes::catalogue::ImportResponse,
        // Issuer DTOs
        crate::routes::issuer::SettingsView,
        crate::routes::issuer::UpdateSettingsRequest,
        crate::routes::issuer::DefinitionView,
        crate::routes::issuer::CreateOfferBody,
        // Inspector DTOs
        crate::routes::inspector::InspectionView,
        crate::routes::inspector::OperationView,
        // Access log
        crate::middleware::access_log::AccessLogEntry,
    )),
    tags(
        (name = "sessions", description = "Login and session management"),
        (name = "publish", description = "Publish artifacts to the governance repository"),
        (name = "proof-templates", description = "Proof template authoring and publishing"),
        (name = "catalogue", description = "Imported credential definitions"),
        (name = "issuer", description = "Test credential issuance through Orbit"),
        (name = "inspector", description = "OpenAPI document inspection"),
        (name = "access-log", description = "Request history (admin)"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
