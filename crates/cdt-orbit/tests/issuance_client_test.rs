//! Contract tests for IssuanceClient against the Orbit issuance API.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST   | `/credential-offers` | `create_offer_*` |
//! | GET    | `/credential-offers/{id}` | `get_offer_*` |
//! | GET    | `/credential-definitions` | `list_definitions_*` |

use cdt_orbit::{CreateOfferRequest, OfferState, OrbitClient, OrbitConfig, OrbitError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> OrbitClient {
    let config = OrbitConfig {
        api_url: mock_server.uri().parse().unwrap(),
        api_key: "test-key".into(),
        timeout_secs: 5,
    };
    OrbitClient::new(config).unwrap()
}

fn offer_request() -> CreateOfferRequest {
    let claims = serde_json::json!({
        "given_name": "Ada",
        "age_over_18": true
    });
    CreateOfferRequest {
        credential_definition_id: "GHJ123:3:CL:99:home".into(),
        claims: claims.as_object().unwrap().clone(),
    }
}

// ── POST /credential-offers ──────────────────────────────────────────

#[tokio::test]
async fn create_offer_sends_api_key_and_claims() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/credential-offers"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "credential_definition_id": "GHJ123:3:CL:99:home",
            "claims": {"given_name": "Ada", "age_over_18": true}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "offer-1",
            "offer_url": "openid-credential-offer://?credential_offer_uri=https%3A%2F%2Forbit.example%2Fo%2F1",
            "state": "pending"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let offer = client
        .issuance()
        .create_offer(&offer_request())
        .await
        .unwrap();

    assert_eq!(offer.id, "offer-1");
    assert_eq!(offer.state, OfferState::Pending);
    assert!(offer.offer_url.unwrap().starts_with("openid-credential-offer://"));
}

#[tokio::test]
async fn create_offer_surfaces_400_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/credential-offers"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"message":"unknown credential definition"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .issuance()
        .create_offer(&offer_request())
        .await
        .unwrap_err();
    match err {
        OrbitError::Api { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("unknown credential definition"));
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

// ── GET /credential-offers/{id} ──────────────────────────────────────

#[tokio::test]
async fn get_offer_returns_claimed_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credential-offers/offer-1"))
        .and(header("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "offer-1",
            "state": "claimed"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let offer = client
        .issuance()
        .get_offer("offer-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(offer.state, OfferState::Claimed);
    assert!(offer.state.is_terminal());
}

#[tokio::test]
async fn get_offer_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credential-offers/pruned"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"not found"}"#))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let offer = client.issuance().get_offer("pruned").await.unwrap();
    assert!(offer.is_none());
}

#[tokio::test]
async fn get_offer_maps_unmodeled_state_to_unknown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credential-offers/offer-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "offer-2",
            "state": "revocation-pending"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let offer = client
        .issuance()
        .get_offer("offer-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(offer.state, OfferState::Unknown);
}

// ── GET /credential-definitions ──────────────────────────────────────

#[tokio::test]
async fn list_definitions_returns_typed_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credential-definitions"))
        .and(header("api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "GHJ123:3:CL:99:home", "name": "Home Credential", "version": "1.2"},
            {"id": "KLM456:3:CL:12:kyc", "name": "KYC Credential", "schema_id": "KLM456:2:kyc:1.0"}
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let definitions = client.issuance().list_definitions().await.unwrap();

    assert_eq!(definitions.len(), 2);
    assert_eq!(definitions[0].name, "Home Credential");
    assert_eq!(definitions[0].version.as_deref(), Some("1.2"));
    assert!(definitions[0].schema_id.is_none());
    assert_eq!(
        definitions[1].schema_id.as_deref(),
        Some("KLM456:2:kyc:1.0")
    );
}

#[tokio::test]
async fn list_definitions_surfaces_503_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/credential-definitions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.issuance().list_definitions().await.unwrap_err();
    match err {
        OrbitError::Api { status, .. } => assert_eq!(status, 503),
        other => panic!("expected Api, got: {other:?}"),
    }
}
