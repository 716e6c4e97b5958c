//! Contract tests for ContentsClient against the forge contents API.
//!
//! The create-vs-update distinction lives here: a GET miss (404) is
//! `Ok(None)`, and a PUT carries the previous blob SHA only when the
//! planner saw the file exist.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/repos/{owner}/{name}/contents/{path}` | `get_file_*` |
//! | PUT    | `/repos/{owner}/{name}/contents/{path}` | `write_file_*` |

use cdt_forge::{ForgeClient, ForgeConfig, ForgeError, RepoRef};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> ForgeClient {
    let config = ForgeConfig {
        api_url: mock_server.uri().parse().unwrap(),
        token: "test-token".into(),
        timeout_secs: 5,
    };
    ForgeClient::new(config).unwrap()
}

fn governance_repo() -> RepoRef {
    RepoRef::new("openwallet-labs", "credential-governance")
}

// ── GET /contents/{path} ─────────────────────────────────────────────

#[tokio::test]
async fn get_file_decodes_wrapped_base64_and_returns_sha() {
    let mock_server = MockServer::start().await;

    // `{"id": 1}` base64-encoded with a line break, as the live API wraps.
    Mock::given(method("GET"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/entities/entities.json",
        ))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "path": "credentials/entities/entities.json",
            "sha": "blob-sha-1",
            "content": "eyJpZCI6\nIDF9\n",
            "encoding": "base64"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let file = client
        .contents()
        .get_file(
            &governance_repo(),
            "credentials/entities/entities.json",
            "main",
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(file.sha, "blob-sha-1");
    assert_eq!(file.content, br#"{"id": 1}"#);
}

#[tokio::test]
async fn get_file_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/vct/new.json",
        ))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let file = client
        .contents()
        .get_file(&governance_repo(), "credentials/vct/new.json", "main")
        .await
        .unwrap();
    assert!(file.is_none());
}

#[tokio::test]
async fn get_file_surfaces_500_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/vct/x.json",
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .contents()
        .get_file(&governance_repo(), "credentials/vct/x.json", "main")
        .await
        .unwrap_err();
    match err {
        ForgeError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("expected Api, got: {other:?}"),
    }
}

// ── PUT /contents/{path} ─────────────────────────────────────────────

#[tokio::test]
async fn write_file_create_omits_previous_sha() {
    let mock_server = MockServer::start().await;

    // `{}` is `e30=` in base64. The create body must carry no `sha` key.
    Mock::given(method("PUT"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/schemas/property-home-credential.json",
        ))
        .and(body_partial_json(serde_json::json!({
            "message": "Add JSON Schema: property-home-credential.json",
            "content": "e30=",
            "branch": "schema/add-property-home-credential-1700000000000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "content": {
                "path": "credentials/schemas/property-home-credential.json",
                "sha": "new-blob-sha"
            },
            "commit": {"sha": "new-commit-sha"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let sha = client
        .contents()
        .write_file(
            &governance_repo(),
            "credentials/schemas/property-home-credential.json",
            b"{}",
            "Add JSON Schema: property-home-credential.json",
            "schema/add-property-home-credential-1700000000000",
            None,
        )
        .await
        .unwrap();
    assert_eq!(sha, "new-blob-sha");
}

#[tokio::test]
async fn write_file_update_includes_previous_sha() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/proof-templates/kyc-age-check.json",
        ))
        .and(body_partial_json(serde_json::json!({
            "sha": "old-blob-sha"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": {
                "path": "credentials/proof-templates/kyc-age-check.json",
                "sha": "replacement-sha"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let sha = client
        .contents()
        .write_file(
            &governance_repo(),
            "credentials/proof-templates/kyc-age-check.json",
            b"{\"updated\":true}",
            "Update Proof Template: kyc-age-check.json",
            "proof-template/update-kyc-age-check-1700000000001",
            Some("old-blob-sha"),
        )
        .await
        .unwrap();
    assert_eq!(sha, "replacement-sha");
}

#[tokio::test]
async fn write_file_maps_409_to_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/entities/entities.json",
        ))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_string(r#"{"message":"entities.json does not match"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .contents()
        .write_file(
            &governance_repo(),
            "credentials/entities/entities.json",
            b"{}",
            "Update Entity Registry: entities.json",
            "entities/update-entities-1700000000002",
            Some("stale-sha"),
        )
        .await
        .unwrap_err();
    match err {
        ForgeError::Conflict { path } => {
            assert_eq!(path, "credentials/entities/entities.json");
        }
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn write_file_surfaces_422_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/contents/credentials/vct/x.json",
        ))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message":"Invalid request"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .contents()
        .write_file(
            &governance_repo(),
            "credentials/vct/x.json",
            b"{}",
            "Add VCT: x.json",
            "vct/add-x-1700000000003",
            None,
        )
        .await
        .unwrap_err();
    match err {
        ForgeError::Api { status, body, .. } => {
            assert_eq!(status, 422);
            assert!(body.contains("Invalid request"));
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}
