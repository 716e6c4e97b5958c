//! Contract tests for RepoClient and BranchClient against the forge REST
//! API.
//!
//! These tests use wiremock to simulate the live forge. Every path,
//! request shape, and response shape is derived from the public REST API
//! reference.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/repos/{owner}/{name}` | `get_default_branch_*` |
//! | GET    | `/repos/{owner}/{name}/git/ref/heads/{branch}` | `get_head_sha_*` |
//! | POST   | `/repos/{owner}/{name}/git/refs` | `create_branch_*` |

use cdt_forge::{ForgeClient, ForgeConfig, ForgeError, RepoRef};
use wiremock::matchers::{body_json, header, method, path};
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

// ── GET /repos/{owner}/{name} ────────────────────────────────────────

#[tokio::test]
async fn get_default_branch_returns_branch_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/openwallet-labs/credential-governance"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "full_name": "openwallet-labs/credential-governance",
            "default_branch": "main",
            "private": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let branch = client
        .repos()
        .get_default_branch(&governance_repo())
        .await
        .unwrap();
    assert_eq!(branch, "main");
}

#[tokio::test]
async fn get_default_branch_maps_404_to_repo_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/openwallet-labs/credential-governance"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .repos()
        .get_default_branch(&governance_repo())
        .await
        .unwrap_err();
    match err {
        ForgeError::RepoNotFound { repo } => {
            assert_eq!(repo, "openwallet-labs/credential-governance");
        }
        other => panic!("expected RepoNotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn get_default_branch_surfaces_500_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/openwallet-labs/credential-governance"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .repos()
        .get_default_branch(&governance_repo())
        .await
        .unwrap_err();
    match err {
        ForgeError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected Api, got: {other:?}"),
    }
}

// ── GET /repos/{owner}/{name}/git/ref/heads/{branch} ─────────────────

#[tokio::test]
async fn get_head_sha_resolves_branch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/ref/heads/main",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ref": "refs/heads/main",
            "object": {"sha": "a1b2c3d4e5", "type": "commit"}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let sha = client
        .branches()
        .get_head_sha(&governance_repo(), "main")
        .await
        .unwrap();
    assert_eq!(sha, "a1b2c3d4e5");
}

#[tokio::test]
async fn get_head_sha_maps_404_to_branch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/ref/heads/ghost",
        ))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .branches()
        .get_head_sha(&governance_repo(), "ghost")
        .await
        .unwrap_err();
    match err {
        ForgeError::BranchNotFound { branch, .. } => assert_eq!(branch, "ghost"),
        other => panic!("expected BranchNotFound, got: {other:?}"),
    }
}

// ── POST /repos/{owner}/{name}/git/refs ──────────────────────────────

#[tokio::test]
async fn create_branch_sends_fully_qualified_ref() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/refs",
        ))
        .and(body_json(serde_json::json!({
            "ref": "refs/heads/schema/add-home-credential-1700000000000",
            "sha": "a1b2c3d4e5"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "ref": "refs/heads/schema/add-home-credential-1700000000000",
            "object": {"sha": "a1b2c3d4e5"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client
        .branches()
        .create(
            &governance_repo(),
            "schema/add-home-credential-1700000000000",
            "a1b2c3d4e5",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_branch_maps_422_to_already_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/refs",
        ))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_string(r#"{"message":"Reference already exists"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .branches()
        .create(&governance_repo(), "vct/add-id-1", "abc")
        .await
        .unwrap_err();
    match err {
        ForgeError::BranchAlreadyExists { branch, .. } => assert_eq!(branch, "vct/add-id-1"),
        other => panic!("expected BranchAlreadyExists, got: {other:?}"),
    }
}

#[tokio::test]
async fn create_branch_maps_409_to_already_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/refs",
        ))
        .respond_with(ResponseTemplate::new(409))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .branches()
        .create(&governance_repo(), "vct/add-id-1", "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, ForgeError::BranchAlreadyExists { .. }));
}

#[tokio::test]
async fn create_branch_surfaces_other_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/repos/openwallet-labs/credential-governance/git/refs",
        ))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"message":"Forbidden"}"#))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .branches()
        .create(&governance_repo(), "vct/add-id-1", "abc")
        .await
        .unwrap_err();
    match err {
        ForgeError::Api { status, .. } => assert_eq!(status, 403),
        other => panic!("expected Api, got: {other:?}"),
    }
}
