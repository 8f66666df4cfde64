//! API integration tests
//!
//! These tests drive the router over HTTP with `axum_test::TestServer`.
//! They run against a file-backed contact store with no database and no
//! mail transport, so they exercise the paths that short-circuit before
//! storage: validation, authentication, and routing.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use phonebook::contacts::store::ContactStore;
use phonebook::routes::router::create_router;
use phonebook::server::config::AppConfig;
use phonebook::server::state::AppState;

fn test_server(dir: &tempfile::TempDir) -> TestServer {
    let state = AppState {
        db_pool: None,
        contacts: ContactStore::file(dir.path().join("contacts.json")),
        mailer: None,
        config: Arc::new(AppConfig {
            public_dir: dir.path().join("public"),
            tmp_dir: dir.path().join("tmp"),
            unique_contact_email: false,
        }),
    };
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_signup_invalid_email_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/signup")
        .json(&serde_json::json!({
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "email must be a valid email");
}

#[tokio::test]
async fn test_signup_short_password_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/signup")
        .json(&serde_json::json!({
            "email": "user@example.com",
            "password": "short"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "password must be at least 6 characters");
}

#[tokio::test]
async fn test_signup_missing_fields_name_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/signup")
        .json(&serde_json::json!({}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "missing required email field");
}

#[tokio::test]
async fn test_malformed_json_body_is_json_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/login")
        .add_header("Content-Type", "application/json")
        .bytes("{ not json".into())
        .await;

    // Extractor rejections keep the JSON error shape
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_login_missing_password_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/login")
        .json(&serde_json::json!({ "email": "user@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "missing required password field");
}

#[tokio::test]
async fn test_signup_without_database_is_500_generic() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .post("/api/users/signup")
        .json(&serde_json::json!({
            "email": "user@example.com",
            "password": "password123"
        }))
        .await;

    // Storage failures are a generic 500; the detail stays server-side
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn test_contacts_without_token_is_401() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/api/contacts").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Not authorized");
}

#[tokio::test]
async fn test_contacts_with_malformed_header_is_401() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .get("/api/contacts")
        .add_header("Authorization", "Token abc")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_contacts_with_garbled_token_is_401() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server
        .get("/api/contacts")
        .add_header("Authorization", "Bearer not.a.token")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_user_routes_require_token() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    for path in ["/api/users/logout", "/api/users/current"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let response = server.patch("/api/users/avatars").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(&dir);

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Not found");
}
