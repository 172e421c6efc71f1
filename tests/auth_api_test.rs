mod common;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use hotel_catalog_api::auth::{AuthService, ADMIN_ROLE};
use serde_json::json;

use common::{TestApp, TEST_SECRET};

#[tokio::test]
async fn reads_are_public() {
    let app = TestApp::new().await;
    let response = app.get("/api/v1/countries").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["total"], 0);
}

#[tokio::test]
async fn write_without_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/v1/countries",
            Some(json!({ "name": "France", "code": "FR" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let listed = app.get("/api/v1/countries").await;
    assert_eq!(listed.data()["total"], 0);
}

#[tokio::test]
async fn write_with_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/hotels/{}", uuid::Uuid::new_v4()),
            None,
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_another_issuer_is_unauthorized() {
    let app = TestApp::new().await;
    let foreign = AuthService::new(TEST_SECRET.to_string(), "someone-else".to_string())
        .issue_token("intruder", &[ADMIN_ROLE], Duration::hours(1))
        .unwrap();

    let response = app
        .request(
            Method::POST,
            "/api/v1/amenities",
            Some(json!({ "name": "Pool" })),
            Some(&foreign),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_token_is_forbidden() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/v1/amenities",
            Some(json!({ "name": "Pool" })),
            Some(app.viewer_token()),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new().await;

    let supplied = app
        .request_with_headers(
            Method::GET,
            &format!("/api/v1/hotels/{}", uuid::Uuid::new_v4()),
            None,
            None,
            &[("x-request-id", "req-catalog-42")],
        )
        .await;
    assert_eq!(supplied.status, StatusCode::NOT_FOUND);
    assert_eq!(supplied.request_id.as_deref(), Some("req-catalog-42"));
    assert_eq!(supplied.body["request_id"], "req-catalog-42");

    let generated = app.get("/api/v1/countries").await;
    let id = generated.request_id.expect("generated request id");
    assert!(!id.is_empty());
    assert_eq!(generated.body["meta"]["request_id"], id.as_str());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new().await;
    let response = app
        .post("/api/v1/countries", json!({ "name": "France" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Bad Request");
}
