mod common;

use axum::http::StatusCode;

use common::TestApp;

#[tokio::test]
async fn health_endpoints_report_up() {
    let app = TestApp::new().await;

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "up");

    let ready = app.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["ready"], true);
    assert_eq!(ready.body["database"], "up");

    let live = app.get("/health/live").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body["alive"], true);

    let version = app.get("/health/version").await;
    assert_eq!(version.body["name"], "hotel-catalog-api");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;
    let response = app.get("/api-docs/openapi.json").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["info"]["title"], "Hotel Catalog API");
    assert!(response.body["paths"]
        .get("/api/v1/hotels/{id}/details")
        .is_some());
}
