#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use hotel_catalog_api::{
    auth::ADMIN_ROLE,
    build_router,
    config::AppConfig,
    db::{self, DbConfig},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only_32chars";

/// Helper harness for spinning up the router over a fresh in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    admin_token: String,
    viewer_token: String,
}

/// Status, selected headers and decoded JSON body of a test response.
pub struct TestResponse {
    pub status: StatusCode,
    pub request_id: Option<String>,
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn id(&self) -> String {
        self.body["data"]["id"]
            .as_str()
            .unwrap_or_else(|| panic!("response has no data.id: {}", self.body))
            .to_string()
    }
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            TEST_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        // One long-lived connection so every query sees the same in-memory database.
        let pool = db::establish_connection_with_config(&DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: Duration::from_secs(3600),
            ..Default::default()
        })
        .await
        .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let admin_token = state
            .auth
            .issue_token("test-admin", &[ADMIN_ROLE], chrono::Duration::hours(1))
            .expect("issue admin token");
        let viewer_token = state
            .auth
            .issue_token("test-viewer", &["viewer"], chrono::Duration::hours(1))
            .expect("issue viewer token");

        Self {
            router: build_router(state.clone()),
            state,
            admin_token,
            viewer_token,
        }
    }

    pub fn admin_token(&self) -> &str {
        &self.admin_token
    }

    pub fn viewer_token(&self) -> &str {
        &self.viewer_token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, uri, body, token, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {tok}"));
        }
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize json request body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("router error during test request");

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body bytes");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            request_id,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), Some(self.admin_token()))
            .await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), Some(self.admin_token()))
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, Some(self.admin_token()))
            .await
    }

    /// POST that must succeed with 201; returns the created id.
    pub async fn create(&self, uri: &str, body: Value) -> String {
        let response = self.post(uri, body).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "POST {uri} failed: {}",
            response.body
        );
        response.id()
    }

    pub async fn seed_country(&self, name: &str, code: &str) -> String {
        self.create("/api/v1/countries", json!({ "name": name, "code": code }))
            .await
    }

    pub async fn seed_city(&self, country_id: &str, name: &str) -> String {
        self.create(
            "/api/v1/cities",
            json!({
                "country_id": country_id,
                "name": name,
                "latitude": 48.8566,
                "longitude": 2.3522
            }),
        )
        .await
    }

    pub async fn seed_neighborhood(&self, city_id: &str, name: &str) -> String {
        self.create(
            "/api/v1/neighborhoods",
            json!({ "city_id": city_id, "name": name }),
        )
        .await
    }

    /// A country with one city; returns `(country_id, city_id)`.
    pub async fn seed_paris(&self) -> (String, String) {
        let country = self.seed_country("France", "FR").await;
        let city = self.seed_city(&country, "Paris").await;
        (country, city)
    }

    pub async fn seed_hotel(&self, city_id: &str, name: &str, stars: i32, price: f64) -> String {
        self.create(
            "/api/v1/hotels",
            json!({
                "name": name,
                "star_rating": stars,
                "price_per_night": price,
                "city_id": city_id
            }),
        )
        .await
    }

    pub async fn seed_feature(&self, collection: &str, name: &str) -> String {
        self.create(&format!("/api/v1/{collection}"), json!({ "name": name }))
            .await
    }
}
