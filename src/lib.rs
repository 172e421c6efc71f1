//! Hotel Catalog API Library
//!
//! Core functionality for the hotel catalog service: geography, hotel
//! references, hotel cards and their content, exposed over a REST API.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub auth: Arc<auth::AuthService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = Arc::new(auth::AuthService::new(
            config.jwt_secret.clone(),
            config.jwt_issuer.clone(),
        ));
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
            auth,
        }
    }

    /// Clamp the requested page size to the configured bounds.
    pub fn page_limit(&self, requested: Option<u64>) -> u64 {
        requested
            .unwrap_or(self.config.api_default_page_size as u64)
            .clamp(1, self.config.api_max_page_size as u64)
    }
}

// Common query parameters for list endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn default_page() -> u64 {
    1
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn descending(&self) -> Result<bool, ServiceError> {
        match self.sort_order.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => Ok(false),
            Some("desc") => Ok(true),
            Some(other) => Err(ServiceError::BadRequest(format!(
                "sort_order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Query flag for deletes that may detach or unlink dependents.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForceQuery {
    #[serde(default)]
    pub force: bool,
}

/// Page window resolved from a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        Self {
            items,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: total.div_ceil(page.limit),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[test]
    fn paginated_response_rounds_total_pages_up() {
        let page = PageRequest::new(2, 20);
        let response = PaginatedResponse::new(vec![1, 2, 3], 41, page);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.page, 2);
        assert_eq!(page.offset(), 20);

        let empty = PaginatedResponse::<u8>::new(vec![], 0, PageRequest::new(1, 20));
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn list_query_rejects_unknown_sort_order() {
        let query = ListQuery {
            sort_order: Some("sideways".into()),
            ..Default::default()
        };
        assert!(query.descending().is_err());

        let query = ListQuery {
            sort_order: Some("DESC".into()),
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(query.descending().unwrap());
        assert_eq!(query.search_term(), None);
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<axum::Json<ApiResponse<T>>, ServiceError>;

/// Read-only catalog routes.
fn public_routes() -> Router<AppState> {
    use handlers::{
        addresses, cities, countries, features, hotel_content, hotels, neighborhoods,
        references,
    };

    Router::new()
        // Geography
        .route("/countries", get(countries::list_countries))
        .route("/countries/:id", get(countries::get_country))
        .route("/countries/:id/cities", get(countries::list_country_cities))
        .route("/cities", get(cities::list_cities))
        .route("/cities/:id", get(cities::get_city))
        .route("/cities/:id/neighborhoods", get(cities::list_city_neighborhoods))
        .route("/neighborhoods", get(neighborhoods::list_neighborhoods))
        .route("/neighborhoods/:id", get(neighborhoods::get_neighborhood))
        .route("/addresses", get(addresses::list_addresses))
        .route("/addresses/:id", get(addresses::get_address))
        // Hotel references
        .route("/destinations", get(references::list_destinations))
        .route("/destinations/:id", get(references::get_destination))
        .route("/accommodation-types", get(references::list_accommodation_types))
        .route("/accommodation-types/:id", get(references::get_accommodation_type))
        .route("/hotel-groups", get(references::list_hotel_groups))
        .route("/hotel-groups/:id", get(references::get_hotel_group))
        .route("/parking-options", get(references::list_parking_options))
        .route("/parking-options/:id", get(references::get_parking_option))
        // Hotel features, one mount per kind
        .route("/amenities", get(features::list_amenities))
        .route("/amenities/:id", get(features::get_amenity))
        .route("/labels", get(features::list_labels))
        .route("/labels/:id", get(features::get_label))
        .route("/highlights", get(features::list_highlights))
        .route("/highlights/:id", get(features::get_highlight))
        .route("/accessibility-options", get(features::list_accessibility_options))
        .route("/accessibility-options/:id", get(features::get_accessibility_option))
        // Hotels
        .route("/hotels", get(hotels::list_hotels))
        .route("/hotels/:id", get(hotels::get_hotel))
        .route("/hotels/by-slug/:slug", get(hotels::get_hotel_by_slug))
        .route("/hotels/:id/reviews", get(hotel_content::list_reviews))
        .route("/hotels/:id/rating", get(hotel_content::get_rating_summary))
        .route("/hotels/:id/policies", get(hotel_content::list_policies))
        .route("/hotels/:id/rooms", get(hotel_content::list_rooms))
        .route("/hotels/:id/details", get(hotel_content::get_details))
}

/// Back-office routes; every request must carry an admin bearer token.
fn admin_routes(state: &AppState) -> Router<AppState> {
    use handlers::{
        addresses, cities, countries, features, hotel_content, hotels, neighborhoods,
        references,
    };

    Router::new()
        // Geography
        .route("/countries", post(countries::create_country))
        .route(
            "/countries/:id",
            put(countries::update_country).delete(countries::delete_country),
        )
        .route("/cities", post(cities::create_city))
        .route("/cities/:id", put(cities::update_city).delete(cities::delete_city))
        .route("/neighborhoods", post(neighborhoods::create_neighborhood))
        .route(
            "/neighborhoods/:id",
            put(neighborhoods::update_neighborhood).delete(neighborhoods::delete_neighborhood),
        )
        .route("/addresses", post(addresses::create_address))
        .route(
            "/addresses/:id",
            put(addresses::update_address).delete(addresses::delete_address),
        )
        // Hotel references
        .route("/destinations", post(references::create_destination))
        .route(
            "/destinations/:id",
            put(references::update_destination).delete(references::delete_destination),
        )
        .route("/accommodation-types", post(references::create_accommodation_type))
        .route(
            "/accommodation-types/:id",
            put(references::update_accommodation_type)
                .delete(references::delete_accommodation_type),
        )
        .route("/hotel-groups", post(references::create_hotel_group))
        .route(
            "/hotel-groups/:id",
            put(references::update_hotel_group).delete(references::delete_hotel_group),
        )
        .route("/parking-options", post(references::create_parking_option))
        .route(
            "/parking-options/:id",
            put(references::update_parking_option).delete(references::delete_parking_option),
        )
        // Hotel features
        .route("/amenities", post(features::create_amenity))
        .route("/amenities/bulk", post(features::bulk_create_amenities))
        .route(
            "/amenities/:id",
            put(features::update_amenity).delete(features::delete_amenity),
        )
        .route("/labels", post(features::create_label))
        .route("/labels/bulk", post(features::bulk_create_labels))
        .route("/labels/:id", put(features::update_label).delete(features::delete_label))
        .route("/highlights", post(features::create_highlight))
        .route("/highlights/bulk", post(features::bulk_create_highlights))
        .route(
            "/highlights/:id",
            put(features::update_highlight).delete(features::delete_highlight),
        )
        .route(
            "/accessibility-options",
            post(features::create_accessibility_option),
        )
        .route(
            "/accessibility-options/bulk",
            post(features::bulk_create_accessibility_options),
        )
        .route(
            "/accessibility-options/:id",
            put(features::update_accessibility_option)
                .delete(features::delete_accessibility_option),
        )
        // Hotels
        .route("/hotels", post(hotels::create_hotel))
        .route("/hotels/:id", put(hotels::update_hotel).delete(hotels::delete_hotel))
        .route("/hotels/:id/features/:kind", put(hotels::replace_hotel_features))
        .route("/hotels/:id/reviews", post(hotel_content::create_review))
        .route("/reviews/:id", delete(hotel_content::delete_review))
        .route("/hotels/:id/policies", post(hotel_content::create_policy))
        .route(
            "/policies/:id",
            put(hotel_content::update_policy).delete(hotel_content::delete_policy),
        )
        .route("/hotels/:id/rooms", post(hotel_content::create_room))
        .route(
            "/rooms/:id",
            put(hotel_content::update_room).delete(hotel_content::delete_room),
        )
        .route("/hotels/:id/details", put(hotel_content::upsert_details))
        .route_layer(axum::middleware::from_fn_with_state(
            state.auth.clone(),
            auth::require_admin,
        ))
}

/// All `/api/v1` routes.
pub fn api_v1_routes(state: &AppState) -> Router<AppState> {
    public_routes().merge(admin_routes(state))
}

/// Full application router with health, docs and the HTTP middleware stack.
pub fn build_router(state: AppState) -> Router {
    let timeout = std::time::Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(|| async { "hotel-catalog-api up" }))
        .nest("/api/v1", api_v1_routes(&state))
        .nest("/health", health::health_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(tower_http::timeout::TimeoutLayer::new(timeout))
        .layer(tower_http::compression::CompressionLayer::new())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
