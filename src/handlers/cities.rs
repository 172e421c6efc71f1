use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::{city, neighborhood},
    errors::ServiceError,
    services::{
        geography::{CityFilter, CreateCityRequest, UpdateCityRequest},
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    summary = "List cities",
    params(ListQuery, CityFilter),
    responses(
        (status = 200, description = "Cities retrieved", body = ApiResponse<PaginatedResponse<city::Model>>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn list_cities(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
    ApiQuery(filter): ApiQuery<CityFilter>,
) -> ApiResult<PaginatedResponse<city::Model>> {
    let page = page_request(&state, &query)?;
    let cities = state
        .services
        .geography
        .list_cities(&filter, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(cities)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    summary = "Get city",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "City retrieved", body = ApiResponse<city::Model>),
        (status = 404, description = "City not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn get_city(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<city::Model> {
    let city = state.services.geography.get_city(id).await?;
    Ok(Json(ApiResponse::success(city)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}/neighborhoods",
    summary = "List the neighborhoods of a city",
    params(("id" = Uuid, Path, description = "City id"), ListQuery),
    responses(
        (status = 200, description = "Neighborhoods retrieved", body = ApiResponse<PaginatedResponse<neighborhood::Model>>),
        (status = 404, description = "City not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn list_city_neighborhoods(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<neighborhood::Model>> {
    let page = page_request(&state, &query)?;
    let neighborhoods = state
        .services
        .geography
        .list_city_neighborhoods(id, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(neighborhoods)))
}

#[utoipa::path(
    post,
    path = "/api/v1/cities",
    summary = "Create city",
    request_body = CreateCityRequest,
    responses(
        (status = 201, description = "City created", body = ApiResponse<city::Model>),
        (status = 400, description = "Invalid request data or unknown country", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this country", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn create_city(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<city::Model>>), ServiceError> {
    let city = state.services.geography.create_city(payload).await?;
    Ok(created(city, "City created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/cities/{id}",
    summary = "Update city",
    params(("id" = Uuid, Path, description = "City id")),
    request_body = UpdateCityRequest,
    responses(
        (status = 200, description = "City updated", body = ApiResponse<city::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "City not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this country", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn update_city(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCityRequest>,
) -> ApiResult<city::Model> {
    let city = state.services.geography.update_city(id, payload).await?;
    Ok(Json(ApiResponse::with_message(city, "City updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    summary = "Delete city",
    description = "Refused with 409 while neighborhoods, addresses, destinations or hotels reference the city",
    params(("id" = Uuid, Path, description = "City id")),
    responses(
        (status = 200, description = "City deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "City not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "City is still referenced", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn delete_city(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.geography.delete_city(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "City deleted")))
}
