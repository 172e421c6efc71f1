use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::{city, country},
    errors::ServiceError,
    services::{
        geography::{CreateCountryRequest, UpdateCountryRequest},
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/countries",
    summary = "List countries",
    params(ListQuery),
    responses(
        (status = 200, description = "Countries retrieved", body = ApiResponse<PaginatedResponse<country::Model>>),
        (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn list_countries(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<country::Model>> {
    let page = page_request(&state, &query)?;
    let countries = state.services.geography.list_countries(&query, page).await?;
    Ok(Json(ApiResponse::success(countries)))
}

#[utoipa::path(
    get,
    path = "/api/v1/countries/{id}",
    summary = "Get country",
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country retrieved", body = ApiResponse<country::Model>),
        (status = 404, description = "Country not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn get_country(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<country::Model> {
    let country = state.services.geography.get_country(id).await?;
    Ok(Json(ApiResponse::success(country)))
}

#[utoipa::path(
    get,
    path = "/api/v1/countries/{id}/cities",
    summary = "List the cities of a country",
    params(("id" = Uuid, Path, description = "Country id"), ListQuery),
    responses(
        (status = 200, description = "Cities retrieved", body = ApiResponse<PaginatedResponse<city::Model>>),
        (status = 404, description = "Country not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn list_country_cities(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<city::Model>> {
    let page = page_request(&state, &query)?;
    let cities = state
        .services
        .geography
        .list_country_cities(id, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(cities)))
}

#[utoipa::path(
    post,
    path = "/api/v1/countries",
    summary = "Create country",
    request_body = CreateCountryRequest,
    responses(
        (status = 201, description = "Country created", body = ApiResponse<country::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name or code already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn create_country(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCountryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<country::Model>>), ServiceError> {
    let country = state.services.geography.create_country(payload).await?;
    Ok(created(country, "Country created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/countries/{id}",
    summary = "Update country",
    params(("id" = Uuid, Path, description = "Country id")),
    request_body = UpdateCountryRequest,
    responses(
        (status = 200, description = "Country updated", body = ApiResponse<country::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Country not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name or code already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn update_country(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCountryRequest>,
) -> ApiResult<country::Model> {
    let country = state.services.geography.update_country(id, payload).await?;
    Ok(Json(ApiResponse::with_message(country, "Country updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/countries/{id}",
    summary = "Delete country",
    description = "Refused with 409 while the country still has cities",
    params(("id" = Uuid, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Country not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Country still has cities", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn delete_country(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.geography.delete_country(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Country deleted")))
}
