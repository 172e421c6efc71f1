use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::neighborhood,
    errors::ServiceError,
    services::{
        geography::{CreateNeighborhoodRequest, NeighborhoodFilter, UpdateNeighborhoodRequest},
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/neighborhoods",
    summary = "List neighborhoods",
    params(ListQuery, NeighborhoodFilter),
    responses(
        (status = 200, description = "Neighborhoods retrieved", body = ApiResponse<PaginatedResponse<neighborhood::Model>>),
    ),
    tag = "geography"
)]
pub async fn list_neighborhoods(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
    ApiQuery(filter): ApiQuery<NeighborhoodFilter>,
) -> ApiResult<PaginatedResponse<neighborhood::Model>> {
    let page = page_request(&state, &query)?;
    let neighborhoods = state
        .services
        .geography
        .list_neighborhoods(&filter, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(neighborhoods)))
}

#[utoipa::path(
    get,
    path = "/api/v1/neighborhoods/{id}",
    summary = "Get neighborhood",
    params(("id" = Uuid, Path, description = "Neighborhood id")),
    responses(
        (status = 200, description = "Neighborhood retrieved", body = ApiResponse<neighborhood::Model>),
        (status = 404, description = "Neighborhood not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn get_neighborhood(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<neighborhood::Model> {
    let neighborhood = state.services.geography.get_neighborhood(id).await?;
    Ok(Json(ApiResponse::success(neighborhood)))
}

#[utoipa::path(
    post,
    path = "/api/v1/neighborhoods",
    summary = "Create neighborhood",
    request_body = CreateNeighborhoodRequest,
    responses(
        (status = 201, description = "Neighborhood created", body = ApiResponse<neighborhood::Model>),
        (status = 400, description = "Invalid request data or unknown city", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this city", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn create_neighborhood(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNeighborhoodRequest>,
) -> Result<(StatusCode, Json<ApiResponse<neighborhood::Model>>), ServiceError> {
    let neighborhood = state.services.geography.create_neighborhood(payload).await?;
    Ok(created(neighborhood, "Neighborhood created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/neighborhoods/{id}",
    summary = "Update neighborhood",
    params(("id" = Uuid, Path, description = "Neighborhood id")),
    request_body = UpdateNeighborhoodRequest,
    responses(
        (status = 200, description = "Neighborhood updated", body = ApiResponse<neighborhood::Model>),
        (status = 404, description = "Neighborhood not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this city", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn update_neighborhood(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateNeighborhoodRequest>,
) -> ApiResult<neighborhood::Model> {
    let neighborhood = state
        .services
        .geography
        .update_neighborhood(id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(neighborhood, "Neighborhood updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/neighborhoods/{id}",
    summary = "Delete neighborhood",
    params(("id" = Uuid, Path, description = "Neighborhood id")),
    responses(
        (status = 200, description = "Neighborhood deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Neighborhood not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Addresses still use the neighborhood", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn delete_neighborhood(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.geography.delete_neighborhood(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Neighborhood deleted")))
}
