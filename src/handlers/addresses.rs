use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::address,
    errors::ServiceError,
    services::{
        geography::{AddressFilter, CreateAddressRequest, UpdateAddressRequest},
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/addresses",
    summary = "List addresses",
    params(ListQuery, AddressFilter),
    responses(
        (status = 200, description = "Addresses retrieved", body = ApiResponse<PaginatedResponse<address::Model>>),
    ),
    tag = "geography"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
    ApiQuery(filter): ApiQuery<AddressFilter>,
) -> ApiResult<PaginatedResponse<address::Model>> {
    let page = page_request(&state, &query)?;
    let addresses = state
        .services
        .geography
        .list_addresses(&filter, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(addresses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/addresses/{id}",
    summary = "Get address",
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address retrieved", body = ApiResponse<address::Model>),
        (status = 404, description = "Address not found", body = crate::errors::ErrorResponse),
    ),
    tag = "geography"
)]
pub async fn get_address(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<address::Model> {
    let address = state.services.geography.get_address(id).await?;
    Ok(Json(ApiResponse::success(address)))
}

#[utoipa::path(
    post,
    path = "/api/v1/addresses",
    summary = "Create address",
    request_body = CreateAddressRequest,
    responses(
        (status = 201, description = "Address created", body = ApiResponse<address::Model>),
        (status = 400, description = "Invalid data, unknown city, or neighborhood outside the city", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn create_address(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAddressRequest>,
) -> Result<(StatusCode, Json<ApiResponse<address::Model>>), ServiceError> {
    let address = state.services.geography.create_address(payload).await?;
    Ok(created(address, "Address created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/addresses/{id}",
    summary = "Update address",
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<address::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Address not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn update_address(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAddressRequest>,
) -> ApiResult<address::Model> {
    let address = state.services.geography.update_address(id, payload).await?;
    Ok(Json(ApiResponse::with_message(address, "Address updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/addresses/{id}",
    summary = "Delete address",
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Address not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotels still use the address", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "geography"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.geography.delete_address(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Address deleted")))
}
