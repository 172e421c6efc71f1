//! Destinations, accommodation types, hotel groups and parking options.
//!
//! Deletes accept `?force=true`, which clears the reference on every hotel
//! card instead of refusing with 409.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::{accommodation_type, destination, hotel_group, parking_option},
    errors::ServiceError,
    services::{
        references::{
            CreateAccommodationTypeRequest, CreateDestinationRequest, CreateHotelGroupRequest,
            CreateParkingOptionRequest, DestinationFilter, UpdateAccommodationTypeRequest,
            UpdateDestinationRequest, UpdateHotelGroupRequest, UpdateParkingOptionRequest,
        },
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ForceQuery, ListQuery, PaginatedResponse,
};

// ----- destinations -----

#[utoipa::path(
    get,
    path = "/api/v1/destinations",
    summary = "List destinations",
    params(ListQuery, DestinationFilter),
    responses(
        (status = 200, description = "Destinations retrieved", body = ApiResponse<PaginatedResponse<destination::Model>>),
    ),
    tag = "references"
)]
pub async fn list_destinations(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
    ApiQuery(filter): ApiQuery<DestinationFilter>,
) -> ApiResult<PaginatedResponse<destination::Model>> {
    let page = page_request(&state, &query)?;
    let destinations = state
        .services
        .references
        .list_destinations(&filter, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(destinations)))
}

#[utoipa::path(
    get,
    path = "/api/v1/destinations/{id}",
    summary = "Get destination",
    params(("id" = Uuid, Path, description = "Destination id")),
    responses(
        (status = 200, description = "Destination retrieved", body = ApiResponse<destination::Model>),
        (status = 404, description = "Destination not found", body = crate::errors::ErrorResponse),
    ),
    tag = "references"
)]
pub async fn get_destination(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<destination::Model> {
    let destination = state.services.references.get_destination(id).await?;
    Ok(Json(ApiResponse::success(destination)))
}

#[utoipa::path(
    post,
    path = "/api/v1/destinations",
    summary = "Create destination",
    request_body = CreateDestinationRequest,
    responses(
        (status = 201, description = "Destination created", body = ApiResponse<destination::Model>),
        (status = 400, description = "Invalid data or unknown city", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this city", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn create_destination(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDestinationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<destination::Model>>), ServiceError> {
    let destination = state.services.references.create_destination(payload).await?;
    Ok(created(destination, "Destination created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/destinations/{id}",
    summary = "Update destination",
    params(("id" = Uuid, Path, description = "Destination id")),
    request_body = UpdateDestinationRequest,
    responses(
        (status = 200, description = "Destination updated", body = ApiResponse<destination::Model>),
        (status = 404, description = "Destination not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already used in this city", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn update_destination(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDestinationRequest>,
) -> ApiResult<destination::Model> {
    let destination = state
        .services
        .references
        .update_destination(id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(destination, "Destination updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/destinations/{id}",
    summary = "Delete destination",
    params(("id" = Uuid, Path, description = "Destination id"), ForceQuery),
    responses(
        (status = 200, description = "Destination deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Destination not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotels reference the destination and force was not set", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn delete_destination(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(force): ApiQuery<ForceQuery>,
) -> ApiResult<DeleteSummary> {
    let summary = state
        .services
        .references
        .delete_destination(id, force.force)
        .await?;
    Ok(Json(ApiResponse::with_message(summary, "Destination deleted")))
}

// ----- accommodation types -----

#[utoipa::path(
    get,
    path = "/api/v1/accommodation-types",
    summary = "List accommodation types",
    params(ListQuery),
    responses(
        (status = 200, description = "Accommodation types retrieved", body = ApiResponse<PaginatedResponse<accommodation_type::Model>>),
    ),
    tag = "references"
)]
pub async fn list_accommodation_types(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<accommodation_type::Model>> {
    let page = page_request(&state, &query)?;
    let types = state
        .services
        .references
        .list_accommodation_types(&query, page)
        .await?;
    Ok(Json(ApiResponse::success(types)))
}

#[utoipa::path(
    get,
    path = "/api/v1/accommodation-types/{id}",
    summary = "Get accommodation type",
    params(("id" = Uuid, Path, description = "Accommodation type id")),
    responses(
        (status = 200, description = "Accommodation type retrieved", body = ApiResponse<accommodation_type::Model>),
        (status = 404, description = "Accommodation type not found", body = crate::errors::ErrorResponse),
    ),
    tag = "references"
)]
pub async fn get_accommodation_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<accommodation_type::Model> {
    let accommodation_type = state.services.references.get_accommodation_type(id).await?;
    Ok(Json(ApiResponse::success(accommodation_type)))
}

#[utoipa::path(
    post,
    path = "/api/v1/accommodation-types",
    summary = "Create accommodation type",
    request_body = CreateAccommodationTypeRequest,
    responses(
        (status = 201, description = "Accommodation type created", body = ApiResponse<accommodation_type::Model>),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn create_accommodation_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccommodationTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<accommodation_type::Model>>), ServiceError> {
    let accommodation_type = state
        .services
        .references
        .create_accommodation_type(payload)
        .await?;
    Ok(created(accommodation_type, "Accommodation type created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/accommodation-types/{id}",
    summary = "Update accommodation type",
    params(("id" = Uuid, Path, description = "Accommodation type id")),
    request_body = UpdateAccommodationTypeRequest,
    responses(
        (status = 200, description = "Accommodation type updated", body = ApiResponse<accommodation_type::Model>),
        (status = 404, description = "Accommodation type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn update_accommodation_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateAccommodationTypeRequest>,
) -> ApiResult<accommodation_type::Model> {
    let accommodation_type = state
        .services
        .references
        .update_accommodation_type(id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(
        accommodation_type,
        "Accommodation type updated",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/accommodation-types/{id}",
    summary = "Delete accommodation type",
    params(("id" = Uuid, Path, description = "Accommodation type id"), ForceQuery),
    responses(
        (status = 200, description = "Accommodation type deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Accommodation type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotels reference the type and force was not set", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn delete_accommodation_type(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(force): ApiQuery<ForceQuery>,
) -> ApiResult<DeleteSummary> {
    let summary = state
        .services
        .references
        .delete_accommodation_type(id, force.force)
        .await?;
    Ok(Json(ApiResponse::with_message(summary, "Accommodation type deleted")))
}

// ----- hotel groups -----

#[utoipa::path(
    get,
    path = "/api/v1/hotel-groups",
    summary = "List hotel groups",
    params(ListQuery),
    responses(
        (status = 200, description = "Hotel groups retrieved", body = ApiResponse<PaginatedResponse<hotel_group::Model>>),
    ),
    tag = "references"
)]
pub async fn list_hotel_groups(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<hotel_group::Model>> {
    let page = page_request(&state, &query)?;
    let groups = state.services.references.list_hotel_groups(&query, page).await?;
    Ok(Json(ApiResponse::success(groups)))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotel-groups/{id}",
    summary = "Get hotel group",
    params(("id" = Uuid, Path, description = "Hotel group id")),
    responses(
        (status = 200, description = "Hotel group retrieved", body = ApiResponse<hotel_group::Model>),
        (status = 404, description = "Hotel group not found", body = crate::errors::ErrorResponse),
    ),
    tag = "references"
)]
pub async fn get_hotel_group(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<hotel_group::Model> {
    let group = state.services.references.get_hotel_group(id).await?;
    Ok(Json(ApiResponse::success(group)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hotel-groups",
    summary = "Create hotel group",
    request_body = CreateHotelGroupRequest,
    responses(
        (status = 201, description = "Hotel group created", body = ApiResponse<hotel_group::Model>),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn create_hotel_group(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateHotelGroupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<hotel_group::Model>>), ServiceError> {
    let group = state.services.references.create_hotel_group(payload).await?;
    Ok(created(group, "Hotel group created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/hotel-groups/{id}",
    summary = "Update hotel group",
    params(("id" = Uuid, Path, description = "Hotel group id")),
    request_body = UpdateHotelGroupRequest,
    responses(
        (status = 200, description = "Hotel group updated", body = ApiResponse<hotel_group::Model>),
        (status = 404, description = "Hotel group not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn update_hotel_group(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHotelGroupRequest>,
) -> ApiResult<hotel_group::Model> {
    let group = state
        .services
        .references
        .update_hotel_group(id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(group, "Hotel group updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hotel-groups/{id}",
    summary = "Delete hotel group",
    params(("id" = Uuid, Path, description = "Hotel group id"), ForceQuery),
    responses(
        (status = 200, description = "Hotel group deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Hotel group not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotels belong to the group and force was not set", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn delete_hotel_group(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(force): ApiQuery<ForceQuery>,
) -> ApiResult<DeleteSummary> {
    let summary = state
        .services
        .references
        .delete_hotel_group(id, force.force)
        .await?;
    Ok(Json(ApiResponse::with_message(summary, "Hotel group deleted")))
}

// ----- parking options -----

#[utoipa::path(
    get,
    path = "/api/v1/parking-options",
    summary = "List parking options",
    params(ListQuery),
    responses(
        (status = 200, description = "Parking options retrieved", body = ApiResponse<PaginatedResponse<parking_option::Model>>),
    ),
    tag = "references"
)]
pub async fn list_parking_options(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<parking_option::Model>> {
    let page = page_request(&state, &query)?;
    let options = state
        .services
        .references
        .list_parking_options(&query, page)
        .await?;
    Ok(Json(ApiResponse::success(options)))
}

#[utoipa::path(
    get,
    path = "/api/v1/parking-options/{id}",
    summary = "Get parking option",
    params(("id" = Uuid, Path, description = "Parking option id")),
    responses(
        (status = 200, description = "Parking option retrieved", body = ApiResponse<parking_option::Model>),
        (status = 404, description = "Parking option not found", body = crate::errors::ErrorResponse),
    ),
    tag = "references"
)]
pub async fn get_parking_option(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<parking_option::Model> {
    let option = state.services.references.get_parking_option(id).await?;
    Ok(Json(ApiResponse::success(option)))
}

#[utoipa::path(
    post,
    path = "/api/v1/parking-options",
    summary = "Create parking option",
    request_body = CreateParkingOptionRequest,
    responses(
        (status = 201, description = "Parking option created", body = ApiResponse<parking_option::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn create_parking_option(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateParkingOptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<parking_option::Model>>), ServiceError> {
    let option = state
        .services
        .references
        .create_parking_option(payload)
        .await?;
    Ok(created(option, "Parking option created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/parking-options/{id}",
    summary = "Update parking option",
    params(("id" = Uuid, Path, description = "Parking option id")),
    request_body = UpdateParkingOptionRequest,
    responses(
        (status = 200, description = "Parking option updated", body = ApiResponse<parking_option::Model>),
        (status = 404, description = "Parking option not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn update_parking_option(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateParkingOptionRequest>,
) -> ApiResult<parking_option::Model> {
    let option = state
        .services
        .references
        .update_parking_option(id, payload)
        .await?;
    Ok(Json(ApiResponse::with_message(option, "Parking option updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/parking-options/{id}",
    summary = "Delete parking option",
    params(("id" = Uuid, Path, description = "Parking option id"), ForceQuery),
    responses(
        (status = 200, description = "Parking option deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Parking option not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotels use the option and force was not set", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "references"
)]
pub async fn delete_parking_option(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(force): ApiQuery<ForceQuery>,
) -> ApiResult<DeleteSummary> {
    let summary = state
        .services
        .references
        .delete_parking_option(id, force.force)
        .await?;
    Ok(Json(ApiResponse::with_message(summary, "Parking option deleted")))
}
