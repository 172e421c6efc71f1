//! Reviews, policies, rooms and operational details of a hotel card.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, ValidatedJson};
use crate::{
    entities::{hotel_details, hotel_policy, hotel_review, hotel_room},
    errors::ServiceError,
    services::{
        content::{
            CreatePolicyRequest, CreateReviewRequest, CreateRoomRequest, RatingSummary,
            UpdatePolicyRequest, UpdateRoomRequest, UpsertDetailsRequest,
        },
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServiceError>;

// Reviews

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/reviews",
    summary = "List hotel reviews",
    description = "Newest first by default; sort_by accepts created_at or rating",
    params(("id" = Uuid, Path, description = "Hotel id"), ListQuery),
    responses(
        (status = 200, description = "Reviews retrieved", body = ApiResponse<PaginatedResponse<hotel_review::Model>>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotel content"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<PaginatedResponse<hotel_review::Model>> {
    let page = page_request(&state, &query)?;
    let reviews = state.services.content.list_reviews(id, &query, page).await?;
    Ok(Json(ApiResponse::success(reviews)))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/rating",
    summary = "Hotel rating summary",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Average rating and review count", body = ApiResponse<RatingSummary>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotel content"
)]
pub async fn get_rating_summary(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<RatingSummary> {
    let summary = state.services.content.rating_summary(id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/reviews",
    summary = "Add a review",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<hotel_review::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn create_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> Created<hotel_review::Model> {
    let review = state.services.content.create_review(id, payload).await?;
    Ok(created(review, "Review created"))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    summary = "Delete a review",
    params(("id" = Uuid, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Review not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.content.delete_review(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Review deleted")))
}

// Policies

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/policies",
    summary = "List hotel policies",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Policies retrieved", body = ApiResponse<Vec<hotel_policy::Model>>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotel content"
)]
pub async fn list_policies(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Vec<hotel_policy::Model>> {
    let policies = state.services.content.list_policies(id).await?;
    Ok(Json(ApiResponse::success(policies)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/policies",
    summary = "Add a policy",
    description = "Only one policy per kind, except `other`",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = CreatePolicyRequest,
    responses(
        (status = 201, description = "Policy created", body = ApiResponse<hotel_policy::Model>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotel already has a policy of this kind", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn create_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreatePolicyRequest>,
) -> Created<hotel_policy::Model> {
    let policy = state.services.content.create_policy(id, payload).await?;
    Ok(created(policy, "Policy created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/policies/{id}",
    summary = "Update a policy",
    params(("id" = Uuid, Path, description = "Policy id")),
    request_body = UpdatePolicyRequest,
    responses(
        (status = 200, description = "Policy updated", body = ApiResponse<hotel_policy::Model>),
        (status = 404, description = "Policy not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Hotel already has a policy of this kind", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn update_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePolicyRequest>,
) -> ApiResult<hotel_policy::Model> {
    let policy = state.services.content.update_policy(id, payload).await?;
    Ok(Json(ApiResponse::with_message(policy, "Policy updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/policies/{id}",
    summary = "Delete a policy",
    params(("id" = Uuid, Path, description = "Policy id")),
    responses(
        (status = 200, description = "Policy deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Policy not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn delete_policy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.content.delete_policy(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Policy deleted")))
}

// Rooms

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/rooms",
    summary = "List hotel rooms",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Rooms retrieved, cheapest first", body = ApiResponse<Vec<hotel_room::Model>>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotel content"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Vec<hotel_room::Model>> {
    let rooms = state.services.content.list_rooms(id).await?;
    Ok(Json(ApiResponse::success(rooms)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hotels/{id}/rooms",
    summary = "Add a room type",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<hotel_room::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Room name already used in this hotel", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn create_room(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateRoomRequest>,
) -> Created<hotel_room::Model> {
    let room = state.services.content.create_room(id, payload).await?;
    Ok(created(room, "Room created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    summary = "Update a room type",
    params(("id" = Uuid, Path, description = "Room id")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<hotel_room::Model>),
        (status = 404, description = "Room not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Room name already used in this hotel", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn update_room(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRoomRequest>,
) -> ApiResult<hotel_room::Model> {
    let room = state.services.content.update_room(id, payload).await?;
    Ok(Json(ApiResponse::with_message(room, "Room updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    summary = "Delete a room type",
    params(("id" = Uuid, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Room not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.content.delete_room(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Room deleted")))
}

// Details

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/details",
    summary = "Get hotel details",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Details retrieved", body = ApiResponse<hotel_details::Model>),
        (status = 404, description = "Hotel not found or details not set", body = crate::errors::ErrorResponse),
    ),
    tag = "hotel content"
)]
pub async fn get_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<hotel_details::Model> {
    let details = state.services.content.get_details(id).await?;
    Ok(Json(ApiResponse::success(details)))
}

#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}/details",
    summary = "Create or replace hotel details",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = UpsertDetailsRequest,
    responses(
        (status = 200, description = "Details replaced", body = ApiResponse<hotel_details::Model>),
        (status = 201, description = "Details created", body = ApiResponse<hotel_details::Model>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotel content"
)]
pub async fn upsert_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpsertDetailsRequest>,
) -> Created<hotel_details::Model> {
    let (details, was_created) = state.services.content.upsert_details(id, payload).await?;
    if was_created {
        Ok(created(details, "Hotel details created"))
    } else {
        Ok((
            StatusCode::OK,
            Json(ApiResponse::with_message(details, "Hotel details updated")),
        ))
    }
}
