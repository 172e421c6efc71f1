use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, JsonBody, ValidatedJson};
use crate::{
    entities::hotel_feature::{self, FeatureKind},
    errors::ServiceError,
    services::{
        hotels::{
            CreateHotelRequest, HotelCardDetail, HotelCardSummary, HotelFilter,
            UpdateHotelRequest,
        },
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

/// Body of `PUT /hotels/{id}/features/{kind}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceFeaturesRequest {
    pub feature_ids: Vec<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    summary = "List hotel cards",
    description = "Filter by location, references, stars, price or amenity. sort_by accepts name, price, stars or created_at.",
    params(ListQuery, HotelFilter),
    responses(
        (status = 200, description = "Hotel cards retrieved", body = ApiResponse<PaginatedResponse<HotelCardSummary>>),
        (status = 400, description = "Invalid filter or sort", body = crate::errors::ErrorResponse),
    ),
    tag = "hotels"
)]
pub async fn list_hotels(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
    ApiQuery(filter): ApiQuery<HotelFilter>,
) -> ApiResult<PaginatedResponse<HotelCardSummary>> {
    let page = page_request(&state, &query)?;
    let hotels = state
        .services
        .hotels
        .list_hotels(&filter, &query, page)
        .await?;
    Ok(Json(ApiResponse::success(hotels)))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    summary = "Get hotel detail",
    description = "Card with its references, grouped features, details, policies, rooms and rating",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel retrieved", body = ApiResponse<HotelCardDetail>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotels"
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<HotelCardDetail> {
    let hotel = state.services.hotels.get_hotel(id).await?;
    Ok(Json(ApiResponse::success(hotel)))
}

#[utoipa::path(
    get,
    path = "/api/v1/hotels/by-slug/{slug}",
    summary = "Get hotel detail by slug",
    params(("slug" = String, Path, description = "URL slug, e.g. grand-hotel-paris")),
    responses(
        (status = 200, description = "Hotel retrieved", body = ApiResponse<HotelCardDetail>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    tag = "hotels"
)]
pub async fn get_hotel_by_slug(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<HotelCardDetail> {
    let hotel = state.services.hotels.get_hotel_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(hotel)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    summary = "Create hotel card",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = ApiResponse<HotelCardDetail>),
        (status = 400, description = "Invalid data or unknown reference", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotels"
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateHotelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HotelCardDetail>>), ServiceError> {
    let hotel = state.services.hotels.create_hotel(payload).await?;
    Ok(created(hotel, "Hotel created"))
}

#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}",
    summary = "Update hotel card",
    description = "Absent fields are kept; null clears an optional field; a feature id list replaces that kind's set",
    params(("id" = Uuid, Path, description = "Hotel id")),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = ApiResponse<HotelCardDetail>),
        (status = 400, description = "Invalid data or unknown reference", body = crate::errors::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slug already taken", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotels"
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateHotelRequest>,
) -> ApiResult<HotelCardDetail> {
    let hotel = state.services.hotels.update_hotel(id, payload).await?;
    Ok(Json(ApiResponse::with_message(hotel, "Hotel updated")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/hotels/{id}",
    summary = "Delete hotel card",
    description = "Also removes the hotel's reviews, policies, rooms, details and feature links",
    params(("id" = Uuid, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel deleted", body = ApiResponse<DeleteSummary>),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotels"
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.hotels.delete_hotel(id).await?;
    Ok(Json(ApiResponse::with_message(summary, "Hotel deleted")))
}

#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}/features/{kind}",
    summary = "Replace one kind of hotel features",
    params(
        ("id" = Uuid, Path, description = "Hotel id"),
        ("kind" = String, Path, description = "amenities, labels, highlights or accessibility-options"),
    ),
    request_body = ReplaceFeaturesRequest,
    responses(
        (status = 200, description = "New feature set", body = ApiResponse<Vec<hotel_feature::Model>>),
        (status = 400, description = "Unknown kind, missing feature or feature of another kind", body = crate::errors::ErrorResponse),
        (status = 404, description = "Hotel not found", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "hotels"
)]
pub async fn replace_hotel_features(
    State(state): State<AppState>,
    ApiPath((id, kind)): ApiPath<(Uuid, String)>,
    JsonBody(payload): JsonBody<ReplaceFeaturesRequest>,
) -> ApiResult<Vec<hotel_feature::Model>> {
    let kind = FeatureKind::from_route_segment(&kind).ok_or_else(|| {
        ServiceError::BadRequest(format!(
            "Unknown feature kind '{kind}'; expected amenities, labels, highlights or accessibility-options"
        ))
    })?;
    let features = state
        .services
        .hotels
        .replace_features(id, kind, payload.feature_ids)
        .await?;
    Ok(Json(ApiResponse::with_message(
        features,
        format!("{} set replaced", kind.label()),
    )))
}
