//! Amenities, labels, highlights and accessibility options.
//!
//! The four kinds share one table and one service; each kind gets its own
//! mount so the API reads like four independent collections.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::common::{created, page_request, ApiPath, ApiQuery, JsonBody, ValidatedJson};
use crate::{
    entities::hotel_feature::{self, FeatureKind},
    errors::ServiceError,
    services::{
        features::{CreateFeatureRequest, UpdateFeatureRequest},
        DeleteSummary,
    },
    ApiResponse, ApiResult, AppState, ForceQuery, ListQuery, PaginatedResponse,
};

type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>), ServiceError>;

async fn list(
    state: AppState,
    kind: FeatureKind,
    query: ListQuery,
) -> ApiResult<PaginatedResponse<hotel_feature::Model>> {
    let page = page_request(&state, &query)?;
    let features = state.services.features.list(kind, &query, page).await?;
    Ok(Json(ApiResponse::success(features)))
}

async fn get(state: AppState, kind: FeatureKind, id: Uuid) -> ApiResult<hotel_feature::Model> {
    let feature = state.services.features.get(kind, id).await?;
    Ok(Json(ApiResponse::success(feature)))
}

async fn create(
    state: AppState,
    kind: FeatureKind,
    payload: CreateFeatureRequest,
) -> Created<hotel_feature::Model> {
    let feature = state.services.features.create(kind, payload).await?;
    Ok(created(feature, &format!("{} created", kind.label())))
}

async fn bulk_create(
    state: AppState,
    kind: FeatureKind,
    payload: Vec<CreateFeatureRequest>,
) -> Created<Vec<hotel_feature::Model>> {
    let features = state.services.features.bulk_create(kind, payload).await?;
    let message = format!("{} {} items created", features.len(), kind.label());
    Ok(created(features, &message))
}

async fn update(
    state: AppState,
    kind: FeatureKind,
    id: Uuid,
    payload: UpdateFeatureRequest,
) -> ApiResult<hotel_feature::Model> {
    let feature = state.services.features.update(kind, id, payload).await?;
    Ok(Json(ApiResponse::with_message(
        feature,
        format!("{} updated", kind.label()),
    )))
}

async fn delete(
    state: AppState,
    kind: FeatureKind,
    id: Uuid,
    force: bool,
) -> ApiResult<DeleteSummary> {
    let summary = state.services.features.delete(kind, id, force).await?;
    Ok(Json(ApiResponse::with_message(
        summary,
        format!("{} deleted", kind.label()),
    )))
}

macro_rules! feature_handlers {
    (
        kind: $kind:expr,
        collection: $collection:literal,
        item: $item:literal,
        bulk: $bulk_path:literal,
        handlers: ($list:ident, $get:ident, $create:ident, $bulk:ident, $update:ident, $delete:ident)
    ) => {
        #[utoipa::path(
            get,
            path = $collection,
            params(ListQuery),
            responses(
                (status = 200, description = "Page of features", body = ApiResponse<PaginatedResponse<hotel_feature::Model>>),
                (status = 400, description = "Invalid query parameters", body = crate::errors::ErrorResponse),
            ),
            tag = "features"
        )]
        pub async fn $list(
            State(state): State<AppState>,
            ApiQuery(query): ApiQuery<ListQuery>,
        ) -> ApiResult<PaginatedResponse<hotel_feature::Model>> {
            list(state, $kind, query).await
        }

        #[utoipa::path(
            get,
            path = $item,
            params(("id" = Uuid, Path, description = "Feature id")),
            responses(
                (status = 200, description = "Feature retrieved", body = ApiResponse<hotel_feature::Model>),
                (status = 404, description = "No feature of this kind with that id", body = crate::errors::ErrorResponse),
            ),
            tag = "features"
        )]
        pub async fn $get(
            State(state): State<AppState>,
            ApiPath(id): ApiPath<Uuid>,
        ) -> ApiResult<hotel_feature::Model> {
            get(state, $kind, id).await
        }

        #[utoipa::path(
            post,
            path = $collection,
            request_body = CreateFeatureRequest,
            responses(
                (status = 201, description = "Feature created", body = ApiResponse<hotel_feature::Model>),
                (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
                (status = 409, description = "Name already taken for this kind", body = crate::errors::ErrorResponse),
            ),
            security(("Bearer" = [])),
            tag = "features"
        )]
        pub async fn $create(
            State(state): State<AppState>,
            ValidatedJson(payload): ValidatedJson<CreateFeatureRequest>,
        ) -> Created<hotel_feature::Model> {
            create(state, $kind, payload).await
        }

        #[utoipa::path(
            post,
            path = $bulk_path,
            request_body = Vec<CreateFeatureRequest>,
            responses(
                (status = 201, description = "All items created", body = ApiResponse<Vec<hotel_feature::Model>>),
                (status = 400, description = "Empty, oversized or invalid payload", body = crate::errors::ErrorResponse),
                (status = 409, description = "A name is repeated or already taken; nothing was created", body = crate::errors::ErrorResponse),
            ),
            security(("Bearer" = [])),
            tag = "features"
        )]
        pub async fn $bulk(
            State(state): State<AppState>,
            JsonBody(payload): JsonBody<Vec<CreateFeatureRequest>>,
        ) -> Created<Vec<hotel_feature::Model>> {
            bulk_create(state, $kind, payload).await
        }

        #[utoipa::path(
            put,
            path = $item,
            params(("id" = Uuid, Path, description = "Feature id")),
            request_body = UpdateFeatureRequest,
            responses(
                (status = 200, description = "Feature updated", body = ApiResponse<hotel_feature::Model>),
                (status = 404, description = "No feature of this kind with that id", body = crate::errors::ErrorResponse),
                (status = 409, description = "Name already taken for this kind", body = crate::errors::ErrorResponse),
            ),
            security(("Bearer" = [])),
            tag = "features"
        )]
        pub async fn $update(
            State(state): State<AppState>,
            ApiPath(id): ApiPath<Uuid>,
            ValidatedJson(payload): ValidatedJson<UpdateFeatureRequest>,
        ) -> ApiResult<hotel_feature::Model> {
            update(state, $kind, id, payload).await
        }

        #[utoipa::path(
            delete,
            path = $item,
            params(("id" = Uuid, Path, description = "Feature id"), ForceQuery),
            responses(
                (status = 200, description = "Feature deleted", body = ApiResponse<DeleteSummary>),
                (status = 404, description = "No feature of this kind with that id", body = crate::errors::ErrorResponse),
                (status = 409, description = "Hotels are linked and force was not set", body = crate::errors::ErrorResponse),
            ),
            security(("Bearer" = [])),
            tag = "features"
        )]
        pub async fn $delete(
            State(state): State<AppState>,
            ApiPath(id): ApiPath<Uuid>,
            ApiQuery(force): ApiQuery<ForceQuery>,
        ) -> ApiResult<DeleteSummary> {
            delete(state, $kind, id, force.force).await
        }
    };
}

feature_handlers! {
    kind: FeatureKind::Amenity,
    collection: "/api/v1/amenities",
    item: "/api/v1/amenities/{id}",
    bulk: "/api/v1/amenities/bulk",
    handlers: (
        list_amenities,
        get_amenity,
        create_amenity,
        bulk_create_amenities,
        update_amenity,
        delete_amenity
    )
}

feature_handlers! {
    kind: FeatureKind::Label,
    collection: "/api/v1/labels",
    item: "/api/v1/labels/{id}",
    bulk: "/api/v1/labels/bulk",
    handlers: (list_labels, get_label, create_label, bulk_create_labels, update_label, delete_label)
}

feature_handlers! {
    kind: FeatureKind::Highlight,
    collection: "/api/v1/highlights",
    item: "/api/v1/highlights/{id}",
    bulk: "/api/v1/highlights/bulk",
    handlers: (
        list_highlights,
        get_highlight,
        create_highlight,
        bulk_create_highlights,
        update_highlight,
        delete_highlight
    )
}

feature_handlers! {
    kind: FeatureKind::Accessibility,
    collection: "/api/v1/accessibility-options",
    item: "/api/v1/accessibility-options/{id}",
    bulk: "/api/v1/accessibility-options/bulk",
    handlers: (
        list_accessibility_options,
        get_accessibility_option,
        create_accessibility_option,
        bulk_create_accessibility_options,
        update_accessibility_option,
        delete_accessibility_option
    )
}
