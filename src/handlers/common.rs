use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::{errors::ServiceError, AppState, ApiResponse, ListQuery, PageRequest};

/// JSON body whose syntax errors surface as 400 `ErrorResponse`s.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ServiceError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body that is also run through its `validator` rules.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string extractor that rejects with a 400 `ErrorResponse`.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| ServiceError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameters; a malformed id is a 400 `ErrorResponse`.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| ServiceError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Standard created response
pub fn created<T>(data: T, message: &str) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::with_message(data, message)),
    )
}

/// Page window for a list query, clamped to the configured page sizes.
///
/// Pages whose row offset does not fit a signed 64-bit SQL offset are rejected.
pub fn page_request(state: &AppState, query: &ListQuery) -> Result<PageRequest, ServiceError> {
    let page = PageRequest::new(query.page(), state.page_limit(query.limit));
    match page.page.checked_mul(page.limit) {
        Some(end) if end <= i64::MAX as u64 => Ok(page),
        _ => Err(ServiceError::BadRequest(format!(
            "page {} is out of range",
            query.page
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Named {
        #[validate(length(min = 1))]
        name: String,
    }

    fn request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let err = ValidatedJson::<Named>::from_request(request("{\"name\":"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_query_string_is_a_bad_request() {
        #[derive(Debug, Deserialize)]
        struct Stars {
            min_stars: Option<i32>,
        }

        let (mut parts, _) = axum::http::Request::builder()
            .uri("/hotels?min_stars=abc")
            .body(())
            .unwrap()
            .into_parts();
        let err = ApiQuery::<Stars>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let (mut parts, _) = axum::http::Request::builder()
            .uri("/hotels?min_stars=4")
            .body(())
            .unwrap()
            .into_parts();
        let ApiQuery(stars) = ApiQuery::<Stars>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(stars.min_stars, Some(4));
    }

    #[tokio::test]
    async fn validation_rules_run_after_parsing() {
        let err = ValidatedJson::<Named>::from_request(request(r#"{"name":""}"#), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ServiceError::ValidationError(_)));

        let ValidatedJson(ok) = ValidatedJson::<Named>::from_request(request(r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(ok.name, "x");
    }
}
