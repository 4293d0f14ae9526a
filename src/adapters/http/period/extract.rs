//! Request extractors that report rejections in the `ErrorResponse` shape.
//!
//! axum's stock `Json` and `Query` extractors answer a bad body or query
//! string with a plain-text 400/415/422. These wrappers turn every such
//! rejection into `400 VALIDATION_FAILED` with a JSON body.

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::ErrorCode;

use super::dto::ErrorResponse;

/// JSON body extractor with validation-shaped rejections.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(validation_rejection("body", rejection.body_text())),
        }
    }
}

/// Query string extractor with validation-shaped rejections.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(validation_rejection("query", rejection.body_text())),
        }
    }
}

fn validation_rejection(source: &str, message: String) -> Response {
    tracing::debug!(source, "Rejected request: {}", message);
    (
        StatusCode::BAD_REQUEST,
        Json(
            ErrorResponse::new(ErrorCode::ValidationFailed, message)
                .with_details(serde_json::json!({ "field": source })),
        ),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request as HttpRequest};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        start_date: Option<String>,
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let JsonBody(payload) =
            JsonBody::<Payload>::from_request(json_request(r#"{"start_date":"2024-01-01"}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.start_date.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn wrong_json_type_is_validation_error() {
        let response =
            JsonBody::<Payload>::from_request(json_request(r#"{"start_date": 20240101}"#), &())
                .await
                .unwrap_err();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert_eq!(body["code"], "VALIDATION_FAILED");
        assert!(body["message"].as_str().unwrap().contains("start_date"));
    }

    #[tokio::test]
    async fn missing_content_type_is_validation_error() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"start_date":"2024-01-01"}"#))
            .unwrap();

        let response = JsonBody::<Payload>::from_request(request, &()).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn bad_query_value_is_validation_error() {
        #[derive(Debug, Deserialize)]
        struct Page {
            #[allow(dead_code)]
            limit: Option<u32>,
        }

        let request = HttpRequest::builder().uri("/?limit=ten").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let response = QueryParams::<Page>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["details"]["field"], "query");
    }
}
