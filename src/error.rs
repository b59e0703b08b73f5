//! Unified HTTP error type for axum request handlers.
//!
//! The receiver has a single failure mode: a request body the JSON extractor
//! cannot parse. Handlers take the extractor as `Result<Json<_>, JsonRejection>`
//! and propagate the rejection with `?`; [`AppError`] turns it into a JSON
//! error response carrying the status axum chose for the rejection.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn my_handler(
//!     body: Result<Json<Value>, JsonRejection>,
//! ) -> Result<Json<Value>, AppError> {
//!     let Json(body) = body?;
//!     Ok(Json(body))
//! }
//! ```

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors a handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body was empty, not JSON, too large, or sent without a
    /// JSON content type.
    #[error("malformed request body: {0}")]
    MalformedRequestBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::MalformedRequestBody(rejection) => {
                let status = rejection.status();
                let message = rejection.body_text();
                tracing::warn!(status = status.as_u16(), error = %message, "rejected request body");
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        extract::FromRequest,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;

    use super::*;

    async fn reject(req: Request<Body>) -> JsonRejection {
        match Json::<Value>::from_request(req, &()).await {
            Ok(_) => panic!("body unexpectedly parsed"),
            Err(rejection) => rejection,
        }
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // -----------------------------------------------------------------------
    // IntoResponse
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn syntax_error_maps_to_400_with_json_error_body() {
        let err: AppError = reject(json_request("not-json")).await.into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].is_string(), "error field missing: {json:?}");
    }

    #[tokio::test]
    async fn empty_body_maps_to_400() {
        let err: AppError = reject(json_request("")).await.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_maps_to_415() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"a":1}"#))
            .unwrap();
        let err: AppError = reject(req).await.into();
        assert_eq!(err.into_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    // -----------------------------------------------------------------------
    // Display
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn display_names_the_failure() {
        let err: AppError = reject(json_request("{")).await.into();
        let s = err.to_string();
        assert!(s.starts_with("malformed request body"), "display output: {s}");
    }
}
