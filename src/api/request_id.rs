//! Request ID middleware.
//!
//! Every inbound request is tagged with an `x-request-id`:
//!
//! - Taken from the caller when present, non-empty and at most
//!   [`MAX_REQUEST_ID_LEN`] bytes (Lambda relays can forward their own ID)
//! - Generated as a UUID v4 otherwise
//! - Stored as an axum [`Extension`](axum::Extension) for handlers
//! - Echoed back in the `x-request-id` response header
//! - Attached to a [`tracing`] span covering the handler
//!
//! The same ID ends up on the recorded event, so a sender can match its
//! delivery to the receiver's log line.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument as _;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longer caller-supplied IDs are replaced with a fresh one.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// The ID assigned to the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Axum middleware that assigns a [`RequestId`] to every request.
///
/// Apply it inside `tower_http::trace::TraceLayer` so its span nests under
/// the HTTP span.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", id = %id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    use super::*;

    fn echo_app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(id): Extension<RequestId>| async move { id.0 }),
            )
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn call(req: Request<Body>) -> (StatusCode, Option<String>, String) {
        let resp = echo_app().oneshot(req).await.unwrap();
        let status = resp.status();
        let header = resp
            .headers()
            .get(&REQUEST_ID_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, header, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn caller_supplied_id_is_kept_and_echoed() {
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "lambda-abc-123")
            .body(Body::empty())
            .unwrap();

        let (status, header, body) = call(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header.as_deref(), Some("lambda-abc-123"));
        assert_eq!(body, "lambda-abc-123");
    }

    #[tokio::test]
    async fn missing_id_is_generated_as_uuid() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (_, header, body) = call(req).await;
        let header = header.expect("response must carry x-request-id");
        assert!(Uuid::parse_str(&header).is_ok(), "not a uuid: {header}");
        assert_eq!(header, body);
    }

    #[tokio::test]
    async fn oversized_id_is_replaced() {
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", long.as_str())
            .body(Body::empty())
            .unwrap();

        let (_, header, _) = call(req).await;
        let header = header.unwrap();
        assert_ne!(header, long);
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[tokio::test]
    async fn blank_id_is_replaced() {
        let req = Request::builder()
            .uri("/")
            .header("x-request-id", "   ")
            .body(Body::empty())
            .unwrap();

        let (_, header, _) = call(req).await;
        assert!(Uuid::parse_str(&header.unwrap()).is_ok());
    }
}
