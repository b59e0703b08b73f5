//! Minimal webhook receiver for S3/Lambda event notifications.
//!
//! Two routes:
//! - `GET /health`: liveness probe, always `{"status": "ok"}`
//! - `POST /s3-event`: records any JSON body to an [`EventSink`](sink::EventSink)
//!   and echoes it back as `{"status": "received", "data": <body>}`
//!
//! [`app`] assembles the full service (routes plus middleware); the binary
//! only adds tracing setup, the listener and signal handling.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

pub mod api;
pub mod config;
pub mod error;
pub mod healthcheck;
pub mod models;
pub mod sink;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

/// Build the complete HTTP service for `state`.
///
/// Layer order, outermost first: HTTP trace span, request timeout, request ID,
/// body size limit.
pub fn app(state: Arc<AppState>) -> Router {
    let server = &state.config.server;
    let body_limit = server.max_body_bytes;
    let timeout = server.request_timeout();

    api::router(Arc::clone(&state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(api::request_id::request_id_middleware))
        .layer(TimeoutLayer::new(timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
}
