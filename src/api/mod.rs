//! HTTP surface: route table plus the per-request middleware.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod events;
pub mod health;
pub mod request_id;

/// Build the route table. Middleware is applied by [`crate::app`].
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/s3-event", post(events::receive_event))
        .with_state(state)
}
