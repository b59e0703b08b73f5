//! Event ingestion endpoint (`POST /s3-event`).
//!
//! Deliberately permissive: any JSON value is accepted and echoed back. The
//! body is never checked against the S3 notification schema, so the endpoint
//! also works for test pings and for payloads reshaped by a relay Lambda.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde_json::Value;
use tracing::warn;

use crate::{
    api::request_id::RequestId,
    error::AppError,
    models::{Ack, ReceivedEvent},
    state::AppState,
};

/// `POST /s3-event`: record the payload and acknowledge it.
///
/// Body parse failures propagate as [`AppError::MalformedRequestBody`]. A
/// failing sink is logged and otherwise ignored; it never changes the
/// response.
pub async fn receive_event(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Ack>, AppError> {
    let Json(payload) = body?;

    let event = ReceivedEvent::new(request_id.map(|Extension(id)| id.0), payload);
    if let Err(e) = state.sink.record(&event) {
        warn!(error = %e, "event sink failed; acknowledging anyway");
    }

    Ok(Json(Ack::received(event.payload)))
}
