//! Wire types for the two endpoints and the record handed to event sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

/// Body of a successful `POST /s3-event`: the payload echoed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ack {
    pub status: String,
    pub data: Value,
}

impl Ack {
    pub fn received(data: Value) -> Self {
        Self {
            status: "received".into(),
            data,
        }
    }
}

/// An accepted event as seen by an [`EventSink`](crate::sink::EventSink).
///
/// The payload is opaque; no S3 notification schema is assumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceivedEvent {
    /// `x-request-id` of the request that delivered the event, when known.
    pub request_id: Option<String>,
    pub received_at: DateTime<Utc>,
    pub payload: Value,
}

impl ReceivedEvent {
    pub fn new(request_id: Option<String>, payload: Value) -> Self {
        Self {
            request_id,
            received_at: Utc::now(),
            payload,
        }
    }
}
