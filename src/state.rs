//! Shared, read-only state handed to every handler.

use std::sync::Arc;

use crate::{config::Config, sink::EventSink};

/// Everything a request needs beyond its own body.
///
/// Built once at startup and shared as `Arc<AppState>`; nothing in it is
/// mutated after construction.
pub struct AppState {
    pub config: Arc<Config>,
    pub sink: Arc<dyn EventSink>,
}

impl AppState {
    pub fn new(config: Arc<Config>, sink: Arc<dyn EventSink>) -> Self {
        Self { config, sink }
    }

    /// Build state with the sink selected by `config.sink.kind`.
    pub fn from_config(config: Arc<Config>) -> Self {
        let sink = crate::sink::from_kind(config.sink.kind);
        Self::new(config, sink)
    }
}
