//! Observability sinks for received events.
//!
//! Every accepted event is handed to exactly one [`EventSink`]. Recording is
//! fire-and-forget from the handler's point of view: an `Err` is logged at
//! `warn` and the acknowledgement is sent regardless.
//!
//! Implementations:
//! - [`TracingSink`]: one INFO event per payload (default)
//! - [`WriterSink`]: plain lines to stdout or any [`Write`]
//! - [`MemorySink`]: bounded ring-buffer of recent events, for embedding

use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::{Arc, Mutex as StdMutex},
};

use anyhow::anyhow;
use tokio::sync::Mutex;

use crate::{config::SinkKind, models::ReceivedEvent};

/// Fixed marker written ahead of every recorded payload.
pub const EVENT_MARKER: &str = "event received from Lambda/S3";

/// Destination for accepted events.
///
/// Called on the request path, so implementations must not block for long and
/// must be safe to call from many tasks at once.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &ReceivedEvent) -> anyhow::Result<()>;
}

/// Build the sink selected in config.
pub fn from_kind(kind: SinkKind) -> Arc<dyn EventSink> {
    match kind {
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::Stdout => Arc::new(WriterSink::stdout()),
    }
}

/// Logs each event through `tracing`, so it follows the process log format
/// and filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &ReceivedEvent) -> anyhow::Result<()> {
        tracing::info!(
            request_id = event.request_id.as_deref().unwrap_or("-"),
            received_at = %event.received_at.to_rfc3339(),
            payload = %event.payload,
            "{EVENT_MARKER}"
        );
        Ok(())
    }
}

/// Writes the marker line followed by the compact JSON payload line.
pub struct WriterSink<W> {
    writer: StdMutex<W>,
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: StdMutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> EventSink for WriterSink<W> {
    fn record(&self, event: &ReceivedEvent) -> anyhow::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("writer sink lock poisoned"))?;
        writeln!(writer, "{EVENT_MARKER}:")?;
        writeln!(writer, "{}", event.payload)?;
        writer.flush()?;
        Ok(())
    }
}

/// Fixed-capacity ring-buffer of recent [`ReceivedEvent`]s.
///
/// Once full, the oldest event is evicted to make room for the newest.
/// [`record`][EventSink::record] uses a non-blocking `try_lock`; under
/// contention the event is not stored and an error is returned instead.
pub struct MemorySink {
    capacity: usize,
    events: Mutex<VecDeque<ReceivedEvent>>,
}

impl MemorySink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Return up to `limit` recent events, newest first.
    pub async fn recent(&self, limit: usize) -> Vec<ReceivedEvent> {
        let events = self.events.lock().await;
        events.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.lock().await.is_empty()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &ReceivedEvent) -> anyhow::Result<()> {
        if self.capacity == 0 {
            return Ok(());
        }
        let mut events = self
            .events
            .try_lock()
            .map_err(|_| anyhow!("memory sink busy; event not retained"))?;
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
        Ok(())
    }
}
