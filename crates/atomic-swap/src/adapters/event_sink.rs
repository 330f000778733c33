//! Event Sink Adapters
//!
//! `RecordingEventSink` keeps events in memory; `TracingEventSink` writes one
//! structured log line per event.

use crate::events::SwapEvent;
use crate::ports::EventSink;
use parking_lot::Mutex;
use tracing::info;

/// Collects emitted events in order.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SwapEvent>>,
}

impl RecordingEventSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<SwapEvent> {
        self.events.lock().clone()
    }

    /// Drain and return recorded events.
    pub fn take(&self) -> Vec<SwapEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: SwapEvent) {
        self.events.lock().push(event);
    }
}

/// Logs events through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: SwapEvent) {
        info!(kind = event.name(), payload = ?event, "[swap] event");
    }
}
