//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound port traits.

mod clock;
mod event_sink;
mod ledger;
mod memory_store;

pub use clock::ManualClock;
pub use event_sink::{RecordingEventSink, TracingEventSink};
pub use ledger::InMemoryLedger;
pub use memory_store::InMemorySwapStore;
