//! # Atomic Swap
//!
//! Hashed time-locked swaps between this chain and a counterparty chain.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Lock value on this chain behind a SHA-256 commitment so that it moves
//! only if the committed secret is revealed before an expiry height, and
//! returns to the sender otherwise:
//! - One-shot swaps: create, claim with the secret, or refund after expiry
//! - Incremental swaps: open, then top up with further deposits
//! - Per-asset supply limits for bridged denoms
//!
//! ## Guarantees
//!
//! | Property | Description |
//! |----------|-------------|
//! | Deterministic ids | Derived from commitment, sender and case-folded other-chain sender |
//! | Single resolution | Open swaps close exactly once, as Completed or Expired |
//! | Bounded supply | Active supply of an asset never exceeds its limit |
//! | No half updates | A failed operation leaves store, escrow and supply untouched |
//!
//! ## Module Structure
//!
//! ```text
//! atomic-swap/
//! ├── domain/          # Swaps, params, messages, errors, invariants
//! ├── algorithms/      # Commitment hashing and swap ids
//! ├── ports/           # AtomicSwapApi, SwapStore, EscrowLedger, ChainClock
//! ├── adapters/        # In-memory store, ledger, clock and event sinks
//! ├── service/         # SwapService: registry, supply, incremental lane
//! ├── events.rs        # Notifications emitted on each transition
//! ├── config.rs        # Environment configuration
//! └── telemetry.rs     # Tracing setup
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-exports
pub use adapters::{
    InMemoryLedger, InMemorySwapStore, ManualClock, RecordingEventSink, TracingEventSink,
};
pub use algorithms::{
    calculate_random_hash, calculate_swap_id, generate_random_number, verify_claim_secret,
};
pub use config::{LoggingConfig, SwapConfig};
pub use domain::{
    AccAddress, AssetParam, AssetSupply, AtomicSwap, ClaimAtomicSwapRequest, Coin,
    CreateAtomicSwapRequest, DepositIncrementalSwapRequest, ErrorKind, Hash, IncrementalSwap,
    LedgerError, OpenIncrementalSwapRequest, Params, RefundAtomicSwapRequest, SecureSecret,
    SwapError, SwapId, SwapRecord, SwapResult, SwapStatus,
};
pub use events::SwapEvent;
pub use ports::{AtomicSwapApi, ChainClock, EscrowLedger, EventSink, SwapStore};
pub use service::SwapService;
pub use telemetry::{init_tracing, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
