//! # Outbound Ports
//!
//! Collaborators the registry depends on: swap storage, the escrow ledger,
//! the chain clock and the notification sink.
//!
//! All ports are synchronous. Operations run one at a time against a single
//! writer, so no port suspends or locks across calls.

use crate::domain::{
    AccAddress, AssetSupply, AtomicSwap, Coin, IncrementalSwap, LedgerError, SwapId,
};
use crate::events::SwapEvent;

/// Swap storage: swap id -> record, denom -> supply.
///
/// Passed explicitly into every operation; reads take `&self`, writes
/// `&mut self`.
pub trait SwapStore {
    /// Get a one-shot swap.
    fn atomic_swap(&self, swap_id: &SwapId) -> Option<AtomicSwap>;

    /// Insert or replace a one-shot swap under its id.
    fn set_atomic_swap(&mut self, swap: AtomicSwap);

    /// All one-shot swaps, ordered by id.
    fn atomic_swaps(&self) -> Vec<AtomicSwap>;

    /// Get an incremental swap.
    fn incremental_swap(&self, swap_id: &SwapId) -> Option<IncrementalSwap>;

    /// Insert or replace an incremental swap under its id.
    fn set_incremental_swap(&mut self, swap: IncrementalSwap);

    /// All incremental swaps, ordered by id.
    fn incremental_swaps(&self) -> Vec<IncrementalSwap>;

    /// Get the supply record for a denom.
    fn asset_supply(&self, denom: &str) -> Option<AssetSupply>;

    /// Insert or replace a supply record.
    fn set_asset_supply(&mut self, supply: AssetSupply);

    /// All supply records, ordered by denom.
    fn asset_supplies(&self) -> Vec<AssetSupply>;
}

/// Escrow ledger.
///
/// Both transfers are atomic: the full amount moves or nothing does.
pub trait EscrowLedger: Send + Sync {
    /// Move `amount` from `from` into the bridge holding account.
    fn transfer_to_escrow(&self, from: &AccAddress, amount: &Coin) -> Result<(), LedgerError>;

    /// Move `amount` from the bridge holding account to `to`.
    fn transfer_from_escrow(&self, to: &AccAddress, amount: &Coin) -> Result<(), LedgerError>;
}

/// Chain clock. Height is the only trusted clock for expiry.
pub trait ChainClock: Send + Sync {
    /// Current block height, non-decreasing across operations.
    fn current_height(&self) -> u64;

    /// Current block time in unix seconds, used only to bound commitment
    /// timestamps.
    fn block_time(&self) -> i64;
}

/// Notification sink. Delivery is fire-and-forget.
pub trait EventSink: Send + Sync {
    /// Accept an event.
    fn emit(&self, event: SwapEvent);
}
