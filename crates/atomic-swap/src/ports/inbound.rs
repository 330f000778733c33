//! # Inbound Ports
//!
//! API trait defining what the swap registry can do.

use super::outbound::SwapStore;
use crate::domain::{
    AssetSupply, AtomicSwap, ClaimAtomicSwapRequest, CreateAtomicSwapRequest,
    DepositIncrementalSwapRequest, IncrementalSwap, OpenIncrementalSwapRequest, Params,
    RefundAtomicSwapRequest, SwapId, SwapRecord, SwapResult, SwapStatus,
};

/// Atomic swap API - inbound port.
///
/// Every mutating call is all-or-nothing: on error the store and the ledger
/// are left untouched.
pub trait AtomicSwapApi<S: SwapStore> {
    /// Create a one-shot swap and escrow its amount. Returns the swap id.
    fn create_atomic_swap(&self, store: &mut S, request: CreateAtomicSwapRequest)
        -> SwapResult<SwapId>;

    /// Claim an open swap with its secret.
    fn claim_atomic_swap(&self, store: &mut S, request: ClaimAtomicSwapRequest) -> SwapResult<()>;

    /// Refund an expired open swap to its sender.
    fn refund_atomic_swap(&self, store: &mut S, request: RefundAtomicSwapRequest)
        -> SwapResult<()>;

    /// Open a swap on the deposit lane. Returns the swap id.
    fn open_incremental_swap(
        &self,
        store: &mut S,
        request: OpenIncrementalSwapRequest,
    ) -> SwapResult<SwapId>;

    /// Add a deposit to an incremental swap.
    fn deposit_incremental_swap(
        &self,
        store: &mut S,
        request: DepositIncrementalSwapRequest,
    ) -> SwapResult<()>;

    /// Get a one-shot swap.
    fn get_atomic_swap(&self, store: &S, swap_id: &SwapId) -> Option<AtomicSwap>;

    /// One-shot swaps with the given status, ordered by id.
    fn get_atomic_swaps_by_status(&self, store: &S, status: SwapStatus) -> Vec<AtomicSwap>;

    /// Get an incremental swap.
    fn get_incremental_swap(&self, store: &S, swap_id: &SwapId) -> Option<IncrementalSwap>;

    /// Look a swap up in either lane.
    fn get_swap(&self, store: &S, swap_id: &SwapId) -> Option<SwapRecord>;

    /// Supply record for a denom.
    fn get_asset_supply(&self, store: &S, denom: &str) -> Option<AssetSupply>;

    /// Current parameter snapshot.
    fn params(&self) -> Params;
}
