//! Incremental lane: swaps whose locked amount grows with deposits.
//!
//! The lane has no claim or refund of its own; funds stay in escrow.

use super::{short_id, SwapService};
use crate::algorithms::calculate_swap_id;
use crate::domain::{
    DepositIncrementalSwapRequest, IncrementalSwap, OpenIncrementalSwapRequest, SwapError, SwapId,
    SwapResult,
};
use crate::events::SwapEvent;
use crate::ports::{ChainClock, EscrowLedger, EventSink, SwapStore};
use tracing::info;

impl<L, C, E> SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
{
    /// Open an incremental swap, escrowing the initial amount.
    pub fn open_incremental_swap<S: SwapStore>(
        &self,
        store: &mut S,
        request: OpenIncrementalSwapRequest,
    ) -> SwapResult<SwapId> {
        let coin = request.validate_basic()?.clone();
        let sender_other_chain = request.sender_other_chain.to_lowercase();
        let swap_id = calculate_swap_id(
            &request.random_number_hash,
            &request.from,
            &sender_other_chain,
        );

        if store.incremental_swap(&swap_id).is_some() {
            return Err(SwapError::IncrementalSwapAlreadyExists(swap_id));
        }
        if store.atomic_swap(&swap_id).is_some() {
            return Err(SwapError::AtomicSwapAlreadyExists(swap_id));
        }

        self.ledger.transfer_to_escrow(&request.from, &coin)?;

        let swap = IncrementalSwap {
            swap_id,
            from: request.from,
            to: request.to,
            recipient_other_chain: request.recipient_other_chain,
            sender_other_chain,
            random_number_hash: request.random_number_hash,
            timestamp: request.timestamp,
            amount: coin,
            expected_income: request.expected_income,
            height_span: request.height_span,
            cross_chain: request.cross_chain,
        };
        store.set_incremental_swap(swap.clone());

        info!(
            "[swap] Opened incremental swap {}... with {}",
            short_id(&swap_id),
            swap.amount
        );
        self.events.emit(SwapEvent::incremental_created(&swap));
        Ok(swap_id)
    }

    /// Add a deposit to an existing incremental swap.
    pub fn deposit_incremental_swap<S: SwapStore>(
        &self,
        store: &mut S,
        request: DepositIncrementalSwapRequest,
    ) -> SwapResult<()> {
        let coin = request.validate_basic()?;
        let mut swap = store
            .incremental_swap(&request.swap_id)
            .ok_or(SwapError::IncrementalSwapNotFound(request.swap_id))?;
        swap.deposit(coin)?;

        self.ledger.transfer_to_escrow(&request.from, coin)?;
        store.set_incremental_swap(swap.clone());

        info!(
            "[swap] Deposited {} into incremental swap {}... (total {})",
            coin,
            short_id(&swap.swap_id),
            swap.amount
        );
        self.events
            .emit(SwapEvent::deposited(&swap.swap_id, &request.from, coin));
        Ok(())
    }
}
