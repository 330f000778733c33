//! Swap Service - registry, supply ledger and incremental lane
//!
//! Operations take the store explicitly (`&S` for queries, `&mut S` for
//! transitions). Each transition validates everything, then moves funds,
//! then writes; a failure at any step before the write leaves no trace.

mod incremental;
mod supply;
mod swap;

use crate::config::SwapConfig;
use crate::domain::{
    AssetSupply, AtomicSwap, ClaimAtomicSwapRequest, CreateAtomicSwapRequest,
    DepositIncrementalSwapRequest, IncrementalSwap, OpenIncrementalSwapRequest, Params,
    RefundAtomicSwapRequest, SwapId, SwapRecord, SwapResult, SwapStatus,
};
use crate::ports::{AtomicSwapApi, ChainClock, EscrowLedger, EventSink, SwapStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// First bytes of a swap id as hex, for log lines.
pub(crate) fn short_id(id: &SwapId) -> String {
    format!("{:02x}{:02x}{:02x}{:02x}", id[0], id[1], id[2], id[3])
}

/// Swap service.
pub struct SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
{
    config: SwapConfig,
    params: RwLock<Params>,
    ledger: Arc<L>,
    clock: Arc<C>,
    events: Arc<E>,
}

impl<L, C, E> SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
{
    /// Create a service. The parameter set must validate.
    pub fn new(
        config: SwapConfig,
        params: Params,
        ledger: Arc<L>,
        clock: Arc<C>,
        events: Arc<E>,
    ) -> SwapResult<Self> {
        params.validate()?;
        Ok(Self {
            config,
            params: RwLock::new(params),
            ledger,
            clock,
            events,
        })
    }

    /// Service configuration.
    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Snapshot of the active parameters.
    pub fn params(&self) -> Params {
        self.params.read().clone()
    }

    /// Activate a new parameter set. A set that fails validation is never
    /// applied, not even partially.
    pub fn update_params(&self, params: Params) -> SwapResult<()> {
        if let Err(err) = params.validate() {
            warn!("[swap] Rejected parameter update: {}", err);
            return Err(err);
        }
        info!(
            "[swap] Activated params: lock window [{}, {}], {} assets",
            params.min_block_lock,
            params.max_block_lock,
            params.supported_assets.len()
        );
        *self.params.write() = params;
        Ok(())
    }

    /// Get a one-shot swap.
    pub fn get_atomic_swap<S: SwapStore>(&self, store: &S, swap_id: &SwapId) -> Option<AtomicSwap> {
        store.atomic_swap(swap_id)
    }

    /// One-shot swaps with the given status, ordered by id.
    pub fn get_atomic_swaps_by_status<S: SwapStore>(
        &self,
        store: &S,
        status: SwapStatus,
    ) -> Vec<AtomicSwap> {
        store
            .atomic_swaps()
            .into_iter()
            .filter(|s| s.status == status)
            .collect()
    }

    /// Get an incremental swap.
    pub fn get_incremental_swap<S: SwapStore>(
        &self,
        store: &S,
        swap_id: &SwapId,
    ) -> Option<IncrementalSwap> {
        store.incremental_swap(swap_id)
    }

    /// Look a swap up in either lane.
    pub fn get_swap<S: SwapStore>(&self, store: &S, swap_id: &SwapId) -> Option<SwapRecord> {
        store
            .atomic_swap(swap_id)
            .map(SwapRecord::OneShot)
            .or_else(|| store.incremental_swap(swap_id).map(SwapRecord::Incremental))
    }

    /// Supply record for a denom.
    pub fn get_asset_supply<S: SwapStore>(&self, store: &S, denom: &str) -> Option<AssetSupply> {
        store.asset_supply(denom)
    }
}

impl<L, C, E, S> AtomicSwapApi<S> for SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
    S: SwapStore,
{
    fn create_atomic_swap(
        &self,
        store: &mut S,
        request: CreateAtomicSwapRequest,
    ) -> SwapResult<SwapId> {
        SwapService::create_atomic_swap(self, store, request)
    }

    fn claim_atomic_swap(&self, store: &mut S, request: ClaimAtomicSwapRequest) -> SwapResult<()> {
        SwapService::claim_atomic_swap(self, store, request)
    }

    fn refund_atomic_swap(
        &self,
        store: &mut S,
        request: RefundAtomicSwapRequest,
    ) -> SwapResult<()> {
        SwapService::refund_atomic_swap(self, store, request)
    }

    fn open_incremental_swap(
        &self,
        store: &mut S,
        request: OpenIncrementalSwapRequest,
    ) -> SwapResult<SwapId> {
        SwapService::open_incremental_swap(self, store, request)
    }

    fn deposit_incremental_swap(
        &self,
        store: &mut S,
        request: DepositIncrementalSwapRequest,
    ) -> SwapResult<()> {
        SwapService::deposit_incremental_swap(self, store, request)
    }

    fn get_atomic_swap(&self, store: &S, swap_id: &SwapId) -> Option<AtomicSwap> {
        SwapService::get_atomic_swap(self, store, swap_id)
    }

    fn get_atomic_swaps_by_status(&self, store: &S, status: SwapStatus) -> Vec<AtomicSwap> {
        SwapService::get_atomic_swaps_by_status(self, store, status)
    }

    fn get_incremental_swap(&self, store: &S, swap_id: &SwapId) -> Option<IncrementalSwap> {
        SwapService::get_incremental_swap(self, store, swap_id)
    }

    fn get_swap(&self, store: &S, swap_id: &SwapId) -> Option<SwapRecord> {
        SwapService::get_swap(self, store, swap_id)
    }

    fn get_asset_supply(&self, store: &S, denom: &str) -> Option<AssetSupply> {
        SwapService::get_asset_supply(self, store, denom)
    }

    fn params(&self) -> Params {
        SwapService::params(self)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::adapters::{InMemoryLedger, InMemorySwapStore, ManualClock, RecordingEventSink};
    use crate::algorithms::calculate_random_hash;
    use crate::domain::{AccAddress, AssetParam, Coin, LedgerError, SecureSecret};
    use parking_lot::Mutex;

    pub const NOW: i64 = 6_655_443_322;
    pub const START_HEIGHT: u64 = 1_000;

    pub type TestService<L = InMemoryLedger> = SwapService<L, ManualClock, RecordingEventSink>;

    pub struct Harness<L: EscrowLedger = InMemoryLedger> {
        pub service: TestService<L>,
        pub store: InMemorySwapStore,
        pub ledger: Arc<L>,
        pub clock: Arc<ManualClock>,
        pub events: Arc<RecordingEventSink>,
    }

    type PayoutHook = Box<dyn FnOnce() + Send>;

    /// In-memory ledger whose payouts can be made to fail, or to run a hook
    /// right after funds leave escrow.
    pub struct ScriptedLedger {
        pub inner: InMemoryLedger,
        fail_payouts: Mutex<bool>,
        on_payout: Mutex<Option<PayoutHook>>,
    }

    impl ScriptedLedger {
        pub fn fail_payouts(&self) {
            *self.fail_payouts.lock() = true;
        }

        pub fn on_next_payout(&self, hook: impl FnOnce() + Send + 'static) {
            *self.on_payout.lock() = Some(Box::new(hook));
        }
    }

    impl EscrowLedger for ScriptedLedger {
        fn transfer_to_escrow(&self, from: &AccAddress, amount: &Coin) -> Result<(), LedgerError> {
            self.inner.transfer_to_escrow(from, amount)
        }

        fn transfer_from_escrow(&self, to: &AccAddress, amount: &Coin) -> Result<(), LedgerError> {
            if *self.fail_payouts.lock() {
                return Err(LedgerError::Unavailable("payouts halted".to_string()));
            }
            self.inner.transfer_from_escrow(to, amount)?;
            let hook = self.on_payout.lock().take();
            if let Some(hook) = hook {
                hook();
            }
            Ok(())
        }
    }

    pub fn sender() -> AccAddress {
        AccAddress::new(b"BinanceTest1-sender".to_vec())
    }

    pub fn recipient() -> AccAddress {
        AccAddress::new(b"KavaTest1-recipient".to_vec())
    }

    pub fn test_params(bnb_limit: u128) -> Params {
        Params {
            deputy_address: AccAddress::new(b"deputy".to_vec()),
            min_block_lock: 80,
            max_block_lock: 360,
            supported_assets: vec![
                AssetParam::new("bnb", "714", bnb_limit, true),
                AssetParam::new("inc", "9999", 100, false),
            ],
        }
    }

    fn funded_ledger() -> InMemoryLedger {
        let ledger = InMemoryLedger::new(AccAddress::new(b"bridge".to_vec()));
        ledger.mint(&sender(), &Coin::new("bnb", 1_000_000));
        ledger.mint(&sender(), &Coin::new("inc", 1_000));
        ledger
    }

    fn build<L: EscrowLedger>(ledger: Arc<L>, bnb_limit: u128) -> Harness<L> {
        let config = SwapConfig::default();
        let clock = Arc::new(ManualClock::at(START_HEIGHT, NOW, config.block_time_secs));
        let events = Arc::new(RecordingEventSink::new());
        let service = SwapService::new(
            config,
            test_params(bnb_limit),
            Arc::clone(&ledger),
            Arc::clone(&clock),
            Arc::clone(&events),
        )
        .unwrap();
        Harness {
            service,
            store: InMemorySwapStore::new(),
            ledger,
            clock,
            events,
        }
    }

    pub fn harness_with_limit(bnb_limit: u128) -> Harness {
        build(Arc::new(funded_ledger()), bnb_limit)
    }

    pub fn scripted_harness(bnb_limit: u128) -> Harness<ScriptedLedger> {
        let ledger = ScriptedLedger {
            inner: funded_ledger(),
            fail_payouts: Mutex::new(false),
            on_payout: Mutex::new(None),
        };
        build(Arc::new(ledger), bnb_limit)
    }

    pub fn harness() -> Harness {
        harness_with_limit(100_000_000_000)
    }

    pub fn secret() -> SecureSecret {
        SecureSecret::from_slice(&[15]).unwrap()
    }

    pub fn create_request(amount: u128) -> CreateAtomicSwapRequest {
        CreateAtomicSwapRequest {
            random_number_hash: calculate_random_hash(&secret(), NOW),
            timestamp: NOW,
            height_span: 100,
            sender: sender(),
            recipient: recipient(),
            sender_other_chain: String::new(),
            recipient_other_chain: String::new(),
            amount: vec![Coin::new("bnb", amount)],
            expected_income: format!("{}bnb", amount),
        }
    }
}
