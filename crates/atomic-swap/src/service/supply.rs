//! Asset supply accounting.
//!
//! Active supply grows when a swap is claimed, not when it is created, so
//! open swaps do not count against the limit until they resolve.

use super::SwapService;
use crate::domain::{invariant_supply_within_limit, AssetSupply, Coin, Params, SwapResult};
use crate::ports::{ChainClock, EscrowLedger, EventSink, SwapStore};
use tracing::debug;

impl<L, C, E> SwapService<L, C, E>
where
    L: EscrowLedger,
    C: ChainClock,
    E: EventSink,
{
    /// Current active supply for a denom, zero if never referenced.
    pub fn current_active_supply<S: SwapStore>(&self, store: &S, denom: &str) -> u128 {
        store
            .asset_supply(denom)
            .map(|s| s.current_active_supply)
            .unwrap_or(0)
    }

    /// Reject if adding `coin` would push active supply over its limit.
    ///
    /// Returns the supply the increase would produce.
    pub fn validate_proposed_increase<S: SwapStore>(
        &self,
        store: &S,
        coin: &Coin,
    ) -> SwapResult<u128> {
        let params = self.params();
        self.proposed_supply(&params, store, coin)
    }

    /// Add `coin` to the active supply of its denom, enforcing the limit.
    pub fn increment_asset_supply<S: SwapStore>(
        &self,
        store: &mut S,
        coin: &Coin,
    ) -> SwapResult<u128> {
        let next = self.validate_proposed_increase(store, coin)?;
        self.set_active_supply(store, &coin.denom, next);
        Ok(next)
    }

    /// Supply after adding `coin`, checked against the limit in `params`.
    pub(crate) fn proposed_supply<S: SwapStore>(
        &self,
        params: &Params,
        store: &S,
        coin: &Coin,
    ) -> SwapResult<u128> {
        let limit = params.supply_limit(&coin.denom)?;
        let current = self.current_active_supply(store, &coin.denom);
        invariant_supply_within_limit(&coin.denom, current, coin.amount, limit)
    }

    /// Record an already validated supply value. Never fails.
    pub(crate) fn set_active_supply<S: SwapStore>(&self, store: &mut S, denom: &str, next: u128) {
        store.set_asset_supply(AssetSupply {
            denom: denom.to_string(),
            current_active_supply: next,
        });
        debug!("[swap] Active supply of {} is now {}", denom, next);
    }

    /// Write a zero supply record for `denom` if none exists yet.
    pub(crate) fn ensure_asset_supply<S: SwapStore>(&self, store: &mut S, denom: &str) {
        if store.asset_supply(denom).is_none() {
            store.set_asset_supply(AssetSupply::zero(denom));
        }
    }
}
