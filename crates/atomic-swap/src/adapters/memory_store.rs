//! In-memory swap store
//!
//! Implements `SwapStore` over ordered maps so iteration is deterministic
//! across replicas.

use crate::domain::{AssetSupply, AtomicSwap, IncrementalSwap, SwapId};
use crate::ports::SwapStore;
use std::collections::BTreeMap;

/// BTreeMap-backed swap store.
#[derive(Clone, Debug, Default)]
pub struct InMemorySwapStore {
    atomic_swaps: BTreeMap<SwapId, AtomicSwap>,
    incremental_swaps: BTreeMap<SwapId, IncrementalSwap>,
    supplies: BTreeMap<String, AssetSupply>,
}

impl InMemorySwapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SwapStore for InMemorySwapStore {
    fn atomic_swap(&self, swap_id: &SwapId) -> Option<AtomicSwap> {
        self.atomic_swaps.get(swap_id).cloned()
    }

    fn set_atomic_swap(&mut self, swap: AtomicSwap) {
        self.atomic_swaps.insert(swap.swap_id, swap);
    }

    fn atomic_swaps(&self) -> Vec<AtomicSwap> {
        self.atomic_swaps.values().cloned().collect()
    }

    fn incremental_swap(&self, swap_id: &SwapId) -> Option<IncrementalSwap> {
        self.incremental_swaps.get(swap_id).cloned()
    }

    fn set_incremental_swap(&mut self, swap: IncrementalSwap) {
        self.incremental_swaps.insert(swap.swap_id, swap);
    }

    fn incremental_swaps(&self) -> Vec<IncrementalSwap> {
        self.incremental_swaps.values().cloned().collect()
    }

    fn asset_supply(&self, denom: &str) -> Option<AssetSupply> {
        self.supplies.get(denom).cloned()
    }

    fn set_asset_supply(&mut self, supply: AssetSupply) {
        self.supplies.insert(supply.denom.clone(), supply);
    }

    fn asset_supplies(&self) -> Vec<AssetSupply> {
        self.supplies.values().cloned().collect()
    }
}
