//! Chain Clock Adapter
//!
//! Manually driven clock. Block time is derived from height through a fixed
//! block interval, so the two never disagree.

use crate::ports::ChainClock;
use parking_lot::RwLock;

/// Height/time pair under manual control.
pub struct ManualClock {
    height: RwLock<u64>,
    genesis_time: i64,
    block_time_secs: i64,
}

impl ManualClock {
    /// Clock at `height`, with block 0 stamped `genesis_time`.
    pub fn new(height: u64, genesis_time: i64, block_time_secs: i64) -> Self {
        Self {
            height: RwLock::new(height),
            genesis_time,
            block_time_secs,
        }
    }

    /// Clock at `height` whose current block time is `now`.
    pub fn at(height: u64, now: i64, block_time_secs: i64) -> Self {
        let elapsed = i64::try_from(height)
            .unwrap_or(i64::MAX)
            .saturating_mul(block_time_secs);
        Self::new(height, now.saturating_sub(elapsed), block_time_secs)
    }

    /// Set the height. Heights never go backwards.
    pub fn set_height(&self, height: u64) {
        let mut current = self.height.write();
        *current = (*current).max(height);
    }

    /// Advance by `blocks`.
    pub fn advance_blocks(&self, blocks: u64) {
        let mut current = self.height.write();
        *current = current.saturating_add(blocks);
    }
}

impl ChainClock for ManualClock {
    fn current_height(&self) -> u64 {
        *self.height.read()
    }

    fn block_time(&self) -> i64 {
        let height = i64::try_from(self.current_height()).unwrap_or(i64::MAX);
        self.genesis_time
            .saturating_add(height.saturating_mul(self.block_time_secs))
    }
}
