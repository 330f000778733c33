//! # Governance Parameters
//!
//! Height-lock window and supported-asset table.

use super::errors::{SwapError, SwapResult};
use super::value_objects::{AccAddress, Coin};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lower bound any `min_block_lock` may take.
pub const ABSOLUTE_MINIMUM_BLOCK_LOCK: u64 = 10;

/// Upper bound any `max_block_lock` may take.
pub const ABSOLUTE_MAXIMUM_BLOCK_LOCK: u64 = 10_000;

/// Default minimum lock window.
pub const DEFAULT_MIN_BLOCK_LOCK: u64 = 20;

/// Default maximum lock window.
pub const DEFAULT_MAX_BLOCK_LOCK: u64 = 200;

/// Default deputy address (placeholder until governance sets one).
pub const DEFAULT_DEPUTY_ADDRESS: &[u8] = b"deputy-placeholder00";

/// One bridged asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParam {
    /// Coin denomination on this chain.
    pub denom: String,
    /// Registered coin id on the counterparty chain.
    pub coin_id: String,
    /// Maximum active supply.
    pub limit: u128,
    /// False pauses new swaps in this asset.
    pub active: bool,
}

impl AssetParam {
    /// Create an asset entry.
    pub fn new(
        denom: impl Into<String>,
        coin_id: impl Into<String>,
        limit: u128,
        active: bool,
    ) -> Self {
        Self {
            denom: denom.into(),
            coin_id: coin_id.into(),
            limit,
            active,
        }
    }
}

/// Parameter snapshot consulted by every validation step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Counterparty relayer identity.
    pub deputy_address: AccAddress,
    /// Shortest allowed height span.
    pub min_block_lock: u64,
    /// Longest allowed height span.
    pub max_block_lock: u64,
    /// Ordered asset table.
    pub supported_assets: Vec<AssetParam>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            deputy_address: AccAddress::new(DEFAULT_DEPUTY_ADDRESS),
            min_block_lock: DEFAULT_MIN_BLOCK_LOCK,
            max_block_lock: DEFAULT_MAX_BLOCK_LOCK,
            supported_assets: vec![AssetParam::new("kava", "459", 1, false)],
        }
    }
}

impl Params {
    /// Check bounds and asset table consistency.
    pub fn validate(&self) -> SwapResult<()> {
        if self.min_block_lock < ABSOLUTE_MINIMUM_BLOCK_LOCK {
            return Err(SwapError::InvalidParams(format!(
                "minimum block lock cannot be shorter than {}",
                ABSOLUTE_MINIMUM_BLOCK_LOCK
            )));
        }
        if self.min_block_lock >= self.max_block_lock {
            return Err(SwapError::InvalidParams(
                "maximum block lock must be greater than minimum block lock".to_string(),
            ));
        }
        if self.max_block_lock > ABSOLUTE_MAXIMUM_BLOCK_LOCK {
            return Err(SwapError::InvalidParams(format!(
                "maximum block lock cannot be longer than {}",
                ABSOLUTE_MAXIMUM_BLOCK_LOCK
            )));
        }

        let mut coin_ids = HashSet::new();
        for asset in &self.supported_assets {
            if asset.denom.is_empty() {
                return Err(SwapError::InvalidParams(
                    "asset denom cannot be empty".to_string(),
                ));
            }
            if asset.coin_id.is_empty() {
                return Err(SwapError::InvalidParams(format!(
                    "asset {} cannot have an empty coin id",
                    asset.denom
                )));
            }
            if !coin_ids.insert(asset.coin_id.as_str()) {
                return Err(SwapError::InvalidParams(format!(
                    "asset {} cannot have duplicate coin id {}",
                    asset.denom, asset.coin_id
                )));
            }
            if asset.limit == 0 {
                return Err(SwapError::InvalidParams(format!(
                    "asset {} must have limit greater than 0",
                    asset.denom
                )));
            }
        }
        Ok(())
    }

    /// Asset entry for a denom.
    pub fn asset(&self, denom: &str) -> Option<&AssetParam> {
        self.supported_assets.iter().find(|a| a.denom == denom)
    }

    /// Asset entry for a counterparty coin id.
    pub fn asset_by_coin_id(&self, coin_id: &str) -> Option<&AssetParam> {
        self.supported_assets.iter().find(|a| a.coin_id == coin_id)
    }

    /// Supply limit for a supported denom.
    pub fn supply_limit(&self, denom: &str) -> SwapResult<u128> {
        self.asset(denom)
            .map(|a| a.limit)
            .ok_or_else(|| SwapError::AssetNotSupported(denom.to_string()))
    }

    /// Require the coin's denom to be supported and active.
    pub fn validate_active_asset(&self, coin: &Coin) -> SwapResult<&AssetParam> {
        let asset = self
            .asset(&coin.denom)
            .ok_or_else(|| SwapError::AssetNotSupported(coin.denom.clone()))?;
        if !asset.active {
            return Err(SwapError::AssetNotActive(coin.denom.clone()));
        }
        Ok(asset)
    }

    /// True when `span` lies in the inclusive lock window.
    pub fn is_height_span_allowed(&self, span: u64) -> bool {
        span >= self.min_block_lock && span <= self.max_block_lock
    }
}
