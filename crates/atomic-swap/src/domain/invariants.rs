//! # Domain Invariants
//!
//! Business rules checked before any escrow transfer or registry write.

use super::errors::{SwapError, SwapResult};
use super::params::Params;
use super::value_objects::Coin;

/// Invariant: height span inside `[min_block_lock, max_block_lock]`.
pub fn invariant_height_span(span: u64, params: &Params) -> SwapResult<()> {
    if !params.is_height_span_allowed(span) {
        return Err(SwapError::InvalidHeightSpan {
            span,
            min: params.min_block_lock,
            max: params.max_block_lock,
        });
    }
    Ok(())
}

/// Invariant: commitment timestamp near the current block time.
///
/// Accepted window is `[block_time - past_secs, block_time + future_secs]`.
pub fn invariant_timestamp_window(
    timestamp: i64,
    block_time: i64,
    past_secs: i64,
    future_secs: i64,
) -> SwapResult<()> {
    let earliest = block_time.saturating_sub(past_secs);
    let latest = block_time.saturating_add(future_secs);
    if timestamp < earliest || timestamp > latest {
        return Err(SwapError::InvalidTimestamp {
            timestamp,
            earliest,
            latest,
        });
    }
    Ok(())
}

/// Invariant: exactly one coin, with a denom and a positive quantity.
pub fn invariant_single_coin(coins: &[Coin]) -> SwapResult<&Coin> {
    let [coin] = coins else {
        return Err(SwapError::InvalidAmount(format!(
            "amount must contain exactly one coin, got {}",
            coins.len()
        )));
    };
    if coin.denom.is_empty() {
        return Err(SwapError::InvalidAmount("coin denom cannot be empty".to_string()));
    }
    if coin.is_zero() {
        return Err(SwapError::InvalidAmount(format!("{} must be positive", coin)));
    }
    Ok(coin)
}

/// Invariant: active supply never exceeds the asset limit.
///
/// Returns the supply after the increase.
pub fn invariant_supply_within_limit(
    denom: &str,
    current: u128,
    proposed: u128,
    limit: u128,
) -> SwapResult<u128> {
    match current.checked_add(proposed) {
        Some(next) if next <= limit => Ok(next),
        _ => Err(SwapError::SupplyLimitExceeded {
            denom: denom.to_string(),
            current,
            proposed,
            limit,
        }),
    }
}
