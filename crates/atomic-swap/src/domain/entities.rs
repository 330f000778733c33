//! # Domain Entities
//!
//! Swap records and per-denom supply counters.

use super::errors::{Hash, SwapError, SwapId, SwapResult};
use super::value_objects::{AccAddress, Coin, SwapStatus};
use crate::algorithms::calculate_swap_id;
use serde::{Deserialize, Serialize};

/// One-shot hashed time-locked swap.
///
/// The id is derived from the commitment, the sender and the lowercased
/// sender-other-chain address, never chosen by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomicSwap {
    /// Derived identifier.
    #[serde(with = "hex_hash")]
    pub swap_id: SwapId,
    /// Escrowed amount (single denom).
    pub amount: Coin,
    /// Commitment: hash of secret and timestamp.
    #[serde(with = "hex_hash")]
    pub random_number_hash: Hash,
    /// Absolute height after which the swap can only be refunded.
    pub expire_height: u64,
    /// Commitment timestamp (unix seconds).
    pub timestamp: i64,
    /// Account that funded the escrow.
    pub sender: AccAddress,
    /// Account paid out on claim.
    pub recipient: AccAddress,
    /// Sender address on the counterparty chain (lowercased).
    pub sender_other_chain: String,
    /// Height of resolution, 0 while open.
    pub closed_block: u64,
    /// Lifecycle status.
    pub status: SwapStatus,
}

/// Parameters for creating an AtomicSwap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomicSwapParams {
    /// Escrowed amount.
    pub amount: Coin,
    /// Commitment hash.
    pub random_number_hash: Hash,
    /// Absolute expiry height.
    pub expire_height: u64,
    /// Commitment timestamp.
    pub timestamp: i64,
    /// Funding account.
    pub sender: AccAddress,
    /// Receiving account.
    pub recipient: AccAddress,
    /// Sender address on the counterparty chain.
    pub sender_other_chain: String,
}

impl AtomicSwap {
    /// Create a new open swap.
    pub fn new(params: AtomicSwapParams) -> Self {
        let sender_other_chain = params.sender_other_chain.to_lowercase();
        let swap_id = calculate_swap_id(
            &params.random_number_hash,
            &params.sender,
            &sender_other_chain,
        );
        Self {
            swap_id,
            amount: params.amount,
            random_number_hash: params.random_number_hash,
            expire_height: params.expire_height,
            timestamp: params.timestamp,
            sender: params.sender,
            recipient: params.recipient,
            sender_other_chain,
            closed_block: 0,
            status: SwapStatus::Open,
        }
    }

    /// Check if swap is past its expire height.
    pub fn is_expired(&self, current_height: u64) -> bool {
        current_height > self.expire_height
    }

    /// Check if claiming is allowed.
    pub fn can_claim(&self, current_height: u64) -> bool {
        self.status == SwapStatus::Open && !self.is_expired(current_height)
    }

    /// Check if refund is allowed.
    pub fn can_refund(&self, current_height: u64) -> bool {
        self.status == SwapStatus::Open && self.is_expired(current_height)
    }

    /// Move to a terminal status, recording the closing height.
    fn close(&mut self, next: SwapStatus, current_height: u64) -> SwapResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(SwapError::SwapNotOpen(self.status));
        }
        self.status = next;
        self.closed_block = current_height;
        Ok(())
    }

    /// Mark claimed.
    pub fn complete(&mut self, current_height: u64) -> SwapResult<()> {
        if self.is_expired(current_height) {
            return Err(SwapError::AtomicSwapHasExpired {
                expire_height: self.expire_height,
                current_height,
            });
        }
        self.close(SwapStatus::Completed, current_height)
    }

    /// Mark refunded.
    pub fn expire(&mut self, current_height: u64) -> SwapResult<()> {
        if !self.is_expired(current_height) {
            return Err(SwapError::SwapNotRefundable {
                expire_height: self.expire_height,
                current_height,
            });
        }
        self.close(SwapStatus::Expired, current_height)
    }
}

/// Value of a bridged denom currently in circulation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSupply {
    /// Coin denomination.
    pub denom: String,
    /// Active supply, never above the asset limit after a transition.
    pub current_active_supply: u128,
}

impl AssetSupply {
    /// Zero supply for a denom.
    pub fn zero(denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            current_active_supply: 0,
        }
    }

    /// Supply after adding `amount`, if representable.
    pub fn checked_increase(&self, amount: u128) -> Option<u128> {
        self.current_active_supply.checked_add(amount)
    }
}

/// Swap on the deposit lane: the locked amount grows with each deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementalSwap {
    /// Derived identifier.
    #[serde(with = "hex_hash")]
    pub swap_id: SwapId,
    /// Initiating account.
    pub from: AccAddress,
    /// Destination account.
    pub to: AccAddress,
    /// Recipient address on the counterparty chain.
    pub recipient_other_chain: String,
    /// Sender address on the counterparty chain (lowercased).
    pub sender_other_chain: String,
    /// Commitment hash.
    #[serde(with = "hex_hash")]
    pub random_number_hash: Hash,
    /// Commitment timestamp.
    pub timestamp: i64,
    /// Locked amount.
    pub amount: Coin,
    /// Running total expected on the other side.
    pub expected_income: Coin,
    /// Lock window in blocks.
    pub height_span: u64,
    /// Whether the swap crosses chains.
    pub cross_chain: bool,
}

impl IncrementalSwap {
    /// Add a deposit to both the locked amount and the expected income.
    ///
    /// Nothing is modified unless both totals can be updated.
    pub fn deposit(&mut self, coin: &Coin) -> SwapResult<()> {
        if coin.denom != self.amount.denom {
            return Err(SwapError::DenomMismatch {
                expected: self.amount.denom.clone(),
                got: coin.denom.clone(),
            });
        }
        if coin.is_zero() {
            return Err(SwapError::InvalidAmount(format!(
                "deposit {} too small",
                coin
            )));
        }
        let amount = self
            .amount
            .amount
            .checked_add(coin.amount)
            .ok_or(SwapError::Overflow("incremental swap amount"))?;
        let expected = self
            .expected_income
            .amount
            .checked_add(coin.amount)
            .ok_or(SwapError::Overflow("incremental swap expected income"))?;
        self.amount.amount = amount;
        self.expected_income.amount = expected;
        Ok(())
    }
}

/// A record from either swap lane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapRecord {
    /// One-shot claim/refund swap.
    OneShot(AtomicSwap),
    /// Deposit-lane swap.
    Incremental(IncrementalSwap),
}

impl SwapRecord {
    /// Identifier of the underlying record.
    pub fn swap_id(&self) -> &SwapId {
        match self {
            Self::OneShot(swap) => &swap.swap_id,
            Self::Incremental(swap) => &swap.swap_id,
        }
    }

    /// Currently locked amount.
    pub fn amount(&self) -> &Coin {
        match self {
            Self::OneShot(swap) => &swap.amount,
            Self::Incremental(swap) => &swap.amount,
        }
    }

    /// Commitment hash.
    pub fn random_number_hash(&self) -> &Hash {
        match self {
            Self::OneShot(swap) => &swap.random_number_hash,
            Self::Incremental(swap) => &swap.random_number_hash,
        }
    }
}

/// Hex (de)serialization for 32-byte hashes.
mod hex_hash {
    use super::Hash;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Hash, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("hash must be 32 bytes"))
    }
}
