//! # Request Messages
//!
//! Inputs to the registry operations, each with a stateless `validate_basic`
//! run before any stored state is consulted.

use super::errors::{Hash, SwapError, SwapId, SwapResult};
use super::invariants::invariant_single_coin;
use super::secure_secret::SecureSecret;
use super::value_objects::{AccAddress, Coin};

fn require_address(addr: &AccAddress, role: &'static str) -> SwapResult<()> {
    if addr.is_empty() {
        return Err(SwapError::EmptyAddress(role));
    }
    Ok(())
}

/// Create a one-shot swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateAtomicSwapRequest {
    /// Commitment hash.
    pub random_number_hash: Hash,
    /// Commitment timestamp.
    pub timestamp: i64,
    /// Lock window in blocks.
    pub height_span: u64,
    /// Funding account.
    pub sender: AccAddress,
    /// Receiving account.
    pub recipient: AccAddress,
    /// Sender address on the counterparty chain.
    pub sender_other_chain: String,
    /// Recipient address on the counterparty chain.
    pub recipient_other_chain: String,
    /// Amount to escrow, exactly one coin.
    pub amount: Vec<Coin>,
    /// Free-text expected income on the counterparty chain.
    pub expected_income: String,
}

impl CreateAtomicSwapRequest {
    /// Stateless checks.
    pub fn validate_basic(&self) -> SwapResult<&Coin> {
        require_address(&self.sender, "sender")?;
        require_address(&self.recipient, "recipient")?;
        invariant_single_coin(&self.amount)
    }
}

/// Claim a one-shot swap by revealing its secret.
#[derive(Clone, Debug)]
pub struct ClaimAtomicSwapRequest {
    /// Account submitting the claim.
    pub from: AccAddress,
    /// Target swap.
    pub swap_id: SwapId,
    /// Revealed preimage.
    pub random_number: SecureSecret,
}

impl ClaimAtomicSwapRequest {
    /// Stateless checks.
    pub fn validate_basic(&self) -> SwapResult<()> {
        require_address(&self.from, "claimer")
    }
}

/// Refund an expired one-shot swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefundAtomicSwapRequest {
    /// Account submitting the refund.
    pub from: AccAddress,
    /// Target swap.
    pub swap_id: SwapId,
}

impl RefundAtomicSwapRequest {
    /// Stateless checks.
    pub fn validate_basic(&self) -> SwapResult<()> {
        require_address(&self.from, "refunder")
    }
}

/// Open a swap on the deposit lane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenIncrementalSwapRequest {
    /// Initiating account.
    pub from: AccAddress,
    /// Destination account.
    pub to: AccAddress,
    /// Recipient address on the counterparty chain.
    pub recipient_other_chain: String,
    /// Sender address on the counterparty chain.
    pub sender_other_chain: String,
    /// Commitment hash.
    pub random_number_hash: Hash,
    /// Commitment timestamp.
    pub timestamp: i64,
    /// Initial amount, exactly one coin.
    pub amount: Vec<Coin>,
    /// Initial expected income, same denom as the amount.
    pub expected_income: Coin,
    /// Lock window in blocks.
    pub height_span: u64,
    /// Whether the swap crosses chains.
    pub cross_chain: bool,
}

impl OpenIncrementalSwapRequest {
    /// Stateless checks, including other-chain field consistency.
    pub fn validate_basic(&self) -> SwapResult<&Coin> {
        require_address(&self.from, "from")?;
        require_address(&self.to, "to")?;
        let coin = invariant_single_coin(&self.amount)?;
        if self.expected_income.denom != coin.denom {
            return Err(SwapError::DenomMismatch {
                expected: coin.denom.clone(),
                got: self.expected_income.denom.clone(),
            });
        }

        let has_other_chain =
            !self.recipient_other_chain.is_empty() || !self.sender_other_chain.is_empty();
        let has_both_other_chain =
            !self.recipient_other_chain.is_empty() && !self.sender_other_chain.is_empty();
        if self.cross_chain && !has_both_other_chain {
            return Err(SwapError::InvalidOtherChainFields(
                "cross-chain swap requires both other-chain addresses".to_string(),
            ));
        }
        if !self.cross_chain && has_other_chain {
            return Err(SwapError::InvalidOtherChainFields(
                "same-chain swap must not set other-chain addresses".to_string(),
            ));
        }
        Ok(coin)
    }
}

/// Add funds to an incremental swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositIncrementalSwapRequest {
    /// Depositing account.
    pub from: AccAddress,
    /// Target swap.
    pub swap_id: SwapId,
    /// Deposit, exactly one coin.
    pub amount: Vec<Coin>,
}

impl DepositIncrementalSwapRequest {
    /// Stateless checks.
    pub fn validate_basic(&self) -> SwapResult<&Coin> {
        require_address(&self.from, "depositor")?;
        invariant_single_coin(&self.amount)
    }
}
