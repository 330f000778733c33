//! Outgoing swap notifications
//!
//! Delivered fire-and-forget to an [`EventSink`](crate::ports::EventSink);
//! state transitions never depend on delivery.

use crate::domain::{AccAddress, AtomicSwap, Coin, IncrementalSwap, SwapId};
use serde::{Deserialize, Serialize};

/// Notification emitted after a successful operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum SwapEvent {
    /// One-shot swap created and funds escrowed.
    CreateAtomicSwap {
        sender: AccAddress,
        recipient: AccAddress,
        swap_id: String,
        random_number_hash: String,
        timestamp: i64,
        sender_other_chain: String,
        recipient_other_chain: String,
        expire_height: u64,
        amount: Coin,
        expected_income: String,
    },
    /// Swap claimed; the secret is public from here on.
    ClaimAtomicSwap {
        claim_sender: AccAddress,
        recipient: AccAddress,
        swap_id: String,
        random_number_hash: String,
        random_number: String,
    },
    /// Expired swap refunded to its sender.
    RefundAtomicSwap {
        refund_sender: AccAddress,
        sender: AccAddress,
        swap_id: String,
        random_number_hash: String,
    },
    /// Incremental swap opened.
    CreateIncrementalSwap {
        swap_id: String,
        from: AccAddress,
        to: AccAddress,
        amount: Coin,
    },
    /// Deposit added to an incremental swap.
    DepositIncrementalSwap {
        swap_id: String,
        depositor: AccAddress,
        amount: Coin,
    },
}

impl SwapEvent {
    /// Creation notification for a freshly stored swap.
    pub fn created(
        swap: &AtomicSwap,
        recipient_other_chain: &str,
        expected_income: &str,
    ) -> Self {
        Self::CreateAtomicSwap {
            sender: swap.sender.clone(),
            recipient: swap.recipient.clone(),
            swap_id: hex::encode(swap.swap_id),
            random_number_hash: hex::encode(swap.random_number_hash),
            timestamp: swap.timestamp,
            sender_other_chain: swap.sender_other_chain.clone(),
            recipient_other_chain: recipient_other_chain.to_string(),
            expire_height: swap.expire_height,
            amount: swap.amount.clone(),
            expected_income: expected_income.to_string(),
        }
    }

    /// Claim notification carrying the revealed secret.
    pub fn claimed(swap: &AtomicSwap, claimer: &AccAddress, revealed_hex: String) -> Self {
        Self::ClaimAtomicSwap {
            claim_sender: claimer.clone(),
            recipient: swap.recipient.clone(),
            swap_id: hex::encode(swap.swap_id),
            random_number_hash: hex::encode(swap.random_number_hash),
            random_number: revealed_hex,
        }
    }

    /// Refund notification.
    pub fn refunded(swap: &AtomicSwap, refunder: &AccAddress) -> Self {
        Self::RefundAtomicSwap {
            refund_sender: refunder.clone(),
            sender: swap.sender.clone(),
            swap_id: hex::encode(swap.swap_id),
            random_number_hash: hex::encode(swap.random_number_hash),
        }
    }

    /// Incremental swap creation notification.
    pub fn incremental_created(swap: &IncrementalSwap) -> Self {
        Self::CreateIncrementalSwap {
            swap_id: hex::encode(swap.swap_id),
            from: swap.from.clone(),
            to: swap.to.clone(),
            amount: swap.amount.clone(),
        }
    }

    /// Deposit notification.
    pub fn deposited(swap_id: &SwapId, depositor: &AccAddress, amount: &Coin) -> Self {
        Self::DepositIncrementalSwap {
            swap_id: hex::encode(swap_id),
            depositor: depositor.clone(),
            amount: amount.clone(),
        }
    }

    /// Short event name, used as the log target label.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAtomicSwap { .. } => "create_atomic_swap",
            Self::ClaimAtomicSwap { .. } => "claim_atomic_swap",
            Self::RefundAtomicSwap { .. } => "refund_atomic_swap",
            Self::CreateIncrementalSwap { .. } => "create_incremental_swap",
            Self::DepositIncrementalSwap { .. } => "deposit_incremental_swap",
        }
    }
}
