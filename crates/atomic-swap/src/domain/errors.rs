//! # Domain Errors
//!
//! Error types for the swap registry, supply ledger and incremental lane.

use super::value_objects::SwapStatus;
use thiserror::Error;

/// Hash type (32-byte SHA-256).
pub type Hash = [u8; 32];

/// Swap identifier, derived from commitment, sender and sender-other-chain.
pub type SwapId = Hash;

/// Failure class of a [`SwapError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-bounds input, rejected before any effect.
    Validation,
    /// Unknown swap id.
    NotFound,
    /// Duplicate swap id, or the swap is in the wrong state for the request.
    Conflict,
    /// The asset supply cap would be breached.
    LimitExceeded,
    /// The escrow ledger refused the transfer.
    Transfer,
}

/// Failure reported by the ledger collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Source account cannot cover the transfer.
    #[error("insufficient funds in {account}: need {needed}{denom}, have {available}{denom}")]
    InsufficientFunds {
        /// Hex-encoded source account.
        account: String,
        /// Coin denomination.
        denom: String,
        /// Amount requested.
        needed: u128,
        /// Amount held.
        available: u128,
    },

    /// Ledger refused or could not process the request.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Swap error types.
#[derive(Debug, Error)]
pub enum SwapError {
    /// Height span outside the configured lock window.
    #[error("invalid height span {span}: must be within [{min}, {max}]")]
    InvalidHeightSpan {
        /// Requested span
        span: u64,
        /// Params minimum
        min: u64,
        /// Params maximum
        max: u64,
    },

    /// Commitment timestamp too far from current block time.
    #[error("invalid timestamp {timestamp}: must be within [{earliest}, {latest}]")]
    InvalidTimestamp {
        /// Supplied timestamp
        timestamp: i64,
        /// Earliest accepted
        earliest: i64,
        /// Latest accepted
        latest: i64,
    },

    /// Account identifier is empty.
    #[error("invalid (empty) {0} address")]
    EmptyAddress(&'static str),

    /// Amount is malformed (wrong coin count, zero, empty denom).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Denom is not in the supported asset table.
    #[error("asset not supported: {0}")]
    AssetNotSupported(String),

    /// Denom is supported but paused.
    #[error("asset not active: {0}")]
    AssetNotActive(String),

    /// Revealed secret does not unlock the swap.
    #[error("invalid claim secret: computed {computed}, expected {expected}")]
    InvalidClaimSecret {
        /// Hex swap id recomputed from the secret
        computed: String,
        /// Hex swap id of the record
        expected: String,
    },

    /// Revealed secret longer than the commitment slot.
    #[error("secret is {0} bytes, at most 32 allowed")]
    InvalidSecretLength(usize),

    /// Deposit denom differs from the swap's denom.
    #[error("invalid coin denom: expected {expected}, got {got}")]
    DenomMismatch {
        /// Swap denom
        expected: String,
        /// Deposited denom
        got: String,
    },

    /// Other-chain fields inconsistent with the cross-chain flag.
    #[error("invalid other-chain fields: {0}")]
    InvalidOtherChainFields(String),

    /// Parameter set rejected.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Checked arithmetic overflowed.
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),

    /// No one-shot swap under this id.
    #[error("atomic swap not found: {}", hex::encode(.0))]
    AtomicSwapNotFound(SwapId),

    /// No incremental swap under this id.
    #[error("incremental swap not found: {}", hex::encode(.0))]
    IncrementalSwapNotFound(SwapId),

    /// One-shot swap id already registered.
    #[error("atomic swap already exists: {}", hex::encode(.0))]
    AtomicSwapAlreadyExists(SwapId),

    /// Incremental swap id already registered.
    #[error("incremental swap already exists: {}", hex::encode(.0))]
    IncrementalSwapAlreadyExists(SwapId),

    /// Swap is not open.
    #[error("swap not open: status is {0}")]
    SwapNotOpen(SwapStatus),

    /// Claim attempted after expire height.
    #[error("atomic swap has expired at height {expire_height} (current {current_height})")]
    AtomicSwapHasExpired {
        /// Record expire height
        expire_height: u64,
        /// Current chain height
        current_height: u64,
    },

    /// Refund attempted at or before expire height.
    #[error("swap not refundable until after height {expire_height} (current {current_height})")]
    SwapNotRefundable {
        /// Record expire height
        expire_height: u64,
        /// Current chain height
        current_height: u64,
    },

    /// Supply cap would be breached.
    #[error("asset supply limit exceeded for {denom}: {current} + {proposed} > {limit}")]
    SupplyLimitExceeded {
        /// Coin denomination
        denom: String,
        /// Current active supply
        current: u128,
        /// Proposed increase
        proposed: u128,
        /// Configured limit
        limit: u128,
    },

    /// Escrow transfer failed.
    #[error("escrow transfer failed: {0}")]
    Transfer(#[from] LedgerError),
}

impl SwapError {
    /// Taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidHeightSpan { .. }
            | Self::InvalidTimestamp { .. }
            | Self::EmptyAddress(_)
            | Self::InvalidAmount(_)
            | Self::AssetNotSupported(_)
            | Self::AssetNotActive(_)
            | Self::InvalidClaimSecret { .. }
            | Self::InvalidSecretLength(_)
            | Self::DenomMismatch { .. }
            | Self::InvalidOtherChainFields(_)
            | Self::InvalidParams(_)
            | Self::Overflow(_) => ErrorKind::Validation,
            Self::AtomicSwapNotFound(_) | Self::IncrementalSwapNotFound(_) => ErrorKind::NotFound,
            Self::AtomicSwapAlreadyExists(_)
            | Self::IncrementalSwapAlreadyExists(_)
            | Self::SwapNotOpen(_)
            | Self::AtomicSwapHasExpired { .. }
            | Self::SwapNotRefundable { .. } => ErrorKind::Conflict,
            Self::SupplyLimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::Transfer(_) => ErrorKind::Transfer,
        }
    }
}

/// Result type for swap operations.
pub type SwapResult<T> = Result<T, SwapError>;
