//! # Commitment Scheme
//!
//! Random number hash and swap id derivation. Both chains recompute the same
//! swap id independently from public data, so no shared counter is needed.

use crate::domain::{AccAddress, Hash, SecureSecret, SwapId, RANDOM_NUMBER_LENGTH};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Size of the big-endian timestamp suffix in the commitment preimage.
pub const TIMESTAMP_LENGTH: usize = 8;

/// Generate a cryptographically secure random secret.
pub fn generate_random_number() -> SecureSecret {
    let mut secret = [0u8; RANDOM_NUMBER_LENGTH];
    rand::thread_rng().fill_bytes(&mut secret);
    SecureSecret::new(secret)
}

/// Commitment over a secret and timestamp.
///
/// Preimage is the 32-byte secret slot followed by the timestamp as 8
/// big-endian bytes (two's complement for negative values).
pub fn calculate_random_hash(secret: &SecureSecret, timestamp: i64) -> Hash {
    let mut data = [0u8; RANDOM_NUMBER_LENGTH + TIMESTAMP_LENGTH];
    data[..RANDOM_NUMBER_LENGTH].copy_from_slice(secret.slot());
    data[RANDOM_NUMBER_LENGTH..].copy_from_slice(&timestamp.to_be_bytes());
    Sha256::digest(data).into()
}

/// Swap id over `commitment || sender || lowercase(sender_other_chain)`.
pub fn calculate_swap_id(
    random_number_hash: &Hash,
    sender: &AccAddress,
    sender_other_chain: &str,
) -> SwapId {
    let mut hasher = Sha256::new();
    hasher.update(random_number_hash);
    hasher.update(sender.as_bytes());
    hasher.update(sender_other_chain.to_lowercase().as_bytes());
    hasher.finalize().into()
}

/// Verify that a revealed secret unlocks `swap_id`.
///
/// The claimer must reproduce the commitment and the original sender
/// identity, so a secret cannot be replayed against another swap.
pub fn verify_claim_secret(
    secret: &SecureSecret,
    timestamp: i64,
    sender: &AccAddress,
    sender_other_chain: &str,
    swap_id: &SwapId,
) -> Result<(), SwapId> {
    let commitment = calculate_random_hash(secret, timestamp);
    let computed = calculate_swap_id(&commitment, sender, sender_other_chain);
    if computed != *swap_id {
        return Err(computed);
    }
    Ok(())
}
