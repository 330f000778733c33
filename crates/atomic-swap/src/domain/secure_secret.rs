//! # Secure Secret Type
//!
//! Wrapper for the swap preimage ("random number") that zeroizes memory on drop.
//!
//! The secret occupies a fixed 32-byte slot in the commitment preimage.
//! Shorter secrets are right-padded with zeros; longer ones are rejected.

use super::errors::{SwapError, SwapResult};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the secret slot in the commitment preimage.
pub const RANDOM_NUMBER_LENGTH: usize = 32;

/// A secure secret that zeroizes on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureSecret {
    /// Zero-padded secret slot.
    inner: [u8; RANDOM_NUMBER_LENGTH],
    /// Number of bytes actually supplied.
    len: usize,
}

impl SecureSecret {
    /// Create a new secure secret from a full slot.
    pub fn new(bytes: [u8; RANDOM_NUMBER_LENGTH]) -> Self {
        Self {
            inner: bytes,
            len: RANDOM_NUMBER_LENGTH,
        }
    }

    /// Create from a slice of at most 32 bytes.
    pub fn from_slice(slice: &[u8]) -> SwapResult<Self> {
        if slice.len() > RANDOM_NUMBER_LENGTH {
            return Err(SwapError::InvalidSecretLength(slice.len()));
        }
        let mut inner = [0u8; RANDOM_NUMBER_LENGTH];
        inner[..slice.len()].copy_from_slice(slice);
        Ok(Self {
            inner,
            len: slice.len(),
        })
    }

    /// The padded commitment slot.
    pub fn slot(&self) -> &[u8; RANDOM_NUMBER_LENGTH] {
        &self.inner
    }

    /// The bytes as supplied, without padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner[..self.len]
    }

    /// Hex of the supplied bytes, for publication once claimed.
    pub fn reveal_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl std::fmt::Debug for SecureSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual secret
        f.write_str("SecureSecret(***)")
    }
}

impl Serialize for SecureSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.reveal_hex())
    }
}

impl<'de> Deserialize<'de> for SecureSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}
