//! # Algorithms Module
//!
//! Pure functions shared by both swap lanes.

pub mod commitment;

pub use commitment::{
    calculate_random_hash, calculate_swap_id, generate_random_number, verify_claim_secret,
    TIMESTAMP_LENGTH,
};
