//! # Domain Module
//!
//! Core domain types for the atomic swap registry.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod messages;
pub mod params;
pub mod secure_secret;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use messages::*;
pub use params::*;
pub use secure_secret::{SecureSecret, RANDOM_NUMBER_LENGTH};
pub use value_objects::*;
