//! Ballotbox Types - Identity and label types shared by the ballotbox crates.
//!
//! This crate provides:
//! - Addresses (20-byte identities, Bech32m encoded)
//! - Option labels (fixed-size 32-byte names)

pub mod address;
pub mod label;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use label::OptionLabel;
pub use error::TypesError;
