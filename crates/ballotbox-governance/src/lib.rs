//! Ballotbox Governance - Delegated voting with a single rights authority.
//!
//! This crate provides:
//! - The option registry
//! - The rights ledger of per-identity voter records
//! - Transitive delegation resolution with cycle detection
//! - The tally engine tying them together, plus snapshots and a shared handle

pub mod registry;
pub mod ledger;
pub mod delegation;
pub mod tally;
pub mod snapshot;
pub mod shared;
pub mod config;
pub mod error;

pub use registry::{BallotOption, Registry};
pub use ledger::{RightsLedger, VoterRecord};
pub use delegation::{delegation_chain, inbound_delegators, resolve_delegate};
pub use tally::Ballot;
pub use snapshot::BallotSnapshot;
pub use shared::SharedBallot;
pub use config::BallotConfig;
pub use error::BallotError;
