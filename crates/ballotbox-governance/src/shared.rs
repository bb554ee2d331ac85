//! Thread-safe ballot handle.
//!
//! Mutations serialize on the write lock, so operations are totally ordered.
//! Readers share the read lock and only ever observe committed state.

use std::sync::Arc;
use ballotbox_types::{Address, OptionLabel};
use parking_lot::RwLock;
use crate::error::BallotError;
use crate::ledger::VoterRecord;
use crate::snapshot::BallotSnapshot;
use crate::tally::Ballot;

/// Cloneable handle to a ballot shared between threads.
#[derive(Debug, Clone)]
pub struct SharedBallot {
    inner: Arc<RwLock<Ballot>>,
}

impl SharedBallot {
    pub fn new(ballot: Ballot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ballot)),
        }
    }

    pub fn grant_rights(&self, caller: Address, target: Address) -> Result<(), BallotError> {
        self.inner.write().grant_rights(caller, target)
    }

    pub fn delegate(&self, caller: Address, target: Address) -> Result<Address, BallotError> {
        self.inner.write().delegate(caller, target)
    }

    pub fn vote(&self, caller: Address, index: usize) -> Result<(), BallotError> {
        self.inner.write().vote(caller, index)
    }

    pub fn winning_option(&self) -> usize {
        self.inner.read().winning_option()
    }

    pub fn winner_label(&self) -> Result<OptionLabel, BallotError> {
        self.inner.read().winner_label()
    }

    pub fn voter(&self, voter: &Address) -> VoterRecord {
        self.inner.read().voter(voter)
    }

    pub fn snapshot(&self) -> BallotSnapshot {
        self.inner.read().snapshot()
    }

    /// Run a read-only closure against a consistent view of the ballot.
    pub fn read<R>(&self, f: impl FnOnce(&Ballot) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }
}

impl From<Ballot> for SharedBallot {
    fn from(ballot: Ballot) -> Self {
        Self::new(ballot)
    }
}
