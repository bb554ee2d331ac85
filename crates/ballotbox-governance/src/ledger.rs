//! Rights ledger.
//!
//! One `VoterRecord` per identity. Identities that were never written read
//! back as the zero record; writes are only reachable from the tally engine.

use std::collections::BTreeMap;
use ballotbox_types::Address;
use serde::{Deserialize, Serialize};

/// Per-identity voting state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    /// Votes this record carries, including weight delegated to it.
    /// Zero means the identity was never granted rights.
    pub weight: u64,
    /// Set once by voting or delegating, never cleared
    pub voted: bool,
    /// Resolved delegate, if this record delegated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Address>,
    /// Chosen option index, if this record voted directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<usize>,
}

impl VoterRecord {
    /// Whether the identity holds voting rights.
    pub fn has_rights(&self) -> bool {
        self.weight != 0
    }

    /// Whether the record has delegated its weight away.
    pub fn is_delegating(&self) -> bool {
        self.delegate.is_some()
    }
}

/// Mapping from identity to voter record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RightsLedger {
    records: BTreeMap<Address, VoterRecord>,
}

impl RightsLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: BTreeMap<Address, VoterRecord>) -> Self {
        Self { records }
    }

    /// Get the record for an identity, or the zero record if none exists.
    pub fn get(&self, voter: &Address) -> VoterRecord {
        self.records.get(voter).copied().unwrap_or_default()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate materialized records in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &VoterRecord)> {
        self.records.iter()
    }

    /// Delegate link of an identity, if any.
    pub fn delegate_of(&self, voter: &Address) -> Option<Address> {
        self.records.get(voter).and_then(|r| r.delegate)
    }

    fn entry(&mut self, voter: Address) -> &mut VoterRecord {
        self.records.entry(voter).or_default()
    }

    pub(crate) fn set_weight(&mut self, voter: Address, weight: u64) {
        self.entry(voter).weight = weight;
    }

    pub(crate) fn set_voted(&mut self, voter: Address) {
        self.entry(voter).voted = true;
    }

    pub(crate) fn set_delegate(&mut self, voter: Address, delegate: Address) {
        self.entry(voter).delegate = Some(delegate);
    }

    pub(crate) fn set_vote(&mut self, voter: Address, option: usize) {
        self.entry(voter).vote = Some(option);
    }

    pub(crate) fn into_records(self) -> BTreeMap<Address, VoterRecord> {
        self.records
    }
}
