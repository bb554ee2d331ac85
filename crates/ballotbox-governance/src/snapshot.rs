//! Ballot snapshots.
//!
//! A snapshot is the complete logical state of a ballot in a serde-friendly
//! shape. Restoring re-checks the ledger invariants and bounds every option's
//! count by the weight the ledger can account for, so a hand-edited or
//! corrupted snapshot cannot forge records or tallies.

use std::collections::{BTreeMap, HashSet};
use ballotbox_types::Address;
use serde::{Deserialize, Serialize};
use crate::config::BallotConfig;
use crate::error::BallotError;
use crate::ledger::{RightsLedger, VoterRecord};
use crate::registry::{BallotOption, Registry};
use crate::tally::Ballot;

/// Serializable ballot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotSnapshot {
    pub authority: Address,
    #[serde(default)]
    pub config: BallotConfig,
    pub options: Vec<BallotOption>,
    pub voters: BTreeMap<Address, VoterRecord>,
}

impl Ballot {
    /// Capture the current state.
    pub fn snapshot(&self) -> BallotSnapshot {
        BallotSnapshot {
            authority: self.authority,
            config: self.config.clone(),
            options: self.registry.iter().cloned().collect(),
            voters: self.ledger.iter().map(|(a, r)| (*a, *r)).collect(),
        }
    }

    /// Rebuild a ballot from a snapshot.
    ///
    /// # Errors
    /// `InvalidSnapshot` if the snapshot breaks a ledger invariant.
    pub fn restore(snapshot: BallotSnapshot) -> Result<Self, BallotError> {
        validate(&snapshot)?;

        Ok(Self {
            authority: snapshot.authority,
            config: snapshot.config,
            registry: Registry::from_options(snapshot.options),
            ledger: RightsLedger::from_records(snapshot.voters),
        })
    }

    /// Consume the ballot into its snapshot.
    pub fn into_snapshot(self) -> BallotSnapshot {
        BallotSnapshot {
            authority: self.authority,
            config: self.config,
            options: self.registry.into_options(),
            voters: self.ledger.into_records(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> BallotError {
    BallotError::InvalidSnapshot(msg.into())
}

fn validate(snapshot: &BallotSnapshot) -> Result<(), BallotError> {
    let authority_weight = snapshot
        .voters
        .get(&snapshot.authority)
        .map(|r| r.weight)
        .unwrap_or(0);
    if authority_weight == 0 {
        return Err(invalid("authority has no voting weight"));
    }

    for (voter, record) in &snapshot.voters {
        match (record.voted, record.vote, record.delegate) {
            (false, None, None) => {}
            (true, Some(index), None) => {
                if index >= snapshot.options.len() {
                    return Err(invalid(format!(
                        "{} voted for option {} of {}",
                        voter,
                        index,
                        snapshot.options.len()
                    )));
                }
            }
            (true, None, Some(delegate)) => {
                if delegate == *voter {
                    return Err(invalid(format!("{} delegates to itself", voter)));
                }
                if !snapshot.voters.contains_key(&delegate) {
                    return Err(invalid(format!(
                        "{} delegates to unknown identity {}",
                        voter, delegate
                    )));
                }
            }
            _ => {
                return Err(invalid(format!(
                    "{} must either vote or delegate exactly once",
                    voter
                )));
            }
        }
    }

    validate_tallies(snapshot)?;

    for start in snapshot.voters.keys() {
        let mut visited = HashSet::new();
        let mut current = *start;
        while let Some(next) = snapshot.voters.get(&current).and_then(|r| r.delegate) {
            if !visited.insert(current) {
                return Err(invalid(format!("delegation cycle through {}", current)));
            }
            current = next;
        }
    }

    Ok(())
}

/// Option counts must fit the ledger.
///
/// A direct vote's weight is frozen once cast, so each option holds at least
/// the weight of its direct voters. Every credited unit came from a record
/// that has since voted or delegated, and delegators keep their weight field,
/// so the grand total never exceeds the weight of all voted records.
fn validate_tallies(snapshot: &BallotSnapshot) -> Result<(), BallotError> {
    let mut direct = vec![0u128; snapshot.options.len()];
    let mut finalized = 0u128;
    for record in snapshot.voters.values().filter(|r| r.voted) {
        finalized += u128::from(record.weight);
        if let Some(slot) = record.vote.and_then(|index| direct.get_mut(index)) {
            *slot += u128::from(record.weight);
        }
    }

    for (index, (option, floor)) in snapshot.options.iter().zip(&direct).enumerate() {
        if u128::from(option.vote_count) < *floor {
            return Err(invalid(format!(
                "option {} has {} votes but its direct voters weigh {}",
                index, option.vote_count, floor
            )));
        }
    }

    let counted: u128 = snapshot.options.iter().map(|o| u128::from(o.vote_count)).sum();
    if counted > finalized {
        return Err(invalid(format!(
            "options hold {} votes but voted records only weigh {}",
            counted, finalized
        )));
    }

    Ok(())
}
