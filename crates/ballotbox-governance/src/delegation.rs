//! Delegation resolution.
//!
//! Voters may hand their weight to another voter, who may have delegated in
//! turn. Resolution walks those links to the terminal delegate and refuses
//! any walk that returns to the delegating voter.
//!
//! Everything here is a pure read of the ledger.

use std::collections::{HashMap, HashSet, VecDeque};
use ballotbox_types::Address;
use tracing::debug;
use crate::error::BallotError;
use crate::ledger::RightsLedger;

/// Resolve the terminal delegate for `from` delegating to `to`.
///
/// Follows delegate links starting at `to` until reaching an identity that
/// has not delegated. `max_hops` bounds how many links may be followed past
/// `to`; `None` leaves the walk unbounded.
///
/// # Errors
/// - `DelegationCycle` if the walk reaches `from` or revisits an identity
/// - `DelegationTooDeep` if more than `max_hops` links would be followed
pub fn resolve_delegate(
    ledger: &RightsLedger,
    from: Address,
    to: Address,
    max_hops: Option<usize>,
) -> Result<Address, BallotError> {
    let mut visited = HashSet::new();
    visited.insert(from);

    let mut current = to;
    let mut hops = 0usize;
    loop {
        if !visited.insert(current) {
            return Err(BallotError::DelegationCycle);
        }

        let Some(next) = ledger.delegate_of(&current) else {
            return Ok(current);
        };

        if let Some(max) = max_hops {
            if hops >= max {
                return Err(BallotError::DelegationTooDeep { max_hops: max });
            }
        }
        hops += 1;
        debug!(from = %from, hop = hops, via = %current, next = %next, "following delegation");
        current = next;
    }
}

/// Full delegation path starting at `start`, ending at its terminal delegate.
///
/// The first element is always `start`. A voter that has not delegated
/// yields a single-element path.
pub fn delegation_chain(ledger: &RightsLedger, start: Address) -> Vec<Address> {
    let mut chain = vec![start];
    let mut visited = HashSet::new();
    visited.insert(start);

    let mut current = start;
    while let Some(next) = ledger.delegate_of(&current) {
        if !visited.insert(next) {
            break;
        }
        chain.push(next);
        current = next;
    }

    chain
}

/// Identities whose weight flows through `target`, nearest first.
///
/// Each entry pairs a delegator with its distance in links from `target`
/// (1 for a direct delegator). Builds one reverse index over the ledger and
/// walks it breadth first, so the order is by distance, then by address.
pub fn inbound_delegators(ledger: &RightsLedger, target: Address) -> Vec<(Address, usize)> {
    let mut inbound: HashMap<Address, Vec<Address>> = HashMap::new();
    for (voter, record) in ledger.iter() {
        if let Some(delegate) = record.delegate {
            inbound.entry(delegate).or_default().push(*voter);
        }
    }

    let mut found = Vec::new();
    let mut seen = HashSet::from([target]);
    let mut queue = VecDeque::from([(target, 0usize)]);
    while let Some((current, depth)) = queue.pop_front() {
        for voter in inbound.get(&current).into_iter().flatten() {
            if seen.insert(*voter) {
                found.push((*voter, depth + 1));
                queue.push_back((*voter, depth + 1));
            }
        }
    }

    found
}
