//! Property tests over random operation sequences.

use ballotbox_governance::{delegation_chain, Ballot, BallotConfig};
use ballotbox_types::Address;
use proptest::prelude::*;

const VOTERS: u8 = 6;
const OPTIONS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    Grant(u8, u8),
    Delegate(u8, u8),
    Vote(u8, usize),
}

fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    Address::from_bytes(bytes)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..VOTERS).prop_map(|t| Op::Grant(0, t)),
        1 => (0..VOTERS, 0..VOTERS).prop_map(|(c, t)| Op::Grant(c, t)),
        4 => (0..VOTERS, 0..VOTERS).prop_map(|(c, t)| Op::Delegate(c, t)),
        3 => (0..VOTERS, 0..OPTIONS + 1).prop_map(|(c, i)| Op::Vote(c, i)),
    ]
}

fn new_ballot(config: BallotConfig) -> Ballot {
    Ballot::from_names(addr(0), &["A", "B", "C"], config).unwrap()
}

/// Weight still held by identities that have not voted or delegated.
fn pending_weight(ballot: &Ballot) -> u64 {
    ballot
        .voters()
        .filter(|(_, r)| !r.voted)
        .map(|(_, r)| r.weight)
        .sum()
}

fn apply(ballot: &mut Ballot, op: &Op) -> bool {
    match *op {
        Op::Grant(c, t) => ballot.grant_rights(addr(c), addr(t)).is_ok(),
        Op::Delegate(c, t) => ballot.delegate(addr(c), addr(t)).is_ok(),
        Op::Vote(c, i) => ballot.vote(addr(c), i).is_ok(),
    }
}

fn config_strategy() -> impl Strategy<Value = BallotConfig> {
    (proptest::option::of(0usize..4), any::<bool>()).prop_map(|(hops, rights)| BallotConfig {
        max_delegation_hops: hops,
        require_voting_rights: rights,
    })
}

proptest! {
    #[test]
    fn weight_is_conserved(
        config in config_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let mut ballot = new_ballot(config);
        let mut granted = 1u64;

        for op in &ops {
            let ok = apply(&mut ballot, op);
            if ok && matches!(op, Op::Grant(..)) {
                granted += 1;
            }
            prop_assert_eq!(ballot.total_votes() + pending_weight(&ballot), granted);
        }
    }

    #[test]
    fn failed_operations_change_nothing(
        config in config_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let mut ballot = new_ballot(config);

        for op in &ops {
            let before = ballot.clone();
            if !apply(&mut ballot, op) {
                prop_assert_eq!(&ballot, &before);
            }
        }
    }

    #[test]
    fn voted_flag_is_monotonic(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut ballot = new_ballot(BallotConfig::default());

        for op in &ops {
            let voted_before: Vec<_> = (0..VOTERS)
                .filter(|n| ballot.voter(&addr(*n)).voted)
                .collect();
            apply(&mut ballot, op);
            for n in voted_before {
                prop_assert!(ballot.voter(&addr(n)).voted);
            }
        }
    }

    #[test]
    fn chains_stay_acyclic_and_restorable(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut ballot = new_ballot(BallotConfig::default());
        for op in &ops {
            apply(&mut ballot, op);
        }

        for n in 0..VOTERS {
            let chain = delegation_chain(ballot.ledger(), addr(n));
            let end = chain[chain.len() - 1];
            prop_assert!(!ballot.voter(&end).is_delegating());
        }

        let restored = Ballot::restore(ballot.snapshot());
        prop_assert!(restored.is_ok());
        prop_assert_eq!(restored.unwrap(), ballot);
    }

    #[test]
    fn winner_has_maximum_count(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut ballot = new_ballot(BallotConfig::default());
        for op in &ops {
            apply(&mut ballot, op);
        }

        let winner = ballot.winning_option();
        let best = ballot.option(winner).unwrap().vote_count;
        for (index, option) in ballot.options().enumerate() {
            prop_assert!(option.vote_count <= best);
            if index < winner {
                prop_assert!(option.vote_count < best);
            }
        }
    }
}
