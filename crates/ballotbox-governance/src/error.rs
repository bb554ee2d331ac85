use ballotbox_types::TypesError;
use thiserror::Error;

/// Errors that can occur in ballot operations.
///
/// Every error aborts only the requested operation; state is left as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("Caller is not the ballot authority")]
    NotAuthority,

    #[error("Already voted")]
    AlreadyVoted,

    #[error("Voter already has voting rights")]
    AlreadyHasRights,

    #[error("Self-delegation not allowed")]
    SelfDelegation,

    #[error("Delegation cycle detected")]
    DelegationCycle,

    #[error("Delegation chain exceeds {max_hops} hops")]
    DelegationTooDeep { max_hops: usize },

    #[error("Option index {index} out of range (options: {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("No voting rights")]
    NoVotingRights,

    #[error("Vote weight overflow")]
    WeightOverflow,

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Types(#[from] TypesError),
}
