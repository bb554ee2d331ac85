//! Ballot policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs fixed when a ballot is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallotConfig {
    /// Maximum delegation links followed when resolving a delegate.
    /// `None` leaves chains unbounded.
    pub max_delegation_hops: Option<usize>,
    /// Reject votes and delegations from (and delegations to) identities
    /// holding no weight.
    pub require_voting_rights: bool,
}

impl BallotConfig {
    /// Bound delegation resolution to `hops` links.
    pub fn with_max_delegation_hops(mut self, hops: usize) -> Self {
        self.max_delegation_hops = Some(hops);
        self
    }

    /// Require voting rights for voting and delegating.
    pub fn with_required_rights(mut self) -> Self {
        self.require_voting_rights = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded_and_permissive() {
        let config = BallotConfig::default();
        assert_eq!(config.max_delegation_hops, None);
        assert!(!config.require_voting_rights);
    }

    #[test]
    fn test_builders() {
        let config = BallotConfig::default()
            .with_max_delegation_hops(8)
            .with_required_rights();
        assert_eq!(config.max_delegation_hops, Some(8));
        assert!(config.require_voting_rights);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: BallotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, BallotConfig::default());
    }
}
