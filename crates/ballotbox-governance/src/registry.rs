//! Option registry.
//!
//! Holds the ordered, fixed-length list of options a ballot was created with.
//! Options are never added, removed, reordered or renamed after construction;
//! only their vote counts move.

use ballotbox_types::OptionLabel;
use serde::{Deserialize, Serialize};
use crate::error::BallotError;

/// A candidate choice with its accumulated vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotOption {
    /// Option name
    pub name: OptionLabel,
    /// Weighted votes credited so far
    pub vote_count: u64,
}

impl BallotOption {
    /// Create an option with no votes.
    pub fn new(name: OptionLabel) -> Self {
        Self { name, vote_count: 0 }
    }
}

/// Ordered option list, indexed `0..len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    options: Vec<BallotOption>,
}

impl Registry {
    /// Create a registry from labels, preserving their order.
    pub fn new(labels: impl IntoIterator<Item = OptionLabel>) -> Self {
        Self {
            options: labels.into_iter().map(BallotOption::new).collect(),
        }
    }

    pub(crate) fn from_options(options: Vec<BallotOption>) -> Self {
        Self { options }
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Get an option by index.
    pub fn get(&self, index: usize) -> Result<&BallotOption, BallotError> {
        self.options.get(index).ok_or(BallotError::OutOfRange {
            index,
            len: self.options.len(),
        })
    }

    /// Iterate options in index order.
    pub fn iter(&self) -> impl Iterator<Item = &BallotOption> {
        self.options.iter()
    }

    /// Sum of all vote counts.
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.vote_count).sum()
    }

    /// Whether `amount` can be credited to `index` without overflow.
    pub(crate) fn check_add(&self, index: usize, amount: u64) -> Result<(), BallotError> {
        self.get(index)?
            .vote_count
            .checked_add(amount)
            .map(|_| ())
            .ok_or(BallotError::WeightOverflow)
    }

    /// Credit `amount` votes to the option at `index`.
    pub(crate) fn add_votes(&mut self, index: usize, amount: u64) -> Result<(), BallotError> {
        self.check_add(index, amount)?;
        // check_add proved the index and the sum
        self.options[index].vote_count += amount;
        Ok(())
    }

    /// Index of the option with the most votes.
    ///
    /// Only a strictly greater count displaces the running winner, so ties go
    /// to the earliest index. Returns 0 when nothing has been voted.
    pub fn winning_index(&self) -> usize {
        let mut winning_count = 0u64;
        let mut winner = 0usize;
        for (index, option) in self.options.iter().enumerate() {
            if option.vote_count > winning_count {
                winning_count = option.vote_count;
                winner = index;
            }
        }
        winner
    }

    pub(crate) fn into_options(self) -> Vec<BallotOption> {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<OptionLabel> {
        names.iter().map(|n| OptionLabel::new(n).unwrap()).collect()
    }

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new(labels(&["A", "B", "C"]));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(1).unwrap().name.as_str(), "B");
        assert!(registry.iter().all(|o| o.vote_count == 0));
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = Registry::new(labels(&["A", "B"]));
        assert_eq!(
            registry.get(2),
            Err(BallotError::OutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_add_votes() {
        let mut registry = Registry::new(labels(&["A", "B"]));
        registry.add_votes(1, 3).unwrap();
        registry.add_votes(1, 2).unwrap();
        assert_eq!(registry.get(1).unwrap().vote_count, 5);
        assert_eq!(registry.total_votes(), 5);
        assert!(registry.add_votes(7, 1).is_err());
    }

    #[test]
    fn test_add_votes_overflow() {
        let mut registry = Registry::new(labels(&["A"]));
        registry.add_votes(0, u64::MAX).unwrap();
        assert_eq!(registry.add_votes(0, 1), Err(BallotError::WeightOverflow));
        assert_eq!(registry.get(0).unwrap().vote_count, u64::MAX);
    }

    #[test]
    fn test_winning_index_ties_go_to_earliest() {
        let mut registry = Registry::new(labels(&["A", "B", "C"]));
        assert_eq!(registry.winning_index(), 0);

        registry.add_votes(1, 2).unwrap();
        registry.add_votes(2, 2).unwrap();
        assert_eq!(registry.winning_index(), 1);

        registry.add_votes(2, 1).unwrap();
        assert_eq!(registry.winning_index(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new(Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.winning_index(), 0);
        assert!(registry.get(0).is_err());
    }
}
