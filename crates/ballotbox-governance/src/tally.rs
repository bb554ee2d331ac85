//! Tally engine.
//!
//! `Ballot` owns the registry and the rights ledger and is the only writer of
//! either. Each mutating operation checks every precondition (including the
//! delegation walk and overflow) before its first write, so a failed call
//! leaves the ballot exactly as it found it.

use ballotbox_types::{Address, OptionLabel};
use tracing::{info, warn};
use crate::config::BallotConfig;
use crate::delegation::resolve_delegate;
use crate::error::BallotError;
use crate::ledger::{RightsLedger, VoterRecord};
use crate::registry::{BallotOption, Registry};

/// A single ballot: options, voters and the authority that enrolls them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub(crate) authority: Address,
    pub(crate) config: BallotConfig,
    pub(crate) registry: Registry,
    pub(crate) ledger: RightsLedger,
}

impl Ballot {
    /// Create a ballot with default policy. The authority starts with weight 1.
    pub fn new(authority: Address, labels: impl IntoIterator<Item = OptionLabel>) -> Self {
        Self::with_config(authority, labels, BallotConfig::default())
    }

    /// Create a ballot with an explicit policy.
    pub fn with_config(
        authority: Address,
        labels: impl IntoIterator<Item = OptionLabel>,
        config: BallotConfig,
    ) -> Self {
        let registry = Registry::new(labels);
        let mut ledger = RightsLedger::new();
        ledger.set_weight(authority, 1);

        info!(
            authority = %authority,
            options = registry.len(),
            max_delegation_hops = ?config.max_delegation_hops,
            "ballot initialized"
        );

        Self { authority, config, registry, ledger }
    }

    /// Create a ballot from option names.
    ///
    /// # Errors
    /// Fails if any name is not a valid `OptionLabel`.
    pub fn from_names<S: AsRef<str>>(
        authority: Address,
        names: &[S],
        config: BallotConfig,
    ) -> Result<Self, BallotError> {
        let labels = names
            .iter()
            .map(|name| OptionLabel::new(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_config(authority, labels, config))
    }

    /// Give `target` the right to vote. Only the authority may call this.
    ///
    /// # Errors
    /// - `NotAuthority` if `caller` is not the authority
    /// - `AlreadyVoted` if `target` has voted or delegated
    /// - `AlreadyHasRights` if `target` already carries weight
    pub fn grant_rights(&mut self, caller: Address, target: Address) -> Result<(), BallotError> {
        self.check_grant(caller, target)
            .map_err(|e| rejected("grant_rights", caller, e))?;

        self.ledger.set_weight(target, 1);
        info!(caller = %caller, target = %target, "voting rights granted");
        Ok(())
    }

    fn check_grant(&self, caller: Address, target: Address) -> Result<(), BallotError> {
        if caller != self.authority {
            return Err(BallotError::NotAuthority);
        }
        let record = self.ledger.get(&target);
        if record.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if record.weight != 0 {
            return Err(BallotError::AlreadyHasRights);
        }
        Ok(())
    }

    /// Delegate the caller's weight to `target`.
    ///
    /// The target is resolved to the end of its delegation chain. If that
    /// delegate already voted, the caller's weight is credited to its option
    /// immediately; otherwise it is added to the delegate's weight.
    ///
    /// Returns the resolved delegate.
    ///
    /// # Errors
    /// - `AlreadyVoted` if the caller has voted or delegated
    /// - `SelfDelegation` if `target == caller`
    /// - `DelegationCycle` / `DelegationTooDeep` from resolution
    /// - `NoVotingRights` when rights are required and either side has none
    /// - `WeightOverflow` if the credit would overflow
    pub fn delegate(&mut self, caller: Address, target: Address) -> Result<Address, BallotError> {
        let plan = self
            .plan_delegation(caller, target)
            .map_err(|e| rejected("delegate", caller, e))?;

        match plan.credit {
            Credit::Option(index) => self.registry.add_votes(index, plan.weight)?,
            Credit::Delegate(new_weight) => self.ledger.set_weight(plan.delegate, new_weight),
        }
        self.ledger.set_voted(caller);
        self.ledger.set_delegate(caller, plan.delegate);

        info!(
            caller = %caller,
            target = %target,
            delegate = %plan.delegate,
            weight = plan.weight,
            credited = ?plan.credit,
            "weight delegated"
        );
        Ok(plan.delegate)
    }

    fn plan_delegation(
        &self,
        caller: Address,
        target: Address,
    ) -> Result<DelegationPlan, BallotError> {
        let sender = self.ledger.get(&caller);
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if target == caller {
            return Err(BallotError::SelfDelegation);
        }
        if self.config.require_voting_rights && !sender.has_rights() {
            return Err(BallotError::NoVotingRights);
        }

        let delegate = resolve_delegate(
            &self.ledger,
            caller,
            target,
            self.config.max_delegation_hops,
        )?;
        let record = self.ledger.get(&delegate);
        if self.config.require_voting_rights && !record.has_rights() {
            return Err(BallotError::NoVotingRights);
        }

        // A resolved delegate has no outgoing link, so if it voted it voted
        // directly and carries a chosen option.
        let credit = match record.vote {
            Some(index) => {
                self.registry.check_add(index, sender.weight)?;
                Credit::Option(index)
            }
            None => Credit::Delegate(
                record
                    .weight
                    .checked_add(sender.weight)
                    .ok_or(BallotError::WeightOverflow)?,
            ),
        };

        Ok(DelegationPlan { delegate, weight: sender.weight, credit })
    }

    /// Cast the caller's full weight for the option at `index`.
    ///
    /// # Errors
    /// - `AlreadyVoted` if the caller has voted or delegated
    /// - `NoVotingRights` when rights are required and the caller has none
    /// - `OutOfRange` if `index` is not an option
    /// - `WeightOverflow` if the option count would overflow
    pub fn vote(&mut self, caller: Address, index: usize) -> Result<(), BallotError> {
        let weight = self
            .check_vote(caller, index)
            .map_err(|e| rejected("vote", caller, e))?;

        self.registry.add_votes(index, weight)?;
        self.ledger.set_voted(caller);
        self.ledger.set_vote(caller, index);

        info!(caller = %caller, option = index, weight, "vote cast");
        Ok(())
    }

    fn check_vote(&self, caller: Address, index: usize) -> Result<u64, BallotError> {
        let sender = self.ledger.get(&caller);
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if self.config.require_voting_rights && !sender.has_rights() {
            return Err(BallotError::NoVotingRights);
        }
        self.registry.check_add(index, sender.weight)?;
        Ok(sender.weight)
    }

    /// Index of the option with the most votes; ties go to the earliest index
    /// and a ballot with no votes reports 0.
    pub fn winning_option(&self) -> usize {
        self.registry.winning_index()
    }

    /// Name of the winning option.
    ///
    /// # Errors
    /// `OutOfRange` if the ballot has no options.
    pub fn winner_label(&self) -> Result<OptionLabel, BallotError> {
        Ok(self.registry.get(self.winning_option())?.name)
    }

    pub fn authority(&self) -> Address {
        self.authority
    }

    pub fn config(&self) -> &BallotConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ledger(&self) -> &RightsLedger {
        &self.ledger
    }

    pub fn option(&self, index: usize) -> Result<&BallotOption, BallotError> {
        self.registry.get(index)
    }

    pub fn options(&self) -> impl Iterator<Item = &BallotOption> {
        self.registry.iter()
    }

    /// Record for `voter`, or the zero record if it was never written.
    pub fn voter(&self, voter: &Address) -> VoterRecord {
        self.ledger.get(voter)
    }

    pub fn voters(&self) -> impl Iterator<Item = (&Address, &VoterRecord)> {
        self.ledger.iter()
    }

    pub fn total_votes(&self) -> u64 {
        self.registry.total_votes()
    }

    /// Option names paired with their counts, in index order.
    pub fn standings(&self) -> Vec<(OptionLabel, u64)> {
        self.registry.iter().map(|o| (o.name, o.vote_count)).collect()
    }
}

/// Where a delegated weight lands.
#[derive(Debug, Clone, Copy)]
enum Credit {
    /// Added to an option the delegate already chose
    Option(usize),
    /// Delegate's new accumulated weight
    Delegate(u64),
}

struct DelegationPlan {
    delegate: Address,
    weight: u64,
    credit: Credit,
}

fn rejected(operation: &'static str, caller: Address, err: BallotError) -> BallotError {
    warn!(operation, caller = %caller, error = %err, "operation rejected");
    err
}
