//! CLI command implementations.
//!
//! Every mutating command loads the ballot, applies exactly one operation and
//! saves it back. A rejected operation leaves the state file untouched.

use ballotbox_governance::{delegation_chain, inbound_delegators, Ballot, BallotConfig};
use ballotbox_types::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::CliConfig;
use crate::output::*;
use crate::store::StateFile;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "ballotbox")]
#[command(about = "Delegated voting ballot with a single rights authority")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ballot state file (overrides config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
///
/// Identities are Bech32m (`bbx1...`) or hex (`0x...`) addresses, or
/// `@name` as shorthand for the address derived from `name`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new ballot
    Init {
        /// Authority identity (receives weight 1)
        #[arg(long)]
        authority: String,
        /// Option name, in order (repeatable)
        #[arg(long = "option", required = true)]
        options: Vec<String>,
        /// Maximum delegation hops (overrides config)
        #[arg(long)]
        max_hops: Option<usize>,
        /// Require voting rights to vote or delegate
        #[arg(long)]
        require_rights: bool,
        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },
    /// Grant voting rights (authority only)
    Grant {
        /// Calling identity
        #[arg(long)]
        caller: String,
        /// Identity receiving rights
        target: String,
    },
    /// Delegate the caller's weight
    Delegate {
        /// Calling identity
        #[arg(long)]
        caller: String,
        /// Identity receiving the weight
        target: String,
    },
    /// Vote for an option by index
    Vote {
        /// Calling identity
        #[arg(long)]
        caller: String,
        /// Option index
        option: usize,
    },
    /// Show the winning option
    Winner,
    /// Show standings and voters
    Show,
    /// Show the delegation chain starting at an identity
    Chain {
        /// Starting identity
        voter: String,
    },
    /// Derive an address from a seed string
    Address {
        /// Seed
        seed: String,
    },
}

/// Parse an identity argument.
pub fn parse_identity(s: &str) -> anyhow::Result<Address> {
    if let Some(seed) = s.strip_prefix('@') {
        if seed.is_empty() {
            anyhow::bail!("Empty identity name after '@'");
        }
        return Ok(Address::derive(seed.as_bytes()));
    }
    s.parse::<Address>()
        .map_err(|e| anyhow::anyhow!("Invalid identity '{}': {}", s, e))
}

/// Execute a command against the configured state file.
pub fn execute(command: Commands, config: &CliConfig) -> anyhow::Result<()> {
    let store = StateFile::new(&config.state_file);

    match command {
        Commands::Init { authority, options, max_hops, require_rights, force } => {
            let authority = parse_identity(&authority)?;
            let ballot_config = BallotConfig {
                max_delegation_hops: max_hops.or(config.ballot.max_delegation_hops),
                require_voting_rights: require_rights || config.ballot.require_voting_rights,
            };
            let ballot = Ballot::from_names(authority, &options, ballot_config)?;

            let _lock = store.lock()?;
            if store.exists() && !force {
                anyhow::bail!(
                    "Ballot state '{}' already exists (use --force to replace it)",
                    store.path().display()
                );
            }
            store.save(&ballot)?;

            print_success(&format!(
                "Ballot created with {} options, authority {}",
                ballot.registry().len(),
                authority
            ));
        }
        Commands::Grant { caller, target } => {
            let caller = parse_identity(&caller)?;
            let target = parse_identity(&target)?;
            store.update(|ballot| ballot.grant_rights(caller, target))?;

            print_success(&format!("Voting rights granted to {}", target));
        }
        Commands::Delegate { caller, target } => {
            let caller = parse_identity(&caller)?;
            let target = parse_identity(&target)?;
            let (ballot, resolved) = store.update(|ballot| ballot.delegate(caller, target))?;

            print_success(&format!("Weight delegated to {}", resolved));
            if resolved != target {
                print_info(&format!(
                    "{} had delegated onward; weight landed on {}",
                    target, resolved
                ));
            }
            if let Some(index) = ballot.voter(&resolved).vote {
                print_info(&format!("{} already voted; counted for option #{}", resolved, index));
            }
        }
        Commands::Vote { caller, option } => {
            let caller = parse_identity(&caller)?;
            let (ballot, ()) = store.update(|ballot| ballot.vote(caller, option))?;

            let name = ballot.option(option)?.name;
            print_success(&format!("Vote cast for #{} ({})", option, name));
        }
        Commands::Winner => {
            let ballot = store.load()?;
            let index = ballot.winning_option();
            let label = ballot.winner_label()?;
            let votes = ballot.option(index)?.vote_count;
            info!(index, votes, "winner computed");

            println!("{}", label);
            print_info(&format!("option #{} with {} votes", index, votes));
        }
        Commands::Show => {
            let ballot = store.load()?;
            print_ballot(&ballot);
        }
        Commands::Chain { voter } => {
            let voter = parse_identity(&voter)?;
            let ballot = store.load()?;
            let chain = delegation_chain(ballot.ledger(), voter);
            let inbound = inbound_delegators(ballot.ledger(), voter);
            print!("{}", chain_report(&chain, &inbound));
        }
        Commands::Address { seed } => {
            println!("{}", Address::derive(seed.as_bytes()));
        }
    }

    Ok(())
}
