//! Output formatting utilities.

use ballotbox_governance::{Ballot, VoterRecord};
use ballotbox_types::Address;
use colored::Colorize;
use tabled::{Table, Tabled};

/// Format address (short version).
pub fn format_address_short(addr: &Address) -> String {
    let s = addr.to_string();
    if s.len() > 16 {
        format!("{}...{}", &s[..10], &s[s.len() - 6..])
    } else {
        s
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

#[derive(Tabled)]
struct StandingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Option")]
    name: String,
    #[tabled(rename = "Votes")]
    votes: u64,
}

#[derive(Tabled)]
struct VoterRow {
    #[tabled(rename = "Voter")]
    address: String,
    #[tabled(rename = "Weight")]
    weight: u64,
    #[tabled(rename = "Status")]
    status: String,
}

fn voter_status(record: &VoterRecord) -> String {
    match (record.vote, record.delegate) {
        (Some(index), _) => format!("voted #{}", index),
        (None, Some(delegate)) => format!("delegated to {}", format_address_short(&delegate)),
        (None, None) if record.has_rights() => "pending".to_string(),
        (None, None) => "no rights".to_string(),
    }
}

/// Standings table, one row per option in index order.
pub fn standings_table(ballot: &Ballot) -> String {
    let rows: Vec<StandingRow> = ballot
        .standings()
        .into_iter()
        .enumerate()
        .map(|(index, (name, votes))| StandingRow {
            index,
            name: name.to_string(),
            votes,
        })
        .collect();
    Table::new(rows).to_string()
}

/// Voter table, one row per materialized record.
pub fn voters_table(ballot: &Ballot) -> String {
    let rows: Vec<VoterRow> = ballot
        .voters()
        .map(|(address, record)| VoterRow {
            address: address.to_string(),
            weight: record.weight,
            status: voter_status(record),
        })
        .collect();
    Table::new(rows).to_string()
}

/// Outbound path from a voter followed by everyone delegating into it.
///
/// Outbound hops count up from 0 (the voter itself); inbound delegators are
/// listed with their distance as a negative hop.
pub fn chain_report(chain: &[Address], inbound: &[(Address, usize)]) -> String {
    let mut out = String::new();
    for (hop, address) in chain.iter().enumerate() {
        out.push_str(&format!("{:>3}  {}\n", hop, address));
    }
    if inbound.is_empty() {
        out.push_str("no inbound delegations\n");
    } else {
        out.push_str(&format!("inbound delegations ({}):\n", inbound.len()));
        for (delegator, depth) in inbound {
            out.push_str(&format!("{:>3}  {}\n", format!("-{}", depth), delegator));
        }
    }
    out
}

/// Print the full ballot overview.
pub fn print_ballot(ballot: &Ballot) {
    println!("{}", "Ballot".bold());
    println!("{}", "=".repeat(50));
    println!("Authority:   {}", ballot.authority().to_string().bright_cyan());
    let hops = ballot
        .config()
        .max_delegation_hops
        .map(|h| h.to_string())
        .unwrap_or_else(|| "unbounded".to_string());
    println!("Max hops:    {}", hops.bright_yellow());
    println!("Total votes: {}", ballot.total_votes().to_string().bright_green());
    println!();
    println!("{}", standings_table(ballot));
    println!();
    println!("{}", voters_table(ballot));
}
