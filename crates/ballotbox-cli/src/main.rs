//! Ballotbox CLI - drive a delegated-voting ballot from the command line.
//!
//! The ballot lives in a JSON state file; each invocation applies one
//! operation to it.

pub mod commands;
pub mod config;
pub mod output;
pub mod store;
pub mod telemetry;

use clap::Parser;
use tracing::debug;

fn main() {
    let cli = commands::Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn run(cli: commands::Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => config::CliConfig::from_file(path)?,
        None => config::CliConfig::default(),
    };

    // Override with CLI args
    if let Some(state) = cli.state {
        config.state_file = state;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.validate()?;
    telemetry::init(&config.logging)?;

    debug!(
        state_file = %config.state_file.display(),
        config_file = ?cli.config,
        "configuration loaded"
    );

    commands::execute(cli.command, &config)
}
