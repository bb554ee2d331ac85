//! CLI configuration.
//!
//! Loaded from a TOML file when `--config` is given, otherwise defaults.
//! Command-line flags override file values.

use ballotbox_governance::BallotConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ballot state file
    pub state_file: PathBuf,
    /// Policy applied to newly initialized ballots
    pub ballot: BallotConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("ballot.json"),
            ballot: BallotConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        let config: CliConfig = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.state_file.as_os_str().is_empty() {
            anyhow::bail!("State file path cannot be empty");
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => anyhow::bail!("Unknown log format '{}' (expected pretty or json)", other),
        }

        EnvFilter::try_new(&self.logging.level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", self.logging.level, e))?;

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive
    pub level: String,
    /// Log to file instead of stderr
    pub log_file: Option<PathBuf>,
    /// Log format (json|pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            log_file: None,
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.state_file, PathBuf::from("ballot.json"));
        assert_eq!(config.ballot, BallotConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CliConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.state_file = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ballotbox.toml");

        let mut config = CliConfig::default();
        config.ballot.max_delegation_hops = Some(16);
        config.logging.format = "json".to_string();
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CliConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.logging.is_json());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            state_file = "election.json"

            [ballot]
            require_voting_rights = true
            "#,
        )
        .unwrap();

        assert_eq!(config.state_file, PathBuf::from("election.json"));
        assert!(config.ballot.require_voting_rights);
        assert_eq!(config.ballot.max_delegation_hops, None);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(CliConfig::from_file(&temp_dir.path().join("absent.toml")).is_err());
    }
}
