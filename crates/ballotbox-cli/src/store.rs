//! Ballot state file.
//!
//! The ballot is kept as a pretty-printed JSON snapshot. Writers serialize on
//! an exclusive lock over a sibling `.lock` file held from load to save, and
//! each save goes through its own temp file renamed over the state, so
//! concurrent commands apply one at a time and readers never see a partial
//! write.

use ballotbox_governance::{Ballot, BallotError, BallotSnapshot};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// JSON-backed ballot storage.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

/// Exclusive writer lock on a state file; released on drop.
#[derive(Debug)]
pub struct StateLock {
    _file: File,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Sibling lock file, e.g. `ballot.json.lock`.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Block until this process is the only writer.
    pub fn lock(&self) -> anyhow::Result<StateLock> {
        std::fs::create_dir_all(self.dir())?;
        let lock_path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| anyhow::anyhow!("Failed to open '{}': {}", lock_path.display(), e))?;
        file.lock_exclusive()
            .map_err(|e| anyhow::anyhow!("Failed to lock '{}': {}", lock_path.display(), e))?;
        debug!(path = %lock_path.display(), "state lock acquired");
        Ok(StateLock { _file: file })
    }

    /// Load and validate the stored ballot.
    pub fn load(&self) -> anyhow::Result<Ballot> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to read ballot state '{}': {} (run `ballotbox init` first)",
                self.path.display(),
                e
            )
        })?;
        let snapshot: BallotSnapshot = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse ballot state '{}': {}", self.path.display(), e)
        })?;

        let ballot = Ballot::restore(snapshot)?;
        debug!(
            path = %self.path.display(),
            options = ballot.registry().len(),
            voters = ballot.ledger().len(),
            "ballot loaded"
        );
        Ok(ballot)
    }

    /// Persist the ballot, replacing any previous state.
    ///
    /// Callers that loaded the ballot first must hold the [`StateLock`]
    /// across both calls; [`StateFile::update`] does this.
    pub fn save(&self, ballot: &Ballot) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&ballot.snapshot())?;
        std::fs::create_dir_all(self.dir())?;

        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to replace '{}': {}", self.path.display(), e))?;

        info!(path = %self.path.display(), "ballot saved");
        Ok(())
    }

    /// Apply one operation under the writer lock and persist the result.
    ///
    /// Nothing is written when `apply` fails. Returns the updated ballot
    /// along with whatever `apply` produced.
    pub fn update<T>(
        &self,
        apply: impl FnOnce(&mut Ballot) -> Result<T, BallotError>,
    ) -> anyhow::Result<(Ballot, T)> {
        let _lock = self.lock()?;
        let mut ballot = self.load()?;
        let out = apply(&mut ballot)?;
        self.save(&ballot)?;
        Ok((ballot, out))
    }
}
