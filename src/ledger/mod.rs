//! Persistent download completion ledger
//!
//! The ledger records which document URLs have been fully downloaded so that
//! interrupted runs can resume without re-fetching completed files. It is a
//! human-readable JSON mapping from URL to status, rewritten in full and
//! atomically on every mutation.
//!
//! Only the download orchestrator mutates the ledger, and it does so strictly
//! sequentially, so no locking is needed within a run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error for ledger {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ledger file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Completion status of a download
///
/// Absence of a ledger entry means the download is pending or was never
/// attempted; the only recorded state is full completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Completed,
}

/// Persisted mapping from download URL to completion status
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: HashMap<String, DownloadStatus>,
}

impl Ledger {
    /// Loads the ledger from disk
    ///
    /// A missing file yields an empty ledger (first run, or a deliberate
    /// reset). A file that exists but cannot be parsed is a hard error:
    /// silently discarding it would cause every prior download to repeat.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON ledger file
    ///
    /// # Returns
    ///
    /// * `Ok(Ledger)` - Loaded (possibly empty) ledger
    /// * `Err(LedgerError::Corrupt)` - File present but unparsable
    pub fn load(path: &Path) -> LedgerResult<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| LedgerError::Corrupt {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Returns true if the given URL is recorded as completed
    pub fn is_completed(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(DownloadStatus::Completed))
    }

    /// Marks a URL as completed and durably persists the whole mapping
    ///
    /// Callers must not start the next network operation until this returns;
    /// the synchronous flush is what guarantees a crash leaves at most one
    /// unrecorded partial file on disk.
    pub fn mark_completed(&mut self, url: &str) -> LedgerResult<()> {
        self.entries
            .insert(url.to_string(), DownloadStatus::Completed);
        self.persist()
    }

    /// Returns the number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the ledger has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrites the ledger file in full, atomically
    ///
    /// The mapping is serialized to a temporary file next to the ledger,
    /// flushed, and renamed over the old file, so a crash mid-write never
    /// leaves a truncated ledger behind.
    fn persist(&self) -> LedgerResult<()> {
        let io_err = |source| LedgerError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            LedgerError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp_path).map_err(io_err)?;
            file.write_all(json.as_bytes()).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }
        std::fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}
