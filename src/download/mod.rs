//! Download orchestration
//!
//! The only component allowed to mutate the ledger, and the only one whose
//! errors are meant to escape their immediate caller: a failed download
//! aborts the rest of the current batch so the run can stop cleanly and
//! resume later from the ledger.

mod orchestrator;

pub use orchestrator::{download_all, BatchOutcome};

use crate::ledger::LedgerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a download batch
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network error downloading {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP status {status} downloading {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Result type for download operations
pub type DownloadResult<T> = Result<T, DownloadError>;
