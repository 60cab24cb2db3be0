//! Archive-year page handling
//!
//! Turns one archive-year page into the ordered list of download
//! descriptors the download orchestrator drains.

mod extractor;
mod filename;

pub use extractor::extract_descriptors;
pub use filename::{build_filename, normalize_date};

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur while extracting an archive-year page
///
/// These are non-fatal to the run: the caller skips the year and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No sitting table found on archive page")]
    NoTableFound,
}

/// Everything needed to perform one download
///
/// Derived deterministically from one table row, so re-running the
/// pipeline produces the same descriptor for the same row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    /// Absolute document URL; also the ledger key
    pub url: Url,
    /// Directory the file is written into
    pub folder: PathBuf,
    /// Destination filename within the folder
    pub filename: String,
}

impl DownloadDescriptor {
    /// Returns the full destination path for this download
    pub fn file_path(&self) -> PathBuf {
        self.folder.join(&self.filename)
    }
}
