//! Hansard Harvester: a polite, resumable archive downloader
//!
//! This crate implements a single-site web crawler that discovers yearly
//! Hansard archive pages, extracts the downloadable sitting transcripts
//! listed on each one, and downloads every document exactly once across
//! process restarts using a persisted completion ledger.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod download;
pub mod ledger;
pub mod pipeline;
pub mod preflight;
pub mod report;

use thiserror::Error;

/// Main error type for harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Network too slow: probe took {latency_ms}ms (limit {limit_ms}ms)")]
    SlowNetwork { latency_ms: u128, limit_ms: u64 },

    #[error("Crawling {path} is disallowed by robots.txt")]
    RobotsDenied { path: String },

    #[error("No archive links discovered after crawling")]
    NoArchiveLinks,

    #[error("Ledger error: {0}")]
    Ledger(#[from] ledger::LedgerError),

    #[error("Download error: {0}")]
    Download(#[from] download::DownloadError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use archive::DownloadDescriptor;
pub use config::Config;
pub use crawler::{classify_link, ArchiveMap, LinkKind, LinkRecord};
pub use ledger::{DownloadStatus, Ledger};
