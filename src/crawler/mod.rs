//! Crawler module for archive page discovery
//!
//! This module contains the discovery side of the harvester:
//! - HTTP fetching with the identifying user agent
//! - HTML anchor extraction
//! - Link classification
//! - The bounded breadth-first crawl over same-origin hub pages

mod classifier;
mod coordinator;
mod fetcher;
mod parser;

pub use classifier::{classify_link, LinkKind, LinkRecord, ARCHIVE_MARKER};
pub use coordinator::{CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{extract_anchors, resolve_href, Anchor};

use std::collections::BTreeMap;
use url::Url;

/// Mapping from year to its archive-page URL
///
/// Keys are unique (last-discovered wins) and iterate in ascending year
/// order, which is the order the download phase processes them in.
pub type ArchiveMap = BTreeMap<i32, Url>;
