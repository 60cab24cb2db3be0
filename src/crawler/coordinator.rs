//! Discovery crawl coordination
//!
//! Runs the bounded breadth-first traversal over the target site's hub
//! pages, classifying every anchor it sees and collecting the year ->
//! archive-page mapping that drives the rest of the run.

use crate::config::Config;
use crate::crawler::classifier::{classify_link, ARCHIVE_MARKER, LinkKind};
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{extract_anchors, resolve_href};
use crate::crawler::{ArchiveMap, LinkRecord};
use crate::HarvestError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Result of a completed discovery crawl
///
/// Partial results are valid: hitting the visit cap early still yields
/// whatever archive links were found up to that point.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Year -> archive-page URL; last-discovered wins per year
    pub archive_map: ArchiveMap,
    /// Every anchor discovered, in discovery order, undeduplicated
    pub records: Vec<LinkRecord>,
}

/// Discovery crawler over same-origin hub pages
pub struct Crawler {
    client: Client,
    root: Url,
    entry: Url,
    max_pages: usize,
    page_delay: Duration,
}

impl Crawler {
    /// Creates a crawler from the run configuration and shared HTTP client
    pub fn new(client: Client, config: &Config) -> Result<Self, HarvestError> {
        let root = Url::parse(&config.site.root_url)?;
        let entry = root.join(&config.site.entry_path)?;

        Ok(Self {
            client,
            root,
            entry,
            max_pages: config.crawler.max_pages,
            page_delay: Duration::from_millis(config.crawler.page_delay_ms),
        })
    }

    /// Runs the breadth-first discovery crawl
    ///
    /// The frontier has set semantics; visit order between queued pages is
    /// not significant. The loop runs until the frontier drains or the
    /// visit cap is reached, whichever comes first. Cycles are handled by
    /// the visited set alone: a URL is fetched at most once per crawl.
    ///
    /// Individual page failures are non-fatal; the page is dropped and the
    /// crawl continues. A fixed politeness delay follows every fetched
    /// page, whether or not it succeeded.
    pub async fn crawl(&self) -> CrawlOutcome {
        tracing::info!("Starting discovery crawl from {}", self.entry);

        let mut archive_map = ArchiveMap::new();
        let mut records: Vec<LinkRecord> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: HashSet<String> = HashSet::new();
        frontier.insert(self.entry.to_string());

        while !frontier.is_empty() && visited.len() < self.max_pages {
            // Pop an arbitrary frontier entry
            let current = match frontier.iter().next().cloned() {
                Some(url) => url,
                None => break,
            };
            frontier.remove(&current);

            // Skipped URLs do not count against the visit cap
            if visited.contains(&current) {
                continue;
            }
            let current_url = match Url::parse(&current) {
                Ok(url) if self.same_origin(&url) => url,
                _ => continue,
            };

            visited.insert(current.clone());
            tracing::info!("Scanning: {}", current);

            match fetch_page(&self.client, &current).await {
                Ok(body) => {
                    self.scan_page(
                        &current_url,
                        &body,
                        &mut archive_map,
                        &mut records,
                        &visited,
                        &mut frontier,
                    );
                }
                Err(e) => {
                    // Crawl-level fetch errors drop the page and move on
                    tracing::warn!("Failed to fetch {}: {}", current, e);
                }
            }

            tokio::time::sleep(self.page_delay).await;
        }

        tracing::info!(
            "Crawl finished: {} pages visited, {} archive years found, {} links recorded",
            visited.len(),
            archive_map.len(),
            records.len()
        );

        CrawlOutcome {
            archive_map,
            records,
        }
    }

    /// Classifies every anchor on a fetched page and grows the frontier
    fn scan_page(
        &self,
        page_url: &Url,
        body: &str,
        archive_map: &mut ArchiveMap,
        records: &mut Vec<LinkRecord>,
        visited: &HashSet<String>,
        frontier: &mut HashSet<String>,
    ) {
        for anchor in extract_anchors(body) {
            let resolved = match resolve_href(&anchor.href, &self.root) {
                Some(url) => url,
                None => continue,
            };

            let record = classify_link(page_url, &anchor.href, &resolved, &anchor.text);

            if record.kind == LinkKind::ArchiveYear {
                if let Some(year) = record.year {
                    archive_map.insert(year, resolved.clone());
                }
            }

            records.push(record);

            // Archive-year pages are recorded but never expanded; crawling
            // them would wander into the very subtree being cataloged.
            let resolved_str = resolved.to_string();
            if self.same_origin(&resolved)
                && !visited.contains(&resolved_str)
                && !resolved_str.to_lowercase().contains(ARCHIVE_MARKER)
            {
                frontier.insert(resolved_str);
            }
        }
    }

    /// Checks whether a URL shares the configured root's origin
    fn same_origin(&self, url: &Url) -> bool {
        url.origin() == self.root.origin()
    }
}
