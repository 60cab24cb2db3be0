//! End-to-end harvest pipeline
//!
//! Wires the gates, the crawl, the report, and the per-year download
//! batches together. Error scope is deliberate: gate failures and an
//! empty archive map abort the run; a failed page, a missing table, or a
//! failed report write is logged and skipped; a failed download aborts
//! only the current year's batch, and the loop moves on to the next year.

use crate::archive::{extract_descriptors, ExtractError};
use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page, Crawler};
use crate::ledger::Ledger;
use crate::preflight::{check_network, check_robots};
use crate::report::write_report;
use crate::{download, HarvestError, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// One full harvest run: gates, crawl, report, downloads
pub struct Pipeline {
    config: Config,
    client: Client,
    ledger: Ledger,
    root: Url,
}

impl Pipeline {
    /// Creates a pipeline: builds the HTTP client and loads the ledger
    ///
    /// The ledger is loaded exactly once per process; a corrupt ledger
    /// file is a hard error rather than a silent restart from scratch.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let ledger = Ledger::load(Path::new(&config.output.ledger_path))?;
        let root = Url::parse(&config.site.root_url)?;

        tracing::info!(
            "Loaded {} previous download records from {}",
            ledger.len(),
            config.output.ledger_path
        );

        Ok(Self {
            config,
            client,
            ledger,
            root,
        })
    }

    /// Runs the full harvest
    pub async fn run(&mut self) -> Result<()> {
        let user_agent = self.config.user_agent.format();

        // Pre-flight gates; either failing aborts before any crawling
        check_network(&self.client, &self.config.preflight).await?;
        check_robots(&self.client, &self.config.site, &user_agent).await?;

        // Discovery crawl
        let crawler = Crawler::new(self.client.clone(), &self.config)?;
        let outcome = crawler.crawl().await;

        if outcome.archive_map.is_empty() {
            return Err(HarvestError::NoArchiveLinks);
        }

        // The report is best-effort; a write failure must not stop the run
        let report_path = PathBuf::from(&self.config.output.report_path);
        match write_report(&outcome.records, &report_path) {
            Ok(()) => tracing::info!(
                "Wrote link report ({} rows) to {}",
                outcome.records.len(),
                report_path.display()
            ),
            Err(e) => tracing::warn!("Could not write link report: {}", e),
        }

        std::fs::create_dir_all(&self.config.output.archive_dir)?;

        // Years ascend; a failed year never blocks the ones after it
        let page_delay = Duration::from_millis(self.config.crawler.page_delay_ms);
        for (year, year_url) in &outcome.archive_map {
            self.process_year(*year, year_url).await;
            tokio::time::sleep(page_delay).await;
        }

        tracing::info!("Harvest completed");
        Ok(())
    }

    /// Processes one archive year: fetch, extract, download batch
    async fn process_year(&mut self, year: i32, year_url: &Url) {
        tracing::info!("Processing archive year {} ({})", year, year_url);

        let body = match fetch_page(&self.client, year_url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch archive page for {}: {}. Skipping.", year, e);
                return;
            }
        };

        let year_dir = Path::new(&self.config.output.archive_dir).join(year.to_string());
        let descriptors = match extract_descriptors(&body, &year_dir, &self.root) {
            Ok(descriptors) => descriptors,
            Err(ExtractError::NoTableFound) => {
                tracing::warn!("No sitting table found for year {}. Skipping.", year);
                return;
            }
        };

        tracing::info!(
            "Found {} files available for download in {}",
            descriptors.len(),
            year
        );
        if descriptors.is_empty() {
            return;
        }

        let file_delay = Duration::from_millis(self.config.crawler.file_delay_ms);
        match download::download_all(&self.client, &descriptors, &mut self.ledger, file_delay).await
        {
            Ok(outcome) => tracing::info!(
                "Year {}: {} downloaded, {} already complete",
                year,
                outcome.downloaded,
                outcome.skipped
            ),
            Err(e) => {
                // Fail-fast within the year; the ledger already reflects
                // every completed file, so the next run resumes here.
                tracing::warn!(
                    "Download disruption in year {}: {}. Stopping this year, continuing with the next.",
                    year,
                    e
                );
            }
        }
    }
}

/// Convenience entry point: builds a pipeline and runs it
pub async fn run(config: Config) -> Result<()> {
    Pipeline::new(config)?.run().await
}
