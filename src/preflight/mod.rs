//! Pre-flight gates
//!
//! Two boolean checks run before any crawling begins: a network latency
//! probe (no point starting a bulk download over a connection that will
//! time out mid-file) and a robots.txt permission check for the archive
//! path. Both are stateless; either failing aborts the run.

use crate::config::{PreflightConfig, SiteConfig};
use crate::HarvestError;
use reqwest::Client;
use robotstxt::DefaultMatcher;
use std::time::Instant;

/// Probes a well-known URL and fails if the round trip is too slow
///
/// Uses HEAD to keep the transfer minimal; what matters is the latency,
/// not the body. A transport error also fails the gate, since it means
/// the connection cannot be relied on at all.
///
/// # Returns
///
/// * `Ok(())` - Round trip completed within the limit
/// * `Err(HarvestError::SlowNetwork)` - Probe exceeded the limit
/// * `Err(HarvestError::Http)` - Probe could not complete
pub async fn check_network(client: &Client, config: &PreflightConfig) -> Result<(), HarvestError> {
    tracing::info!("Probing network latency via {}", config.probe_url);

    let start = Instant::now();
    client
        .head(&config.probe_url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: config.probe_url.clone(),
            source,
        })?;
    let latency_ms = start.elapsed().as_millis();

    if latency_ms > u128::from(config.max_latency_ms) {
        return Err(HarvestError::SlowNetwork {
            latency_ms,
            limit_ms: config.max_latency_ms,
        });
    }

    tracing::info!("Network probe completed in {}ms", latency_ms);
    Ok(())
}

/// Checks the site's robots.txt for permission to crawl the archive path
///
/// An unreachable or missing robots.txt is treated as "permitted, proceed
/// with caution": absence of a policy is not a prohibition. A robots.txt
/// that disallows the archive path for our user agent fails the gate.
///
/// # Returns
///
/// * `Ok(())` - Crawling is permitted (or no policy was published)
/// * `Err(HarvestError::RobotsDenied)` - Policy disallows the archive path
pub async fn check_robots(
    client: &Client,
    site: &SiteConfig,
    user_agent: &str,
) -> Result<(), HarvestError> {
    let robots_url = format!("{}/robots.txt", site.root_url.trim_end_matches('/'));
    tracing::info!("Checking {} for crawling rules", robots_url);

    let content = match client.get(&robots_url).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "Could not read robots.txt body ({}). Proceeding with caution.",
                    e
                );
                return Ok(());
            }
        },
        Ok(response) => {
            tracing::warn!(
                "robots.txt returned HTTP {}. Proceeding with caution.",
                response.status()
            );
            return Ok(());
        }
        Err(e) => {
            tracing::warn!(
                "Could not access robots.txt ({}). Proceeding with caution.",
                e
            );
            return Ok(());
        }
    };

    let target = format!(
        "{}{}",
        site.root_url.trim_end_matches('/'),
        site.archive_path
    );
    let mut matcher = DefaultMatcher::default();
    if !matcher.one_agent_allowed_by_robots(&content, user_agent, &target) {
        return Err(HarvestError::RobotsDenied {
            path: site.archive_path.clone(),
        });
    }

    tracing::info!("robots.txt permits crawling {}", site.archive_path);
    Ok(())
}
