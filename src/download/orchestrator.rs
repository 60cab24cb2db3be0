//! Sequential download orchestrator
//!
//! Drains one year's descriptor list against the ledger: completed files
//! are skipped, everything else is streamed to disk and recorded. The
//! first failure aborts the batch immediately with no ledger write, so a
//! partially written file is simply overwritten on the next run.

use crate::archive::DownloadDescriptor;
use crate::download::{DownloadError, DownloadResult};
use crate::ledger::Ledger;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Counts of what a completed batch actually did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Files downloaded and recorded in this batch
    pub downloaded: usize,
    /// Files skipped because ledger and disk both agreed they were done
    pub skipped: usize,
}

/// Downloads every descriptor in order, fail-fast
///
/// For each descriptor:
/// - skip when the ledger says completed AND the file exists on disk. A
///   ledger entry without the file is not trusted; the file was deleted
///   out-of-band and gets re-downloaded rather than falsely reported done.
/// - otherwise stream the document to disk, mark the ledger (durably,
///   before anything else happens on the network), and pause for the
///   inter-file politeness delay.
///
/// The first failure propagates immediately: remaining descriptors are
/// not attempted, and the ledger is left exactly as it was before the
/// failing download.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `descriptors` - One year's descriptors, in table row order
/// * `ledger` - The completion ledger; mutated on each success
/// * `file_delay` - Pause after each completed download
pub async fn download_all(
    client: &Client,
    descriptors: &[DownloadDescriptor],
    ledger: &mut Ledger,
    file_delay: Duration,
) -> DownloadResult<BatchOutcome> {
    let mut outcome = BatchOutcome::default();

    for descriptor in descriptors {
        let url = descriptor.url.as_str();
        let file_path = descriptor.file_path();

        if ledger.is_completed(url) && file_path.exists() {
            tracing::info!("Already completed: {}. Skipping.", descriptor.filename);
            outcome.skipped += 1;
            continue;
        }

        download_file(client, url, &file_path).await?;

        // Durable ledger write before the next network operation; a crash
        // after this point cannot lose the completion record.
        ledger.mark_completed(url)?;
        outcome.downloaded += 1;
        tracing::info!("Downloaded and recorded: {}", descriptor.filename);

        tokio::time::sleep(file_delay).await;
    }

    Ok(outcome)
}

/// Streams one document to disk
///
/// The body is written chunk by chunk, never fully buffered, so memory
/// stays bounded for large transcripts. On failure the partial file is
/// left in place for the next run to overwrite.
async fn download_file(client: &Client, url: &str, file_path: &Path) -> DownloadResult<()> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| DownloadError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let io_err = |source| DownloadError::Io {
        path: file_path.to_path_buf(),
        source,
    };

    if let Some(parent) = file_path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let file = tokio::fs::File::create(file_path).await.map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| DownloadError::Network {
            url: url.to_string(),
            source,
        })?;
        writer.write_all(&chunk).await.map_err(io_err)?;
    }

    writer.flush().await.map_err(io_err)?;

    Ok(())
}
