//! Hansard Harvester main entry point
//!
//! Command-line interface for the polite, resumable Hansard archive
//! downloader.

use clap::Parser;
use hansard_harvester::config::load_config_with_hash;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Hansard Harvester: a polite, resumable archive downloader
///
/// Crawls a parliament website to discover yearly Hansard archive pages,
/// then downloads every listed sitting transcript exactly once, resuming
/// across runs via a persisted completion ledger.
#[derive(Parser, Debug)]
#[command(name = "hansard-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A polite, resumable Hansard archive downloader", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without touching the network
    #[arg(long)]
    dry_run: bool,
}

// Fetching and writing are strictly sequential by design, so the
// single-threaded runtime is all this binary needs.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    match hansard_harvester::pipeline::run(config).await {
        Ok(()) => {
            tracing::info!("Harvest run finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hansard_harvester=info,warn"),
            1 => EnvFilter::new("hansard_harvester=debug,info"),
            2 => EnvFilter::new("hansard_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &hansard_harvester::config::Config, config_hash: &str) {
    println!("=== Hansard Harvester Dry Run ===\n");

    println!("Site:");
    println!("  Root URL: {}", config.site.root_url);
    println!("  Entry path: {}", config.site.entry_path);
    println!("  Archive path: {}", config.site.archive_path);

    println!("\nCrawler:");
    println!("  Visit cap: {} pages", config.crawler.max_pages);
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!("  File delay: {}ms", config.crawler.file_delay_ms);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.format());

    println!("\nPre-flight:");
    println!("  Probe URL: {}", config.preflight.probe_url);
    println!("  Max latency: {}ms", config.preflight.max_latency_ms);

    println!("\nOutput:");
    println!("  Archive directory: {}", config.output.archive_dir);
    println!("  Ledger: {}", config.output.ledger_path);
    println!("  Report: {}", config.output.report_path);

    println!("\nConfig hash: {}", config_hash);
    println!("\n✓ Configuration is valid");
}
