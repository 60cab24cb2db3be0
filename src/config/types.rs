use serde::Deserialize;

/// Main configuration structure for the harvester
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub preflight: PreflightConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Root origin for same-origin checks and relative href resolution
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Path of the page the crawl starts from
    #[serde(rename = "entry-path", default = "default_entry_path")]
    pub entry_path: String,

    /// Path prefix whose crawl permission is checked against robots.txt
    #[serde(rename = "archive-path", default = "default_archive_path")]
    pub archive_path: String,
}

fn default_entry_path() -> String {
    "/index.php".to_string()
}

fn default_archive_path() -> String {
    "/hansard".to_string()
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched during the discovery crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Delay after each crawled page, and between year pages (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Delay after each completed file download (milliseconds)
    #[serde(rename = "file-delay-ms", default = "default_file_delay")]
    pub file_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_max_pages() -> usize {
    50
}

fn default_page_delay() -> u64 {
    3000
}

fn default_file_delay() -> u64 {
    5000
}

fn default_timeout() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the full user agent string sent with every request
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn format(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Pre-flight gate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreflightConfig {
    /// Well-known URL probed to judge connection quality before the run
    #[serde(rename = "probe-url", default = "default_probe_url")]
    pub probe_url: String,

    /// Maximum acceptable probe round-trip time (milliseconds)
    #[serde(rename = "max-latency-ms", default = "default_max_latency")]
    pub max_latency_ms: u64,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            probe_url: default_probe_url(),
            max_latency_ms: default_max_latency(),
        }
    }
}

fn default_probe_url() -> String {
    "https://www.google.com".to_string()
}

fn default_max_latency() -> u64 {
    5000
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory that holds one subdirectory per archive year
    #[serde(rename = "archive-dir")]
    pub archive_dir: String,

    /// Path to the JSON completion ledger
    #[serde(rename = "ledger-path")]
    pub ledger_path: String,

    /// Path to the CSV link discovery report
    #[serde(rename = "report-path")]
    pub report_path: String,
}
