use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let root = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url: {}", e)))?;

    if root.scheme() != "http" && root.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url must be HTTP or HTTPS, got scheme '{}'",
            root.scheme()
        )));
    }

    if root.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "root-url must include a host".to_string(),
        ));
    }

    if !config.entry_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "entry-path must start with '/', got '{}'",
            config.entry_path
        )));
    }

    if !config.archive_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "archive-path must start with '/', got '{}'",
            config.archive_path
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters, hyphens, and underscores, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.archive_dir.is_empty() {
        return Err(ConfigError::Validation(
            "archive-dir cannot be empty".to_string(),
        ));
    }

    if config.ledger_path.is_empty() {
        return Err(ConfigError::Validation(
            "ledger-path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Performs a basic sanity check on an email address
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "contact-email does not look like an email address: '{}'",
            email
        )));
    }
    Ok(())
}
