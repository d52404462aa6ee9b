//! Client configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is made. A `.env` file in the working directory is honoured (loaded by the
//! binary via `dotenvy`).
//!
//! ```bash
//! export TINYLINK_API_URL="https://api.tinylink.example"
//! export TINYLINK_APP_URL="https://tiny.example"   # optional
//! ```
//!
//! ## Required Variables
//!
//! - `TINYLINK_API_URL` - Base URL of the link service
//!
//! ## Optional Variables
//!
//! - `TINYLINK_APP_URL` - Base URL short links are shared under
//!   (default: `TINYLINK_API_URL`). Resolved codes are always handed off to
//!   the service's own redirect endpoint, `{TINYLINK_API_URL}/{code}`.
//! - `HTTP_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
//! - `REDIRECT_DELAY_MS` - Pause before handing a resolved link to the
//!   redirect endpoint (default: 800)
//! - `TOAST_DURATION_MS` - How long a notification stays up (default: 3000)
//! - `FORM_CLOSE_DELAY_MS` - Delay before the create form closes after a
//!   success (default: 1000)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use crate::application::sequencer::Timings;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Link service base; also serves the counted redirect for each code.
    pub api_url: Url,
    /// Base short links are shared under.
    pub app_url: Url,
    pub http_timeout_seconds: u64,
    pub redirect_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub form_close_delay_ms: u64,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TINYLINK_API_URL` is missing or either base URL
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("TINYLINK_API_URL").context("TINYLINK_API_URL must be set")?;
        let api_url = Url::parse(&api_url)
            .with_context(|| format!("TINYLINK_API_URL is not a valid URL: '{api_url}'"))?;

        let app_url = match env::var("TINYLINK_APP_URL") {
            Ok(raw) => Url::parse(&raw)
                .with_context(|| format!("TINYLINK_APP_URL is not a valid URL: '{raw}'"))?,
            Err(_) => api_url.clone(),
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            api_url,
            app_url,
            http_timeout_seconds: env_number("HTTP_TIMEOUT_SECONDS", 10),
            redirect_delay_ms: env_number("REDIRECT_DELAY_MS", 800),
            toast_duration_ms: env_number("TOAST_DURATION_MS", 3000),
            form_close_delay_ms: env_number("FORM_CLOSE_DELAY_MS", 1000),
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - either base URL is not `http` or `https`
    /// - `http_timeout_seconds` is 0 or above 300
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("TINYLINK_API_URL", &self.api_url), ("TINYLINK_APP_URL", &self.app_url)] {
            if url.scheme() != "http" && url.scheme() != "https" {
                anyhow::bail!("{name} must start with 'http://' or 'https://', got '{url}'");
            }
        }

        if self.http_timeout_seconds == 0 || self.http_timeout_seconds > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.http_timeout_seconds
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Returns whether short links live on a different host than the API.
    pub fn is_split_host(&self) -> bool {
        self.api_url.origin() != self.app_url.origin()
    }

    pub fn is_json_logging(&self) -> bool {
        self.log_format == "json"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Where resolved codes are handed off to: the service's redirect
    /// endpoint, never the sharing base.
    pub fn redirect_base(&self) -> &Url {
        &self.api_url
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    /// Delays for the dashboard's toasts and create form.
    pub fn timings(&self) -> Timings {
        Timings {
            toast_duration: Duration::from_millis(self.toast_duration_ms),
            form_close_delay: Duration::from_millis(self.form_close_delay_ms),
        }
    }

    /// Logs the effective configuration.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API: {}", self.api_url);
        if self.is_split_host() {
            tracing::info!("  Short links: {}", self.app_url);
        }
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_seconds);
        tracing::info!("  Redirect delay: {}ms", self.redirect_delay_ms);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a numeric variable, falling back to `default` when unset or invalid.
fn env_number(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
