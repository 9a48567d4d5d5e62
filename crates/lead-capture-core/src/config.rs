//! Form handler configuration
//!
//! Loaded from defaults, environment variables or a JSON/YAML/TOML file.
//!
//! | Variable                        | Default                                      |
//! |---------------------------------|----------------------------------------------|
//! | `LEAD_CAPTURE_WEBHOOK_URL`      | `http://localhost:5678/webhook/lead-capture` |
//! | `LEAD_CAPTURE_TIMEOUT_MS`       | `15000`                                      |
//! | `LEAD_CAPTURE_RESET_DELAY_MS`   | `3000`                                       |
//! | `LEAD_CAPTURE_STRIP_HONEYPOT`   | `false`                                      |

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{LeadError, Result};

pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook/lead-capture";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_RESET_DELAY_MS: u64 = 3_000;

/// Upper bound accepted for the webhook timeout
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// Configuration for a [`LeadForm`](crate::LeadForm)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Webhook endpoint receiving the lead
    pub webhook_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Delay before the form clears after a successful submission
    pub reset_delay_ms: u64,

    /// Send `website` as an empty string instead of its raw value
    pub strip_honeypot: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            strip_honeypot: false,
        }
    }
}

impl FormConfig {
    /// Create a new config builder
    pub fn builder() -> FormConfigBuilder {
        FormConfigBuilder::new()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var("LEAD_CAPTURE_WEBHOOK_URL")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string()),
            timeout_ms: std::env::var("LEAD_CAPTURE_TIMEOUT_MS")
                .map(|v| v.parse().unwrap_or(DEFAULT_TIMEOUT_MS))
                .unwrap_or(DEFAULT_TIMEOUT_MS),
            reset_delay_ms: std::env::var("LEAD_CAPTURE_RESET_DELAY_MS")
                .map(|v| v.parse().unwrap_or(DEFAULT_RESET_DELAY_MS))
                .unwrap_or(DEFAULT_RESET_DELAY_MS),
            strip_honeypot: std::env::var("LEAD_CAPTURE_STRIP_HONEYPOT")
                .map(|v| v.parse().unwrap_or(false))
                .unwrap_or(false),
        }
    }

    /// Load config from a JSON, YAML or TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_document(path.as_ref())
    }

    /// Check the values before building a client from them
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.webhook_url).map_err(|e| {
            LeadError::config(format!("Invalid webhook URL '{}': {}", self.webhook_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(LeadError::config(format!(
                "Webhook URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(LeadError::config(format!(
                "Timeout must be between 1 and {} ms, got {}",
                MAX_TIMEOUT_MS, self.timeout_ms
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

/// Builder for [`FormConfig`]
#[derive(Debug, Default)]
pub struct FormConfigBuilder {
    config: FormConfig,
}

impl FormConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.config.webhook_url = url.into();
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.config.timeout_ms = timeout;
        self
    }

    pub fn reset_delay_ms(mut self, delay: u64) -> Self {
        self.config.reset_delay_ms = delay;
        self
    }

    pub fn strip_honeypot(mut self, strip: bool) -> Self {
        self.config.strip_honeypot = strip;
        self
    }

    pub fn build(self) -> FormConfig {
        self.config
    }
}

/// Read and parse a document, picking the format from the file extension
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LeadError::file_error(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    parse_document(path, &content)
}

/// Parse document content, picking the format from the file extension
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => Ok(serde_json::from_str(content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        "toml" => Ok(toml::from_str(content)?),
        _ => Err(LeadError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}
