//! Webhook HTTP client
//!
//! Posts a lead as a flat JSON object to the configured endpoint. One request
//! per call, bounded by the configured timeout, never retried: a failed
//! submission goes back to the visitor, who still has their data and can try
//! again.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FormConfig;
use crate::error::LeadError;
use crate::form::{FormState, FAILURE_NOTICE};

/// Why a webhook request failed
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Webhook request timed out after {0} ms")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Webhook responded with status {status}")]
    Status { status: u16, body: String },

    #[error("Failed to serialize lead: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SubmitError {
    /// The single message shown to the visitor, whatever went wrong
    pub fn user_notice(&self) -> &'static str {
        FAILURE_NOTICE
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Timeout(_) => "timeout",
            SubmitError::Http(_) => "http",
            SubmitError::Status { .. } => "status",
            SubmitError::Serialization(_) => "serialization",
        }
    }
}

/// Acknowledgement from the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReceipt {
    /// HTTP status returned by the endpoint
    pub status: u16,
}

/// HTTP client for the lead webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
    timeout_ms: u64,
    strip_honeypot: bool,
}

impl WebhookClient {
    /// Build a client from a validated configuration
    pub fn new(config: &FormConfig) -> Result<Self, LeadError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("lead-capture/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LeadError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.webhook_url.clone(),
            timeout_ms: config.timeout_ms,
            strip_honeypot: config.strip_honeypot,
        })
    }

    /// POST the lead to the webhook
    pub async fn post_lead(&self, state: &FormState) -> Result<WebhookReceipt, SubmitError> {
        let body = serde_json::to_vec(&self.payload(state))?;

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SubmitError::Timeout(self.timeout_ms)
                } else {
                    SubmitError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(WebhookReceipt {
                status: status.as_u16(),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(SubmitError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    /// The exact object sent on the wire
    pub fn payload(&self, state: &FormState) -> FormState {
        let mut payload = state.clone();
        if self.strip_honeypot {
            payload.website.clear();
        }
        payload
    }

    /// Get the webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the timeout in milliseconds
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
