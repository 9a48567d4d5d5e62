//! Telemetry for the form handler
//!
//! Logging goes through `tracing`; the binary decides how it is rendered.
//! This module holds the Prometheus side:
//!
//! - `metrics` - counters, histogram and gauge for submit attempts
//!
//! These are operational counters only. Nothing here tracks visitors.

pub mod metrics;

pub use metrics::{FormMetrics, FormMetricsRegistry};

use thiserror::Error;

/// Telemetry errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
