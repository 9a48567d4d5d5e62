//! Prometheus metrics for the form handler
//!
//! - `lead_capture_submissions_total` (counter) - submit attempts by outcome
//! - `lead_capture_validation_failures_total` (counter) - field errors by field
//! - `lead_capture_webhook_duration_seconds` (histogram) - webhook round trips
//! - `lead_capture_submissions_in_flight` (gauge) - outstanding requests
//!
//! # Example
//!
//! ```rust
//! use lead_capture_core::telemetry::FormMetricsRegistry;
//!
//! let registry = FormMetricsRegistry::new().unwrap();
//! registry.form().record_outcome("submitted");
//! assert!(registry.encode_text().unwrap().contains("lead_capture_submissions_total"));
//! ```

use prometheus::{CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Arc;

use super::{Result, TelemetryError};
use crate::form::FieldErrors;

const NAMESPACE: &str = "lead_capture";

/// Form handler metrics
pub struct FormMetrics {
    submissions_total: CounterVec,
    validation_failures_total: CounterVec,
    webhook_duration_seconds: Histogram,
    in_flight: Gauge,
}

impl FormMetrics {
    /// Create the metrics and register them with the provided registry
    pub fn new(registry: &Registry) -> Result<Self> {
        let submissions_total = CounterVec::new(
            Opts::new("submissions_total", "Form submit attempts by outcome").namespace(NAMESPACE),
            &["outcome"],
        )?;

        let validation_failures_total = CounterVec::new(
            Opts::new(
                "validation_failures_total",
                "Field validation failures at submit time",
            )
            .namespace(NAMESPACE),
            &["field"],
        )?;

        let webhook_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "webhook_duration_seconds",
                "Webhook request duration in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        let in_flight = Gauge::with_opts(
            Opts::new("submissions_in_flight", "Webhook requests currently outstanding")
                .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(submissions_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(webhook_duration_seconds.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;

        Ok(Self {
            submissions_total,
            validation_failures_total,
            webhook_duration_seconds,
            in_flight,
        })
    }

    /// Count one submit attempt
    pub fn record_outcome(&self, outcome: &str) {
        self.submissions_total.with_label_values(&[outcome]).inc();
    }

    /// Count every field that failed validation
    pub fn record_validation_failures(&self, errors: &FieldErrors) {
        for (field, _) in errors.iter() {
            self.validation_failures_total
                .with_label_values(&[field.as_str()])
                .inc();
        }
    }

    pub fn observe_webhook_duration(&self, seconds: f64) {
        self.webhook_duration_seconds.observe(seconds);
    }

    pub fn request_started(&self) {
        self.in_flight.inc();
    }

    pub fn request_finished(&self) {
        self.in_flight.dec();
    }

    /// Current value of one outcome counter
    pub fn outcome_count(&self, outcome: &str) -> f64 {
        self.submissions_total.with_label_values(&[outcome]).get()
    }
}

/// Registry owning the form metrics
pub struct FormMetricsRegistry {
    registry: Arc<Registry>,
    form: Arc<FormMetrics>,
}

impl FormMetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        let form = Arc::new(FormMetrics::new(&registry)?);
        Ok(Self { registry, form })
    }

    /// Shared handle to the form metrics
    pub fn form(&self) -> Arc<FormMetrics> {
        Arc::clone(&self.form)
    }

    /// Encode all metrics in the Prometheus text format
    pub fn encode_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Encoding(e.to_string()))
    }
}
