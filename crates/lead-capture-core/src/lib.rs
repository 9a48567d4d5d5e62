//! Lead Capture Core
//!
//! The contact form behind the Aurum Automation landing page: field state,
//! submit-time validation, honeypot bot filtering and a single POST of the
//! lead to a webhook.
//!
//! ## Features
//!
//! - **Validation**: required names, email shape, minimum message length
//! - **Bot filtering**: hidden `website` honeypot, dropped silently
//! - **Single flight**: one webhook request per form at a time, bounded by a timeout
//! - **Deferred reset**: the form clears itself a few seconds after success
//! - **Telemetry**: `tracing` events and Prometheus counters
//!
//! ## Architecture
//!
//! 1. **Form** (`form/`): data model, validation rules and the honeypot check.
//! 2. **Client** (`client/`): HTTP client for the webhook.
//! 3. **Controller** (`controller`): [`LeadForm`], which ties the two together.
//! 4. **Config** (`config`): defaults, environment and file loading.
//! 5. **Telemetry** (`telemetry/`): Prometheus metrics.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lead_capture_core::{FormConfig, FormField, LeadForm, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() {
//!     let form = LeadForm::new(&FormConfig::from_env()).unwrap();
//!
//!     form.update_field(FormField::FirstName, "John").await;
//!     form.update_field(FormField::LastName, "Smith").await;
//!     form.update_field(FormField::Email, "john@x.com").await;
//!     form.update_field(FormField::Message, "Need a chatbot for my clinic").await;
//!
//!     match form.submit().await {
//!         SubmitOutcome::Submitted(_) => println!("sent"),
//!         SubmitOutcome::Rejected(errors) => println!("fix {} field(s)", errors.len()),
//!         SubmitOutcome::Failed(err) => println!("{}", err.user_notice()),
//!         SubmitOutcome::Ignored => {}
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod telemetry;

pub use client::{SubmitError, WebhookClient, WebhookReceipt};
pub use config::{FormConfig, FormConfigBuilder};
pub use controller::{FormSnapshot, LeadForm, SubmitOutcome};
pub use error::{LeadError, Result};
pub use form::{
    is_bot, validate, CompanySize, FieldErrors, FormField, FormState, FAILURE_NOTICE,
    SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE, SUCCESS_MESSAGE,
};
pub use telemetry::{FormMetrics, FormMetricsRegistry};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
