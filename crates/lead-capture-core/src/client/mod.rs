//! HTTP clients for external services
//!
//! The only collaborator is the lead webhook. No authentication, no
//! persistence on this side.

pub mod webhook;

pub use webhook::{SubmitError, WebhookClient, WebhookReceipt};
