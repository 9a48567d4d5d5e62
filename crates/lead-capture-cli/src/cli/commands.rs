//! CLI command definitions for lead-capture
//!
//! Validate lead documents, submit them to the webhook through the same form
//! handler the site uses, and inspect the effective configuration.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use lead_capture_core::config::load_document;
use lead_capture_core::{validate, FormConfig, FormField, FormState, LeadError, LeadForm};

use super::output::{render_config, LogFormat, OutputFormat, SubmitReport, ValidationReport};
use super::ExitCode;

/// Lead capture CLI
///
/// Lead documents are JSON, YAML or TOML files keyed by the form's field
/// names (firstName, lastName, email, phone, company, companySize, message).
#[derive(Parser, Debug)]
#[command(name = "lead-capture")]
#[command(about = "Validate and submit contact-form leads", long_about = None)]
#[command(version)]
pub struct LeadCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: LeadCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum LeadCommands {
    /// Validate a lead document without sending it
    Validate {
        /// Path to the lead document
        #[arg(short, long)]
        lead: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Submit a lead document to the webhook
    ///
    /// Runs the same honeypot check and validation as the contact form.
    Submit {
        /// Path to the lead document
        #[arg(short, long)]
        lead: PathBuf,

        /// Config file (JSON, YAML or TOML). Environment variables are used otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the webhook URL
        #[arg(long)]
        webhook_url: Option<String>,

        /// Override the request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config {
        /// Config file (JSON, YAML or TOML). Environment variables are used otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// Execute the validate command
pub fn execute_validate(lead: &Path, format: OutputFormat) -> Result<ExitCode, LeadError> {
    let state = load_lead(lead)?;
    let errors = validate(&state);

    let report = ValidationReport::new(&state, &errors);
    println!("{}", report.render(format)?);

    Ok(if errors.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::ValidationFailed
    })
}

/// Execute the submit command
pub async fn execute_submit(
    lead: &Path,
    config: Option<&Path>,
    webhook_url: Option<String>,
    timeout_ms: Option<u64>,
    format: OutputFormat,
) -> Result<ExitCode, LeadError> {
    let state = load_lead(lead)?;
    let config = apply_overrides(load_config(config)?, webhook_url, timeout_ms);

    let form = LeadForm::new(&config)?;
    for field in FormField::ALL {
        form.update_field(field, state.get(field)).await;
    }

    let outcome = form.submit().await;
    // The process exits next; nothing should clear the form behind our back.
    form.close().await;

    let report = SubmitReport::from_outcome(&outcome, &config.webhook_url);
    println!("{}", report.render(format)?);

    Ok(ExitCode::from_outcome(&outcome))
}

/// Execute the config command
pub fn execute_config(config: Option<&Path>, format: OutputFormat) -> Result<ExitCode, LeadError> {
    let config = load_config(config)?;
    config.validate()?;
    println!("{}", render_config(&config, format)?);
    Ok(ExitCode::Success)
}

/// Load a lead document
pub fn load_lead(path: &Path) -> Result<FormState, LeadError> {
    load_document(path)
}

/// Load config from a file when given, otherwise from the environment
pub fn load_config(path: Option<&Path>) -> Result<FormConfig, LeadError> {
    match path {
        Some(path) => FormConfig::from_file(path),
        None => Ok(FormConfig::from_env()),
    }
}

fn apply_overrides(
    mut config: FormConfig,
    webhook_url: Option<String>,
    timeout_ms: Option<u64>,
) -> FormConfig {
    if let Some(url) = webhook_url {
        config.webhook_url = url;
    }
    if let Some(timeout) = timeout_ms {
        config.timeout_ms = timeout;
    }
    config
}
