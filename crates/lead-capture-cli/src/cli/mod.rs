//! CLI module for lead-capture
//!
//! Command-line access to the contact form handler: validate lead documents,
//! submit them to the webhook and print the effective configuration.

pub mod commands;
pub mod output;

pub use commands::{LeadCli, LeadCommands};
pub use output::{LogFormat, OutputFormat};

use lead_capture_core::{LeadError, SubmitOutcome};
use tracing_subscriber::EnvFilter;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Lead valid / delivered, or nothing to do
    Success = 0,
    /// Lead failed validation
    ValidationFailed = 1,
    /// Webhook request failed
    SubmissionFailed = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Invalid configuration
    ConfigError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Exit code for a submit attempt
    pub fn from_outcome(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Submitted(_) | SubmitOutcome::Ignored => ExitCode::Success,
            SubmitOutcome::Rejected(_) => ExitCode::ValidationFailed,
            SubmitOutcome::Failed(_) => ExitCode::SubmissionFailed,
        }
    }

    /// Exit code for an error that aborted the command
    pub fn from_error(error: &LeadError) -> Self {
        match error {
            LeadError::InvalidInput(_) | LeadError::ParseError(_) => ExitCode::InvalidInput,
            LeadError::FileError(_) => ExitCode::FileError,
            LeadError::Config(_) => ExitCode::ConfigError,
            LeadError::SerializationError(_) | LeadError::Internal(_) => ExitCode::InternalError,
        }
    }
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout stays parseable. `RUST_LOG` directives are
/// honoured on top of the verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool, format: LogFormat) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Run the CLI with the given arguments and return the exit code
pub async fn run(cli: LeadCli) -> Result<ExitCode, LeadError> {
    match cli.command {
        LeadCommands::Validate { lead, format } => commands::execute_validate(&lead, format),
        LeadCommands::Submit {
            lead,
            config,
            webhook_url,
            timeout_ms,
            format,
        } => {
            commands::execute_submit(&lead, config.as_deref(), webhook_url, timeout_ms, format)
                .await
        }
        LeadCommands::Config { config, format } => {
            commands::execute_config(config.as_deref(), format)
        }
    }
}
