//! Lead Capture CLI
//!
//! Operator tooling around [`lead_capture_core`]. Leads are checked and sent
//! through the same [`LeadForm`](lead_capture_core::LeadForm) the contact
//! page uses, so honeypot, validation and timeout behaviour match exactly.
//!
//! ```bash
//! # Check a lead document
//! lead-capture validate --lead lead.yaml
//!
//! # Send it to the webhook configured in lead-capture.toml
//! lead-capture submit --lead lead.yaml --config lead-capture.toml
//!
//! # Show what the environment resolves to
//! lead-capture config --format json
//! ```

pub mod cli;

pub use cli::{init_logging, ExitCode, LeadCli, LeadCommands, LogFormat, OutputFormat};

/// Run the CLI application
///
/// This is the main entry point for the CLI binary.
pub async fn run_cli(cli: LeadCli) -> ExitCode {
    match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command aborted");
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
