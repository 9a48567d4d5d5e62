//! lead-capture CLI
//!
//! # Exit Codes
//!
//! - 0: Success - lead valid or delivered
//! - 1: Lead failed validation
//! - 2: Webhook submission failed
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Invalid configuration
//! - 10: Internal error

use clap::Parser;
use lead_capture_cli::{init_logging, run_cli, LeadCli};

#[tokio::main]
async fn main() {
    let cli = LeadCli::parse();

    init_logging(cli.verbose, cli.quiet, cli.log_format);

    let exit_code = run_cli(cli).await;
    std::process::exit(exit_code.into());
}
