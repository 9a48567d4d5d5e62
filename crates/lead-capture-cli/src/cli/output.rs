//! Output formatting for the lead-capture CLI
//!
//! JSON and YAML for machines, a coloured table for people.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use lead_capture_core::{is_bot, FieldErrors, FormConfig, FormState, LeadError, SubmitOutcome};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Log line format
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// One field-level problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFinding {
    pub field: String,
    pub message: String,
}

fn findings_from(errors: &FieldErrors) -> Vec<FieldFinding> {
    errors
        .iter()
        .map(|(field, message)| FieldFinding {
            field: field.to_string(),
            message: message.to_string(),
        })
        .collect()
}

/// Result of `lead-capture validate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub error_count: usize,
    pub findings: Vec<FieldFinding>,
    /// The hidden `website` field is filled; the form would drop this lead
    pub honeypot_filled: bool,
    pub summary: String,
}

impl ValidationReport {
    pub fn new(state: &FormState, errors: &FieldErrors) -> Self {
        let honeypot_filled = is_bot(state);
        let valid = errors.is_empty();

        let summary = if !valid {
            format!("Lead has {} invalid field(s)", errors.len())
        } else if honeypot_filled {
            "Lead is valid but the honeypot field is filled".to_string()
        } else {
            "Lead is valid".to_string()
        };

        Self {
            valid,
            error_count: errors.len(),
            findings: findings_from(errors),
            honeypot_filled,
            summary,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, LeadError> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Yaml => to_yaml(self),
            OutputFormat::Table => Ok(self.render_table()),
        }
    }

    fn render_table(&self) -> String {
        let mut out = String::new();
        let status = if self.valid {
            "VALID".green().bold()
        } else {
            "INVALID".red().bold()
        };
        out.push_str(&format!("{} {}\n", "Lead Validation:".cyan().bold(), status));

        for finding in &self.findings {
            out.push_str(&format!(
                "  {} {:<12} {}\n",
                "x".red(),
                finding.field.bold(),
                finding.message
            ));
        }

        if self.honeypot_filled {
            out.push_str(&format!(
                "  {} {:<12} {}\n",
                "!".yellow(),
                "website".bold(),
                "honeypot field is filled; the form would drop this lead".yellow()
            ));
        }

        out.push_str(&format!("\n{}\n", self.summary));
        out
    }
}

/// Result of `lead-capture submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReport {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub findings: Vec<FieldFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub summary: String,
}

impl SubmitReport {
    pub fn from_outcome(outcome: &SubmitOutcome, webhook_url: &str) -> Self {
        let mut report = Self {
            outcome: outcome.label().to_string(),
            status: None,
            findings: Vec::new(),
            notice: None,
            error: None,
            summary: String::new(),
        };

        match outcome {
            SubmitOutcome::Submitted(receipt) => {
                report.status = Some(receipt.status);
                report.summary = format!("Lead delivered to {}", webhook_url);
            }
            SubmitOutcome::Rejected(errors) => {
                report.findings = findings_from(errors);
                report.summary = format!("Lead rejected: {} invalid field(s)", errors.len());
            }
            SubmitOutcome::Failed(err) => {
                report.notice = Some(err.user_notice().to_string());
                report.error = Some(err.to_string());
                report.summary = "Webhook submission failed".to_string();
            }
            SubmitOutcome::Ignored => {
                report.summary = "No request sent".to_string();
            }
        }

        report
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, LeadError> {
        match format {
            OutputFormat::Json => to_json(self),
            OutputFormat::Yaml => to_yaml(self),
            OutputFormat::Table => Ok(self.render_table()),
        }
    }

    fn render_table(&self) -> String {
        let mut out = String::new();
        let outcome = match self.outcome.as_str() {
            "submitted" => self.outcome.to_uppercase().green().bold(),
            "failed" | "rejected" => self.outcome.to_uppercase().red().bold(),
            _ => self.outcome.to_uppercase().dimmed(),
        };
        out.push_str(&format!("{} {}\n", "Submission:".cyan().bold(), outcome));

        if let Some(status) = self.status {
            out.push_str(&format!("  {} {}\n", "HTTP status:".dimmed(), status));
        }
        for finding in &self.findings {
            out.push_str(&format!(
                "  {} {:<12} {}\n",
                "x".red(),
                finding.field.bold(),
                finding.message
            ));
        }
        if let Some(error) = &self.error {
            out.push_str(&format!("  {} {}\n", "Error:".dimmed(), error.red()));
        }
        if let Some(notice) = &self.notice {
            out.push_str(&format!("  {} {}\n", "Notice:".dimmed(), notice.yellow()));
        }

        out.push_str(&format!("\n{}\n", self.summary));
        out
    }
}

/// Render the effective configuration
pub fn render_config(config: &FormConfig, format: OutputFormat) -> Result<String, LeadError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Yaml => to_yaml(config),
        OutputFormat::Table => {
            let rows = [
                ("webhook_url", config.webhook_url.clone()),
                ("timeout_ms", config.timeout_ms.to_string()),
                ("reset_delay_ms", config.reset_delay_ms.to_string()),
                ("strip_honeypot", config.strip_honeypot.to_string()),
            ];
            let mut out = format!("{}\n", "Effective Configuration".cyan().bold());
            for (key, value) in rows {
                out.push_str(&format!("  {:<16} {}\n", key.bold(), value));
            }
            Ok(out)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, LeadError> {
    serde_json::to_string_pretty(value).map_err(|e| LeadError::SerializationError(e.to_string()))
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String, LeadError> {
    serde_yaml::to_string(value).map_err(|e| LeadError::SerializationError(e.to_string()))
}
