//! Error types for the lead capture core
//!
//! Field validation failures are data ([`FieldErrors`](crate::form::FieldErrors)),
//! not errors. Webhook failures live in [`SubmitError`](crate::client::SubmitError).
//! This type covers everything around them: configuration, document loading
//! and field-name parsing.

use thiserror::Error;

/// Main error type for lead capture operations
#[derive(Error, Debug)]
pub enum LeadError {
    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Document parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid handler configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LeadError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        LeadError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        LeadError::FileError(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LeadError::Config(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LeadError::InvalidInput(_)
                | LeadError::FileError(_)
                | LeadError::ParseError(_)
                | LeadError::Config(_)
        )
    }
}

impl From<serde_json::Error> for LeadError {
    fn from(err: serde_json::Error) -> Self {
        LeadError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for LeadError {
    fn from(err: serde_yaml::Error) -> Self {
        LeadError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for LeadError {
    fn from(err: toml::de::Error) -> Self {
        LeadError::ParseError(format!("TOML error: {}", err))
    }
}

/// Result type alias for lead capture operations
pub type Result<T> = std::result::Result<T, LeadError>;
