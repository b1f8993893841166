//! Forwarder error types

use thiserror::Error;
use shared::ApiFailure;

/// Result type for forwarder operations
pub type ForwarderResult<T> = Result<T, ForwarderError>;

/// Forwarder error types
#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("Contact record has no contact id")]
    MissingContactId,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Submission failed for contact {contact_id}: {failure}")]
    Submission { contact_id: String, failure: ApiFailure },
}

impl ForwarderError {
    pub fn config(message: impl Into<String>) -> Self {
        ForwarderError::ConfigError { message: message.into() }
    }

    /// Whether the caller may resubmit the same record
    pub fn is_retryable(&self) -> bool {
        match self {
            ForwarderError::Submission { failure, .. } => failure.is_retryable(),
            _ => false,
        }
    }
}
