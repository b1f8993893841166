//! API failure types and retry classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code marking a request the remote side rejected as malformed
pub const BAD_REQUEST_STATUS: u16 = 400;

/// Status used for failures that never produced an HTTP response
pub const NETWORK_FAILURE_STATUS: u16 = 0;

/// Whether a failure with the given status is worth retrying.
///
/// Everything except 400 is retryable: resubmitting a malformed request
/// unchanged cannot succeed.
pub fn is_retryable_status(status_code: u16) -> bool {
    status_code != BAD_REQUEST_STATUS
}

/// Structured error body returned by the media API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error: String,
}

/// A failed remote call, classified for retry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub status_code: u16,
    pub error: Option<ErrorResponse>,
    pub message: Option<String>,
}

impl ApiFailure {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            error: None,
            message: None,
        }
    }

    /// Failure that happened below HTTP (connect, timeout, broken body)
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(NETWORK_FAILURE_STATUS).with_message(message)
    }

    pub fn with_error(mut self, error: ErrorResponse) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_retryable(&self) -> bool {
        is_retryable_status(self.status_code)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status_code == NETWORK_FAILURE_STATUS {
            write!(f, "network failure")?;
        } else {
            write!(f, "API returned status {}", self.status_code)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(error) = &self.error {
            let details: Vec<&str> = error.errors.iter().map(|e| e.error.as_str()).collect();
            if !details.is_empty() {
                write!(f, " [{}]", details.join("; "))?;
            }
            if let Some(reference) = &error.reference {
                write!(f, " (reference {reference})")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiFailure {}
