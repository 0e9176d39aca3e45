//! Client error types

use crate::schema::ValidationReport;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected the request body (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-2xx status
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A shared option catalog load failed
    #[error("Option catalog unavailable: {0}")]
    Catalog(String),
}

impl ClientError {
    /// Text fit for the error banner; server-provided messages are shown as-is
    pub fn user_message(&self) -> String {
        match self {
            Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message)
            | Self::Internal(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Why a save did not go through
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Local validation failed; nothing was sent
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(ValidationReport),

    /// A save for this form is already outstanding
    #[error("A save is already in progress")]
    InFlight,

    /// Server answered `success: false`
    #[error("{message}")]
    Rejected { message: String },

    /// Transport failure, non-2xx or unreadable response
    #[error(transparent)]
    Network(#[from] ClientError),
}

impl SubmissionError {
    /// Text for the dismissible error banner
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(_) => "Please fix the highlighted fields".to_string(),
            Self::InFlight => "Please wait for the current save to finish".to_string(),
            Self::Rejected { message } if message.is_empty() => "Something went wrong!".to_string(),
            Self::Rejected { message } => message.clone(),
            Self::Network(err) => err.user_message(),
        }
    }

    /// Field errors when validation blocked the save
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}
