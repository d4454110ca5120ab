//! Error types for Loanline.

use thiserror::Error;

/// Primary error type for all Loanline operations.
#[derive(Error, Debug)]
pub enum LoanlineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanlineError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error means the completion endpoint could not produce a
    /// usable reply: network failure, non-2xx status, timeout, missing
    /// credentials, or an unparseable payload.
    ///
    /// These are the failures the gateway recovers from locally by
    /// substituting the keyword responder's output; they are never surfaced
    /// to the end user.
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::Authentication(_)
                | Self::Network(_)
                | Self::Timeout(_)
                | Self::Serialization(_)
                | Self::Configuration(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LoanlineError>;
