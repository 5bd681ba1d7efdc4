//! Exchange error types

use thiserror::Error;
use shared::{DecodeError, LookupFailure, SharedError, SubmissionFailure};

/// Result type for exchange operations
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Exchange error types
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Metadata lookup failed: {0}")]
    Lookup(#[from] LookupFailure),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionFailure),

    #[error("Token decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transaction not completed: {message}")]
    Workflow { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExchangeError {
    pub fn workflow(message: impl Into<String>) -> Self {
        Self::Workflow { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}
