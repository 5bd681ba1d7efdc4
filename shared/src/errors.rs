//! Shared error types for the exchange workflow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type SharedResult<T> = Result<T, SharedError>;

/// Why a catalog lookup produced no answer
///
/// An empty result is not a failure and never shows up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Nothing to search for; no call was made
    #[error("lookup query is empty")]
    InvalidQuery,

    #[error("catalog rate limit exceeded")]
    RateLimited,

    #[error("catalog unreachable: {0}")]
    Unreachable(String),

    #[error("catalog error: {0}")]
    ProviderError(String),
}

impl LookupFailure {
    /// Inline message shown next to the search controls
    pub fn user_message(&self) -> String {
        match self {
            LookupFailure::InvalidQuery => "Enter a title or an author to search.".to_string(),
            LookupFailure::RateLimited => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            LookupFailure::Unreachable(_) | LookupFailure::ProviderError(_) => {
                "The book search failed. Please try again later.".to_string()
            }
        }
    }
}

/// Why the backend did not accept a submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    /// Rejected with a reason from the backend
    #[error("rejected by backend: {0}")]
    ValidationFailed(String),

    /// Rate limited or temporarily unavailable
    #[error("backend unavailable")]
    Unavailable,

    #[error("submission failed: {0}")]
    Unknown(String),
}

impl SubmissionFailure {
    pub fn user_message(&self) -> String {
        match self {
            SubmissionFailure::ValidationFailed(reason) => format!("Submission failed: {reason}"),
            SubmissionFailure::Unavailable => {
                "The service is busy right now. Please try again in a little while.".to_string()
            }
            SubmissionFailure::Unknown(_) => {
                "Something went wrong while submitting. Please try again.".to_string()
            }
        }
    }
}

/// Why a navigation token could not be turned back into a transaction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no transaction token supplied")]
    MissingToken,

    #[error("malformed transaction token: {0}")]
    MalformedToken(String),
}

impl DecodeError {
    pub fn user_message(&self) -> String {
        match self {
            DecodeError::MissingToken => "There is nothing to confirm.".to_string(),
            DecodeError::MalformedToken(_) => {
                "This confirmation link is broken. Please go back and start again.".to_string()
            }
        }
    }
}
