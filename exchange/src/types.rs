//! Exchange-specific controller types

use std::fmt;

use shared::{DecodeError, LookupFailure, Navigation, PendingTransaction, SubmissionFailure, TransactionKind};

/// Why the entry page refused to advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Title is the one field every transaction needs at entry time
    TitleRequired,
    /// The draft could not be turned into a token
    Encoding(String),
}

impl DraftError {
    pub fn user_message(&self) -> String {
        match self {
            DraftError::TitleRequired => "Please enter a title.".to_string(),
            DraftError::Encoding(_) => "The book details could not be prepared for confirmation.".to_string(),
        }
    }
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::TitleRequired => write!(f, "title is required"),
            DraftError::Encoding(reason) => write!(f, "encoding failed: {reason}"),
        }
    }
}

/// Result of an identifier lookup on the entry page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Fields were filled from the first candidate
    Populated,
    /// Lookup succeeded with no candidate; fields left as they were
    NotFound,
    /// Lookup failed; message shown inline
    Failed(LookupFailure),
    /// No identifier entered, nothing looked up
    Skipped,
}

/// Why the confirmation page cannot proceed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationIssue {
    /// Token absent or unreadable
    Token(DecodeError),
    /// Token is for the other confirmation page
    WrongKind { expected: TransactionKind, found: TransactionKind },
    /// Decoded record lacks the field this kind needs
    Incomplete { kind: TransactionKind, field: &'static str },
}

impl ConfirmationIssue {
    pub fn user_message(&self) -> String {
        match self {
            ConfirmationIssue::Token(error) => error.user_message(),
            ConfirmationIssue::WrongKind { .. } => {
                "This confirmation link belongs to a different page. Please go back and start again.".to_string()
            }
            ConfirmationIssue::Incomplete { kind: TransactionKind::Receive, .. } => {
                "The ISBN needed to receive this book is missing.".to_string()
            }
            ConfirmationIssue::Incomplete { kind: TransactionKind::Donate, .. } => {
                "A title is required to donate this book.".to_string()
            }
        }
    }
}

/// Confirmation page state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    /// Waiting for the router and the token
    Loading,
    /// Terminal for this page load; the only way out is back
    Error(ConfirmationIssue),
    /// Record decoded and waiting for the user
    Ready {
        transaction: PendingTransaction,
        consent: bool,
        /// Inline message from the last rejected confirm or failed submission
        error: Option<String>,
    },
    /// The one mutating call is in flight
    Submitting { transaction: PendingTransaction, consent: bool },
    /// Terminal; the page navigates to completion
    Submitted,
}

impl ConfirmationState {
    pub fn name(&self) -> &'static str {
        match self {
            ConfirmationState::Loading => "loading",
            ConfirmationState::Error(_) => "error",
            ConfirmationState::Ready { .. } => "ready",
            ConfirmationState::Submitting { .. } => "submitting",
            ConfirmationState::Submitted => "submitted",
        }
    }

    /// Transaction on display, if any
    pub fn transaction(&self) -> Option<&PendingTransaction> {
        match self {
            ConfirmationState::Ready { transaction, .. } | ConfirmationState::Submitting { transaction, .. } => {
                Some(transaction)
            }
            _ => None,
        }
    }

    /// Inline or page-level error message, if any
    pub fn error_message(&self) -> Option<String> {
        match self {
            ConfirmationState::Error(issue) => Some(issue.user_message()),
            ConfirmationState::Ready { error, .. } => error.clone(),
            _ => None,
        }
    }
}

/// What a confirm invocation led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Submission accepted; go to the completion page
    Submitted,
    /// Donation attempted without consent; no call was made
    ConsentRequired,
    /// Backend or network refused; page is Ready again with the message
    Failed(SubmissionFailure),
    /// Another confirm is in flight, or the page is not Ready
    Ignored,
}

impl ConfirmOutcome {
    /// Navigation the page performs after this outcome
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            ConfirmOutcome::Submitted => Some(Navigation::Done),
            _ => None,
        }
    }
}
