//! Page identity and navigation targets

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::TransactionKind;

pub const DONATE_PATH: &str = "/donate";
pub const CONFIRM_DONATE_PATH: &str = "/confirm-donate";
pub const CONFIRM_RECEIVE_PATH: &str = "/confirm";
pub const DONE_PATH: &str = "/done";

/// Query parameter carrying the transaction token
pub const TOKEN_PARAM: &str = "data";

/// Page a controller belongs to, attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageId {
    Donate,
    Receive,
    FindBook,
    ConfirmDonate,
    ConfirmReceive,
    Cli,
}

impl PageId {
    /// Entry page for a transaction kind
    pub fn entry(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Donate => PageId::Donate,
            TransactionKind::Receive => PageId::Receive,
        }
    }

    /// Confirmation page for a transaction kind
    pub fn confirmation(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Donate => PageId::ConfirmDonate,
            TransactionKind::Receive => PageId::ConfirmReceive,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageId::Donate => write!(f, "donate"),
            PageId::Receive => write!(f, "receive"),
            PageId::FindBook => write!(f, "findbook"),
            PageId::ConfirmDonate => write!(f, "confirm_donate"),
            PageId::ConfirmReceive => write!(f, "confirm_receive"),
            PageId::Cli => write!(f, "cli"),
        }
    }
}

impl TransactionKind {
    /// Path of the confirmation page handling this kind
    pub fn confirm_path(&self) -> &'static str {
        match self {
            TransactionKind::Donate => CONFIRM_DONATE_PATH,
            TransactionKind::Receive => CONFIRM_RECEIVE_PATH,
        }
    }
}

/// Where a controller asks the router to go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Confirmation page with the encoded transaction in its query
    ToConfirm { kind: TransactionKind, url: String },
    /// Donate entry page prefilled from a search selection
    ToDonate { url: String },
    /// Completion page after a successful submission
    Done,
    /// Previous page; in-memory state is discarded
    Back,
}

impl Navigation {
    pub fn url(&self) -> &str {
        match self {
            Navigation::ToConfirm { url, .. } | Navigation::ToDonate { url } => url,
            Navigation::Done => DONE_PATH,
            Navigation::Back => "",
        }
    }
}
