//! Exchange library for the campus textbook exchange front end
//!
//! This library provides the donate/receive transaction workflow: catalog
//! lookup, the entry-page draft, the token that carries a pending
//! transaction to the confirmation page, the confirmation state machine that
//! issues the single mutating call, and the sponsor banner selector.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{ExchangeError, ExchangeResult};
pub use types::*;
pub use traits::*;
pub use crate::core::{AdBanner, BookSearch, ConfirmationController, TransactionDraft};
pub use services::*;
