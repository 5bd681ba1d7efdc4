//! Page controller logic for the exchange workflow

pub mod ad_selector;
pub mod codec;
pub mod confirmation;
pub mod draft;
pub mod search;

pub use ad_selector::{AdBanner, select, select_ad};
pub use confirmation::ConfirmationController;
pub use draft::TransactionDraft;
pub use search::{BookSearch, donate_navigation};
