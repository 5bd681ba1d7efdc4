//! Shared types for the campus textbook exchange
//!
//! Contains the data model every page controller agrees on: book records,
//! pending transactions, submission payloads, navigation targets, failure
//! taxonomies, configuration and logging helpers.

pub mod ads;
pub mod config;
pub mod errors;
pub mod logging;
pub mod navigation;
pub mod types;

pub use ads::*;
pub use config::ExchangeConfig;
pub use errors::*;
pub use navigation::*;
pub use types::*;
