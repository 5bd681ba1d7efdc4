//! Shared logging utilities for consistent tracing across page controllers

use crate::navigation::PageId;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Filter directive for the exchange crates at the given base level
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("exchange={base_level},shared={base_level},reqwest=warn")
}

/// Initialize tracing subscriber with an optional log level
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = filter_directive(log_level);

    // try_init so tests and embedders that already installed a subscriber keep theirs
    let _ = fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for page-aware info logging
#[macro_export]
macro_rules! page_info {
    ($page:expr, $($arg:tt)*) => {
        tracing::info!(
            page = %$page,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for page-aware warning logging
#[macro_export]
macro_rules! page_warn {
    ($page:expr, $($arg:tt)*) => {
        tracing::warn!(
            page = %$page,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for page-aware error logging
#[macro_export]
macro_rules! page_error {
    ($page:expr, $($arg:tt)*) => {
        tracing::error!(
            page = %$page,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for page-aware debug logging
#[macro_export]
macro_rules! page_debug {
    ($page:expr, $($arg:tt)*) => {
        tracing::debug!(
            page = %$page,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for error conditions
pub fn log_error(page: PageId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        page = %page,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(page: PageId, message: &str) {
    info!(
        page = %page,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(page: PageId, action: &str, details: &str) {
    info!(
        page = %page,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
