//! Shared logging utilities for consistent tracing across the forwarder

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Default log level when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter directive used for stdout tracing
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    format!("forwarder={base_level},shared={base_level},reqwest=warn,hyper=warn")
}

/// Initialize tracing subscriber with an optional log level
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(log_level)));

    // try_init: tests and embedding hosts may already have installed a subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for contact-aware info logging
#[macro_export]
macro_rules! contact_info {
    ($contact_id:expr, $($arg:tt)*) => {
        tracing::info!(
            contact_id = %$contact_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for contact-aware warning logging
#[macro_export]
macro_rules! contact_warn {
    ($contact_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            contact_id = %$contact_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for contact-aware error logging
#[macro_export]
macro_rules! contact_error {
    ($contact_id:expr, $($arg:tt)*) => {
        tracing::error!(
            contact_id = %$contact_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for contact-aware debug logging
#[macro_export]
macro_rules! contact_debug {
    ($contact_id:expr, $($arg:tt)*) => {
        tracing::debug!(
            contact_id = %$contact_id,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: &str, details: &str) {
    info!(
        component = component,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: &str, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = component,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: &str, message: &str) {
    info!(
        component = component,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
