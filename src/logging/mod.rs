//! Logging and observability
//!
//! Plain-text logging through `tracing`, written to the console and to a
//! log file (`airtable_sync.log` by default).
//!
//! # Example
//!
//! ```no_run
//! use airtable_export::logging::init_logging;
//! use airtable_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::warn!(table = "Products", "No records found");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use airtable_export::log_retry_attempt;
/// use std::time::Duration;
///
/// log_retry_attempt!("Products", 1, 3, Duration::from_secs(2), "Connection reset");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($subject:expr, $attempt:expr, $max_attempts:expr, $delay:expr, $reason:expr) => {
        tracing::warn!(
            subject = %$subject,
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay.as_millis() as u64,
            reason = %$reason,
            "Attempt {} failed, retrying in {:.1}s",
            $attempt,
            $delay.as_secs_f64()
        );
    };
}

/// Log the completion of one table's export
///
/// # Example
///
/// ```no_run
/// use airtable_export::log_table_complete;
/// use std::path::Path;
///
/// log_table_complete!("Products", 42, Path::new("airtable_data/products.md"));
/// ```
#[macro_export]
macro_rules! log_table_complete {
    ($table:expr, $count:expr, $path:expr) => {
        tracing::info!(
            table = %$table,
            records = $count,
            path = %$path.display(),
            "Data saved to {}",
            $path.display()
        );
    };
}
