//! Configuration management.
//!
//! Configuration comes from three layers, later layers winning:
//!
//! 1. Built-in defaults (base `applgr65s82aAWI6t`, output `airtable_data/`)
//! 2. An optional TOML file (`--config`, or `airtable-export.toml` if present)
//!    with `${VAR_NAME}` substitution
//! 3. Environment variables (`AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`,
//!    `AIRTABLE_EXPORT_*`), including those loaded from `.env`
//!
//! The access token is required; loading fails before any work starts when
//! it is absent.
//!
//! # Example Configuration
//!
//! ```toml
//! [airtable]
//! base_id = "applgr65s82aAWI6t"
//! api_key = "${AIRTABLE_API_KEY}"
//!
//! [export]
//! output_dir = "airtable_data"
//! fetch_max_attempts = 3
//!
//! [logging]
//! level = "info"
//! file_path = "airtable_sync.log"
//!
//! [expected_tables]
//! "Products" = ["Name", "Price", "Category", "Description"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_unvalidated, DEFAULT_CONFIG_FILE};
pub use schema::{AirtableConfig, ExportConfig, ExporterConfig, LoggingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
