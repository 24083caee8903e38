//! External system integrations.
//!
//! - [`airtable`] - Airtable REST API (metadata, records, attachment files)
//!
//! Adapters isolate external dependencies behind traits so the export
//! pipeline can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use airtable_export::adapters::airtable::{AirtableApi, AirtableClient};
//! use airtable_export::config::{secret_string, AirtableConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AirtableConfig {
//!     api_key: Some(secret_string("pat-example".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = AirtableClient::new(&config, 8192)?;
//! let tables = client.list_tables().await?;
//! # Ok(())
//! # }
//! ```

pub mod airtable;
