//! Core business logic for the exporter.
//!
//! # Modules
//!
//! - [`discovery`] - Table discovery and schema drift detection
//! - [`fetcher`] - Record fetching, normalization and ordering
//! - [`normalize`] - Field value classification
//! - [`download`] - Attachment downloads
//! - [`render`] - Markdown documents
//! - [`retry`] - Bounded retry with backoff
//! - [`export`] - Export orchestration and summary
//!
//! # Export Workflow
//!
//! 1. **Discover**: list the base's tables (halt if there are none)
//! 2. **Fetch**: page through each table's records, retrying transient failures
//! 3. **Normalize**: turn raw values into printable text, downloading attachments
//! 4. **Render**: write one Markdown document per table
//! 5. **Summarize**: write `summary.md` with record counts and field types
//!
//! # Example
//!
//! ```rust,no_run
//! use airtable_export::config::load_config;
//! use airtable_export::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None)?;
//! let coordinator = ExportCoordinator::new(config)?;
//!
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Tables: {}", summary.total_tables);
//! println!("Records: {}", summary.total_records);
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod download;
pub mod export;
pub mod fetcher;
pub mod normalize;
pub mod render;
pub mod retry;
