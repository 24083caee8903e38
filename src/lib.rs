// Airtable Export - Markdown snapshots of an Airtable base
// Copyright (c) 2025 Airtable Export Contributors
// Licensed under the MIT License

//! # Airtable Export
//!
//! Exports every table of an Airtable base into human-readable Markdown
//! documents, downloads attachment files, and writes a cross-table summary.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Discovering** the tables of a base and flagging drift from the
//!   expected table set
//! - **Fetching** every record of each table, with pagination and retries
//! - **Normalizing** raw cell values into printable text (dates, numbers,
//!   JSON) and downloading attachments
//! - **Rendering** one Markdown table per Airtable table plus `summary.md`
//!
//! The output directory is a disposable report. Every run regenerates it
//! from the remote base.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (discovery, fetch, normalize, render, export)
//! - [`adapters`] - External integrations (Airtable REST API)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Console and file logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airtable_export::config::load_config;
//! use airtable_export::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads AIRTABLE_API_KEY and AIRTABLE_BASE_ID from the environment
//!     let config = load_config(None)?;
//!
//!     let coordinator = ExportCoordinator::new(config)?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!(
//!         "Exported {} records from {} tables",
//!         summary.total_records, summary.total_tables
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Value Normalization
//!
//! ```rust
//! use airtable_export::core::normalize::{classify, Normalized};
//! use serde_json::json;
//!
//! let value = classify(&json!("2024-03-01T10:15:30.000Z"), "Pickup Date");
//! assert_eq!(value, Normalized::Text("2024-03-01 10:15:30".to_string()));
//!
//! let value = classify(&json!("READY"), "Status");
//! assert_eq!(value, Normalized::Text("ready".to_string()));
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::ExportError`] for all errors. Failures inside a
//! run (one table, one attachment) are retried, logged, and absorbed; only
//! startup problems such as a missing access token surface as errors.
//!
//! ```rust,no_run
//! use airtable_export::domain::ExportError;
//!
//! fn example() -> Result<(), ExportError> {
//!     let config = airtable_export::config::load_config(None)?;
//!     println!("Base: {}", config.airtable.base_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Logging uses the `tracing` crate, written to the console and to
//! `airtable_sync.log`:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(table = "Products", "No records found");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
