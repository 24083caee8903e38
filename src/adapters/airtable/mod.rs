//! Airtable adapter implementation
//!
//! This module provides the integration with the Airtable REST API: the
//! [`AirtableApi`] trait, its `reqwest` implementation, and the wire models.

pub mod api;
pub mod client;
pub mod models;

pub use api::AirtableApi;
pub use client::AirtableClient;
pub use models::{FieldSchema, RecordPage, TableSchema, TablesResponse};
