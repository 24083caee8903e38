//! Airtable API trait definition
//!
//! The exporter talks to the remote base only through [`AirtableApi`], so
//! the discovery, fetch and download logic can be exercised against an
//! in-memory implementation.

use crate::domain::{RawRecord, Result, TableDescriptor};
use async_trait::async_trait;
use std::path::Path;

/// Operations the exporter needs from the remote base
#[async_trait]
pub trait AirtableApi: Send + Sync {
    /// List every table in the base with its field names
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success response.
    async fn list_tables(&self) -> Result<Vec<TableDescriptor>>;

    /// Fetch every record of a table, following pagination to the end
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails; partial results are
    /// discarded.
    async fn list_records(&self, table: &TableDescriptor) -> Result<Vec<RawRecord>>;

    /// Stream the file at `url` to `destination`, returning the bytes written
    ///
    /// # Errors
    ///
    /// Returns an error on transport, HTTP or disk failure. No partial file
    /// is left behind.
    async fn download(&self, url: &str, destination: &Path) -> Result<u64>;

    /// Identifier of the base being exported
    fn base_id(&self) -> &str;
}
