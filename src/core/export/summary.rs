//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::render::ExportedTable;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Number of tables discovered
    pub total_tables: usize,

    /// Number of records processed across all tables
    pub total_records: usize,

    /// Tables that ended up with no records
    pub empty_tables: Vec<String>,

    /// Markdown documents written, including the summary
    pub documents_written: Vec<PathBuf>,

    /// Attachments saved to disk
    pub attachments_downloaded: usize,

    /// Attachments that could not be downloaded
    pub attachments_failed: usize,

    /// Whether the run stopped because no tables were found
    pub halted: bool,

    /// Duration of the export
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportIssue>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportIssue) {
        self.errors.push(error);
    }

    /// Account for one table's processed records
    pub fn record_table(&mut self, table: &ExportedTable) {
        self.total_records += table.records.len();
        if table.records.is_empty() {
            self.empty_tables.push(table.name.clone());
        }

        for attachment in table.records.iter().flat_map(|r| r.attachments()) {
            if attachment.is_downloaded() {
                self.attachments_downloaded += 1;
            } else {
                self.attachments_failed += 1;
            }
        }
    }

    /// Check if the export completed without halting or errors
    pub fn is_successful(&self) -> bool {
        !self.halted && self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        if self.halted {
            tracing::error!("No tables found or couldn't fetch table information");
            return;
        }

        tracing::info!(
            total_tables = self.total_tables,
            total_records = self.total_records,
            documents = self.documents_written.len(),
            attachments_downloaded = self.attachments_downloaded,
            attachments_failed = self.attachments_failed,
            duration_secs = self.duration.as_secs(),
            "Data extraction completed"
        );

        for table in &self.empty_tables {
            tracing::warn!(table = %table, "No data retrieved for table: {}", table);
        }

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = ?error.context,
                    "Export error"
                );
            }
        }
    }
}

/// Type of export issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportIssueType {
    /// Table discovery failed or returned nothing
    Discovery,
    /// Writing a table document failed
    Render,
    /// Writing the summary document failed
    Summary,
}

/// Non-fatal problem recorded during an export
#[derive(Debug, Clone)]
pub struct ExportIssue {
    /// Type of issue
    pub error_type: ExportIssueType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., table name)
    pub context: Option<String>,
}

impl ExportIssue {
    /// Create a new export issue
    pub fn new(error_type: ExportIssueType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the issue
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
