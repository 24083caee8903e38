//! Record fetching and processing
//!
//! Pulls every record of a table (with retries), normalizes each field,
//! downloads attachments, fills in expected fields, and orders the result
//! newest first.

use crate::adapters::airtable::AirtableApi;
use crate::core::download::AttachmentDownloader;
use crate::core::normalize::{classify, Normalized};
use crate::core::retry::RetryPolicy;
use crate::domain::{FieldValue, ProcessedRecord, RawRecord, TableDescriptor};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

/// Fetches and processes the records of one table at a time
pub struct RecordFetcher {
    api: Arc<dyn AirtableApi>,
    downloader: AttachmentDownloader,
    policy: RetryPolicy,
    show_progress: bool,
}

impl RecordFetcher {
    pub fn new(
        api: Arc<dyn AirtableApi>,
        downloader: AttachmentDownloader,
        policy: RetryPolicy,
        show_progress: bool,
    ) -> Self {
        Self {
            api,
            downloader,
            policy,
            show_progress,
        }
    }

    /// Fetch and process all records of `table`
    ///
    /// Failures are absorbed: after the last failed attempt the error is
    /// logged and an empty list is returned.
    pub async fn fetch(
        &self,
        table: &TableDescriptor,
        expected_fields: Option<&[String]>,
    ) -> Vec<ProcessedRecord> {
        let raw_records = match self
            .policy
            .run(&table.name, || self.api.list_records(table))
            .await
        {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    table = %table.name,
                    attempts = self.policy.max_attempts(),
                    "Failed to fetch data from table '{}' after {} attempts: {}",
                    table.name,
                    self.policy.max_attempts(),
                    e
                );
                return Vec::new();
            }
        };

        if raw_records.is_empty() {
            tracing::warn!(table = %table.name, "No records found in table '{}'", table.name);
            return Vec::new();
        }

        tracing::info!(
            table = %table.name,
            count = raw_records.len(),
            "Processing {} records from {}",
            raw_records.len(),
            table.name
        );

        let progress = self.progress_bar(table, raw_records.len());
        let mut processed = Vec::with_capacity(raw_records.len());

        for raw in raw_records {
            let mut record = self.process_record(raw).await;
            if let Some(fields) = expected_fields {
                record.complete_schema(fields);
            }
            processed.push(record);
            progress.inc(1);
        }
        progress.finish_and_clear();

        sort_newest_first(&mut processed);
        processed
    }

    async fn process_record(&self, raw: RawRecord) -> ProcessedRecord {
        let mut record = ProcessedRecord::new(raw.id.clone(), raw.created_time);

        for (field, value) in &raw.fields {
            let normalized = match classify(value, field) {
                Normalized::Text(text) => FieldValue::Text(text),
                Normalized::Attachments(refs) => {
                    FieldValue::Attachments(self.downloader.download_all(&raw.id, &refs).await)
                }
            };
            record.insert(field.clone(), normalized);
        }

        record
    }

    fn progress_bar(&self, table: &TableDescriptor, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}",
        ) {
            progress.set_style(style.progress_chars("#>-"));
        }
        progress.set_message(format!("Processing {}", table.name));
        progress
    }
}

/// Sort by raw creation time, newest first; records without one go last
pub fn sort_newest_first(records: &mut [ProcessedRecord]) {
    records.sort_by(|a, b| b.created_time.cmp(&a.created_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecordId;

    fn record(id: &str, created: Option<&str>) -> ProcessedRecord {
        ProcessedRecord::new(RecordId::new(id).unwrap(), created.map(String::from))
    }

    #[test]
    fn test_sort_newest_first_blanks_last() {
        let mut records = vec![
            record("rec1", Some("2024-01-01T00:00:00Z")),
            record("rec2", Some("2024-03-01T00:00:00Z")),
            record("rec3", None),
        ];

        sort_newest_first(&mut records);

        let order: Vec<&str> = records.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(order, ["rec2", "rec1", "rec3"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_times() {
        let mut records = vec![
            record("recA", Some("2024-01-01T00:00:00Z")),
            record("recB", Some("2024-01-01T00:00:00Z")),
        ];

        sort_newest_first(&mut records);

        assert_eq!(records[0].record_id.as_str(), "recA");
        assert_eq!(records[1].record_id.as_str(), "recB");
    }
}
