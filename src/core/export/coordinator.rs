//! Export coordinator - main orchestrator for the export process
//!
//! Runs discovery, then fetch and render for each table in the order the
//! base returns them, then writes the summary. A table that fails to fetch
//! or render never stops the others.

use crate::adapters::airtable::{AirtableApi, AirtableClient};
use crate::config::ExporterConfig;
use crate::core::discovery::discover_tables;
use crate::core::download::{AttachmentDownloader, ATTACHMENTS_DIR};
use crate::core::export::summary::{ExportIssue, ExportIssueType, ExportSummary};
use crate::core::fetcher::RecordFetcher;
use crate::core::render::{ExportedTable, MarkdownRenderer};
use crate::core::retry::RetryPolicy;
use crate::domain::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Export coordinator
pub struct ExportCoordinator {
    config: ExporterConfig,
    api: Arc<dyn AirtableApi>,
    fetcher: RecordFetcher,
    renderer: MarkdownRenderer,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the Airtable REST API
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be created.
    pub fn new(config: ExporterConfig) -> Result<Self> {
        let client = AirtableClient::new(&config.airtable, config.export.download_chunk_bytes)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a coordinator over any [`AirtableApi`] implementation
    pub fn with_api(config: ExporterConfig, api: Arc<dyn AirtableApi>) -> Self {
        let export = &config.export;

        let downloader = AttachmentDownloader::new(
            api.clone(),
            &export.output_dir,
            RetryPolicy::exponential(
                export.download_max_attempts,
                Duration::from_millis(export.download_retry_delay_ms),
            ),
        );

        let fetcher = RecordFetcher::new(
            api.clone(),
            downloader,
            RetryPolicy::linear(
                export.fetch_max_attempts,
                Duration::from_millis(export.fetch_retry_delay_ms),
            ),
            export.show_progress,
        );

        let renderer = MarkdownRenderer::new(export.output_dir.clone());

        Self {
            config,
            api,
            fetcher,
            renderer,
        }
    }

    /// Execute the export
    ///
    /// 1. Prepares the output directory
    /// 2. Discovers tables (halts when there are none)
    /// 3. For each table: fetches and processes records, writes its document
    /// 4. Writes `summary.md`
    ///
    /// Per-table failures are recorded in the returned summary.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output directory cannot be created.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        tracing::info!(
            base_id = %self.api.base_id(),
            output_dir = %self.renderer.output_dir().display(),
            "Starting export process"
        );

        tokio::fs::create_dir_all(self.renderer.output_dir().join(ATTACHMENTS_DIR)).await?;

        let tables = discover_tables(self.api.as_ref(), &self.config.expected_tables).await;
        summary.total_tables = tables.len();

        if tables.is_empty() {
            summary.halted = true;
            summary.add_error(ExportIssue::new(
                ExportIssueType::Discovery,
                "No tables found or couldn't fetch table information".to_string(),
            ));
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let mut exported = Vec::with_capacity(tables.len());

        for table in &tables {
            tracing::info!(table = %table.name, "Processing table: {}", table.name);

            let records = self
                .fetcher
                .fetch(table, self.config.expected_fields(&table.name))
                .await;
            let table_export = ExportedTable::new(table.name.clone(), records);

            match self.renderer.write_table(&table_export).await {
                Ok(path) => summary.documents_written.push(path),
                Err(e) => {
                    tracing::error!(
                        table = %table.name,
                        error = %e,
                        "Error saving markdown for table '{}'",
                        table.name
                    );
                    summary.add_error(
                        ExportIssue::new(ExportIssueType::Render, e.to_string())
                            .with_context(format!("table={}", table.name)),
                    );
                }
            }

            summary.record_table(&table_export);
            exported.push(table_export);
        }

        match self.renderer.write_summary(&exported).await {
            Ok(path) => summary.documents_written.push(path),
            Err(e) => {
                tracing::error!(error = %e, "Error writing summary document");
                summary.add_error(ExportIssue::new(ExportIssueType::Summary, e.to_string()));
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}
