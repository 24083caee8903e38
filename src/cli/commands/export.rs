//! Export command implementation
//!
//! This module implements the `export` command, which writes one Markdown
//! document per table plus `summary.md`.

use crate::config::ExporterConfig;
use crate::core::export::{ExportCoordinator, ExportSummary};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Hide the per-table progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ExportArgs {
    /// Execute the export command
    ///
    /// Partial failures are logged and reported but still exit with 0.
    pub async fn execute(&self, mut config: ExporterConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        if self.no_progress {
            config.export.show_progress = false;
        }

        let coordinator = match ExportCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(2);
            }
        };

        println!("🚀 Starting export...");
        println!();

        let summary = match coordinator.execute_export().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        Ok(0)
    }
}

fn print_summary(summary: &ExportSummary) {
    if summary.halted {
        println!("⚠️  No tables found or couldn't fetch table information");
        return;
    }

    println!();
    println!("📊 Export Summary:");
    println!("  Tables: {}", summary.total_tables);
    println!("  Records: {}", summary.total_records);
    println!("  Documents Written: {}", summary.documents_written.len());
    println!(
        "  Attachments: {} downloaded, {} failed",
        summary.attachments_downloaded, summary.attachments_failed
    );
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.empty_tables.is_empty() {
        println!("  Tables without data: {}", summary.empty_tables.join(", "));
        println!();
    }

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }

    if summary.is_successful() {
        println!("✅ Data extraction completed successfully!");
    } else {
        println!("⚠️  Data extraction completed with errors");
    }
}
