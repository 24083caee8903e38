//! Tables command implementation
//!
//! Lists the base's tables with their fields and reports how they differ
//! from the expected tables, without fetching any records.

use crate::adapters::airtable::{AirtableApi, AirtableClient};
use crate::config::ExporterConfig;
use crate::core::discovery::detect_drift;
use clap::Args;

/// Arguments for the tables command
#[derive(Args, Debug, Default)]
pub struct TablesArgs {
    /// Also list each table's fields
    #[arg(long)]
    pub fields: bool,
}

impl TablesArgs {
    /// Execute the tables command
    pub async fn execute(&self, config: &ExporterConfig) -> anyhow::Result<i32> {
        let client = AirtableClient::new(&config.airtable, config.export.download_chunk_bytes)?;

        let tables = match client.list_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching tables");
                eprintln!("❌ Failed to list tables: {e}");
                return Ok(4);
            }
        };

        println!("📋 Base {} has {} table(s):", client.base_id(), tables.len());
        for table in &tables {
            println!("  - {} ({}, {} fields)", table.name, table.id, table.fields.len());
            if self.fields {
                for field in &table.fields {
                    println!("      • {field}");
                }
            }
        }
        println!();

        let drift = detect_drift(&tables, &config.expected_tables);
        if drift.is_empty() {
            println!("✅ All expected tables and fields are present");
            return Ok(0);
        }

        if !drift.missing_tables.is_empty() {
            println!("⚠️  Missing tables: {}", drift.missing_tables.join(", "));
        }
        for (table, fields) in &drift.missing_fields {
            println!("⚠️  {table} is missing fields: {}", fields.join(", "));
        }

        Ok(0)
    }
}
