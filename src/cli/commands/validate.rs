//! Validate config command implementation
//!
//! This module implements the `validate-config` command, which loads the
//! configuration layers and reports whether the result is usable.

use crate::cli::Cli;
use crate::config::ExporterConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Runs before logging is set up, so it reports on stdout only.
    pub fn execute(&self, cli: &Cli) -> i32 {
        match &cli.config {
            Some(path) => println!("🔍 Validating configuration file: {}", path.display()),
            None => println!("🔍 Validating configuration from defaults and environment"),
        }
        println!();

        match cli.load_config() {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_config(&config);
                0
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                2
            }
        }
    }
}

fn print_config(config: &ExporterConfig) {
    println!("Configuration Summary:");
    println!("  Base ID: {}", config.airtable.base_id);
    println!("  API URL: {}", config.airtable.api_url);
    println!("  API Key: set (hidden)");
    println!("  Output Directory: {}", config.export.output_dir.display());
    println!(
        "  Fetch Attempts: {} (base delay {}ms)",
        config.export.fetch_max_attempts, config.export.fetch_retry_delay_ms
    );
    println!(
        "  Download Attempts: {} (base delay {}ms)",
        config.export.download_max_attempts, config.export.download_retry_delay_ms
    );
    println!("  Log Level: {}", config.logging.level);
    if config.logging.file_enabled {
        println!("  Log File: {}", config.logging.file_path.display());
    }
    println!("  Expected Tables: {}", config.expected_tables.len());
    println!();
}
