// Airtable Export - Markdown snapshots of an Airtable base
// Copyright (c) 2025 Airtable Export Contributors
// Licensed under the MIT License

use airtable_export::cli::commands::export::ExportArgs;
use airtable_export::cli::{Cli, Commands};
use airtable_export::config::ExporterConfig;
use airtable_export::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Some(Commands::ValidateConfig(args)) = &cli.command {
        process::exit(args.execute(&cli));
    }

    // Fails fast when AIRTABLE_API_KEY is missing
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            process::exit(2);
        }
    };

    let guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_id = %config.airtable.base_id,
        "Airtable Export"
    );

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // Flush the file writer before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: ExporterConfig) -> anyhow::Result<i32> {
    match &cli.command {
        None => ExportArgs::default().execute(config).await,
        Some(Commands::Export(args)) => args.execute(config).await,
        Some(Commands::Tables(args)) => args.execute(&config).await,
        Some(Commands::ValidateConfig(args)) => Ok(args.execute(cli)),
    }
}
