//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use crate::config::{load_unvalidated, ExporterConfig};
use crate::domain::{ExportError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Airtable Export - Markdown snapshots of an Airtable base
#[derive(Parser, Debug)]
#[command(name = "airtable-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults to airtable-export.toml if present)
    #[arg(short, long, env = "AIRTABLE_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Directory receiving the Markdown documents and attachments
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Subcommand to execute (defaults to `export`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every table to Markdown with a summary report
    Export(commands::export::ExportArgs),

    /// List the base's tables and report drift from the expected tables
    Tables(commands::tables::TablesArgs),

    /// Validate configuration and environment
    ValidateConfig(commands::validate::ValidateArgs),
}

impl Cli {
    /// Load configuration and apply command-line overrides, then validate
    ///
    /// # Errors
    ///
    /// Returns a configuration error if loading or validation fails.
    pub fn load_config(&self) -> Result<ExporterConfig> {
        let mut config = load_unvalidated(self.config.as_deref())?;

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        if let Some(output_dir) = &self.output_dir {
            config.export.output_dir = output_dir.clone();
        }

        config.validate().map_err(ExportError::Configuration)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_no_subcommand() {
        let cli = Cli::parse_from(["airtable-export"]);
        assert!(cli.command.is_none());
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["airtable-export", "export", "--no-progress"]);
        match cli.command {
            Some(Commands::Export(args)) => assert!(args.no_progress),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["airtable-export", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_cli_parse_with_overrides() {
        let cli = Cli::parse_from([
            "airtable-export",
            "--log-level",
            "debug",
            "--output-dir",
            "snapshots",
            "tables",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert_eq!(cli.output_dir, Some(PathBuf::from("snapshots")));
        assert!(matches!(cli.command, Some(Commands::Tables(_))));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["airtable-export", "validate-config"]);
        assert!(matches!(cli.command, Some(Commands::ValidateConfig(_))));
    }
}
