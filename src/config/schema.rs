//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the optional
//! TOML file. Every section has defaults, so an empty file (or no file at
//! all) plus `AIRTABLE_API_KEY` in the environment is a valid configuration.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Airtable API connection settings
    #[serde(default)]
    pub airtable: AirtableConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Tables the base is expected to contain, with their expected fields
    #[serde(default = "default_expected_tables")]
    pub expected_tables: BTreeMap<String, Vec<String>>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            airtable: AirtableConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
            expected_tables: default_expected_tables(),
        }
    }
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid, including
    /// a missing API key.
    pub fn validate(&self) -> Result<(), String> {
        self.airtable.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Expected field names for a table, if the table is known
    pub fn expected_fields(&self, table_name: &str) -> Option<&[String]> {
        self.expected_tables.get(table_name).map(Vec::as_slice)
    }
}

/// Airtable API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    /// Personal access token; normally supplied through `AIRTABLE_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Base identifier
    #[serde(default = "default_base_id")]
    pub base_id: String,

    /// REST API root URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Records requested per page (Airtable caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl AirtableConfig {
    /// The API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.trim().is_empty())
    }

    fn validate(&self) -> Result<(), String> {
        if self.api_key().is_none() {
            return Err("AIRTABLE_API_KEY not found in environment variables".to_string());
        }

        if self.base_id.trim().is_empty() {
            return Err("airtable.base_id cannot be empty".to_string());
        }

        url::Url::parse(&self.api_url)
            .map_err(|e| format!("Invalid airtable.api_url '{}': {e}", self.api_url))?;

        if self.page_size == 0 || self.page_size > 100 {
            return Err(format!(
                "airtable.page_size must be between 1 and 100, got {}",
                self.page_size
            ));
        }

        Ok(())
    }
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_id: default_base_id(),
            api_url: default_api_url(),
            page_size: default_page_size(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving the Markdown documents and attachments
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Attempts made to fetch a table's records
    #[serde(default = "default_max_attempts")]
    pub fetch_max_attempts: usize,

    /// Base delay between record fetch attempts; grows linearly
    #[serde(default = "default_fetch_retry_delay_ms")]
    pub fetch_retry_delay_ms: u64,

    /// Attempts made to download one attachment
    #[serde(default = "default_max_attempts")]
    pub download_max_attempts: usize,

    /// Base delay between download attempts; doubles each attempt
    #[serde(default = "default_download_retry_delay_ms")]
    pub download_retry_delay_ms: u64,

    /// Buffer size used when streaming attachments to disk
    #[serde(default = "default_download_chunk_bytes")]
    pub download_chunk_bytes: usize,

    /// Show a progress bar while processing records
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }

        if self.fetch_max_attempts == 0 {
            return Err("export.fetch_max_attempts must be > 0".to_string());
        }

        if self.download_max_attempts == 0 {
            return Err("export.download_max_attempts must be > 0".to_string());
        }

        if self.download_chunk_bytes == 0 {
            return Err("export.download_chunk_bytes must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fetch_max_attempts: default_max_attempts(),
            fetch_retry_delay_ms: default_fetch_retry_delay_ms(),
            download_max_attempts: default_max_attempts(),
            download_retry_delay_ms: default_download_retry_delay_ms(),
            download_chunk_bytes: default_download_chunk_bytes(),
            show_progress: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to a file
    #[serde(default = "default_true")]
    pub file_enabled: bool,

    /// Log file path
    #[serde(default = "default_log_file")]
    pub file_path: PathBuf,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        if self.file_enabled && self.file_path.file_name().is_none() {
            return Err(format!(
                "logging.file_path '{}' does not name a file",
                self.file_path.display()
            ));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_enabled: true,
            file_path: default_log_file(),
        }
    }
}

// Default value functions
fn default_base_id() -> String {
    "applgr65s82aAWI6t".to_string()
}

fn default_api_url() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("airtable_data")
}

fn default_max_attempts() -> usize {
    3
}

fn default_fetch_retry_delay_ms() -> u64 {
    2000
}

fn default_download_retry_delay_ms() -> u64 {
    1000
}

fn default_download_chunk_bytes() -> usize {
    8192
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("airtable_sync.log")
}

/// Tables known to exist in the shop base, with the fields the storefront
/// relies on
pub fn default_expected_tables() -> BTreeMap<String, Vec<String>> {
    let tables: [(&str, &[&str]); 8] = [
        (
            "Pickup Orders",
            &[
                "Order ID",
                "Customer Name",
                "Phone",
                "Items",
                "Total",
                "Payment Method",
                "Email",
                "Status",
                "Pickup Date",
            ],
        ),
        ("Order Details", &["Order ID", "Items", "Status"]),
        ("Products", &["Name", "Price", "Category", "Description"]),
        ("Category", &["Name", "Description"]),
        ("Settings", &["Key", "Value"]),
        ("Shipping Orders", &["Order ID", "Status"]),
        ("Delivery Orders", &["Order ID", "Status"]),
        ("Fee Management", &["Name", "Amount"]),
    ];

    tables
        .iter()
        .map(|(name, fields)| {
            (
                name.to_string(),
                fields.iter().map(|f| f.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn config_with_key() -> ExporterConfig {
        let mut config = ExporterConfig::default();
        config.airtable.api_key = Some(secret_string("pat123".to_string()));
        config
    }

    #[test]
    fn test_defaults() {
        let config = ExporterConfig::default();
        assert_eq!(config.airtable.base_id, "applgr65s82aAWI6t");
        assert_eq!(config.airtable.api_url, "https://api.airtable.com/v0");
        assert_eq!(config.export.output_dir, PathBuf::from("airtable_data"));
        assert_eq!(config.export.fetch_max_attempts, 3);
        assert_eq!(config.export.fetch_retry_delay_ms, 2000);
        assert_eq!(config.export.download_max_attempts, 3);
        assert_eq!(config.export.download_chunk_bytes, 8192);
        assert_eq!(config.logging.file_path, PathBuf::from("airtable_sync.log"));
        assert_eq!(config.expected_tables.len(), 8);
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = ExporterConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.contains("AIRTABLE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails_validation() {
        let mut config = ExporterConfig::default();
        config.airtable.api_key = Some(secret_string("  ".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        assert!(config_with_key().validate().is_ok());
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = config_with_key();
        config.airtable.api_url = "not a url".to_string();
        assert!(config.validate().unwrap_err().contains("api_url"));
    }

    #[test]
    fn test_invalid_page_size() {
        let mut config = config_with_key();
        config.airtable.page_size = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = config_with_key();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = config_with_key();
        config.export.fetch_max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expected_fields_lookup() {
        let config = ExporterConfig::default();
        let fields = config.expected_fields("Products").unwrap();
        assert_eq!(fields, ["Name", "Price", "Category", "Description"]);
        assert!(config.expected_fields("Unknown").is_none());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = config_with_key();
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("pat123"));
    }
}
