//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use airtable_export::config::load_config;
use airtable_export::domain::ExportError;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "AIRTABLE_API_KEY",
        "AIRTABLE_BASE_ID",
        "AIRTABLE_API_URL",
        "AIRTABLE_EXPORT_OUTPUT_DIR",
        "AIRTABLE_EXPORT_MAX_RETRIES",
        "AIRTABLE_EXPORT_LOG_LEVEL",
        "AIRTABLE_EXPORT_LOG_FILE",
        "TEST_AIRTABLE_TOKEN",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_AIRTABLE_TOKEN", "pat-from-file");

    let file = write_config(
        r#"
[airtable]
api_key = "${TEST_AIRTABLE_TOKEN}"
base_id = "appBakery"
api_url = "https://airtable.example.com/v0"
page_size = 50

[export]
output_dir = "snapshots"
fetch_max_attempts = 5
fetch_retry_delay_ms = 100
download_max_attempts = 4
show_progress = false

[logging]
level = "debug"
file_enabled = false

[expected_tables]
"Products" = ["Name", "Price"]
"#,
    );

    let config = load_config(Some(file.path())).expect("config should load");

    assert_eq!(config.airtable.api_key(), Some("pat-from-file"));
    assert_eq!(config.airtable.base_id, "appBakery");
    assert_eq!(config.airtable.api_url, "https://airtable.example.com/v0");
    assert_eq!(config.airtable.page_size, 50);
    assert_eq!(config.export.output_dir, PathBuf::from("snapshots"));
    assert_eq!(config.export.fetch_max_attempts, 5);
    assert_eq!(config.export.download_max_attempts, 4);
    assert_eq!(config.export.download_chunk_bytes, 8192);
    assert!(!config.export.show_progress);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.file_enabled);
    assert_eq!(config.expected_tables.len(), 1);
    assert_eq!(
        config.expected_fields("Products"),
        Some(&["Name".to_string(), "Price".to_string()][..])
    );

    cleanup_env_vars();
}

#[test]
fn test_environment_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[airtable]
api_key = "pat-from-file"
base_id = "appFromFile"

[export]
output_dir = "from_file"
"#,
    );

    std::env::set_var("AIRTABLE_API_KEY", "pat-from-env");
    std::env::set_var("AIRTABLE_BASE_ID", "appFromEnv");
    std::env::set_var("AIRTABLE_EXPORT_OUTPUT_DIR", "from_env");
    std::env::set_var("AIRTABLE_EXPORT_MAX_RETRIES", "7");
    std::env::set_var("AIRTABLE_EXPORT_LOG_LEVEL", "warn");
    std::env::set_var("AIRTABLE_EXPORT_LOG_FILE", "logs/export.log");

    let config = load_config(Some(file.path())).expect("config should load");

    assert_eq!(config.airtable.api_key(), Some("pat-from-env"));
    assert_eq!(config.airtable.base_id, "appFromEnv");
    assert_eq!(config.export.output_dir, PathBuf::from("from_env"));
    assert_eq!(config.export.fetch_max_attempts, 7);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.file_path, PathBuf::from("logs/export.log"));

    cleanup_env_vars();
}

#[test]
fn test_defaults_with_only_api_key() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    std::env::set_var("AIRTABLE_API_KEY", "pat-only");

    let config = load_config(Some(file.path())).expect("config should load");

    assert_eq!(config.airtable.base_id, "applgr65s82aAWI6t");
    assert_eq!(config.export.output_dir, PathBuf::from("airtable_data"));
    assert_eq!(config.logging.file_path, PathBuf::from("airtable_sync.log"));
    assert_eq!(config.expected_tables.len(), 8);

    cleanup_env_vars();
}

#[test]
fn test_blank_base_id_env_keeps_default() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("");
    std::env::set_var("AIRTABLE_API_KEY", "pat-only");
    std::env::set_var("AIRTABLE_BASE_ID", "  ");

    let config = load_config(Some(file.path())).expect("config should load");
    assert_eq!(config.airtable.base_id, "applgr65s82aAWI6t");

    cleanup_env_vars();
}

#[test]
fn test_missing_api_key_fails_fast() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[airtable]\nbase_id = \"appBakery\"\n");

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ExportError::Configuration(_)));
    assert!(err
        .to_string()
        .contains("AIRTABLE_API_KEY not found in environment variables"));
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[airtable]\napi_key = \"${TEST_AIRTABLE_TOKEN}\"\n");

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("TEST_AIRTABLE_TOKEN"));
}

#[test]
fn test_invalid_toml() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[airtable\nbase_id = ");

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, ExportError::Configuration(_)));
}

#[test]
fn test_missing_explicit_file() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("AIRTABLE_API_KEY", "pat-only");

    let err = load_config(Some(std::path::Path::new("/nonexistent/airtable-export.toml")))
        .unwrap_err();
    assert!(err.to_string().contains("not found"));

    cleanup_env_vars();
}
