//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ExporterConfig;
use super::secret::secret_string;
use crate::domain::errors::ExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "airtable-export.toml";

/// Loads and validates the exporter configuration
///
/// This function:
/// 1. Reads the TOML file, if one is given or `airtable-export.toml` exists
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ExporterConfig`] (defaults otherwise)
/// 4. Applies environment variable overrides (`AIRTABLE_*`)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if an explicitly named file is missing,
/// parsing fails, a referenced variable is unset, or validation fails
/// (most commonly because `AIRTABLE_API_KEY` is not set).
///
/// # Examples
///
/// ```no_run
/// use airtable_export::config::load_config;
///
/// let config = load_config(None).expect("AIRTABLE_API_KEY must be set");
/// println!("Exporting base {}", config.airtable.base_id);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<ExporterConfig> {
    let config = load_unvalidated(path)?;
    config.validate().map_err(ExportError::Configuration)?;
    Ok(config)
}

/// Loads the file and environment layers without validating
///
/// Lets callers apply further overrides (command-line flags) before
/// calling [`ExporterConfig::validate`].
///
/// # Errors
///
/// Returns a configuration error if an explicitly named file is missing,
/// parsing fails, or a referenced variable is unset.
pub fn load_unvalidated(path: Option<&Path>) -> Result<ExporterConfig> {
    let mut config = match resolve_config_path(path)? {
        Some(path) => parse_config_file(&path)?,
        None => {
            tracing::debug!("No configuration file found, using defaults");
            ExporterConfig::default()
        }
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Pick the configuration file to read
///
/// An explicit path must exist; the default file is optional.
fn resolve_config_path(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            Ok(default_path.exists().then_some(default_path))
        }
    }
}

fn parse_config_file(path: &Path) -> Result<ExporterConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: ExporterConfig = toml::from_str(&contents)?;

    tracing::debug!(path = %path.display(), "Loaded configuration file");

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ExportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides
///
/// `AIRTABLE_API_KEY` and `AIRTABLE_BASE_ID` follow the names the rest of
/// the shop tooling uses; the remaining overrides use `AIRTABLE_EXPORT_*`.
fn apply_env_overrides(config: &mut ExporterConfig) {
    if let Ok(val) = std::env::var("AIRTABLE_API_KEY") {
        config.airtable.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("AIRTABLE_BASE_ID") {
        if !val.trim().is_empty() {
            config.airtable.base_id = val;
        }
    }
    if let Ok(val) = std::env::var("AIRTABLE_API_URL") {
        config.airtable.api_url = val;
    }

    if let Ok(val) = std::env::var("AIRTABLE_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("AIRTABLE_EXPORT_MAX_RETRIES") {
        if let Ok(attempts) = val.parse() {
            config.export.fetch_max_attempts = attempts;
        }
    }

    if let Ok(val) = std::env::var("AIRTABLE_EXPORT_LOG_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("AIRTABLE_EXPORT_LOG_FILE") {
        config.logging.file_path = PathBuf::from(val);
    }
}
