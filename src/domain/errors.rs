//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Airtable API errors
    #[error("Airtable error: {0}")]
    Airtable(#[from] AirtableError),

    /// Markdown rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Airtable-specific errors
///
/// Errors that occur when talking to the Airtable REST API or fetching
/// attachment URLs. These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// Failed to reach the server
    #[error("Failed to connect to Airtable: {0}")]
    ConnectionFailed(String),

    /// Authentication rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response body
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Table not found
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Attachment download failed
    #[error("Download failed: {0}")]
    DownloadFailed(String),
}

impl AirtableError {
    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => AirtableError::AuthenticationFailed(message),
            404 => AirtableError::TableNotFound(message),
            429 => AirtableError::RateLimitExceeded(message),
            500..=599 => AirtableError::ServerError { status, message },
            _ => AirtableError::ClientError { status, message },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExportError {
    fn from(err: toml::de::Error) -> Self {
        ExportError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(err: std::fmt::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let err = ExportError::Configuration("AIRTABLE_API_KEY missing".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: AIRTABLE_API_KEY missing"
        );
    }

    #[test]
    fn test_airtable_error_conversion() {
        let airtable_err = AirtableError::ConnectionFailed("Network error".to_string());
        let err: ExportError = airtable_err.into();
        assert!(matches!(err, ExportError::Airtable(_)));
    }

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            AirtableError::from_status(401, "bad token"),
            AirtableError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            AirtableError::from_status(404, "no table"),
            AirtableError::TableNotFound(_)
        ));
        assert!(matches!(
            AirtableError::from_status(429, "slow down"),
            AirtableError::RateLimitExceeded(_)
        ));
        assert!(matches!(
            AirtableError::from_status(503, "down"),
            AirtableError::ServerError { status: 503, .. }
        ));
        assert!(matches!(
            AirtableError::from_status(422, "bad request"),
            AirtableError::ClientError { status: 422, .. }
        ));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ExportError = io_err.into();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ExportError = json_err.into();
        assert!(matches!(err, ExportError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ExportError = toml_err.into();
        assert!(matches!(err, ExportError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_export_error_implements_std_error() {
        let err = ExportError::Render("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
