//! Secure credential handling using the secrecy crate
//!
//! The Airtable access token lives in a `Secret` so it is zeroed when dropped
//! and redacted from `Debug` output (and therefore from logs).
//!
//! # Example
//!
//! ```rust
//! use airtable_export::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let token = secret_string("pat-example".to_string());
//! assert_eq!(token.expose_secret().as_str(), "pat-example");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("pat-example"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl SecretValue {
    /// Borrow the secret as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in Debug, read via `expose_secret()`
pub type SecretString = Secret<SecretValue>;

/// Wrap a String in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("pat-token".to_string());
        assert_eq!(secret.expose_secret().as_str(), "pat-token");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secret_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct TestConfig {
            api_key: SecretString,
        }

        let config: TestConfig = toml::from_str(r#"api_key = "pat123""#).unwrap();
        assert_eq!(config.api_key.expose_secret().as_str(), "pat123");
    }
}
