//! Core configuration types and loading.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::server::{RateLimitConfig, ServerConfig};
use super::settings::Settings;
use super::validation::ValidationError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", display_all(.0))]
    Invalid(Vec<ValidationError>),
}

fn display_all(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete configuration for the standalone driver.
///
/// A real host supplies [`Settings`] and persisted hotkeys itself; the file
/// form lets the driver stand in for it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Chat server endpoint.
    #[serde(default)]
    pub server: ServerConfig,
    /// Outbound message rate.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Initial host settings.
    #[serde(default)]
    pub settings: Settings,
    /// Persisted hotkey slots, keyed `chat_hotkey_<position>`.
    #[serde(default)]
    pub hotkeys: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        super::validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 16667

[rate_limit]
messages = 2
per_secs = 1

[settings]
channel = "chan"
user = "bot"
messages = ["one", "two"]

[hotkeys]
chat_hotkey_0 = "F1"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 16667);
        assert_eq!(config.rate_limit.messages, 2);
        assert_eq!(config.settings.messages, vec!["one", "two"]);
        assert_eq!(config.hotkeys.get("chat_hotkey_0").map(String::as_str), Some("F1"));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load("/nonexistent/hotchat.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_validated_rejects_zero_port() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 0").unwrap();

        let err = Config::load_validated(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("server.port"));
    }
}
