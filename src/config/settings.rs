//! Host-facing settings surface.
//!
//! Mirrors the fields the host's property panel exposes. The host owns the
//! storage; the core only reads a snapshot on every change event.

use serde::Deserialize;

/// Settings snapshot delivered by the host on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Channel to post into, with or without a leading `#`.
    pub channel: String,
    /// Login name.
    pub user: String,
    /// OAuth token used as the server password (`oauth:...`).
    pub oauth: String,
    /// Free-text message sendable without a binding.
    pub chat_text: String,
    /// Ordered list of bindable messages.
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            channel = "DMadison"
            user = "ChatBot"
            oauth = "oauth:abc"
            messages = ["GG", "Hello chat!"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.channel, "DMadison");
        assert_eq!(settings.messages, vec!["GG", "Hello chat!"]);
        assert!(settings.chat_text.is_empty());
    }

    #[test]
    fn test_empty_settings() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
