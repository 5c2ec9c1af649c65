//! Shared chat context.
//!
//! Holds everything a session needs that outlives the session itself: the
//! current login, the server endpoint and timeouts, and the send limiter.
//! Owned by the plugin and passed explicitly; nothing here is global.

use crate::config::{Config, ServerConfig, Settings};
use crate::irc::RateLimiter;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Login and endpoint for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Channel name without the leading `#`.
    pub channel: String,
    pub nickname: String,
    /// Server password; `None` skips the `PASS` command.
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Credentials {
    /// Take the login from host settings, keeping the current endpoint.
    ///
    /// Channel, nickname and token are lowercased; chat servers treat them
    /// case-insensitively but compare the token verbatim.
    pub fn from_settings(settings: &Settings, host: &str, port: u16) -> Self {
        let password = settings.oauth.trim().to_lowercase();
        Self {
            channel: settings
                .channel
                .trim()
                .trim_start_matches('#')
                .to_lowercase(),
            nickname: settings.user.trim().to_lowercase(),
            password: (!password.is_empty()).then_some(password),
            host: host.to_string(),
            port,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("channel", &self.channel)
            .field("nickname", &self.nickname)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

/// Connection timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub handshake: Duration,
}

impl From<&ServerConfig> for Timeouts {
    fn from(server: &ServerConfig) -> Self {
        Self {
            connect: server.connect_timeout(),
            handshake: server.handshake_timeout(),
        }
    }
}

/// Process-wide chat state, read by every session at connect time.
#[derive(Debug)]
pub struct ChatContext {
    credentials: RwLock<Credentials>,
    timeouts: Timeouts,
    limiter: Arc<RateLimiter>,
}

impl ChatContext {
    pub fn new(config: &Config) -> Self {
        Self {
            credentials: RwLock::new(Credentials::from_settings(
                &config.settings,
                &config.server.host,
                config.server.port,
            )),
            timeouts: Timeouts::from(&config.server),
            limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
        }
    }

    /// Build a context from explicit parts.
    pub fn with_parts(credentials: Credentials, timeouts: Timeouts, limiter: RateLimiter) -> Self {
        Self {
            credentials: RwLock::new(credentials),
            timeouts,
            limiter: Arc::new(limiter),
        }
    }

    /// Snapshot of the current login.
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    /// Replace the login from a host settings change. The endpoint is kept.
    pub fn apply_settings(&self, settings: &Settings) {
        let mut credentials = self.credentials.write();
        let updated = Credentials::from_settings(settings, &credentials.host, credentials.port);
        if *credentials != updated {
            debug!(
                channel = %updated.channel,
                nick = %updated.nickname,
                has_password = updated.password.is_some(),
                "credentials updated"
            );
            *credentials = updated;
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// The send limiter shared by every session.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(channel: &str, user: &str, oauth: &str) -> Settings {
        Settings {
            channel: channel.into(),
            user: user.into(),
            oauth: oauth.into(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_credentials_are_normalized() {
        let creds = Credentials::from_settings(
            &settings(" #DMadison ", "ChatBot", "OAuth:ABC123"),
            "irc.chat.twitch.tv",
            6667,
        );
        assert_eq!(creds.channel, "dmadison");
        assert_eq!(creds.nickname, "chatbot");
        assert_eq!(creds.password.as_deref(), Some("oauth:abc123"));
    }

    #[test]
    fn test_empty_password_is_none() {
        let creds = Credentials::from_settings(&settings("c", "u", "  "), "h", 1);
        assert_eq!(creds.password, None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::from_settings(&settings("c", "u", "oauth:secret"), "h", 1);
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_apply_settings_keeps_endpoint() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 16667;
        let context = ChatContext::new(&config);

        context.apply_settings(&settings("newchan", "newnick", ""));

        let creds = context.credentials();
        assert_eq!(creds.channel, "newchan");
        assert_eq!(creds.nickname, "newnick");
        assert_eq!(creds.host, "127.0.0.1");
        assert_eq!(creds.port, 16667);
    }
}
