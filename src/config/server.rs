//! Chat server endpoint and send-rate configuration.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    default_connect_timeout, default_handshake_timeout, default_host, default_port,
    default_rate_messages, default_rate_period,
};

/// Chat server endpoint and connection timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server hostname (default: "irc.chat.twitch.tv").
    #[serde(default = "default_host")]
    pub host: String,
    /// Plaintext IRC port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds to wait for the TCP connection (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Seconds to wait for the server greeting after login (default: 10).
    #[serde(default = "default_handshake_timeout")]
    pub handshake_timeout_secs: u64,
}

impl ServerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_secs(self.handshake_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_secs: default_connect_timeout(),
            handshake_timeout_secs: default_handshake_timeout(),
        }
    }
}

/// Outbound message rate.
///
/// Expressed the way chat services document their limits: at most
/// `messages` chat lines every `per_secs` seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Messages allowed per period (default: 20).
    #[serde(default = "default_rate_messages")]
    pub messages: u32,
    /// Period length in seconds (default: 30).
    #[serde(default = "default_rate_period")]
    pub per_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            messages: default_rate_messages(),
            per_secs: default_rate_period(),
        }
    }
}
