//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_host() -> String {
    "irc.chat.twitch.tv".to_string()
}

pub fn default_port() -> u16 {
    6667
}

pub fn default_connect_timeout() -> u64 {
    10
}

pub fn default_handshake_timeout() -> u64 {
    10
}

// =============================================================================
// Rate Limit Defaults
// =============================================================================

/// Twitch allows 20 messages per 30 seconds for a regular account.
pub fn default_rate_messages() -> u32 {
    20
}

pub fn default_rate_period() -> u64 {
    30
}
