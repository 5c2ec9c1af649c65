//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.host is required")]
    MissingHost,
    #[error("server.port must be non-zero")]
    InvalidPort,
    #[error("server.{0} must be at least 1 second")]
    ZeroTimeout(&'static str),
    #[error("rate_limit.messages must be at least 1")]
    ZeroRateMessages,
    #[error("rate_limit.per_secs must be at least 1")]
    ZeroRatePeriod,
    #[error("hotkeys key '{0}' is not of the form chat_hotkey_<position>")]
    InvalidHotkeySlot(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }
    if config.server.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.server.handshake_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("handshake_timeout_secs"));
    }

    if config.rate_limit.messages == 0 {
        errors.push(ValidationError::ZeroRateMessages);
    }
    if config.rate_limit.per_secs == 0 {
        errors.push(ValidationError::ZeroRatePeriod);
    }

    for name in config.hotkeys.keys() {
        if crate::trigger::parse_slot_name(name).is_none() {
            errors.push(ValidationError::InvalidHotkeySlot(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
