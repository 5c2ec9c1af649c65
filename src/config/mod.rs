//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level config struct and file loading (Config, ConfigError)
//! - [`server`]: Chat server endpoint, timeouts and send rate (ServerConfig, RateLimitConfig)
//! - [`settings`]: Host-facing settings surface (Settings)
//! - [`validation`]: Startup validation collecting every problem at once

mod defaults;
mod server;
mod settings;
mod types;
pub mod validation;

pub use server::{RateLimitConfig, ServerConfig};
pub use settings::Settings;
pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};
