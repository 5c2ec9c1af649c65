//! hotchat - hotkey-driven chat poster.
//!
//! Binds an editable, ordered list of chat messages to host triggers and
//! posts the matching message to a Twitch-style IRC channel when one fires.
//!
//! ```no_run
//! use hotchat::config::Config;
//! use hotchat::plugin::{Activate, ChatSpam};
//! use hotchat::trigger::MemoryHost;
//!
//! let config = Config::load_validated("hotchat.toml")?;
//! let mut plugin = ChatSpam::new(&config, MemoryHost::from_slots(&config.hotkeys))?;
//! plugin.on_settings_changed(&config.settings);
//! if let Some(id) = plugin.registry().entry_at(0).map(|entry| entry.id()) {
//!     plugin.on_activate(id, true);
//! }
//! plugin.on_unload();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod irc;
pub mod plugin;
pub mod registry;
pub mod telemetry;
pub mod trigger;

pub use context::{ChatContext, Credentials};
pub use error::{ReconcileError, SendError};
pub use plugin::{Activate, ChatSpam};
pub use registry::{MessageRegistry, ReconcileOutcome};
