//! Host lifecycle integration.
//!
//! [`ChatSpam`] is what the streaming host talks to. It owns the registry,
//! the trigger host handle and the chat context, and turns host callbacks
//! into reconciliation passes and chat deliveries.
//!
//! Host callbacks arrive one at a time on a single thread. Deliveries are
//! driven to completion on a private current-thread runtime, so
//! [`Activate::on_activate`] returns only after the message was sent (or
//! failed) and the rate-limit hold has elapsed.

use crate::config::{Config, Settings};
use crate::context::ChatContext;
use crate::error::SendError;
use crate::irc::deliver;
use crate::registry::MessageRegistry;
use crate::trigger::{EntryId, TriggerHost};
use std::io;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, error, info, warn};

/// Host-facing description of the plugin.
pub const DESCRIPTION: &str = "Sends preset chat messages to a Twitch channel from hotkeys.";

/// Receives trigger activations from the host.
///
/// The host calls this with the [`EntryId`] a binding was registered under,
/// once on press and once on release.
pub trait Activate {
    fn on_activate(&mut self, entry: EntryId, pressed: bool);
}

/// The chat plugin: bound messages plus the connection they are sent over.
pub struct ChatSpam<H: TriggerHost> {
    host: H,
    registry: MessageRegistry,
    context: ChatContext,
    chat_text: String,
    runtime: Runtime,
}

impl<H: TriggerHost> ChatSpam<H> {
    /// Create the plugin with an empty registry.
    ///
    /// Messages are bound on the first [`on_settings_changed`](Self::on_settings_changed).
    pub fn new(config: &Config, host: H) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            host,
            registry: MessageRegistry::new(),
            context: ChatContext::new(config),
            chat_text: config.settings.chat_text.clone(),
            runtime,
        })
    }

    pub fn describe() -> &'static str {
        DESCRIPTION
    }

    /// Apply a settings update: new login, new free text, new message list.
    pub fn on_settings_changed(&mut self, settings: &Settings) {
        self.context.apply_settings(settings);
        self.chat_text = settings.chat_text.clone();

        match self.registry.reconcile(&settings.messages, &mut self.host) {
            Ok(outcome) => debug!(?outcome, messages = self.registry.len(), "messages updated"),
            Err(err) => error!(error = %err, "message update aborted"),
        }
    }

    /// Persist every binding's key.
    pub fn on_save(&mut self) {
        self.registry.save_all(&mut self.host);
        debug!(messages = self.registry.len(), "hotkeys saved");
    }

    /// Unregister every binding. Safe to call more than once.
    pub fn on_unload(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let released = self.registry.len();
        self.registry.release(&mut self.host);
        info!(released, "plugin unloaded");
    }

    /// Send the free-text `chat_text`, if any.
    pub fn send_chat_text(&self) {
        if self.chat_text.trim().is_empty() {
            info!("no chat text to send");
            return;
        }
        self.dispatch(&self.chat_text);
    }

    /// Deliver one message and report the outcome.
    pub fn send_text(&self, text: &str) -> Result<(), SendError> {
        self.runtime.block_on(deliver(&self.context, text))
    }

    pub fn registry(&self) -> &MessageRegistry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    pub fn chat_text(&self) -> &str {
        &self.chat_text
    }

    fn dispatch(&self, text: &str) {
        match self.send_text(text) {
            Ok(()) => {}
            Err(err) if err.is_transport() => {
                warn!(error = %err, code = err.error_code(), "chat message not sent");
            }
            Err(err) => {
                error!(error = %err, code = err.error_code(), "chat message rejected");
            }
        }
    }
}

impl<H: TriggerHost> Activate for ChatSpam<H> {
    fn on_activate(&mut self, entry: EntryId, pressed: bool) {
        if !pressed {
            return;
        }
        let Some(text) = self.registry.get(entry).map(|e| e.text().to_string()) else {
            warn!(%entry, "activation for unknown message");
            return;
        };
        self.dispatch(&text);
    }
}

impl<H: TriggerHost> std::fmt::Debug for ChatSpam<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSpam")
            .field("messages", &self.registry.len())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::{MemoryHost, PersistedKey};

    fn settings(messages: &[&str]) -> Settings {
        Settings {
            channel: "#Chan".into(),
            user: "Bot".into(),
            oauth: "oauth:x".into(),
            chat_text: "hello".into(),
            messages: messages.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn plugin() -> ChatSpam<MemoryHost> {
        ChatSpam::new(&Config::default(), MemoryHost::new()).unwrap()
    }

    #[test]
    fn test_settings_change_binds_messages() {
        let mut plugin = plugin();
        plugin.on_settings_changed(&settings(&["gg", "hi"]));

        assert_eq!(plugin.registry().len(), 2);
        assert_eq!(plugin.host().binding_count(), 2);
        assert_eq!(plugin.chat_text(), "hello");
        let creds = plugin.context().credentials();
        assert_eq!(creds.channel, "chan");
        assert_eq!(creds.nickname, "bot");
    }

    #[test]
    fn test_release_ignored_and_unknown_entry_ignored() {
        let mut plugin = plugin();
        plugin.on_settings_changed(&settings(&["gg"]));
        let id = plugin.registry().entry_at(0).unwrap().id();

        // Neither call reaches the network.
        plugin.on_activate(id, false);
        plugin.on_activate(EntryId(999), true);
    }

    #[test]
    fn test_empty_text_is_rejected_before_connecting() {
        let plugin = plugin();
        let err = plugin.send_text("   ").unwrap_err();
        assert_eq!(err.error_code(), "protocol");
    }

    #[test]
    fn test_save_then_unload() {
        let mut plugin = plugin();
        plugin.on_settings_changed(&settings(&["gg"]));
        let binding = plugin.registry().entry_at(0).unwrap().binding().unwrap();
        plugin.host_mut().assign_key(binding, "F9");

        plugin.on_save();
        plugin.on_unload();
        plugin.on_unload();

        assert!(plugin.registry().is_empty());
        assert_eq!(plugin.host().binding_count(), 0);
        assert_eq!(plugin.host().slot(0), Some(&PersistedKey("F9".into())));
    }

    #[test]
    fn test_unload_on_empty_registry() {
        let mut plugin = plugin();
        plugin.on_unload();
        plugin.on_save();
        assert!(plugin.registry().is_empty());
    }

    #[test]
    fn test_describe() {
        assert!(ChatSpam::<MemoryHost>::describe().contains("Twitch"));
    }
}
