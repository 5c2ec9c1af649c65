//! A single bindable message.

use crate::trigger::{BindingId, EntryId, PersistedKey, TriggerHost, describe};
use tracing::trace;

/// One message of the ordered list, with its host binding.
///
/// The entry caches its serialized key between reconciliations so the
/// binding can be re-registered (for a new description or position) without
/// losing the user's assignment.
#[derive(Debug)]
pub struct MessageEntry {
    pub(super) id: EntryId,
    pub(super) text: String,
    pub(super) position: usize,
    pub(super) binding: Option<BindingId>,
    pub(super) saved_key: Option<PersistedKey>,
}

impl MessageEntry {
    /// Create an entry at `position` and register its binding.
    ///
    /// With `inherit_slot`, the key stored for `position` is loaded and
    /// applied, so a replaced message keeps the hotkey of its slot.
    pub(super) fn create(
        id: EntryId,
        text: String,
        position: usize,
        inherit_slot: bool,
        host: &mut dyn TriggerHost,
    ) -> Self {
        let saved_key = if inherit_slot {
            host.load_persisted_key(position)
        } else {
            None
        };
        let mut entry = Self {
            id,
            text,
            position,
            binding: None,
            saved_key,
        };
        entry.register(host);
        entry
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn binding(&self) -> Option<BindingId> {
        self.binding
    }

    pub fn saved_key(&self) -> Option<&PersistedKey> {
        self.saved_key.as_ref()
    }

    /// Replace the text, re-registering under the new description.
    /// Position and persisted slot are untouched.
    pub(super) fn new_text(&mut self, text: String, host: &mut dyn TriggerHost) {
        self.text = text;
        self.refresh_key(host);
        self.unregister(host);
        self.register(host);
    }

    /// Move to another position, vacating the old slot.
    pub(super) fn new_position(&mut self, position: usize, host: &mut dyn TriggerHost) {
        self.refresh_key(host);
        self.unregister(host);
        host.erase_persisted_key(self.position);
        trace!(entry = %self.id, from = self.position, to = position, "reposition");
        self.position = position;
        self.register(host);
    }

    /// Snapshot the binding's key into the cache and the current slot.
    pub(super) fn save_key(&mut self, host: &mut dyn TriggerHost) {
        if let Some(binding) = self.binding {
            let key = host.save_persisted_key(binding);
            host.store_persisted_key(self.position, &key);
            self.saved_key = Some(key);
        }
    }

    /// Remove the binding from the host. The slot is left as is.
    pub(super) fn release(&mut self, host: &mut dyn TriggerHost) {
        self.unregister(host);
    }

    /// Remove the binding and erase the slot.
    pub(super) fn destroy(mut self, host: &mut dyn TriggerHost) {
        self.release(host);
        host.erase_persisted_key(self.position);
        trace!(entry = %self.id, position = self.position, "destroyed");
    }

    /// Re-read the live key so an assignment made since the last save is
    /// carried through a rebind.
    fn refresh_key(&mut self, host: &mut dyn TriggerHost) {
        if let Some(binding) = self.binding {
            self.saved_key = Some(host.save_persisted_key(binding));
        }
    }

    fn register(&mut self, host: &mut dyn TriggerHost) {
        let binding = host.register(&describe(&self.text), self.id);
        if let Some(key) = &self.saved_key {
            host.apply_persisted_key(binding, key);
        }
        self.binding = Some(binding);
    }

    fn unregister(&mut self, host: &mut dyn TriggerHost) {
        if let Some(binding) = self.binding.take() {
            host.unregister(binding);
        }
    }
}
