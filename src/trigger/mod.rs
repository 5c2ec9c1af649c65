//! Host trigger bindings.
//!
//! The host (a streaming studio) owns hotkeys and their persistence. The
//! core sees it through [`TriggerHost`]: register an action for a message,
//! move serialized key assignments in and out of numbered slots, and remove
//! the action again. Activations come back through
//! [`Activate`](crate::plugin::Activate) carrying the [`EntryId`] given at
//! registration, never a per-entry closure.

mod memory;

pub use memory::{HostOp, MemoryHost};

use std::fmt;

/// Longest message text shown verbatim in a binding description.
pub const MAX_DESCRIPTION_LEN: usize = 32;

/// Prefix of the persisted slot holding the key of the message at a position.
pub const SLOT_PREFIX: &str = "chat_hotkey_";

/// Stable identity of a message entry, used to dispatch activations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// Host handle of one registered action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u64);

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "binding-{}", self.0)
    }
}

/// Host-serialized key assignment. Opaque to the core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedKey(pub String);

impl PersistedKey {
    /// No key assigned.
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trigger and persistence operations the host provides.
pub trait TriggerHost {
    /// Register an action; activations are dispatched with `entry`.
    fn register(&mut self, description: &str, entry: EntryId) -> BindingId;

    /// Remove an action. Unknown bindings are ignored.
    fn unregister(&mut self, binding: BindingId);

    /// Read the key stored in the slot for `position`.
    fn load_persisted_key(&self, position: usize) -> Option<PersistedKey>;

    /// Serialize the key currently assigned to `binding`.
    fn save_persisted_key(&mut self, binding: BindingId) -> PersistedKey;

    /// Assign a serialized key to `binding`.
    fn apply_persisted_key(&mut self, binding: BindingId, key: &PersistedKey);

    /// Write `key` into the slot for `position`.
    fn store_persisted_key(&mut self, position: usize, key: &PersistedKey);

    /// Remove the slot for `position`.
    fn erase_persisted_key(&mut self, position: usize);
}

/// Human-readable action name for a message.
///
/// Texts longer than [`MAX_DESCRIPTION_LEN`] characters are cut to 29
/// characters plus `...`.
pub fn describe(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        let cut: String = text.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("Chat '{}...'", cut)
    } else {
        format!("Chat '{}'", text)
    }
}

/// Persisted slot name for a position.
pub fn slot_name(position: usize) -> String {
    format!("{}{}", SLOT_PREFIX, position)
}

/// Position encoded in a slot name, if it is one.
pub fn parse_slot_name(name: &str) -> Option<usize> {
    name.strip_prefix(SLOT_PREFIX)?.parse().ok()
}
