//! In-memory trigger host.
//!
//! Stands in for the studio host in the standalone driver and in tests. Keys
//! are plain strings such as `F1` or `ctrl+shift+2`; the journal records every
//! mutating call so tests can measure binding churn exactly.

use super::{BindingId, EntryId, PersistedKey, TriggerHost, parse_slot_name, slot_name};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// One mutating call made against the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostOp {
    Register {
        binding: BindingId,
        entry: EntryId,
        description: String,
    },
    Unregister(BindingId),
    Save(BindingId),
    Apply(BindingId),
    Store(usize),
    Erase(usize),
}

#[derive(Debug)]
struct Registered {
    entry: EntryId,
    description: String,
    key: PersistedKey,
}

/// Trigger host that keeps bindings and persisted slots in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_binding: u64,
    bindings: BTreeMap<BindingId, Registered>,
    slots: BTreeMap<usize, PersistedKey>,
    journal: Vec<HostOp>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed persisted slots from a `chat_hotkey_<n> = key` table.
    ///
    /// Entries whose name is not a slot name are skipped.
    pub fn from_slots(table: &BTreeMap<String, String>) -> Self {
        let mut host = Self::new();
        for (name, key) in table {
            match parse_slot_name(name) {
                Some(position) => {
                    host.slots.insert(position, PersistedKey(key.clone()));
                }
                None => warn!(slot = %name, "ignoring malformed hotkey slot"),
            }
        }
        host
    }

    /// Persisted slots in `chat_hotkey_<n> = key` form.
    pub fn export_slots(&self) -> BTreeMap<String, String> {
        self.slots
            .iter()
            .map(|(position, key)| (slot_name(*position), key.0.clone()))
            .collect()
    }

    /// Simulate the user assigning a key to a binding in the host's UI.
    pub fn assign_key(&mut self, binding: BindingId, key: &str) -> bool {
        match self.bindings.get_mut(&binding) {
            Some(registered) => {
                registered.key = PersistedKey(key.to_string());
                true
            }
            None => false,
        }
    }

    /// Entries whose binding is assigned `key`, in registration order.
    pub fn entries_for_key(&self, key: &str) -> Vec<EntryId> {
        self.bindings
            .values()
            .filter(|registered| registered.key.0 == key)
            .map(|registered| registered.entry)
            .collect()
    }

    /// The live binding registered for `entry`.
    pub fn binding_for(&self, entry: EntryId) -> Option<BindingId> {
        self.bindings
            .iter()
            .find(|(_, registered)| registered.entry == entry)
            .map(|(binding, _)| *binding)
    }

    pub fn description(&self, binding: BindingId) -> Option<&str> {
        self.bindings
            .get(&binding)
            .map(|registered| registered.description.as_str())
    }

    /// Key currently assigned to a live binding.
    pub fn key_of(&self, binding: BindingId) -> Option<&PersistedKey> {
        self.bindings.get(&binding).map(|registered| &registered.key)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn slot(&self, position: usize) -> Option<&PersistedKey> {
        self.slots.get(&position)
    }

    pub fn journal(&self) -> &[HostOp] {
        &self.journal
    }

    /// Drain the journal.
    pub fn take_journal(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.journal)
    }
}

impl TriggerHost for MemoryHost {
    fn register(&mut self, description: &str, entry: EntryId) -> BindingId {
        self.next_binding += 1;
        let binding = BindingId(self.next_binding);
        trace!(%binding, %entry, description, "register");
        self.bindings.insert(
            binding,
            Registered {
                entry,
                description: description.to_string(),
                key: PersistedKey::default(),
            },
        );
        self.journal.push(HostOp::Register {
            binding,
            entry,
            description: description.to_string(),
        });
        binding
    }

    fn unregister(&mut self, binding: BindingId) {
        trace!(%binding, "unregister");
        self.bindings.remove(&binding);
        self.journal.push(HostOp::Unregister(binding));
    }

    fn load_persisted_key(&self, position: usize) -> Option<PersistedKey> {
        self.slots.get(&position).cloned()
    }

    fn save_persisted_key(&mut self, binding: BindingId) -> PersistedKey {
        self.journal.push(HostOp::Save(binding));
        self.bindings
            .get(&binding)
            .map(|registered| registered.key.clone())
            .unwrap_or_default()
    }

    fn apply_persisted_key(&mut self, binding: BindingId, key: &PersistedKey) {
        if let Some(registered) = self.bindings.get_mut(&binding) {
            registered.key = key.clone();
        }
        self.journal.push(HostOp::Apply(binding));
    }

    fn store_persisted_key(&mut self, position: usize, key: &PersistedKey) {
        self.slots.insert(position, key.clone());
        self.journal.push(HostOp::Store(position));
    }

    fn erase_persisted_key(&mut self, position: usize) {
        self.slots.remove(&position);
        self.journal.push(HostOp::Erase(position));
    }
}
