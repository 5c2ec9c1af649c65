//! Ordered message registry.
//!
//! Every configured message owns one host binding and one persisted hotkey
//! slot, addressed by its position in the list. The registry keeps the
//! entries dense (`entries[i].position == i`) and converges them onto a new
//! list with as little binding churn as possible; see [`MessageRegistry::reconcile`].

mod entry;
mod reconcile;

pub use entry::MessageEntry;

use crate::error::ReconcileError;
use crate::trigger::{EntryId, TriggerHost};

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The incoming list matched the registry exactly.
    Unchanged,
    /// Exactly one message changed in place.
    Edited { position: usize },
    /// The list was rebuilt. Counts describe the binding churn.
    Rebuilt {
        created: usize,
        destroyed: usize,
        moved: usize,
    },
}

/// The live list of bound messages.
#[derive(Debug, Default)]
pub struct MessageRegistry {
    entries: Vec<MessageEntry>,
    next_id: u64,
}

impl MessageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by identity. Used to dispatch trigger activations.
    pub fn get(&self, id: EntryId) -> Option<&MessageEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_at(&self, position: usize) -> Option<&MessageEntry> {
        self.entries.get(position)
    }

    /// Current message texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    /// Write every entry's current key into its slot.
    pub fn save_all(&mut self, host: &mut dyn TriggerHost) {
        for entry in &mut self.entries {
            entry.save_key(host);
        }
    }

    /// Unregister every binding and empty the registry.
    ///
    /// Persisted slots are kept so the next load restores them.
    pub fn release(&mut self, host: &mut dyn TriggerHost) {
        for mut entry in self.entries.drain(..) {
            entry.release(host);
        }
    }

    fn allocate_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId(self.next_id)
    }
}

/// Positions must be exactly `0..len` in order.
fn check_positions(entries: &[MessageEntry]) -> Result<(), ReconcileError> {
    match entries
        .iter()
        .enumerate()
        .find(|(index, entry)| entry.position != *index)
    {
        Some((index, entry)) => Err(ReconcileError::PositionGap {
            index,
            found: entry.position,
        }),
        None => Ok(()),
    }
}
