//! Converging the registry onto a new message list.
//!
//! Host bindings are expensive to churn: every unregister/register pair drops
//! the user's key assignment unless it is re-applied, and every slot write is
//! persisted. A pass therefore keeps existing entries wherever their text
//! survives, and only touches what actually moved.
//!
//! Ordering within a full pass:
//!
//! 1. Match each incoming text to the first unconsumed existing entry with
//!    identical text.
//! 2. Create entries for unmatched texts at their target position. A new
//!    entry inherits the persisted key of its slot unless a surviving entry
//!    currently occupies that slot.
//! 3. Destroy existing entries that were not matched.
//! 4. Reposition survivors whose index changed.
//! 5. Save every entry's key into its (final) slot, once.

use super::{MessageEntry, MessageRegistry, ReconcileOutcome, check_positions};
use crate::error::ReconcileError;
use crate::telemetry::spans;
use crate::trigger::TriggerHost;
use std::collections::HashSet;
use tracing::{debug, error};

enum Difference {
    None,
    One(usize),
    Many,
}

impl MessageRegistry {
    /// Converge onto `incoming`, preserving hotkeys where possible.
    ///
    /// Returns [`ReconcileError::PositionGap`] without touching the host if
    /// the registry is not dense on entry.
    pub fn reconcile(
        &mut self,
        incoming: &[String],
        host: &mut dyn TriggerHost,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let span = spans::reconcile(self.entries.len(), incoming.len());
        let _enter = span.enter();

        check_positions(&self.entries)?;

        if incoming.len() == self.entries.len() {
            match self.difference(incoming) {
                Difference::None => return Ok(ReconcileOutcome::Unchanged),
                Difference::One(position) => {
                    self.entries[position].new_text(incoming[position].clone(), host);
                    debug!(position, "message edited in place");
                    return Ok(ReconcileOutcome::Edited { position });
                }
                Difference::Many => {}
            }
        }

        let outcome = self.rebuild(incoming, host);
        if let Err(err) = check_positions(&self.entries) {
            error!(error = %err, "registry left with a position gap");
            return Err(err);
        }
        debug!(?outcome, entries = self.entries.len(), "registry rebuilt");
        Ok(outcome)
    }

    fn difference(&self, incoming: &[String]) -> Difference {
        let mut differing = None;
        for (index, (entry, text)) in self.entries.iter().zip(incoming).enumerate() {
            if entry.text != *text {
                if differing.is_some() {
                    return Difference::Many;
                }
                differing = Some(index);
            }
        }
        differing.map_or(Difference::None, Difference::One)
    }

    fn rebuild(&mut self, incoming: &[String], host: &mut dyn TriggerHost) -> ReconcileOutcome {
        let mut previous: Vec<Option<MessageEntry>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();

        let mut consumed = vec![false; previous.len()];
        let matches: Vec<Option<usize>> = incoming
            .iter()
            .map(|text| {
                let hit = (0..previous.len()).find(|&index| {
                    !consumed[index]
                        && previous[index]
                            .as_ref()
                            .is_some_and(|entry| entry.text == *text)
                });
                if let Some(index) = hit {
                    consumed[index] = true;
                }
                hit
            })
            .collect();

        // Survivors sit at their old index until repositioned.
        let held: HashSet<usize> = matches.iter().flatten().copied().collect();

        let mut created = 0;
        let mut next = Vec::with_capacity(incoming.len());
        for (position, (text, hit)) in incoming.iter().zip(&matches).enumerate() {
            match hit.and_then(|index| previous[index].take()) {
                Some(entry) => next.push(entry),
                None => {
                    let id = self.allocate_id();
                    let inherit = !held.contains(&position);
                    next.push(MessageEntry::create(id, text.clone(), position, inherit, host));
                    created += 1;
                }
            }
        }

        let mut destroyed = 0;
        for entry in previous.into_iter().flatten() {
            entry.destroy(host);
            destroyed += 1;
        }

        let mut moved = 0;
        for (position, entry) in next.iter_mut().enumerate() {
            if entry.position != position {
                entry.new_position(position, host);
                moved += 1;
            }
        }

        for entry in &mut next {
            entry.save_key(host);
        }

        self.entries = next;
        ReconcileOutcome::Rebuilt {
            created,
            destroyed,
            moved,
        }
    }
}
