//! Fan-out/fan-in tracking for a set of named, independent fetches.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotState {
    Pending,
    Done,
    Failed(String),
}

#[derive(Clone, Debug)]
struct Slot {
    href: String,
    state: SlotState,
}

/// Tracks each named fetch of one detail panel mount.
///
/// A completion is accepted only if it names a slot of the current group and
/// carries the href that slot was started with; anything else is stale.
#[derive(Clone, Debug, Default)]
pub struct FetchGroup {
    slots: BTreeMap<&'static str, Slot>,
}

impl FetchGroup {
    /// Replaces all slots with a fresh set of pending fetches.
    pub fn start<I>(&mut self, fetches: I)
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        self.slots = fetches
            .into_iter()
            .map(|(name, href)| (name, Slot { href, state: SlotState::Pending }))
            .collect();
    }

    /// Is `href` the current input of `slot`?
    pub fn is_current(&self, slot: &str, href: &str) -> bool {
        self.slots.get(slot).is_some_and(|s| s.href == href)
    }

    /// Records a completion. Returns `false` when the completion is stale.
    pub fn complete(&mut self, slot: &str, href: &str, outcome: Result<(), String>) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        if entry.href != href {
            return false;
        }
        entry.state = match outcome {
            Ok(()) => SlotState::Done,
            Err(msg) => SlotState::Failed(msg),
        };
        true
    }

    pub fn state(&self, slot: &str) -> Option<&SlotState> {
        self.slots.get(slot).map(|s| &s.state)
    }

    pub fn pending(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots
            .iter()
            .filter(|(_, s)| s.state == SlotState::Pending)
            .map(|(name, _)| *name)
    }

    /// All fetches have completed, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.pending().next().is_none()
    }
}
