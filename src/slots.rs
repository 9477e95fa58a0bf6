use crate::consts::SLOT_CAPACITY;
use crate::roster::GroupKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Stable identity of a slot; survives reorders and rebinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u64);

impl SlotId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub bound_key: Option<GroupKey>,
}

/// Ordered comparison slots, at most [`SLOT_CAPACITY`] of them.
///
/// Position is display order; ids are the durable reference.
#[derive(Debug, Clone, Default)]
pub struct SlotManager {
    slots: Vec<Slot>,
    next_id: u64,
}

impl SlotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a collection from saved state. Keeps the first
    /// [`SLOT_CAPACITY`] slots and drops repeated ids.
    pub fn restore(saved: Vec<Slot>) -> Self {
        let mut seen = HashSet::new();
        let slots: Vec<Slot> = saved
            .into_iter()
            .filter(|s| seen.insert(s.id))
            .take(SLOT_CAPACITY)
            .collect();
        let next_id = slots.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        Self { slots, next_id }
    }

    pub fn capacity(&self) -> usize {
        SLOT_CAPACITY
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= SLOT_CAPACITY
    }

    /// Appends an unbound slot. Returns `None` (and changes nothing) when full.
    pub fn add(&mut self) -> Option<SlotId> {
        if self.is_full() {
            debug!("Slot add ignored: collection full");
            return None;
        }
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            bound_key: None,
        });
        Some(id)
    }

    /// Returns whether a slot was removed.
    pub fn remove(&mut self, id: SlotId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.id != id);
        self.slots.len() != before
    }

    /// Binds `key` to the slot if `is_valid` accepts it. A rejected key or
    /// unknown slot leaves every binding untouched and returns `false`.
    pub fn rebind<F>(&mut self, id: SlotId, key: GroupKey, is_valid: F) -> bool
    where
        F: FnOnce(&GroupKey) -> bool,
    {
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if !is_valid(&key) {
            debug!("Rebind of slot {} to '{}' rejected", id, key);
            return false;
        }
        slot.bound_key = Some(key);
        true
    }

    /// Moves the slot at `from` to `to`, shifting the slots in between.
    ///
    /// Both indices must be in bounds. Debug builds panic on a bad index;
    /// release builds leave the order unchanged and return `false`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.slots.len();
        debug_assert!(
            from < len && to < len,
            "slot reorder out of range: {} -> {} with {} slots",
            from,
            to,
            len
        );
        if from >= len || to >= len {
            warn!("Ignoring slot reorder {} -> {} ({} slots)", from, to, len);
            return false;
        }
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        true
    }

    pub fn snapshot(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }
}
