//! Shift assignments — which providers sit in which slot.
//!
//! INVARIANT: a provider id appears in at most one slot across the whole
//! structure, including slots of the inactive shift type. `assign()` is the
//! normalization step that keeps it true; the capacity projection never
//! mutates assignments.
//!
//! Ids are not checked against the roster. Stale ids are tolerated here and
//! filtered by the projection.

use crate::{
    roster::{Provider, Roster},
    schedule::{ShiftSlot, ShiftType},
    types::ProviderId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ShiftSlot, Vec<ProviderId>>", into = "BTreeMap<ShiftSlot, Vec<ProviderId>>")]
pub struct ShiftAssignments {
    slots: BTreeMap<ShiftSlot, Vec<ProviderId>>,
}

impl Default for ShiftAssignments {
    fn default() -> Self {
        Self {
            slots: ShiftSlot::ALL.iter().map(|&slot| (slot, Vec::new())).collect(),
        }
    }
}

impl ShiftAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw slot lists, dropping any repeat of an id already seen
    /// in an earlier slot (slot order) or earlier in the same slot.
    pub fn from_slots(raw: BTreeMap<ShiftSlot, Vec<ProviderId>>) -> Self {
        let mut assignments = Self::default();
        let mut seen = HashSet::new();
        for (slot, ids) in raw {
            for id in ids {
                if seen.insert(id) {
                    assignments.slot_mut(slot).push(id);
                } else {
                    log::warn!("assignments: dropped duplicate provider {id} in {slot:?}");
                }
            }
        }
        assignments
    }

    fn slot_mut(&mut self, slot: ShiftSlot) -> &mut Vec<ProviderId> {
        self.slots.entry(slot).or_default()
    }

    /// Ids in `slot`, in assignment order.
    pub fn in_slot(&self, slot: ShiftSlot) -> &[ProviderId] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slot_of(&self, id: ProviderId) -> Option<ShiftSlot> {
        self.slots
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(slot, _)| *slot)
    }

    /// Put `id` in `slot`, evicting it from wherever it was.
    /// Returns the other slots it was evicted from.
    pub fn assign(&mut self, slot: ShiftSlot, id: ProviderId) -> Vec<ShiftSlot> {
        let evicted = self.purge(id);
        self.slot_mut(slot).push(id);
        evicted.into_iter().filter(|s| *s != slot).collect()
    }

    /// Remove `id` from `slot` only. Returns whether it was there.
    pub fn unassign(&mut self, slot: ShiftSlot, id: ProviderId) -> bool {
        let ids = self.slot_mut(slot);
        let before = ids.len();
        ids.retain(|&p| p != id);
        ids.len() != before
    }

    /// Remove `id` from every slot. Returns the slots it was removed from.
    pub fn purge(&mut self, id: ProviderId) -> Vec<ShiftSlot> {
        let mut purged = Vec::new();
        for (slot, ids) in self.slots.iter_mut() {
            let before = ids.len();
            ids.retain(|&p| p != id);
            if ids.len() != before {
                purged.push(*slot);
            }
        }
        purged
    }

    pub fn clear_all(&mut self) {
        for ids in self.slots.values_mut() {
            ids.clear();
        }
    }

    /// Total assigned ids across the given shift type's slots, stale ids included.
    pub fn assigned_count(&self, shift_type: ShiftType) -> usize {
        shift_type.slots().iter().map(|s| self.in_slot(*s).len()).sum()
    }

    /// Providers that could be picked for `slot`: every roster entry not
    /// already in that slot, in roster display order.
    pub fn selectable<'r>(&self, slot: ShiftSlot, roster: &'r Roster) -> Vec<&'r Provider> {
        let current = self.in_slot(slot);
        roster
            .display_order()
            .into_iter()
            .filter(|p| !current.contains(&p.id))
            .collect()
    }
}

impl From<BTreeMap<ShiftSlot, Vec<ProviderId>>> for ShiftAssignments {
    fn from(raw: BTreeMap<ShiftSlot, Vec<ProviderId>>) -> Self {
        Self::from_slots(raw)
    }
}

impl From<ShiftAssignments> for BTreeMap<ShiftSlot, Vec<ProviderId>> {
    fn from(assignments: ShiftAssignments) -> Self {
        assignments.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reassigning_moves_provider_between_slots() {
        let mut a = ShiftAssignments::new();
        assert!(a.assign(ShiftSlot::Opening, 7).is_empty());
        let evicted = a.assign(ShiftSlot::Close, 7);
        assert_eq!(evicted, vec![ShiftSlot::Opening]);
        assert!(a.in_slot(ShiftSlot::Opening).is_empty());
        assert_eq!(a.in_slot(ShiftSlot::Close), &[7]);
    }

    #[test]
    fn eviction_crosses_shift_types() {
        let mut a = ShiftAssignments::new();
        a.assign(ShiftSlot::Mid, 3);
        a.assign(ShiftSlot::Track2, 3);
        assert_eq!(a.slot_of(3), Some(ShiftSlot::Track2));
        assert_eq!(a.assigned_count(ShiftType::Standard), 0);
        assert_eq!(a.assigned_count(ShiftType::CompressedDay), 1);
    }

    #[test]
    fn from_slots_drops_duplicates() {
        let mut raw = BTreeMap::new();
        raw.insert(ShiftSlot::Opening, vec![1, 2, 1]);
        raw.insert(ShiftSlot::Close, vec![2, 3]);
        let a = ShiftAssignments::from_slots(raw);
        assert_eq!(a.in_slot(ShiftSlot::Opening), &[1, 2]);
        assert_eq!(a.in_slot(ShiftSlot::Close), &[3]);
    }
}
