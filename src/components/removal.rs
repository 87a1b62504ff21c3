//! Permanent-removal record components.
//!
//! When the user permanently removes a sub-element whose prefab the host
//! simulation would otherwise regenerate, the prefab identity is recorded
//! against the owner. The record has two halves:
//!
//! - [`PermanentRemovalRecord`] lives on the owner entity itself. This is
//!   the buffer the regeneration-suppression pass and the reaper check.
//! - A bookkeeping ledger-entry entity carries [`OwnerBackRef`] (plus the
//!   serialized copy of the record) so the ledger can be persisted and
//!   garbage-collected without a forward index over owners.
//!
//! The back-reference is weak: it does not keep the owner alive, and a
//! dangling owner is precisely what triggers reaping (after the amortized
//! sweep interval, see [`crate::systems::reaper`]).

use bevy_ecs::prelude::{Component, Entity};

use crate::resources::prefabstore::PrefabId;

/// Ordered, deduplicated set of prefab identities permanently removed
/// from this owner. Attached to the owner entity.
#[derive(Component, Debug, Clone, Default)]
pub struct PermanentRemovalRecord {
    /// Removed prefab identities, in first-removal order.
    pub prefabs: Vec<PrefabId>,
}

impl PermanentRemovalRecord {
    /// Append a prefab identity if absent. Returns true if it was added.
    ///
    /// Storage is list-shaped but semantics are a set: recording the same
    /// prefab twice leaves exactly one entry.
    pub fn insert(&mut self, prefab: PrefabId) -> bool {
        if self.prefabs.contains(&prefab) {
            return false;
        }
        self.prefabs.push(prefab);
        true
    }

    /// True if the prefab identity has been permanently removed.
    pub fn contains(&self, prefab: PrefabId) -> bool {
        self.prefabs.contains(&prefab)
    }
}

/// Weak back-pointer from a ledger-entry entity to the owner it records.
#[derive(Component, Debug, Clone, Copy)]
pub struct OwnerBackRef {
    /// The owner whose removals this entry records.
    pub owner: Entity,
}
