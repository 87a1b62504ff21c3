//! Permanent-removal ledger: index, recording API, and persistence.
//!
//! The ledger answers one question for the host's regeneration pass:
//! *has the user permanently removed this prefab from this owner?* It is
//! fed by the confirm action of the selection tool and consulted every
//! time the host is about to (re)create a sub-element.
//!
//! Layout: the live record sits on the owner entity
//! ([`PermanentRemovalRecord`]); a bookkeeping ledger-entry entity holds
//! a copy of the record plus an [`OwnerBackRef`], and the
//! [`RemovalLedger`] resource indexes owner → entry. The entry copy is
//! what persistence serializes and what [`relink`] restores from when the
//! host recreates an owner during editing.
//!
//! # Persistence
//!
//! [`LedgerFile`] round-trips through serde (the host save/load cycle).
//! Prefab identities serialize as stable string names; owner entity refs
//! serialize as raw bits and are re-resolved through a host-provided
//! remap on load. A prefab name that no longer resolves (a removed mod)
//! is dropped with a warning; the rest of the record loads normally.
//!
//! # Related
//!
//! - [`crate::systems::reaper`] – garbage-collects entries with dead owners
//! - [`crate::systems::regen`] – enforces the veto on regeneration

use bevy_ecs::prelude::{Entity, Resource, World};
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::removal::{OwnerBackRef, PermanentRemovalRecord};
use crate::resources::prefabstore::{PrefabId, PrefabStore};

/// On-disk format version for [`LedgerFile`].
pub const LEDGER_FILE_VERSION: u32 = 1;

/// Resource indexing owner entities to their ledger-entry entities.
#[derive(Resource, Debug, Default)]
pub struct RemovalLedger {
    entries: FxHashMap<Entity, Entity>,
}

impl RemovalLedger {
    /// The ledger-entry entity recording `owner`, if one exists.
    pub fn entry_of(&self, owner: Entity) -> Option<Entity> {
        self.entries.get(&owner).copied()
    }

    /// Number of owners with recorded removals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the index entry for `owner` (reaper bookkeeping).
    pub fn forget(&mut self, owner: Entity) {
        self.entries.remove(&owner);
    }
}

/// Record that `prefab` was permanently removed from `owner`.
///
/// Idempotent: recording the same (owner, prefab) pair twice leaves
/// exactly one entry. Creates the owner's record and its ledger-entry
/// entity on first use. A stale owner handle is a no-op.
///
/// Returns true if the pair was newly recorded.
pub fn record_removal(world: &mut World, owner: Entity, prefab: PrefabId) -> bool {
    if world.get_entity(owner).is_err() {
        return false;
    }

    if world.get::<PermanentRemovalRecord>(owner).is_none() {
        world
            .entity_mut(owner)
            .insert(PermanentRemovalRecord::default());
    }
    let added = world
        .get_mut::<PermanentRemovalRecord>(owner)
        .map(|mut record| record.insert(prefab))
        .unwrap_or(false);

    let existing = world.resource::<RemovalLedger>().entry_of(owner);
    let entry = match existing {
        Some(entry) => entry,
        None => {
            let entry = world
                .spawn((OwnerBackRef { owner }, PermanentRemovalRecord::default()))
                .id();
            world
                .resource_mut::<RemovalLedger>()
                .entries
                .insert(owner, entry);
            entry
        }
    };

    // Keep the persistence copy on the entry in sync with the live record.
    if added {
        if let Some(mut copy) = world.get_mut::<PermanentRemovalRecord>(entry) {
            copy.insert(prefab);
        }
    }
    added
}

/// True if `prefab` has been permanently removed from `owner`.
pub fn is_permanently_removed(world: &World, owner: Entity, prefab: PrefabId) -> bool {
    world
        .get::<PermanentRemovalRecord>(owner)
        .is_some_and(|record| record.contains(prefab))
}

/// Re-attach an owner's record after the host recreated the owner entity.
///
/// The host calls this when a structural edit destroys and recreates an
/// owner that should keep its removal history. The record is restored
/// from the ledger-entry copy onto `new_owner`, and the entry is
/// re-pointed so the reaper leaves it alone.
///
/// Returns false if no entry exists for `old_owner` or `new_owner` is
/// stale.
pub fn relink(world: &mut World, old_owner: Entity, new_owner: Entity) -> bool {
    let Some(entry) = world.resource::<RemovalLedger>().entry_of(old_owner) else {
        return false;
    };
    if world.get_entity(new_owner).is_err() {
        return false;
    }

    let Some(copy) = world.get::<PermanentRemovalRecord>(entry).cloned() else {
        return false;
    };
    world.entity_mut(new_owner).insert(copy);
    if let Some(mut backref) = world.get_mut::<OwnerBackRef>(entry) {
        backref.owner = new_owner;
    }

    let mut ledger = world.resource_mut::<RemovalLedger>();
    ledger.entries.remove(&old_owner);
    ledger.entries.insert(new_owner, entry);
    true
}

/// Serialized ledger, one entry per recorded owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFile {
    pub version: u32,
    pub entries: Vec<LedgerFileEntry>,
}

/// One owner's removals: the owner ref as raw bits plus stable prefab
/// names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerFileEntry {
    pub owner: u64,
    pub prefabs: Vec<String>,
}

/// Snapshot every ledger entry into a serializable [`LedgerFile`].
///
/// Prefab ids with no registered name are dropped with a warning.
pub fn save_ledger(world: &mut World) -> LedgerFile {
    let mut entries = Vec::new();
    let mut query = world.query::<(&OwnerBackRef, &PermanentRemovalRecord)>();
    for (backref, record) in query.iter(world) {
        let store = world.resource::<PrefabStore>();
        let mut prefabs = Vec::with_capacity(record.prefabs.len());
        for prefab in &record.prefabs {
            match store.name_of(*prefab) {
                Some(name) => prefabs.push(name.to_string()),
                None => warn!("Prefab id {:?} has no registered name, not saved", prefab),
            }
        }
        entries.push(LedgerFileEntry {
            owner: backref.owner.to_bits(),
            prefabs,
        });
    }
    LedgerFile {
        version: LEDGER_FILE_VERSION,
        entries,
    }
}

/// Rebuild ledger entries from a [`LedgerFile`].
///
/// `owner_map` translates saved owner bits to live entities (entity
/// handles are not stable across save/load; the host provides the
/// mapping). Entries whose owner cannot be resolved and prefab names
/// that no longer resolve are dropped with a warning; everything else
/// loads. Returns the number of entries restored.
pub fn load_ledger(
    world: &mut World,
    file: &LedgerFile,
    owner_map: &FxHashMap<u64, Entity>,
) -> usize {
    if file.version != LEDGER_FILE_VERSION {
        warn!(
            "Ledger file version {} not supported (expected {}), nothing loaded",
            file.version, LEDGER_FILE_VERSION
        );
        return 0;
    }

    let mut restored = 0;
    for entry in &file.entries {
        let Some(&owner) = owner_map.get(&entry.owner) else {
            warn!("Saved owner {} has no live entity, entry dropped", entry.owner);
            continue;
        };
        if world.get_entity(owner).is_err() {
            warn!("Remapped owner for {} is stale, entry dropped", entry.owner);
            continue;
        }

        let prefabs: Vec<PrefabId> = {
            let store = world.resource::<PrefabStore>();
            entry
                .prefabs
                .iter()
                .filter_map(|name| {
                    let id = store.id_of(name);
                    if id.is_none() {
                        warn!("Prefab '{}' no longer resolves, dropped from record", name);
                    }
                    id
                })
                .collect()
        };

        for prefab in prefabs {
            record_removal(world, owner, prefab);
        }
        restored += 1;
    }
    restored
}
