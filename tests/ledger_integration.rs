//! Integration tests for the permanent-removal ledger: idempotency,
//! persistence round trips, and degraded loads.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;

use razengine::components::removal::PermanentRemovalRecord;
use razengine::resources::ledger::{
    LEDGER_FILE_VERSION, LedgerFile, RemovalLedger, is_permanently_removed, load_ledger,
    record_removal, save_ledger,
};
use razengine::resources::prefabstore::{Capability, PrefabId, PrefabStore};

const PREFAB_NAMES: [&str; 5] = [
    "oak_tree",
    "park_bench",
    "billboard",
    "hedge_row",
    "crate_prop",
];

fn make_store() -> (PrefabStore, Vec<PrefabId>) {
    let mut store = PrefabStore::new();
    let ids = PREFAB_NAMES
        .iter()
        .map(|name| store.register(*name, [Capability::StaticObject]))
        .collect();
    (store, ids)
}

fn make_world() -> (World, Vec<PrefabId>) {
    let mut world = World::new();
    let (store, ids) = make_store();
    world.insert_resource(store);
    world.insert_resource(RemovalLedger::default());
    (world, ids)
}

#[test]
fn record_removal_is_idempotent() {
    let (mut world, prefabs) = make_world();
    let owner = world.spawn_empty().id();

    assert!(record_removal(&mut world, owner, prefabs[0]));
    assert!(!record_removal(&mut world, owner, prefabs[0]));

    let record = world.get::<PermanentRemovalRecord>(owner).unwrap();
    assert_eq!(record.prefabs.len(), 1);

    // The persistence copy on the ledger entry stays deduplicated too.
    let entry = world.resource::<RemovalLedger>().entry_of(owner).unwrap();
    assert_eq!(
        world.get::<PermanentRemovalRecord>(entry).unwrap().prefabs.len(),
        1
    );
}

#[test]
fn unrecorded_pairs_answer_false() {
    let (mut world, prefabs) = make_world();
    let owner = world.spawn_empty().id();
    let other = world.spawn_empty().id();

    record_removal(&mut world, owner, prefabs[0]);

    assert!(is_permanently_removed(&world, owner, prefabs[0]));
    assert!(!is_permanently_removed(&world, owner, prefabs[1]));
    assert!(!is_permanently_removed(&world, other, prefabs[0]));
}

#[test]
fn recording_against_a_stale_owner_is_a_no_op() {
    let (mut world, prefabs) = make_world();
    let owner = world.spawn_empty().id();
    world.despawn(owner);

    assert!(!record_removal(&mut world, owner, prefabs[0]));
    assert!(world.resource::<RemovalLedger>().is_empty());
}

#[test]
fn ledger_round_trips_through_json() {
    let (mut world, prefabs) = make_world();

    // Three owners, five prefabs, a distinct subset recorded per owner.
    let owners: Vec<Entity> = (0..3).map(|_| world.spawn_empty().id()).collect();
    let recorded: [&[usize]; 3] = [&[0, 1], &[2], &[1, 3, 4]];
    for (owner, indices) in owners.iter().zip(recorded) {
        for &index in indices {
            record_removal(&mut world, *owner, prefabs[index]);
        }
    }

    let json = serde_json::to_string(&save_ledger(&mut world)).unwrap();
    let file: LedgerFile = serde_json::from_str(&json).unwrap();
    assert_eq!(file.version, LEDGER_FILE_VERSION);
    assert_eq!(file.entries.len(), 3);

    // Fresh world, fresh owner entities, host-provided remap.
    let (mut reloaded, new_prefabs) = make_world();
    let new_owners: Vec<Entity> = (0..3).map(|_| reloaded.spawn_empty().id()).collect();
    let owner_map: FxHashMap<u64, Entity> = owners
        .iter()
        .zip(&new_owners)
        .map(|(old, new)| (old.to_bits(), *new))
        .collect();

    assert_eq!(load_ledger(&mut reloaded, &file, &owner_map), 3);

    // All 15 (owner, prefab) answers match, including the negatives.
    for (owner_index, new_owner) in new_owners.iter().enumerate() {
        for (prefab_index, prefab) in new_prefabs.iter().enumerate() {
            let expected = recorded[owner_index].contains(&prefab_index);
            assert_eq!(
                is_permanently_removed(&reloaded, *new_owner, *prefab),
                expected,
                "owner {} prefab {}",
                owner_index,
                prefab_index
            );
        }
    }
}

#[test]
fn unresolvable_prefab_is_dropped_but_the_rest_loads() {
    let (mut world, prefabs) = make_world();
    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, prefabs[0]);
    record_removal(&mut world, owner, prefabs[1]);

    let mut file = save_ledger(&mut world);
    // Simulate a removed mod: one saved name no longer registers.
    file.entries[0].prefabs.push("modded_statue".to_string());

    let (mut reloaded, new_prefabs) = make_world();
    let new_owner = reloaded.spawn_empty().id();
    let mut owner_map = FxHashMap::default();
    owner_map.insert(owner.to_bits(), new_owner);

    assert_eq!(load_ledger(&mut reloaded, &file, &owner_map), 1);
    assert!(is_permanently_removed(&reloaded, new_owner, new_prefabs[0]));
    assert!(is_permanently_removed(&reloaded, new_owner, new_prefabs[1]));
    let record = reloaded.get::<PermanentRemovalRecord>(new_owner).unwrap();
    assert_eq!(record.prefabs.len(), 2, "Unresolvable name must be dropped");
}

#[test]
fn unknown_file_version_loads_nothing() {
    let (mut world, prefabs) = make_world();
    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, prefabs[0]);

    let mut file = save_ledger(&mut world);
    file.version = LEDGER_FILE_VERSION + 1;

    let (mut reloaded, _) = make_world();
    let new_owner = reloaded.spawn_empty().id();
    let mut owner_map = FxHashMap::default();
    owner_map.insert(owner.to_bits(), new_owner);

    assert_eq!(load_ledger(&mut reloaded, &file, &owner_map), 0);
    assert!(reloaded.resource::<RemovalLedger>().is_empty());
}

#[test]
fn unmapped_owner_entry_is_dropped() {
    let (mut world, prefabs) = make_world();
    let kept = world.spawn_empty().id();
    let lost = world.spawn_empty().id();
    record_removal(&mut world, kept, prefabs[0]);
    record_removal(&mut world, lost, prefabs[1]);

    let file = save_ledger(&mut world);

    let (mut reloaded, new_prefabs) = make_world();
    let new_owner = reloaded.spawn_empty().id();
    let mut owner_map = FxHashMap::default();
    owner_map.insert(kept.to_bits(), new_owner);

    assert_eq!(load_ledger(&mut reloaded, &file, &owner_map), 1);
    assert!(is_permanently_removed(&reloaded, new_owner, new_prefabs[0]));
    assert_eq!(reloaded.resource::<RemovalLedger>().len(), 1);
}
