//! Integration tests for delayed deletion, the mutation queue,
//! regeneration suppression, and the ledger reaper.

use bevy_ecs::prelude::*;

use razengine::components::delayeddeletion::DelayedDeletion;
use razengine::components::marked::MarkedForAction;
use razengine::components::owner::Owner;
use razengine::components::prefabref::PrefabRef;
use razengine::components::removal::OwnerBackRef;
use razengine::events::regen::SubElementSpawned;
use razengine::resources::ledger::{
    RemovalLedger, is_permanently_removed, record_removal, relink,
};
use razengine::resources::mutationqueue::MutationQueue;
use razengine::resources::prefabstore::{Capability, PrefabId, PrefabStore};
use razengine::resources::tooloptions::ToolOptions;
use razengine::resources::worldtick::WorldTick;
use razengine::systems::deletion::delayed_deletion_system;
use razengine::systems::mutation::apply_mutations;
use razengine::systems::reaper::removal_record_reaper;
use razengine::systems::regen::{suppress_regenerated_sub_elements, update_sub_element_spawned};
use razengine::systems::tick::advance_world_tick;

fn make_world() -> (World, PrefabId) {
    let mut world = World::new();
    let mut store = PrefabStore::new();
    let oak = store.register("oak_tree", [Capability::StaticObject, Capability::Vegetation]);
    world.insert_resource(store);
    world.insert_resource(WorldTick::default());
    world.insert_resource(MutationQueue::new());
    world.insert_resource(RemovalLedger::default());
    world.insert_resource(ToolOptions::default());
    world.init_resource::<Messages<SubElementSpawned>>();
    (world, oak)
}

fn tick_deletion(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(delayed_deletion_system);
    schedule.run(world);
}

fn tick_regen(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((update_sub_element_spawned, suppress_regenerated_sub_elements).chain());
    schedule.run(world);
}

fn tick_reaper(world: &mut World) {
    advance_world_tick(world);
    let mut schedule = Schedule::default();
    schedule.add_systems(removal_record_reaper);
    schedule.run(world);
}

fn alive(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok()
}

// =============================================================================
// Delayed deletion countdown
// =============================================================================

#[test]
fn countdown_destroys_on_exactly_the_fifth_tick() {
    let (mut world, _) = make_world();
    let entity = world.spawn(DelayedDeletion::new(5)).id();

    for tick in 1..=4 {
        tick_deletion(&mut world);
        assert!(alive(&world, entity), "Entity died early on tick {}", tick);
    }
    tick_deletion(&mut world);
    assert!(!alive(&world, entity), "Entity should die on the fifth tick");
}

#[test]
fn remarking_restarts_the_countdown() {
    let (mut world, _) = make_world();
    let entity = world.spawn(DelayedDeletion::new(5)).id();

    for _ in 0..4 {
        tick_deletion(&mut world);
    }
    assert!(alive(&world, entity));
    assert_eq!(
        world.get::<DelayedDeletion>(entity).unwrap().frames_remaining,
        1
    );

    // Re-marking resets to the new count, not min/max.
    world.entity_mut(entity).insert(DelayedDeletion::new(3));

    tick_deletion(&mut world);
    tick_deletion(&mut world);
    assert!(alive(&world, entity), "Reset countdown ended too early");
    tick_deletion(&mut world);
    assert!(!alive(&world, entity), "Reset countdown should end on its third tick");
}

#[test]
fn zero_frame_mark_despawns_on_the_next_tick() {
    let (mut world, _) = make_world();
    let entity = world.spawn(DelayedDeletion::new(0)).id();

    tick_deletion(&mut world);
    assert!(!alive(&world, entity));
}

#[test]
fn unmarked_entities_are_untouched() {
    let (mut world, oak) = make_world();
    let entity = world.spawn(PrefabRef(oak)).id();

    for _ in 0..10 {
        tick_deletion(&mut world);
    }
    assert!(alive(&world, entity));
}

// =============================================================================
// Mutation queue
// =============================================================================

#[test]
fn recorded_ops_are_invisible_until_flush() {
    let (mut world, oak) = make_world();
    let entity = world.spawn_empty().id();

    let producer = world.resource::<MutationQueue>().producer();
    producer.set_value(entity, PrefabRef(oak));

    assert!(world.get::<PrefabRef>(entity).is_none());
    apply_mutations(&mut world);
    assert_eq!(world.get::<PrefabRef>(entity), Some(&PrefabRef(oak)));
}

#[test]
fn destroy_is_idempotent() {
    let (mut world, _) = make_world();
    let entity = world.spawn_empty().id();
    let gone = world.spawn_empty().id();
    world.despawn(gone);

    let producer = world.resource::<MutationQueue>().producer();
    producer.destroy(entity);
    producer.destroy(entity);
    producer.destroy(gone);

    apply_mutations(&mut world);
    assert!(!alive(&world, entity));
    assert!(!alive(&world, gone));
}

#[test]
fn last_recorded_op_wins_within_one_flush() {
    let (mut world, _) = make_world();
    let entity = world.spawn_empty().id();

    let producer = world.resource::<MutationQueue>().producer();
    producer.add_tag::<MarkedForAction>(entity);
    producer.remove_tag::<MarkedForAction>(entity);
    producer.set_value(entity, DelayedDeletion::new(10));
    producer.set_value(entity, DelayedDeletion::new(3));

    apply_mutations(&mut world);
    assert!(world.get::<MarkedForAction>(entity).is_none());
    assert_eq!(
        world.get::<DelayedDeletion>(entity).unwrap().frames_remaining,
        3
    );
}

#[test]
fn edits_on_stale_entities_are_skipped() {
    let (mut world, oak) = make_world();
    let entity = world.spawn_empty().id();
    let survivor = world.spawn_empty().id();

    let producer = world.resource::<MutationQueue>().producer();
    producer.set_value(entity, PrefabRef(oak));
    producer.set_value(survivor, PrefabRef(oak));
    world.despawn(entity);

    // The stale edit is dropped; the batch continues.
    apply_mutations(&mut world);
    assert_eq!(world.get::<PrefabRef>(survivor), Some(&PrefabRef(oak)));
}

#[test]
fn producers_can_record_from_other_threads() {
    let (mut world, _) = make_world();
    let entity = world.spawn_empty().id();

    let producer = world.resource::<MutationQueue>().producer();
    let handle = std::thread::spawn(move || {
        producer.set_value(entity, DelayedDeletion::new(7));
    });
    handle.join().unwrap();

    apply_mutations(&mut world);
    assert_eq!(
        world.get::<DelayedDeletion>(entity).unwrap().frames_remaining,
        7
    );
}

// =============================================================================
// Regeneration suppression
// =============================================================================

#[test]
fn regenerated_removed_prefab_is_re_marked() {
    let (mut world, oak) = make_world();
    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, oak);

    let regrown = world.spawn((PrefabRef(oak), Owner(owner))).id();
    world
        .resource_mut::<Messages<SubElementSpawned>>()
        .write(SubElementSpawned {
            owner,
            entity: regrown,
            prefab: oak,
        });
    tick_regen(&mut world);

    let delay = world.resource::<ToolOptions>().deletion_delay_frames;
    let countdown = world.get::<DelayedDeletion>(regrown);
    assert!(countdown.is_some(), "Vetoed regeneration must be re-marked");
    assert_eq!(countdown.unwrap().frames_remaining, delay);
}

#[test]
fn regeneration_of_unrecorded_prefab_is_left_alone() {
    let (mut world, oak) = make_world();
    let owner = world.spawn_empty().id();

    let regrown = world.spawn((PrefabRef(oak), Owner(owner))).id();
    world
        .resource_mut::<Messages<SubElementSpawned>>()
        .write(SubElementSpawned {
            owner,
            entity: regrown,
            prefab: oak,
        });
    tick_regen(&mut world);

    assert!(world.get::<DelayedDeletion>(regrown).is_none());
}

// =============================================================================
// Owner-record reaper
// =============================================================================

#[test]
fn reaper_lags_behind_owner_destruction() {
    let (mut world, oak) = make_world();
    world.resource_mut::<ToolOptions>().reaper_interval = 10;

    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, oak);
    let entry = world.resource::<RemovalLedger>().entry_of(owner).unwrap();

    world.despawn(owner);

    // Not reaped on the next tick: the sweep only runs on its interval.
    tick_reaper(&mut world);
    assert!(alive(&world, entry), "Entry reaped before the sweep interval");

    for _ in 2..=9 {
        tick_reaper(&mut world);
    }
    assert!(alive(&world, entry));

    // Frame 10: the sweep lands.
    tick_reaper(&mut world);
    assert!(!alive(&world, entry), "Entry should be reaped at the sweep");
    assert!(world.resource::<RemovalLedger>().is_empty());
}

#[test]
fn reaper_spares_recreated_owner() {
    let (mut world, oak) = make_world();
    world.resource_mut::<ToolOptions>().reaper_interval = 10;

    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, oak);
    let entry = world.resource::<RemovalLedger>().entry_of(owner).unwrap();

    // Host destroys and recreates the owner before the sweep runs.
    world.despawn(owner);
    let recreated = world.spawn_empty().id();
    assert!(relink(&mut world, owner, recreated));

    for _ in 0..20 {
        tick_reaper(&mut world);
    }
    assert!(alive(&world, entry), "Relinked entry must not be reaped");
    assert!(is_permanently_removed(&world, recreated, oak));
    assert_eq!(
        world.get::<OwnerBackRef>(entry).unwrap().owner,
        recreated
    );
}

#[test]
fn reaper_spares_live_owners() {
    let (mut world, oak) = make_world();
    world.resource_mut::<ToolOptions>().reaper_interval = 5;

    let owner = world.spawn_empty().id();
    record_removal(&mut world, owner, oak);
    let entry = world.resource::<RemovalLedger>().entry_of(owner).unwrap();

    for _ in 0..20 {
        tick_reaper(&mut world);
    }
    assert!(alive(&world, entry));
    assert!(is_permanently_removed(&world, owner, oak));
}
