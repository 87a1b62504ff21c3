//! Razengine main entry point.
//!
//! A deferred entity-lifecycle coordination layer written in Rust using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **crossbeam-channel** for the parallel-safe deferred mutation queue
//!
//! This executable is a headless demo: it builds a small "city block"
//! (an owner lot with nested sub-elements and a three-node road
//! network), points the fake raycast at a sub-element, confirms a
//! bulldoze, then lets the pipeline run — delayed countdowns, network
//! detachment, regeneration suppression, and the amortized ledger
//! reaper — logging what happens along the way.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (ownership, countdowns, network graph, records)
//! - [`events`] – host-facing events and messages (regeneration, tool lifecycle)
//! - [`resources`] – ECS resources (mutation queue, selection state, prefab registry)
//! - [`systems`] – ECS systems (selection, deletion, detachment, reaping)
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 700 --mode matching
//! RUST_LOG=debug cargo run -- --mode similar
//! ```

mod components;
mod events;
mod resources;
mod systems;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::components::network::{ConnectedEdges, EdgeEnds, NetNode};
use crate::components::owner::Owner;
use crate::components::prefabref::PrefabRef;
use crate::components::subelements::{SubLanes, SubObjects};
use crate::events::regen::SubElementSpawned;
use crate::events::tool::{ToolDeactivatedEvent, tool_deactivated_observer};
use crate::resources::categories::SimilarCategories;
use crate::resources::ledger::{RemovalLedger, save_ledger};
use crate::resources::mutationqueue::MutationQueue;
use crate::resources::prefabstore::{Capability, PrefabStore};
use crate::resources::raycast::RaycastState;
use crate::resources::selection::SelectionState;
use crate::resources::tooloptions::{SelectionMode, ToolOptions};
use crate::resources::worldtick::WorldTick;
use crate::systems::deletion::{any_marked_for_deletion, delayed_deletion_system};
use crate::systems::mutation::apply_mutations;
use crate::systems::reaper::removal_record_reaper;
use crate::systems::regen::{suppress_regenerated_sub_elements, update_sub_element_spawned};
use crate::systems::selection::{
    configure_raycast_mask, confirm_selection, refresh_selection_system,
};
use crate::systems::tick::advance_world_tick;

/// Razengine headless demo
#[derive(Parser)]
#[command(version, about = "Deferred entity-lifecycle coordination demo")]
struct Cli {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 700)]
    ticks: u64,

    /// Seed for the demo scene layout.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Selection mode: single, matching, or similar.
    #[arg(long, default_value = "matching")]
    mode: String,

    /// Optional INI file overriding the Similar-category table.
    #[arg(long, value_name = "PATH")]
    categories: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mode = match cli.mode.as_str() {
        "single" => SelectionMode::Single,
        "matching" => SelectionMode::Matching,
        "similar" => SelectionMode::Similar,
        other => {
            eprintln!("Unknown mode '{}', expected single|matching|similar", other);
            std::process::exit(1);
        }
    };

    let categories = match &cli.categories {
        Some(path) => match SimilarCategories::load_from_file(path) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("{}, falling back to built-in categories", e);
                SimilarCategories::builtin()
            }
        },
        None => SimilarCategories::builtin(),
    };

    // --------------- Prefab registry ---------------
    let mut store = PrefabStore::new();
    let oak = store.register(
        "oak_tree",
        [Capability::StaticObject, Capability::Vegetation],
    );
    let planter = store.register(
        "planter_box",
        [Capability::StaticObject, Capability::StreetFurniture],
    );
    let bench = store.register(
        "park_bench",
        [Capability::StaticObject, Capability::StreetFurniture],
    );
    let billboard = store.register(
        "billboard",
        [Capability::StaticObject, Capability::Branding],
    );
    let garage = store.register(
        "garage_extension",
        [Capability::StaticObject, Capability::Extension],
    );
    let hedge = store.register("hedge_row", [Capability::NetLane, Capability::Hedge]);
    let alley = store.register("alley_road", [Capability::RoadSegment]);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTick::default());
    world.insert_resource(MutationQueue::new());
    world.insert_resource(SelectionState::default());
    world.insert_resource(RemovalLedger::default());
    world.insert_resource(RaycastState::default());
    world.insert_resource(ToolOptions {
        mode,
        ..ToolOptions::default()
    });
    world.insert_resource(categories);
    world.insert_resource(store);
    world.init_resource::<Messages<SubElementSpawned>>();

    world.spawn((Observer::new(tool_deactivated_observer),));
    world.flush();

    // --------------- Demo city block ---------------
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let lot = world.spawn_empty().id();

    let tree_count = 3 + rng.usize(..4);
    let mut lot_objects = Vec::new();
    let mut trees = Vec::new();
    for _ in 0..tree_count {
        let tree = world.spawn((PrefabRef(oak), Owner(lot))).id();
        trees.push(tree);
        lot_objects.push(tree);
    }
    // The first tree carries nested sub-elements (object-in-object).
    let nested_a = world.spawn((PrefabRef(planter), Owner(trees[0]))).id();
    let nested_b = world.spawn((PrefabRef(planter), Owner(trees[0]))).id();
    world
        .entity_mut(trees[0])
        .insert(SubObjects(vec![nested_a, nested_b]));

    for _ in 0..2 {
        lot_objects.push(world.spawn((PrefabRef(bench), Owner(lot))).id());
    }
    lot_objects.push(world.spawn((PrefabRef(billboard), Owner(lot))).id());
    lot_objects.push(world.spawn((PrefabRef(garage), Owner(lot))).id());
    world.entity_mut(lot).insert(SubObjects(lot_objects));

    let hedge_row = world.spawn((PrefabRef(hedge), Owner(lot))).id();
    world.entity_mut(lot).insert(SubLanes(vec![hedge_row]));

    // A small road network next to the lot: n1 -s1- n2 -s2- n3.
    let n1 = world.spawn((NetNode, ConnectedEdges::default())).id();
    let n2 = world.spawn((NetNode, ConnectedEdges::default())).id();
    let n3 = world.spawn((NetNode, ConnectedEdges::default())).id();
    let s1 = world
        .spawn((PrefabRef(alley), Owner(lot), EdgeEnds::new(n1, n2)))
        .id();
    let s2 = world
        .spawn((PrefabRef(alley), Owner(lot), EdgeEnds::new(n2, n3)))
        .id();
    world.get_mut::<ConnectedEdges>(n1).unwrap().0.push(s1);
    world
        .get_mut::<ConnectedEdges>(n2)
        .unwrap()
        .0
        .extend([s1, s2]);
    world.get_mut::<ConnectedEdges>(n3).unwrap().0.push(s2);

    info!(
        "Demo block ready: {} trees (one with nested planters), 2 benches, 1 billboard, 1 extension, 1 hedge row, 2 road segments",
        tree_count
    );

    // Point the fake raycast at a tree; the host picking pipeline would
    // normally write this every frame.
    let target = trees[rng.usize(..trees.len())];
    world.resource_mut::<RaycastState>().hit =
        Some((target, [rng.f32() * 100.0, 0.0, rng.f32() * 100.0]));

    // --------------- Schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(
        (
            configure_raycast_mask,
            refresh_selection_system,
            update_sub_element_spawned,
            suppress_regenerated_sub_elements,
            delayed_deletion_system.run_if(any_marked_for_deletion),
            removal_record_reaper,
            apply_mutations,
        )
            .chain(),
    );
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    let confirm_frame = 2;
    let retarget_frame = 10;
    let deactivate_frame = 15;
    let regen_frame = 30;
    let demolish_frame = 60;

    for _ in 0..cli.ticks {
        advance_world_tick(&mut world);
        let frame = world.resource::<WorldTick>().frame;

        if frame == confirm_frame {
            let selected = world.resource::<SelectionState>().working.len();
            let scheduled = confirm_selection(&mut world);
            // The pointer moves away once the action lands.
            world.resource_mut::<RaycastState>().hit = None;
            info!(
                "Frame {}: confirmed bulldoze of {} of {} selected entities",
                frame, scheduled, selected
            );
        }

        if frame == retarget_frame {
            // Hover the hedge row without confirming.
            world.resource_mut::<RaycastState>().hit = Some((hedge_row, [0.0, 0.0, 0.0]));
            info!("Frame {}: hovering the hedge row", frame);
        }

        if frame == deactivate_frame {
            // Putting the tool away cancels the pending selection.
            world.resource_mut::<RaycastState>().hit = None;
            world.trigger(ToolDeactivatedEvent);
            world.flush();
            info!("Frame {}: tool deactivated, selection cancelled", frame);
        }

        if frame == regen_frame {
            // The host simulation regrows a tree the user removed; the
            // suppression pass should veto it.
            let regrown = world.spawn((PrefabRef(oak), Owner(lot))).id();
            world
                .resource_mut::<Messages<SubElementSpawned>>()
                .write(SubElementSpawned {
                    owner: lot,
                    entity: regrown,
                    prefab: oak,
                });
            info!(
                "Frame {}: host regenerated a tree, awaiting suppression",
                frame
            );
        }

        if frame == demolish_frame {
            // The host demolishes the whole lot; the ledger entry should
            // survive until the next amortized sweep.
            world.despawn(lot);
            info!(
                "Frame {}: lot demolished, ledger entry awaiting reaper",
                frame
            );
        }

        update.run(&mut world);
        world.clear_trackers();
    }

    let mut prefab_query = world.query::<&PrefabRef>();
    let remaining = prefab_query.iter(&world).count();
    let ledger_len = world.resource::<RemovalLedger>().len();
    info!(
        "Done after {} ticks: {} prefab-backed entities remain, {} owners in ledger",
        cli.ticks, remaining, ledger_len
    );

    let snapshot = save_ledger(&mut world);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => info!("Ledger snapshot:\n{}", json),
        Err(e) => log::error!("Failed to serialize ledger: {}", e),
    }
}
