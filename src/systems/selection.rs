//! Sub-element selection: working-set construction and the confirm action.
//!
//! The selector turns the host's raycast target into the set of entities
//! the bulldoze tool will act on, according to the configured
//! [`SelectionMode`](crate::resources::tooloptions::SelectionMode) and
//! [`TierPolicy`](crate::resources::tooloptions::TierPolicy):
//!
//! - **Single** – the target plus its own nested sub-elements.
//! - **Matching** – every sibling under the same owner with the exact
//!   same prefab, plus each match's nested sub-elements. Network prefabs
//!   raise the "use Single instead" warning (multi-removal of networks is
//!   unsupported) without aborting the set.
//! - **Similar** – every sibling sharing the target's semantic category
//!   (capability-driven, see
//!   [`SimilarCategories`](crate::resources::categories::SimilarCategories));
//!   falls back to exact matching when the target fits no category.
//!
//! Node entities are never valid targets. Extension-capability entities
//! are excluded unless the tool allows them, surfacing the
//! `blocked_extension` flag so the UI can explain why nothing happened.
//! Every working-set member gets a
//! [`MarkedForAction`](crate::components::marked::MarkedForAction)
//! highlight, stripped again on target change or tool deactivation.
//!
//! [`confirm_selection`] applies the pending action: edges are detached
//! before their destroy ops, deletions are recorded bottom-up as delayed
//! marks through the mutation queue, and every prefab gathered is
//! recorded in the permanent-removal ledger against the resolved owner.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::delayeddeletion::DelayedDeletion;
use crate::components::marked::MarkedForAction;
use crate::components::network::{EdgeEnds, NetNode};
use crate::components::owner::Owner;
use crate::components::prefabref::PrefabRef;
use crate::components::subelements::{MAX_SUB_ELEMENT_DEPTH, SubElementKind, SubLanes, SubObjects};
use crate::resources::categories::SimilarCategories;
use crate::resources::ledger::record_removal;
use crate::resources::mutationqueue::MutationQueue;
use crate::resources::prefabstore::{Capability, PrefabId, PrefabStore};
use crate::resources::raycast::RaycastState;
use crate::resources::selection::SelectionState;
use crate::resources::tooloptions::{SelectionMode, TierPolicy, ToolOptions};
use crate::systems::detach::detach_edge;

/// Query bundle for the ownership/prefab lookups the selector performs.
#[derive(SystemParam)]
pub struct SelectionQueries<'w, 's> {
    pub owners: Query<'w, 's, &'static Owner>,
    pub sub_objects: Query<'w, 's, &'static SubObjects>,
    pub sub_lanes: Query<'w, 's, &'static SubLanes>,
    pub prefabs: Query<'w, 's, &'static PrefabRef>,
    pub nodes: Query<'w, 's, (), With<NetNode>>,
}

/// Set the raycast mask so the host only reports entities this tool can
/// act on (nodes stay invisible to the tool by construction).
pub fn configure_raycast_mask(mut raycast: ResMut<RaycastState>) {
    raycast.mask.include = vec![
        Capability::StaticObject,
        Capability::NetLane,
        Capability::RoadSegment,
    ];
}

/// Rebuild the working set whenever the raycast target changes.
///
/// Re-selecting the current target is a no-op (no highlight flicker).
/// Losing the target, or hitting a node entity, clears the set.
pub fn refresh_selection_system(
    raycast: Res<RaycastState>,
    options: Res<ToolOptions>,
    store: Res<PrefabStore>,
    categories: Res<SimilarCategories>,
    mut selection: ResMut<SelectionState>,
    queries: SelectionQueries,
    marked: Query<Entity, With<MarkedForAction>>,
    mut commands: Commands,
) {
    // Node entities (graph vertices) are never selectable.
    let target = raycast
        .hit_entity()
        .filter(|entity| !queries.nodes.contains(*entity));

    if target == selection.target {
        return;
    }

    // Target changed: cancel the previous interaction outright.
    for entity in marked.iter() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<MarkedForAction>();
        }
    }
    selection.clear();

    let Some(target) = target else {
        return;
    };
    selection.target = Some(target);

    // No owner means nothing to expand against.
    let Ok(immediate) = queries.owners.get(target) else {
        return;
    };
    let owner = resolve_tier(immediate.entity(), options.tier, &queries);
    selection.owner = Some(owner);

    let mut working = Vec::new();
    let mut seen = FxHashSet::default();
    let mut blocked_extension = false;

    let target_prefab = queries.prefabs.get(target).ok().map(|p| p.id());

    match (options.mode, target_prefab) {
        (SelectionMode::Single, _) | (_, None) => {
            collect_sub_tree(
                target,
                0,
                &queries,
                &store,
                options.allow_extensions,
                &mut working,
                &mut seen,
                &mut blocked_extension,
            );
        }
        (SelectionMode::Matching, Some(prefab)) => {
            if store.has_capability(prefab, Capability::RoadSegment) {
                selection.use_single_warning = true;
            }
            expand_siblings(
                owner,
                &queries,
                &store,
                options.allow_extensions,
                |sibling_prefab| sibling_prefab == prefab,
                &mut working,
                &mut seen,
                &mut blocked_extension,
            );
        }
        (SelectionMode::Similar, Some(prefab)) => {
            match categories.category_of(&store, prefab) {
                Some(rule) => {
                    debug!("Similar selection via category '{}'", rule.name);
                    expand_siblings(
                        owner,
                        &queries,
                        &store,
                        options.allow_extensions,
                        |sibling_prefab| {
                            categories
                                .same_category(&store, prefab, sibling_prefab)
                                .unwrap_or(false)
                        },
                        &mut working,
                        &mut seen,
                        &mut blocked_extension,
                    );
                }
                // No recognized category: behave like Matching.
                None => {
                    if store.has_capability(prefab, Capability::RoadSegment) {
                        selection.use_single_warning = true;
                    }
                    expand_siblings(
                        owner,
                        &queries,
                        &store,
                        options.allow_extensions,
                        |sibling_prefab| sibling_prefab == prefab,
                        &mut working,
                        &mut seen,
                        &mut blocked_extension,
                    );
                }
            }
        }
    }

    for entity in &working {
        if let Ok(mut entity_commands) = commands.get_entity(*entity) {
            entity_commands.insert(MarkedForAction);
        }
        if let Ok(prefab) = queries.prefabs.get(*entity) {
            selection.matched_prefabs.insert(prefab.id());
        }
    }
    selection.blocked_extension = blocked_extension;
    selection.working = working;
}

/// Apply the pending working set.
///
/// Edges are detached before their own destroy ops; deletion marks are
/// recorded bottom-up (children before parents) into the mutation queue;
/// every prefab gathered is recorded against the owner in the
/// permanent-removal ledger. The interaction ends here: markers are
/// stripped and the working set discarded.
///
/// Returns the number of entities scheduled for deletion.
pub fn confirm_selection(world: &mut World) -> usize {
    let (owner, working, matched_prefabs) = {
        let selection = world.resource::<SelectionState>();
        let Some(owner) = selection.owner else {
            return 0;
        };
        (
            owner,
            selection.working.clone(),
            selection
                .matched_prefabs
                .iter()
                .copied()
                .collect::<SmallVec<[_; 8]>>(),
        )
    };
    if working.is_empty() {
        return 0;
    }

    let delay = world.resource::<ToolOptions>().deletion_delay_frames;
    let producer = world.resource::<MutationQueue>().producer();

    // Reverse of expansion order is bottom-up: every entity's nested
    // sub-elements were pushed right after it.
    let mut scheduled = 0;
    for entity in working.iter().rev().copied() {
        if world.get_entity(entity).is_err() {
            continue;
        }
        if world.get::<EdgeEnds>(entity).is_some() {
            detach_edge(world, &producer, entity, delay);
        }
        producer.set_value(entity, DelayedDeletion::new(delay));
        scheduled += 1;
    }

    for prefab in matched_prefabs {
        record_removal(world, owner, prefab);
    }

    for entity in working {
        if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
            entity_mut.remove::<MarkedForAction>();
        }
    }
    world.resource_mut::<SelectionState>().clear();

    debug!(
        "Confirmed bulldoze of {} entities under owner {:?}",
        scheduled, owner
    );
    scheduled
}

/// Climb the owner chain according to the tier policy.
///
/// `SubOfMain` walks up to the root owner (bounded by the nesting limit);
/// `SubOfUpgrade` anchors at the immediate owner.
fn resolve_tier(immediate: Entity, tier: TierPolicy, queries: &SelectionQueries) -> Entity {
    match tier {
        TierPolicy::SubOfUpgrade => immediate,
        TierPolicy::SubOfMain => {
            let mut current = immediate;
            for _ in 0..MAX_SUB_ELEMENT_DEPTH {
                match queries.owners.get(current) {
                    Ok(above) => current = above.entity(),
                    Err(_) => break,
                }
            }
            current
        }
    }
}

/// Ordered sub-element children of `entity`, objects before lanes.
///
/// Both relation kinds are walked uniformly; a missing buffer simply
/// contributes nothing.
fn children_of(entity: Entity, queries: &SelectionQueries) -> SmallVec<[Entity; 8]> {
    let mut children = SmallVec::new();
    for kind in SubElementKind::ALL {
        match kind {
            SubElementKind::Object => {
                if let Ok(objects) = queries.sub_objects.get(entity) {
                    children.extend(objects.0.iter().copied());
                }
            }
            SubElementKind::Lane => {
                if let Ok(lanes) = queries.sub_lanes.get(entity) {
                    children.extend(lanes.0.iter().copied());
                }
            }
        }
    }
    children
}

/// Push `entity` and its nested sub-elements, depth-first, bounded by
/// [`MAX_SUB_ELEMENT_DEPTH`]. Extension-capability entities (and their
/// subtrees) are skipped unless allowed.
#[allow(clippy::too_many_arguments)]
fn collect_sub_tree(
    entity: Entity,
    depth: u32,
    queries: &SelectionQueries,
    store: &PrefabStore,
    allow_extensions: bool,
    out: &mut Vec<Entity>,
    seen: &mut FxHashSet<Entity>,
    blocked_extension: &mut bool,
) {
    if !allow_extensions {
        if let Ok(prefab) = queries.prefabs.get(entity) {
            if store.has_capability(prefab.id(), Capability::Extension) {
                *blocked_extension = true;
                return;
            }
        }
    }
    if !seen.insert(entity) {
        return;
    }
    out.push(entity);
    if depth >= MAX_SUB_ELEMENT_DEPTH {
        return;
    }
    for child in children_of(entity, queries) {
        collect_sub_tree(
            child,
            depth + 1,
            queries,
            store,
            allow_extensions,
            out,
            seen,
            blocked_extension,
        );
    }
}

/// Expand every sibling under `owner` that satisfies `matches`, each with
/// its nested sub-elements.
#[allow(clippy::too_many_arguments)]
fn expand_siblings(
    owner: Entity,
    queries: &SelectionQueries,
    store: &PrefabStore,
    allow_extensions: bool,
    matches: impl Fn(PrefabId) -> bool,
    out: &mut Vec<Entity>,
    seen: &mut FxHashSet<Entity>,
    blocked_extension: &mut bool,
) {
    for sibling in children_of(owner, queries) {
        let Ok(prefab) = queries.prefabs.get(sibling) else {
            continue;
        };
        if matches(prefab.id()) {
            collect_sub_tree(
                sibling,
                0,
                queries,
                store,
                allow_extensions,
                out,
                seen,
                blocked_extension,
            );
        }
    }
}
