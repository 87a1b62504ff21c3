//! Frame-delayed deletion system.
//!
//! This module provides the [`delayed_deletion_system`] that ages
//! countdown markers and despawns entities when their count strikes zero,
//! plus the [`mark_for_deletion`] helper used by every call site that
//! schedules a deferred removal.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. `delayed_deletion_system` iterates all entities with
//!    [`DelayedDeletion`](crate::components::delayeddeletion::DelayedDeletion)
//! 2. Decrements `frames_remaining`
//! 3. When the count reaches zero, despawns the entity
//!
//! Marking `(e, 5)` and ticking five times despawns `e` on exactly the
//! fifth tick. Re-marking resets the countdown (restart semantics, not
//! min/max).
//!
//! # Ordering
//!
//! The system must run *before* the end-of-tick mutation flush so that
//! entities freshly marked during this tick's confirm action are not also
//! decremented in the same tick.

use bevy_ecs::prelude::*;

use crate::components::delayeddeletion::DelayedDeletion;

/// Mark an entity for deletion after `frames` ticks.
///
/// An existing countdown is replaced, not merged: the last caller's frame
/// count wins. `frames == 0` despawns on the next tick.
pub fn mark_for_deletion(commands: &mut Commands, entity: Entity, frames: u32) {
    if let Ok(mut entity_commands) = commands.get_entity(entity) {
        entity_commands.insert(DelayedDeletion::new(frames));
    }
}

/// Run condition: true while any countdown is active.
///
/// Lets schedules skip the aging sweep entirely on quiet frames.
pub fn any_marked_for_deletion(query: Query<(), With<DelayedDeletion>>) -> bool {
    !query.is_empty()
}

/// Decrements deletion countdowns and despawns entities that hit zero.
pub fn delayed_deletion_system(
    mut query: Query<(Entity, &mut DelayedDeletion)>,
    mut commands: Commands,
) {
    for (entity, mut countdown) in query.iter_mut() {
        if countdown.frames_remaining > 0 {
            countdown.frames_remaining -= 1;
        }
        if countdown.frames_remaining == 0 {
            commands.entity(entity).try_despawn();
        }
    }
}
