//! End-of-tick mutation flush.
//!
//! Drains every operation recorded into the
//! [`MutationQueue`](crate::resources::mutationqueue::MutationQueue) and
//! applies it to the world. This is the single synchronization barrier at
//! which deferred mutations become visible; it runs last in the schedule.
use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::mutationqueue::MutationQueue;

/// Apply all recorded mutations. Runs with exclusive world access.
pub fn apply_mutations(world: &mut World) {
    let queue = world.remove_resource::<MutationQueue>();
    let Some(queue) = queue else {
        return;
    };
    let applied = queue.flush(world);
    if applied > 0 {
        debug!("Applied {} deferred mutations", applied);
    }
    world.insert_resource(queue);
}
