//! Frame counter update.
//!
//! Advances the shared [`WorldTick`](crate::resources::worldtick::WorldTick)
//! resource once per frame. The host driver calls this before running the
//! schedule.
use bevy_ecs::prelude::*;

use crate::resources::worldtick::WorldTick;

/// Advance the frame counter by one.
pub fn advance_world_tick(world: &mut World) {
    world.resource_mut::<WorldTick>().frame += 1;
}
