//! Host-filled raycast result resource.
//!
//! The host's picking pipeline writes the current pointer hit into
//! [`RaycastState`] each frame; the selection system reads it. Before
//! querying, this layer sets [`RaycastState::mask`] so the host only
//! reports hits this tool can act on.

use bevy_ecs::prelude::{Entity, Resource};

use crate::resources::prefabstore::Capability;

/// What kinds of entities the host raycast should report.
#[derive(Debug, Clone, Default)]
pub struct RaycastMask {
    /// Capability tags eligible for a hit; empty means everything.
    pub include: Vec<Capability>,
}

/// Resource carrying the host's current pointer raycast result.
#[derive(Resource, Debug, Default)]
pub struct RaycastState {
    /// The entity under the pointer with its world-space hit position,
    /// or `None` while nothing eligible is hovered.
    pub hit: Option<(Entity, [f32; 3])>,
    /// Filter the core sets before each query; the host honors it.
    pub mask: RaycastMask,
}

impl RaycastState {
    /// The hit entity, if any.
    pub fn hit_entity(&self) -> Option<Entity> {
        self.hit.map(|(entity, _)| entity)
    }
}
