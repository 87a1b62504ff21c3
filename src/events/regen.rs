//! Messages from the host's sub-element regeneration pass.
//!
//! Every time the host simulation (re)creates a sub-element for an owner
//! it writes a [`SubElementSpawned`] message. The suppression system
//! ([`crate::systems::regen::suppress_regenerated_sub_elements`]) reads
//! the queue and re-marks vetoed entities for delayed deletion — this is
//! how "permanently removed" is enforced against a host that knows
//! nothing about the ledger.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::resources::prefabstore::PrefabId;

/// Written by the host whenever it (re)creates a sub-element.
#[derive(Message, Debug, Clone, Copy)]
pub struct SubElementSpawned {
    /// The owner the sub-element was created for.
    pub owner: Entity,
    /// The freshly created sub-element entity.
    pub entity: Entity,
    /// The prefab the sub-element was instantiated from.
    pub prefab: PrefabId,
}
