//! Regeneration suppression.
//!
//! The host simulation regenerates sub-elements it thinks should exist —
//! including ones the user permanently removed. This system watches the
//! host's [`SubElementSpawned`](crate::events::regen::SubElementSpawned)
//! messages, consults the owner's removal record, and re-marks vetoed
//! entities for delayed deletion instead of letting them persist.
//!
//! # System Flow
//!
//! 1. Host writes `SubElementSpawned { owner, entity, prefab }`
//! 2. `suppress_regenerated_sub_elements` checks the owner's
//!    [`PermanentRemovalRecord`](crate::components::removal::PermanentRemovalRecord)
//! 3. A vetoed prefab gets its fresh entity marked via
//!    [`mark_for_deletion`](crate::systems::deletion::mark_for_deletion)
//!
//! # Related
//!
//! - [`crate::resources::ledger`] – where removals get recorded
//! - [`crate::systems::deletion`] – ages out the re-marked entities

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::removal::PermanentRemovalRecord;
use crate::events::regen::SubElementSpawned;
use crate::resources::tooloptions::ToolOptions;
use crate::systems::deletion::mark_for_deletion;

/// Re-mark regenerated sub-elements the user permanently removed.
pub fn suppress_regenerated_sub_elements(
    mut reader: MessageReader<SubElementSpawned>,
    records: Query<&PermanentRemovalRecord>,
    options: Res<ToolOptions>,
    mut commands: Commands,
) {
    for spawned in reader.read() {
        let vetoed = records
            .get(spawned.owner)
            .is_ok_and(|record| record.contains(spawned.prefab));
        if vetoed {
            debug!(
                "Suppressing regenerated sub-element {:?} (prefab {:?}) of owner {:?}",
                spawned.entity, spawned.prefab, spawned.owner
            );
            mark_for_deletion(&mut commands, spawned.entity, options.deletion_delay_frames);
        }
    }
}

/// Advance the ECS message queue for [`SubElementSpawned`].
///
/// Bevy ECS' [`Messages`] API requires calling `update()` once per frame
/// so messages written this frame become visible to readers. Run this
/// after the host has written its spawn notifications.
pub fn update_sub_element_spawned(mut messages: ResMut<Messages<SubElementSpawned>>) {
    messages.update();
}
