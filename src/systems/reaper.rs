//! Amortized garbage collection of orphaned ledger entries.
//!
//! Ledger-entry entities outlive the owners they record on purpose: the
//! host may destroy and recreate an owner during a structural edit, and
//! the record must survive that window (the host relinks it via
//! [`relink`](crate::resources::ledger::relink)). The reaper therefore
//! runs on a coarse interval, not every tick, and only collects entries
//! whose owner still carries no
//! [`PermanentRemovalRecord`](crate::components::removal::PermanentRemovalRecord)
//! when the sweep comes around.
//!
//! Cost amortization is the point of the interval; correctness does not
//! depend on when the sweep lands.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::removal::{OwnerBackRef, PermanentRemovalRecord};
use crate::resources::ledger::RemovalLedger;
use crate::resources::tooloptions::ToolOptions;
use crate::resources::worldtick::WorldTick;

/// Sweep ledger entries whose owner is gone.
///
/// Runs only when `frame % reaper_interval == 0`. An entry survives the
/// sweep when its back-referenced owner still carries a removal record
/// (alive, or recreated and relinked in time).
pub fn removal_record_reaper(
    tick: Res<WorldTick>,
    options: Res<ToolOptions>,
    entries: Query<(Entity, &OwnerBackRef)>,
    owners: Query<&PermanentRemovalRecord, Without<OwnerBackRef>>,
    mut ledger: ResMut<RemovalLedger>,
    mut commands: Commands,
) {
    let interval = options.reaper_interval.max(1);
    if tick.frame == 0 || tick.frame % interval != 0 {
        return;
    }

    let mut reaped = 0;
    for (entry, backref) in entries.iter() {
        if owners.get(backref.owner).is_err() {
            ledger.forget(backref.owner);
            commands.entity(entry).try_despawn();
            reaped += 1;
        }
    }
    if reaped > 0 {
        debug!("Reaped {} orphaned removal records", reaped);
    }
}
