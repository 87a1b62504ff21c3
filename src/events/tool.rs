//! Tool lifecycle events.
//!
//! The host fires [`ToolDeactivatedEvent`] when the bulldoze tool is put
//! away. The observer cancels the in-progress interaction immediately:
//! highlight markers are stripped and the working set is discarded, so no
//! partial, unconfirmed selection can ever reach the mutation queue.
//!
//! Register the observer at startup:
//!
//! ```ignore
//! world.spawn((Observer::new(tool_deactivated_observer),));
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::marked::MarkedForAction;
use crate::resources::selection::SelectionState;

/// Fired by the host when the bulldoze tool deactivates.
#[derive(Event, Debug, Clone, Copy)]
pub struct ToolDeactivatedEvent;

/// Clears the working set and strips all highlight markers.
pub fn tool_deactivated_observer(
    _trigger: On<ToolDeactivatedEvent>,
    marked: Query<Entity, With<MarkedForAction>>,
    mut selection: ResMut<SelectionState>,
    mut commands: Commands,
) {
    selection.clear();
    for entity in marked.iter() {
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<MarkedForAction>();
        }
    }
}
