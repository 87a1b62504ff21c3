//! Transient highlight marker for the current working set.
//!
//! Entities selected for a pending bulldoze action carry the
//! [`MarkedForAction`] tag so the host can visualize them. The tag is
//! stripped whenever the raycast target changes or the tool deactivates,
//! and never survives the interaction it belongs to.

use bevy_ecs::prelude::Component;

/// Tag component marking an entity as part of the current working set.
///
/// Purely visual bookkeeping; carries no data and is never persisted.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MarkedForAction;
