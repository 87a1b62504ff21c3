//! Frame-delayed deletion component.
//!
//! The [`DelayedDeletion`] component counts down whole frames. When the
//! remaining count reaches zero, the entity is despawned. Unlike an
//! immediate despawn, this gives dependent state (detached edges, cleared
//! highlight markers, host-side visuals) one or more ticks to settle.
//!
//! # How It Works
//!
//! 1. An entity is marked via [`mark_for_deletion`](crate::systems::deletion::mark_for_deletion)
//!    or by inserting `DelayedDeletion` directly
//! 2. The `delayed_deletion_system` runs each tick:
//!    - Decrements `frames_remaining` by 1
//!    - When the count strikes zero, despawns the entity
//!
//! Re-inserting the component on an already-marked entity replaces the
//! previous countdown entirely (restart semantics, last writer wins).
//! Component storage guarantees at most one active countdown per entity.
//!
//! # Related
//!
//! - [`crate::systems::deletion::delayed_deletion_system`] – system that ages out marked entities
//! - [`crate::systems::regen::suppress_regenerated_sub_elements`] – re-marks vetoed regenerations

use bevy_ecs::prelude::Component;

/// Countdown component that despawns its entity after a number of ticks.
///
/// Callers choose the delay per call site (typical values range 3 to 30
/// frames depending on how much dependent state needs to settle first).
#[derive(Component, Debug, Clone, Copy)]
pub struct DelayedDeletion {
    /// Whole frames left before the entity is despawned.
    pub frames_remaining: u32,
}

impl DelayedDeletion {
    /// Create a new countdown with the given number of frames.
    pub fn new(frames: u32) -> Self {
        DelayedDeletion {
            frames_remaining: frames,
        }
    }
}
