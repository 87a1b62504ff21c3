//! Back-pointer from a sub-element to the entity that owns it.
//!
//! Every sub-element (prop, tree, decal, fence lane, …) carries an
//! [`Owner`] component pointing at its owning entity. The owner in turn
//! lists its sub-elements in ordered buffers
//! ([`SubObjects`](crate::components::subelements::SubObjects) /
//! [`SubLanes`](crate::components::subelements::SubLanes)).
//!
//! The reference is weak: holding an `Owner` does not keep the target
//! alive, and systems must treat a dangling owner as "nothing to do".

use bevy_ecs::prelude::{Component, Entity};

/// Component that points a sub-element back at its owning entity.
#[derive(Debug, Clone, Copy, Component, PartialEq, Eq)]
pub struct Owner(pub Entity);

impl Owner {
    /// The owning entity.
    pub fn entity(&self) -> Entity {
        self.0
    }
}
