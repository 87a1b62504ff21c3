//! Ordered sub-element buffers attached to owner entities.
//!
//! An owner entity lists the entities attached to it in two ordered
//! buffers: [`SubObjects`] for object-like attachments (props, trees,
//! decals) and [`SubLanes`] for lane-like attachments (fences, hedges,
//! markings). Both kinds are traversed uniformly through
//! [`SubElementKind`], and a sub-element may itself own further
//! sub-elements (object-in-object, lane-in-lane), bounded by
//! [`MAX_SUB_ELEMENT_DEPTH`].
//!
//! # Related
//!
//! - [`Owner`](crate::components::owner::Owner) – the back-pointer on each child
//! - [`crate::systems::selection`] – traverses these buffers when building working sets

use bevy_ecs::prelude::{Component, Entity};

/// Maximum nesting depth for sub-element expansion.
///
/// Host data nests at most two levels (a sub-element of a sub-element);
/// the bound keeps traversal from recursing further if deeper data ever
/// appears.
pub const MAX_SUB_ELEMENT_DEPTH: u32 = 2;

/// The two concrete sub-element relation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubElementKind {
    /// Object-like attachments (props, trees, decals).
    Object,
    /// Lane-like attachments (fences, hedges, markings).
    Lane,
}

impl SubElementKind {
    /// Both relation kinds, in traversal order.
    pub const ALL: [SubElementKind; 2] = [SubElementKind::Object, SubElementKind::Lane];
}

/// Ordered buffer of object-like sub-elements owned by this entity.
#[derive(Component, Debug, Clone, Default)]
pub struct SubObjects(pub Vec<Entity>);

/// Ordered buffer of lane-like sub-elements owned by this entity.
#[derive(Component, Debug, Clone, Default)]
pub struct SubLanes(pub Vec<Entity>);
