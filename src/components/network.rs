//! Network graph components: segments, nodes, and the dirty tag.
//!
//! A network segment (edge) connects two node entities via [`EdgeEnds`].
//! Each node carries [`ConnectedEdges`], the list of segments touching
//! it, plus the [`NetNode`] tag. When a segment is deleted, the
//! [`detach_edge`](crate::systems::detach::detach_edge) routine repairs
//! these lists and tags surviving neighbors with [`Updated`] so the host
//! network layer re-evaluates their geometry and connectivity.
//!
//! Node entities are never valid bulldoze targets themselves; they only
//! die when their last segment does.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

/// The two endpoint nodes of a network segment.
#[derive(Component, Debug, Clone, Copy)]
pub struct EdgeEnds {
    pub start: Entity,
    pub end: Entity,
}

impl EdgeEnds {
    pub fn new(start: Entity, end: Entity) -> Self {
        EdgeEnds { start, end }
    }
}

/// Tag component identifying a network node (graph vertex).
#[derive(Component, Clone, Copy, Debug)]
pub struct NetNode;

/// Segments touching a node, in no particular order.
///
/// Most nodes join at most four segments; the inline capacity avoids a
/// heap allocation for the common case.
#[derive(Component, Debug, Clone, Default)]
pub struct ConnectedEdges(pub SmallVec<[Entity; 4]>);

impl ConnectedEdges {
    /// True if `edge` is the only segment touching this node.
    pub fn is_sole_connection(&self, edge: Entity) -> bool {
        self.0.len() == 1 && self.0[0] == edge
    }
}

/// Dirty tag consumed by the host network layer.
///
/// Presence means the entity's geometry/connectivity must be recomputed;
/// the host removes the tag once it has done so.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Updated;
