//! Network edge detachment.
//!
//! Deleting a network segment leaves its two endpoint nodes with a stale
//! adjacency list. [`detach_edge`] repairs the graph *before* the
//! segment's own destroy op is recorded, while lookups on the segment
//! still succeed:
//!
//! - If the segment is the only connection at an endpoint, the endpoint
//!   itself is scheduled for deletion along with the segment.
//! - Otherwise every other edge touching that endpoint, those edges' own
//!   endpoints, and the shared endpoint are tagged
//!   [`Updated`](crate::components::network::Updated) so the host network
//!   layer recomputes geometry and connectivity, and the endpoint's edge
//!   list is rewritten without the dying segment.
//!
//! All mutation goes through the deferred queue; this routine only reads
//! the live graph.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;

use crate::components::delayeddeletion::DelayedDeletion;
use crate::components::network::{ConnectedEdges, EdgeEnds, Updated};
use crate::resources::mutationqueue::MutationProducer;

/// Repair the adjacency graph around a segment about to be destroyed.
///
/// Records its ops into `producer` ahead of the segment's destroy, so one
/// flush applies repair and removal together. `delay` is the countdown
/// used for endpoints that die with their last segment.
pub fn detach_edge(world: &World, producer: &MutationProducer, segment: Entity, delay: u32) {
    let Some(ends) = world.get::<EdgeEnds>(segment) else {
        return;
    };

    let mut endpoints: ArrayVec<Entity, 2> = ArrayVec::new();
    endpoints.push(ends.start);
    if ends.end != ends.start {
        endpoints.push(ends.end);
    }

    for node in endpoints {
        let Some(connected) = world.get::<ConnectedEdges>(node) else {
            continue;
        };
        if connected.is_sole_connection(segment) {
            // Last segment standing: the node goes with it.
            producer.set_value(node, DelayedDeletion::new(delay));
            continue;
        }

        for other in connected.0.iter().copied() {
            if other == segment {
                continue;
            }
            producer.add_tag::<Updated>(other);
            if let Some(other_ends) = world.get::<EdgeEnds>(other) {
                producer.add_tag::<Updated>(other_ends.start);
                producer.add_tag::<Updated>(other_ends.end);
            }
        }
        producer.add_tag::<Updated>(node);

        let mut remaining = connected.clone();
        remaining.0.retain(|edge| *edge != segment);
        producer.set_value(node, remaining);
    }
}
