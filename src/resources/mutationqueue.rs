//! Deferred mutation queue with parallel-safe producers.
//!
//! All structural mutation this layer performs on the entity graph is
//! recorded into the [`MutationQueue`] and applied in one batch at the
//! end-of-tick synchronization barrier
//! ([`apply_mutations`](crate::systems::mutation::apply_mutations)).
//! Recorded operations stay invisible to concurrent readers until the
//! flush, so query traversal never observes a half-mutated graph.
//!
//! Producers are cheap, cloneable, `Send` handles backed by a lock-free
//! channel, so read-side traversal fanned out across workers can record
//! freely. Ordering between producers is unspecified; operations from the
//! *same* producer arrive in program order.
//!
//! # Flush semantics
//!
//! - Destroys are idempotent: a stale or already-destroyed entity is
//!   skipped, never an error.
//! - Component ops on a stale entity are skipped for that entity only.
//! - Add/remove of the same component on the same entity resolve to the
//!   last recorded op, since ops apply in arrival order.
//!
//! # Related
//!
//! - [`crate::systems::mutation::apply_mutations`] – the end-of-tick flush

use bevy_ecs::prelude::{Component, Entity, Resource};
use bevy_ecs::world::{EntityWorldMut, World};
use crossbeam_channel::{Receiver, Sender, unbounded};

enum Mutation {
    /// Apply a component add/remove/overwrite to a live entity.
    Edit {
        entity: Entity,
        op: Box<dyn for<'w> FnOnce(&mut EntityWorldMut<'w>) + Send>,
    },
    /// Despawn the entity if it still exists.
    Destroy(Entity),
}

/// Resource owning the channel the flush drains each tick.
#[derive(Resource)]
pub struct MutationQueue {
    tx: Sender<Mutation>,
    rx: Receiver<Mutation>,
}

impl Default for MutationQueue {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        MutationQueue { tx, rx }
    }
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a producer handle. Clone freely, send across workers.
    pub fn producer(&self) -> MutationProducer {
        MutationProducer {
            tx: self.tx.clone(),
        }
    }

    /// Number of recorded, not-yet-flushed operations.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Drain every recorded operation and apply it to the world.
    ///
    /// Callers must hold exclusive world access; see
    /// [`apply_mutations`](crate::systems::mutation::apply_mutations) for
    /// the scheduled entry point.
    pub fn flush(&self, world: &mut World) -> usize {
        let mut applied = 0;
        for mutation in self.rx.try_iter() {
            match mutation {
                Mutation::Edit { entity, op } => {
                    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
                        op(&mut entity_mut);
                        applied += 1;
                    }
                }
                Mutation::Destroy(entity) => {
                    if world.get_entity(entity).is_ok() {
                        world.despawn(entity);
                        applied += 1;
                    }
                }
            }
        }
        applied
    }
}

/// Cloneable, `Send` handle recording deferred operations.
#[derive(Clone)]
pub struct MutationProducer {
    tx: Sender<Mutation>,
}

impl MutationProducer {
    /// Record attaching a default-constructed tag component.
    pub fn add_tag<C: Component + Default>(&self, entity: Entity) {
        self.record_edit(entity, |entity_mut| {
            entity_mut.insert(C::default());
        });
    }

    /// Record detaching a component.
    pub fn remove_tag<C: Component>(&self, entity: Entity) {
        self.record_edit(entity, |entity_mut| {
            entity_mut.remove::<C>();
        });
    }

    /// Record overwriting (or attaching) a component value.
    pub fn set_value<C: Component>(&self, entity: Entity, value: C) {
        self.record_edit(entity, move |entity_mut| {
            entity_mut.insert(value);
        });
    }

    /// Record destroying an entity. Idempotent at flush time.
    pub fn destroy(&self, entity: Entity) {
        // Send failure means the queue was dropped during shutdown.
        let _ = self.tx.send(Mutation::Destroy(entity));
    }

    fn record_edit(
        &self,
        entity: Entity,
        op: impl for<'w> FnOnce(&mut EntityWorldMut<'w>) + Send + 'static,
    ) {
        let _ = self.tx.send(Mutation::Edit {
            entity,
            op: Box::new(op),
        });
    }
}
