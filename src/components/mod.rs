//! ECS components for entities.
//!
//! This module groups all component types the deletion/lifecycle layer
//! attaches to entities in the host world: ownership relations, countdown
//! markers, network graph bookkeeping, and permanent-removal records.
//!
//! Submodules overview:
//! - [`delayeddeletion`] – countdown-to-despawn marker aged by the deletion system
//! - [`marked`] – transient highlight tag on the current working set
//! - [`network`] – segment endpoints, node edge lists, and the dirty tag
//! - [`owner`] – back-pointer from a sub-element to its owner
//! - [`prefabref`] – prefab identity carried by managed entities
//! - [`removal`] – permanent-removal records and ledger back-references
//! - [`subelements`] – ordered object/lane sub-element buffers on owners

pub mod delayeddeletion;
pub mod marked;
pub mod network;
pub mod owner;
pub mod prefabref;
pub mod removal;
pub mod subelements;
