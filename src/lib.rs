//! Razengine library.
//!
//! A deferred entity-lifecycle coordination layer for a host game's ECS
//! world: frame-delayed deletion, sub-element selection over nested
//! ownership, permanent-removal records that veto host regeneration, and
//! safe network-edge detachment. This module exposes the layer's ECS
//! components, resources, systems, and events for use in integration
//! tests and as a reusable library.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
