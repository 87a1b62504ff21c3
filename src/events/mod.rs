//! Event types and observers used by the deletion layer.
//!
//! This module groups the messages exchanged with the host simulation and
//! the observers that react to tool lifecycle events. Events provide a
//! decoupled way for the host and this layer to communicate without tight
//! coupling or direct dependencies.
//!
//! Submodules:
//! - [`regen`] – host notifications for (re)created sub-elements
//! - [`tool`] – tool deactivation event and the cancellation observer
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod regen;
pub mod tool;
