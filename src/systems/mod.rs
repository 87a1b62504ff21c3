//! Deletion-layer systems.
//!
//! This module groups all ECS systems that advance the deferred
//! entity-lifecycle pipeline each tick.
//!
//! Submodules overview
//! - [`deletion`] – age countdown markers and despawn entities at zero
//! - [`detach`] – repair the network graph around a dying segment
//! - [`mutation`] – end-of-tick flush of the deferred mutation queue
//! - [`reaper`] – amortized sweep of ledger entries with dead owners
//! - [`regen`] – veto host-regenerated sub-elements via the ledger
//! - [`selection`] – working-set construction and the confirm action
//! - [`tick`] – advance the frame counter

pub mod deletion;
pub mod detach;
pub mod mutation;
pub mod reaper;
pub mod regen;
pub mod selection;
pub mod tick;
