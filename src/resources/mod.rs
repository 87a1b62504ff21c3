//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the mutation queue, selection
//! state, prefab registry, tool configuration, and timing. Each submodule
//! documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `categories` – configurable capability-based category table for Similar mode
//! - `ledger` – permanent-removal ledger index, recording API, persistence
//! - `mutationqueue` – deferred mutation buffer with parallel-safe producers
//! - `prefabstore` – prefab identities, stable names, capability tags
//! - `raycast` – host-filled pointer hit plus the mask this layer sets
//! - `selection` – transient working set of the bulldoze tool
//! - `tooloptions` – selection mode, tier policy, deletion delay, sweep interval
//! - `worldtick` – monotonic frame counter
pub mod categories;
pub mod ledger;
pub mod mutationqueue;
pub mod prefabstore;
pub mod raycast;
pub mod selection;
pub mod tooloptions;
pub mod worldtick;
