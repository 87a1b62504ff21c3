//! Selection working-set resource.
//!
//! [`SelectionState`] is the transient, per-interaction state of the
//! bulldoze tool: the current raycast target, the ordered working set the
//! target expanded into, the prefab identities encountered, and the flags
//! the UI collaborator surfaces (the "use Single instead" warning for
//! network prefabs, the blocked-extension tooltip).
//!
//! It is rebuilt from scratch on every target change and cleared when the
//! tool deactivates. Nothing in here is ever persisted.

use bevy_ecs::prelude::{Entity, Resource};
use rustc_hash::FxHashSet;

use crate::resources::prefabstore::PrefabId;

/// Resource holding the current working set of the bulldoze tool.
#[derive(Resource, Debug, Default)]
pub struct SelectionState {
    /// The raycast target the working set was built for.
    pub target: Option<Entity>,
    /// The owner that anchored sibling expansion, if any.
    pub owner: Option<Entity>,
    /// Entities pending the confirm action, in expansion order.
    pub working: Vec<Entity>,
    /// Union of prefab identities in the working set (ledger input).
    pub matched_prefabs: FxHashSet<PrefabId>,
    /// Matching mode hit a network prefab; multi-removal is unsupported.
    pub use_single_warning: bool,
    /// Confirm skipped at least one extension-capability entity.
    pub blocked_extension: bool,
}

impl SelectionState {
    /// Discard the working set and all flags.
    pub fn clear(&mut self) {
        self.target = None;
        self.owner = None;
        self.working.clear();
        self.matched_prefabs.clear();
        self.use_single_warning = false;
        self.blocked_extension = false;
    }

    /// True if `entity` is part of the current working set.
    pub fn contains(&self, entity: Entity) -> bool {
        self.working.contains(&entity)
    }
}
