//! Prefab identity component.
//!
//! Links an entity instance to its prefab (its "type"/template) in the
//! [`PrefabStore`](crate::resources::prefabstore::PrefabStore). Prefab
//! identity is stable across entity regeneration; entity handles are not.

use bevy_ecs::prelude::Component;

use crate::resources::prefabstore::PrefabId;

/// Component holding the prefab identity of an entity instance.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefabRef(pub PrefabId);

impl PrefabRef {
    /// The prefab identity.
    pub fn id(&self) -> PrefabId {
        self.0
    }
}
