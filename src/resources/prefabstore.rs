//! Prefab identity registry.
//!
//! The [`PrefabStore`] resource maps stable string names to [`PrefabId`]s
//! and records the capability tags each prefab carries. Capability tags
//! replace type-based branching over prefab subclasses: instead of asking
//! "is this a static object prefab?", systems ask
//! `store.has_capability(id, Capability::StaticObject)`.
//!
//! String names are the persistence identity — entity handles and numeric
//! ids are not stable across save/load, names are.
//!
//! # Related
//!
//! - [`PrefabRef`](crate::components::prefabref::PrefabRef) – instance-side link
//! - [`SimilarCategories`](crate::resources::categories::SimilarCategories) – capability-driven category table

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};

/// Stable identifier for a prefab within one running world.
///
/// Indexes into the [`PrefabStore`]; serialize the prefab *name* instead
/// when a value must survive save/load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrefabId(pub u32);

/// Capability tags a prefab can carry.
///
/// A small closed set queried via [`PrefabStore::has_capability`]. The
/// Similar-selection category table combines these; it does not extend
/// the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Free-standing object (prop, tree, decal).
    StaticObject,
    /// Lane-type sub-element (fence, hedge, marking).
    NetLane,
    /// Network segment prefab (road, track, path).
    RoadSegment,
    /// Lot extension/upgrade; protected from removal unless allowed.
    Extension,
    /// Trees, bushes, and other planted objects.
    Vegetation,
    /// Hedge lanes (vegetation that is lane-shaped, not object-shaped).
    Hedge,
    /// Benches, bins, lamps, and similar street furniture.
    StreetFurniture,
    /// Billboards, signs, and advertisement objects.
    Branding,
    /// Spots where agents perform activities.
    ActivityLocation,
    /// Objects raised above ground level.
    Elevated,
    /// Fence lanes.
    Fence,
}

impl Capability {
    /// Parse a capability tag from its configuration name.
    pub fn parse(name: &str) -> Option<Capability> {
        match name.trim() {
            "static_object" => Some(Capability::StaticObject),
            "net_lane" => Some(Capability::NetLane),
            "road_segment" => Some(Capability::RoadSegment),
            "extension" => Some(Capability::Extension),
            "vegetation" => Some(Capability::Vegetation),
            "hedge" => Some(Capability::Hedge),
            "street_furniture" => Some(Capability::StreetFurniture),
            "branding" => Some(Capability::Branding),
            "activity_location" => Some(Capability::ActivityLocation),
            "elevated" => Some(Capability::Elevated),
            "fence" => Some(Capability::Fence),
            _ => None,
        }
    }
}

struct PrefabInfo {
    name: String,
    capabilities: FxHashSet<Capability>,
}

/// Resource registering every prefab the layer can encounter.
#[derive(Resource, Default)]
pub struct PrefabStore {
    infos: Vec<PrefabInfo>,
    by_name: FxHashMap<String, PrefabId>,
}

impl PrefabStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefab under a stable name with its capability tags.
    ///
    /// Registering an existing name returns the existing id unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> PrefabId {
        let name = name.into();
        if let Some(id) = self.by_name.get(&name) {
            return *id;
        }
        let id = PrefabId(self.infos.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.infos.push(PrefabInfo {
            name,
            capabilities: capabilities.into_iter().collect(),
        });
        id
    }

    /// Look up a prefab id by its stable name.
    pub fn id_of(&self, name: &str) -> Option<PrefabId> {
        self.by_name.get(name).copied()
    }

    /// The stable name of a prefab id, if registered.
    pub fn name_of(&self, id: PrefabId) -> Option<&str> {
        self.infos.get(id.0 as usize).map(|info| info.name.as_str())
    }

    /// True if the prefab carries the given capability tag.
    ///
    /// Unregistered ids carry nothing.
    pub fn has_capability(&self, id: PrefabId, capability: Capability) -> bool {
        self.infos
            .get(id.0 as usize)
            .is_some_and(|info| info.capabilities.contains(&capability))
    }

    /// Number of registered prefabs.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}
