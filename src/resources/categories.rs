//! Configurable category table for Similar-mode selection.
//!
//! Similar mode selects siblings that share a *semantic category* with
//! the target rather than its exact prefab. Category membership is a
//! capability predicate: a prefab belongs to a category when it carries
//! at least one `any_of` tag and none of the `none_of` tags.
//!
//! The table is data, not law: games override it from an INI file, and
//! the built-in defaults cover the common host categories
//! (vegetation-minus-hedges, street furniture, branding, activity
//! locations, elevated objects, fence/hedge lanes).
//!
//! # Configuration File Format
//!
//! ```ini
//! [vegetation]
//! any_of = vegetation
//! none_of = hedge
//!
//! [street_furniture]
//! any_of = street_furniture
//! ```
//!
//! Rules are evaluated in order; the first match wins. A target that
//! fits no category falls back to exact-prefab matching.

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::warn;
use std::path::Path;

use crate::resources::prefabstore::{Capability, PrefabId, PrefabStore};

/// One category rule: a name plus its capability predicate.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// Category name (used for logging and UI text).
    pub name: String,
    /// Prefab must carry at least one of these tags.
    pub any_of: Vec<Capability>,
    /// Prefab must carry none of these tags.
    pub none_of: Vec<Capability>,
}

impl CategoryRule {
    fn matches(&self, store: &PrefabStore, prefab: PrefabId) -> bool {
        self.any_of
            .iter()
            .any(|cap| store.has_capability(prefab, *cap))
            && !self
                .none_of
                .iter()
                .any(|cap| store.has_capability(prefab, *cap))
    }
}

/// Resource holding the ordered Similar-category rules.
#[derive(Resource, Debug, Clone)]
pub struct SimilarCategories {
    pub rules: Vec<CategoryRule>,
}

impl Default for SimilarCategories {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SimilarCategories {
    /// The built-in category table.
    pub fn builtin() -> Self {
        let rule = |name: &str, any_of: &[Capability], none_of: &[Capability]| CategoryRule {
            name: name.to_string(),
            any_of: any_of.to_vec(),
            none_of: none_of.to_vec(),
        };
        SimilarCategories {
            rules: vec![
                rule(
                    "vegetation",
                    &[Capability::Vegetation],
                    &[Capability::Hedge],
                ),
                rule("street_furniture", &[Capability::StreetFurniture], &[]),
                rule("branding", &[Capability::Branding], &[]),
                rule("activity_location", &[Capability::ActivityLocation], &[]),
                rule("elevated", &[Capability::Elevated], &[]),
                rule(
                    "fence_or_hedge",
                    &[Capability::Fence, Capability::Hedge],
                    &[],
                ),
            ],
        }
    }

    /// Load a category table from an INI file.
    ///
    /// Each section is one rule, evaluated in file order. Unknown
    /// capability names are skipped with a warning; a section with an
    /// empty `any_of` after parsing is dropped entirely.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|e| format!("Failed to load category table: {}", e))?;

        let mut rules = Vec::new();
        for section in config.sections() {
            let parse_list = |key: &str| -> Vec<Capability> {
                let mut caps = Vec::new();
                if let Some(raw) = config.get(&section, key) {
                    for part in raw.split(',') {
                        match Capability::parse(part) {
                            Some(cap) => caps.push(cap),
                            None => warn!(
                                "Unknown capability '{}' in category [{}], skipping",
                                part.trim(),
                                section
                            ),
                        }
                    }
                }
                caps
            };

            let any_of = parse_list("any_of");
            if any_of.is_empty() {
                warn!("Category [{}] has no usable any_of tags, dropped", section);
                continue;
            }
            rules.push(CategoryRule {
                name: section.clone(),
                any_of,
                none_of: parse_list("none_of"),
            });
        }
        Ok(SimilarCategories { rules })
    }

    /// The first category rule the prefab matches, if any.
    pub fn category_of(&self, store: &PrefabStore, prefab: PrefabId) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.matches(store, prefab))
    }

    /// True if `candidate` shares `target`'s category.
    ///
    /// Returns `None` when the target fits no category (callers fall back
    /// to exact-prefab matching).
    pub fn same_category(
        &self,
        store: &PrefabStore,
        target: PrefabId,
        candidate: PrefabId,
    ) -> Option<bool> {
        self.category_of(store, target)
            .map(|rule| rule.matches(store, candidate))
    }
}
