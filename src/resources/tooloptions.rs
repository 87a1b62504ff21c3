//! Bulldoze tool options resource.
//!
//! Holds the user-facing knobs of the deletion tool: selection mode, tier
//! policy, the extension-removal guard, the per-confirm deletion delay,
//! and the reaper sweep interval. The UI collaborator writes these; the
//! selection and sweep systems read them.

use bevy_ecs::prelude::Resource;

/// How a raycast target expands into a working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Just the target and its own nested sub-elements.
    #[default]
    Single,
    /// Every sibling with the exact same prefab, plus nested sub-elements.
    Matching,
    /// Every sibling sharing the target's semantic category.
    Similar,
}

/// Which tier of the ownership chain anchors sibling expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierPolicy {
    /// Climb the owner chain to the root owner (the main lot).
    #[default]
    SubOfMain,
    /// Stay at the immediate owner (an upgrade/extension lot).
    SubOfUpgrade,
}

/// Resource holding the current bulldoze tool configuration.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ToolOptions {
    /// Working-set expansion mode.
    pub mode: SelectionMode,
    /// Ownership tier anchoring sibling expansion.
    pub tier: TierPolicy,
    /// Allow removing extension-capability entities.
    pub allow_extensions: bool,
    /// Frames of delay applied to confirmed deletions.
    ///
    /// Per-call-site policy, not a constant; sensible values range 3–30
    /// depending on how much dependent state must settle first.
    pub deletion_delay_frames: u32,
    /// The reaper only sweeps when `frame % reaper_interval == 0`.
    pub reaper_interval: u64,
}

impl Default for ToolOptions {
    fn default() -> Self {
        ToolOptions {
            mode: SelectionMode::Single,
            tier: TierPolicy::SubOfMain,
            allow_extensions: false,
            deletion_delay_frames: 5,
            reaper_interval: 600,
        }
    }
}
