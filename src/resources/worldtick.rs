use bevy_ecs::prelude::Resource;

/// Monotonic frame counter for the tick-based schedule.
///
/// One logical frame is one scheduling quantum; countdowns and the
/// amortized reaper sweep are expressed in these frames, never in wall
/// time.
#[derive(Resource, Clone, Copy, Default)]
pub struct WorldTick {
    pub frame: u64,
}
