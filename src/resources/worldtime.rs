//! Simulation time resource.
//!
//! [`WorldTime`] carries the per-tick delta handed to animations. It is
//! refreshed once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time).

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds accumulated since start, scaled.
    pub elapsed: f32,
    /// Seconds since the previous tick, scaled.
    pub delta: f32,
    pub time_scale: f32,
    /// Ticks applied so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
