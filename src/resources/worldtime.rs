use bevy_ecs::prelude::Resource;

/// Simulation clock in seconds, advanced once per frame.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub delta: f32,
    pub time_scale: f32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            delta: 0.0,
            time_scale: 1.0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Frame delta in milliseconds.
    pub fn delta_ms(&self) -> f32 {
        self.delta * 1000.0
    }
}
