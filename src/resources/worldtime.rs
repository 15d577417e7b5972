//! Simulation clock resource.
//!
//! [`WorldTime`] is advanced once per frame by
//! [`update_world_time`](crate::systems::time::update_world_time). Gameplay
//! timers (turns, background flashes) read the session clock in whole
//! milliseconds through [`WorldTime::elapsed_ms`]. That clock is an integer
//! count of microseconds, so it keeps its resolution however long a session
//! runs; `elapsed` in seconds is only for display and animation.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since the world was created, scaled.
    pub elapsed: f32,
    /// Seconds covered by the current frame, scaled.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
    clock_us: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            clock_us: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// A clock already showing `ms` milliseconds.
    pub fn at_ms(ms: u64) -> Self {
        let mut wt = WorldTime::default();
        wt.set_elapsed_ms(ms);
        wt
    }

    /// Add one frame of `scaled_dt` seconds.
    pub fn advance(&mut self, scaled_dt: f32) {
        let dt = scaled_dt.max(0.0);
        self.clock_us += (dt as f64 * 1_000_000.0).round() as u64;
        self.elapsed = self.clock_us as f64 as f32 / 1_000_000.0;
        self.delta = dt;
        self.frame_count += 1;
    }

    /// Jump the clock to `ms` without counting a frame.
    pub fn set_elapsed_ms(&mut self, ms: u64) {
        self.clock_us = ms * 1000;
        self.elapsed = ms as f32 / 1000.0;
    }

    /// Elapsed time in whole milliseconds (floored).
    pub fn elapsed_ms(&self) -> u64 {
        self.clock_us / 1000
    }
}
