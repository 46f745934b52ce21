use std::time::Instant;

use bevy_ecs::prelude::Resource;

/// Simulation time shared by every time-dependent system.
///
/// `delta` is measured once per frame and reused by cooldowns, fuses,
/// animations and movement so they agree within a frame.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    /// Seconds simulated since the session started.
    pub elapsed: f32,
    /// Seconds covered by the current frame.
    pub delta: f32,
    pub frame_count: u64,
}

/// Wall-clock frame timer.
///
/// The first tick has nothing to compare against and reports zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        delta
    }
}
