//! Countdown lifetime for temporary entities such as bombs.
//!
//! The [`Fuse`] component burns down each frame. Unlike a plain despawn
//! timer it does not remove the entity by itself: once `expired` is set the
//! entity keeps being drawn until the next render pass reaps it and applies
//! the explosion rule.
//!
//! # How It Works
//!
//! 1. A bomb is spawned with a `Fuse` holding its lifetime in seconds
//! 2. [`fuse_system`](crate::systems::fuse::fuse_system) calls [`Fuse::tick`] with the frame delta
//! 3. When `remaining <= 0`, `expired` latches to true
//! 4. [`render_system`](crate::systems::render::render_system) draws the entity
//!    once more, then removes it and checks proximity to the player
//!
//! # Related
//!
//! - [`crate::systems::fuse::fuse_system`] – system that burns fuses
//! - [`crate::systems::render::render_system`] – reaps expired entities

use bevy_ecs::prelude::Component;

/// Remaining lifetime of a temporary entity.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Fuse {
    /// Remaining time in seconds.
    pub remaining: f32,
    /// Latched once `remaining` reaches zero.
    pub expired: bool,
}

impl Fuse {
    /// Create a fuse that expires after `seconds`.
    pub fn new(seconds: f32) -> Self {
        Fuse {
            remaining: seconds,
            expired: seconds <= 0.0,
        }
    }

    /// Burn `dt` seconds off the fuse. Returns true on the frame it expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.expired = true;
            return true;
        }
        false
    }
}
