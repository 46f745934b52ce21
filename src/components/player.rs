//! The controlled player character.
//!
//! [`Player`] holds the gameplay state of the single player entity: health,
//! movement speed and the attack timer. Position lives in the entity's
//! [`MapPosition`](crate::components::mapposition::MapPosition) and is
//! integrated by [`Player::update_position`].
//!
//! Health reaching zero is not handled here; the game loop observes it and
//! switches to game over (see [`crate::systems::gamestate::check_player_health`]).

use bevy_ecs::prelude::Component;

use crate::geometry::Vec2;

/// Health every player starts (and restarts) with.
pub const PLAYER_START_HP: i32 = 100;
/// Attack duration used when the sprite sheet has no `attack` animation.
pub const DEFAULT_ATTACK_SECONDS: f32 = 0.3;

/// Which movement keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    /// Number of direction keys held at once.
    pub fn active_count(&self) -> u32 {
        [self.up, self.down, self.left, self.right]
            .iter()
            .filter(|held| **held)
            .count() as u32
    }

    pub fn is_moving(&self) -> bool {
        self.active_count() > 0
    }
}

fn weight(held: bool) -> f32 {
    if held { 1.0 } else { 0.0 }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    /// Health points, never below zero.
    pub hp: i32,
    /// Movement speed in world pixels per second.
    pub speed: f32,
    /// Length of one attack in seconds.
    pub attack_duration: f32,
    attack_remaining: Option<f32>,
}

impl Player {
    pub fn new(speed: f32, attack_duration: f32) -> Self {
        Player {
            hp: PLAYER_START_HP,
            speed,
            attack_duration,
            attack_remaining: None,
        }
    }

    /// Integrate one frame of movement into `pos`.
    ///
    /// Each direction weighs 0 or 1; opposing keys cancel out. The result is
    /// clamped so the `bound`-sized box stays inside a world of size `world`.
    pub fn update_position(
        &self,
        pos: &mut Vec2,
        dirs: Directions,
        bound: Vec2,
        world: Vec2,
        delta_ms: f32,
    ) {
        let step = self.speed * delta_ms / 1000.0;
        let dx = (weight(dirs.right) - weight(dirs.left)) * step;
        let dy = (weight(dirs.down) - weight(dirs.up)) * step;

        let max_x = world.x - bound.x;
        let max_y = world.y - bound.y;
        pos.x = (pos.x + dx).min(max_x).max(0.0);
        pos.y = (pos.y + dy).min(max_y).max(0.0);
    }

    /// Start an attack unless one is already running. Returns true if it started.
    pub fn attack(&mut self) -> bool {
        if self.is_attacking() {
            return false;
        }
        self.attack_remaining = Some(self.attack_duration);
        true
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_remaining.is_some()
    }

    /// Count down a running attack by `dt` seconds.
    pub fn advance_attack(&mut self, dt: f32) {
        if let Some(remaining) = self.attack_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.attack_remaining = None;
            }
        }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}
