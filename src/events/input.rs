//! Input actions and click messages.
//!
//! [`InputAction`] names the logical buttons the game reads; backends map
//! physical keys onto them. Mouse clicks are not polled as state but queued
//! as [`MouseClick`] messages, drained once per frame before the player
//! update.

use bevy_ecs::message::Message;

use crate::geometry::Vec2;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move up (default: W / Up arrow).
    Up,
    /// Move down (default: S / Down arrow).
    Down,
    /// Move left (default: A / Left arrow).
    Left,
    /// Move right (default: D / Right arrow).
    Right,
    /// Melee attack (default: Space).
    Attack,
    /// Drop a bomb (default: E).
    Secondary,
    /// Restart after game over (default: R).
    Retry,
}

impl InputAction {
    pub const ALL: [InputAction; 7] = [
        InputAction::Up,
        InputAction::Down,
        InputAction::Left,
        InputAction::Right,
        InputAction::Attack,
        InputAction::Secondary,
        InputAction::Retry,
    ];
}

/// A mouse click at a screen position.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MouseClick {
    pub screen: Vec2,
}
