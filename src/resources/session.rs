//! Per-session gameplay state.
//!
//! Everything the loop carries from frame to frame that is not an entity
//! lives in the single [`SessionState`] resource: score, bomb charges, the
//! game state machine and the previous frame's secondary-button state used
//! for edge detection. A reset reinitializes it in place.

use bevy_ecs::prelude::Resource;

use crate::resources::bombcharges::BombCharges;
use crate::resources::gamestate::GameStateMachine;

#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub score: i64,
    pub charges: BombCharges,
    pub state: GameStateMachine,
    /// Whether the secondary-action button was down last frame.
    pub secondary_was_down: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize in place, as at the start of a new session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }
}
