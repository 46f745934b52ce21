//! Per-frame input resource.
//!
//! Captures the buttons the game cares about and exposes them to systems via
//! the [`InputState`] resource. [`update_input_state`](crate::systems::input::update_input_state)
//! refreshes it from the active [`InputSource`](crate::resources::inputsource::InputSource)
//! once per frame.
use bevy_ecs::prelude::*;

use crate::components::player::Directions;
use crate::events::input::InputAction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with edges relative to the previous frame.
pub struct BoolState {
    /// Whether the button is down this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl BoolState {
    /// Feed this frame's raw state.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame button state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub attack: BoolState,
    pub secondary: BoolState,
    pub retry: BoolState,
}

impl InputState {
    pub fn get(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Up => &self.up,
            InputAction::Down => &self.down,
            InputAction::Left => &self.left,
            InputAction::Right => &self.right,
            InputAction::Attack => &self.attack,
            InputAction::Secondary => &self.secondary,
            InputAction::Retry => &self.retry,
        }
    }

    pub fn get_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Up => &mut self.up,
            InputAction::Down => &mut self.down,
            InputAction::Left => &mut self.left,
            InputAction::Right => &mut self.right,
            InputAction::Attack => &mut self.attack,
            InputAction::Secondary => &mut self.secondary,
            InputAction::Retry => &mut self.retry,
        }
    }

    /// Movement keys held this frame.
    pub fn directions(&self) -> Directions {
        Directions {
            up: self.up.active,
            down: self.down.active,
            left: self.left.active,
            right: self.right.active,
        }
    }
}
