//! Input systems.
//!
//! - [`update_input_state`] polls the active
//!   [`InputSource`](crate::resources::inputsource::InputSource) each frame
//!   and writes the results into [`crate::resources::input::InputState`].
//! - Mouse clicks are forwarded as [`MouseClick`] messages while the game is
//!   running and dropped otherwise.
use bevy_ecs::prelude::*;
use log::debug;

use crate::events::input::{InputAction, MouseClick};
use crate::resources::input::InputState;
use crate::resources::inputsource::InputSourceRes;
use crate::resources::session::SessionState;

/// Poll the input source and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    mut source: NonSendMut<InputSourceRes>,
    session: Res<SessionState>,
    mut clicks: MessageWriter<MouseClick>,
) {
    for action in InputAction::ALL {
        let down = source.is_down(action);
        input.get_mut(action).update(down);
    }

    for screen in source.poll_clicks() {
        if session.is_running() {
            clicks.write(MouseClick { screen });
        } else {
            debug!("Dropping click at ({}, {}) during game over", screen.x, screen.y);
        }
    }
}
