//! Game state systems and run conditions.
//!
//! The Running -> GameOver edge is taken by [`check_player_health`]; the way
//! back goes through [`retry_system`], which only flags a reset. The reset
//! itself rebuilds the world outside the schedule, see
//! [`reset_world`](crate::game::reset_world).
use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::Player;
use crate::resources::input::InputState;
use crate::resources::session::SessionState;

/// Run condition: the player has been spawned.
pub fn player_exists(players: Query<(), With<Player>>) -> bool {
    !players.is_empty()
}

pub fn state_is_running(session: Res<SessionState>) -> bool {
    session.state.is_running()
}

pub fn state_is_game_over(session: Res<SessionState>) -> bool {
    session.state.is_game_over()
}

/// Enter GameOver the first frame the player's HP is depleted.
pub fn check_player_health(players: Query<&Player>, mut session: ResMut<SessionState>) {
    let Ok(player) = players.single() else {
        return;
    };
    if player.is_dead() && session.state.enter_game_over() {
        info!("Game over with score {}", session.score);
    }
}

/// Request a reset on the rising edge of the retry button.
pub fn retry_system(input: Res<InputState>, mut session: ResMut<SessionState>) {
    if input.retry.just_pressed && session.state.request_reset() {
        info!("Retry requested");
    }
}
