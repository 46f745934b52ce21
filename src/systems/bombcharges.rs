use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::session::SessionState;
use crate::resources::worldtime::WorldTime;

/// Regenerate bomb charges. Runs every frame, before anything else and in
/// both game states.
pub fn bomb_cooldown_system(mut session: ResMut<SessionState>, time: Res<WorldTime>) {
    if session.charges.tick(time.delta) {
        debug!("Bomb charge regained ({} left)", session.charges.current());
    }
}
