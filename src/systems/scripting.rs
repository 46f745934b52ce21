//! Per-frame script hook.
use bevy_ecs::prelude::*;
use log::error;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::scripthost::{ScriptContext, ScriptHostRes};
use crate::resources::session::SessionState;
use crate::resources::worldtime::WorldTime;
use crate::systems::bombs::BombSpawner;

/// Run every loaded script once with the current frame's context.
///
/// HP, score and player position are copied back afterwards, HP floored at
/// zero. Bomb requests spawn free bombs. A failing script is logged and the
/// frame goes on.
pub fn script_hook_system(
    mut host: NonSendMut<ScriptHostRes>,
    mut session: ResMut<SessionState>,
    mut players: Query<(&mut Player, &mut MapPosition)>,
    time: Res<WorldTime>,
    mut spawner: BombSpawner,
) {
    let Ok((mut player, mut position)) = players.single_mut() else {
        return;
    };

    let mut ctx = ScriptContext {
        delta: time.delta,
        player_x: position.pos.x,
        player_y: position.pos.y,
        hp: player.hp,
        score: session.score,
        bombs: session.charges.current(),
        bomb_requests: Vec::new(),
    };

    if let Err(err) = host.execute_all(&mut ctx) {
        error!("{}", err);
    }

    player.hp = ctx.hp.max(0);
    session.score = ctx.score;
    position.pos.x = ctx.player_x;
    position.pos.y = ctx.player_y;

    for at in ctx.bomb_requests {
        spawner.spawn(at);
    }
}
