//! Player movement and attack.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::geometry::Vec2;
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::InputState;
use crate::resources::tileworld::TileWorld;
use crate::resources::worldtime::WorldTime;

pub const ATTACK_ANIMATION: &str = "attack";
pub const WALK_ANIMATION: &str = "walk";
pub const IDLE_ANIMATION: &str = "idle";

/// Integrate one frame of player input.
///
/// - A running attack is counted down first.
/// - The attack button starts an attack only with at most one movement
///   direction held.
/// - Movement is clamped to the tile world minus the sprite size.
/// - The animation follows the action, when the sheet defines it.
pub fn player_control_system(
    mut players: Query<(&mut Player, &mut MapPosition, &Sprite, &mut Animation)>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    tiles: Res<TileWorld>,
    store: Res<AnimationStore>,
) {
    let world_size = tiles.pixel_size();
    let dirs = input.directions();

    for (mut player, mut position, sprite, mut animation) in players.iter_mut() {
        player.advance_attack(time.delta);

        if input.attack.active && dirs.active_count() <= 1 && player.attack() {
            debug!("Player attack started");
        }

        let bound = Vec2::new(sprite.width, sprite.height);
        player.update_position(&mut position.pos, dirs, bound, world_size, time.delta * 1000.0);

        let wanted = if player.is_attacking() {
            ATTACK_ANIMATION
        } else if dirs.is_moving() {
            WALK_ANIMATION
        } else {
            IDLE_ANIMATION
        };
        let defined = store
            .get(&sprite.sheet)
            .is_some_and(|sheet| sheet.animation(wanted).is_some());
        if defined {
            animation.play(wanted);
        }
    }
}
