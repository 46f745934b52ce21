//! Bomb spawning.
//!
//! Bombs come from three places:
//! - [`bomb_spawn_system`]: the secondary button's rising edge, paid with a
//!   charge, at the player's position.
//! - [`mouse_click_bomb_system`]: a click, free, at the clicked world position.
//! - script requests, free, handled by the script hook system.
//!
//! All of them go through [`BombSpawner`].
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, warn};

use crate::components::animation::Animation;
use crate::components::fuse::Fuse;
use crate::components::mapposition::MapPosition;
use crate::components::objectid::ObjectId;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::events::input::MouseClick;
use crate::geometry::Vec2;
use crate::resources::animationstore::AnimationStore;
use crate::resources::entityregistry::EntityRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::renderer::RendererRes;
use crate::resources::session::SessionState;

/// Animation keys tried first for a fresh bomb.
const BOMB_ANIMATIONS: [&str; 1] = ["fuse"];

/// Everything needed to put a bomb into the world.
#[derive(SystemParam)]
pub struct BombSpawner<'w, 's> {
    commands: Commands<'w, 's>,
    registry: ResMut<'w, EntityRegistry>,
    store: Res<'w, AnimationStore>,
    config: Res<'w, GameConfig>,
}

impl BombSpawner<'_, '_> {
    /// Spawn a bomb with its top-left corner at `at`.
    ///
    /// Returns `None` when the bomb sheet is not loaded.
    pub fn spawn(&mut self, at: Vec2) -> Option<ObjectId> {
        let Some(sheet) = self.store.get(&self.config.bomb_sheet) else {
            warn!("Bomb sheet '{}' is not loaded", self.config.bomb_sheet);
            return None;
        };
        let animation = sheet.pick_animation(&BOMB_ANIMATIONS)?;
        let sprite = Sprite::new(
            self.config.bomb_sheet.clone(),
            sheet.frame_width,
            sheet.frame_height,
        );
        let id = self.registry.add(
            &mut self.commands,
            (
                MapPosition::new(at.x, at.y),
                sprite,
                Animation::new(animation),
                Fuse::new(self.config.bomb_lifetime),
            ),
        );
        debug!("Bomb {} placed at ({}, {})", id, at.x, at.y);
        Some(id)
    }
}

/// Drop a bomb at the player on the secondary button's rising edge, if a
/// charge is left.
pub fn bomb_spawn_system(
    input: Res<InputState>,
    mut session: ResMut<SessionState>,
    players: Query<&MapPosition, With<Player>>,
    mut spawner: BombSpawner,
) {
    let rising = input.secondary.active && !session.secondary_was_down;
    if !rising {
        return;
    }
    let Ok(position) = players.single() else {
        return;
    };
    if !session.charges.try_spend() {
        debug!("No bomb charges left");
        return;
    }
    spawner.spawn(position.pos);
}

/// Spawn a free bomb for every queued click.
pub fn mouse_click_bomb_system(
    mut clicks: MessageReader<MouseClick>,
    renderer: NonSend<RendererRes>,
    session: Res<SessionState>,
    mut spawner: BombSpawner,
) {
    for click in clicks.read() {
        if !session.is_running() {
            continue;
        }
        let at = renderer.to_world_coordinates(click.screen.x, click.screen.y);
        spawner.spawn(at);
    }
}

/// Keep this frame's secondary button state for the next edge check.
pub fn remember_secondary_button(input: Res<InputState>, mut session: ResMut<SessionState>) {
    session.secondary_was_down = input.secondary.active;
}
