//! Render pass.
//!
//! Draws the tile world, every renderable object and the HUD through the
//! [`Renderer`](crate::resources::renderer::Renderer), then presents the
//! frame. Temporary objects whose fuse ran out are collected while drawing
//! and only removed once the frame is presented; each removal near the
//! player costs the player the configured explosion damage.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::mapposition::MapPosition;
use crate::components::objectid::ObjectId;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::geometry::{Color, Rect, Vec2};
use crate::resources::animationstore::AnimationStore;
use crate::resources::entityregistry::{EntityRegistry, Renderables};
use crate::resources::gameconfig::GameConfig;
use crate::resources::renderer::{Renderer, RendererRes};
use crate::resources::session::SessionState;
use crate::resources::tileworld::TileWorld;

/// Explosions hurt the player when closer than this on both axes.
pub const BLAST_RADIUS: f32 = 32.0;

const HUD_FONT_SIZE: i32 = 20;
const HUD_MARGIN: i32 = 10;

/// Whether an explosion at `bomb` reaches a player at `player`.
pub fn in_blast_range(bomb: Vec2, player: Vec2) -> bool {
    (bomb.x - player.x).abs() < BLAST_RADIUS && (bomb.y - player.y).abs() < BLAST_RADIUS
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut renderer: NonSendMut<RendererRes>,
    tiles: Res<TileWorld>,
    store: Res<AnimationStore>,
    renderables: Renderables,
    mut players: Query<(&mut Player, &MapPosition, &Sprite)>,
    mut registry: ResMut<EntityRegistry>,
    mut commands: Commands,
    session: Res<SessionState>,
    config: Res<GameConfig>,
) {
    renderer.set_draw_color(Color::BLACK);
    renderer.clear();

    if let Ok((_, position, sprite)) = players.single() {
        renderer.camera_look_at(
            position.pos.x + sprite.width / 2.0,
            position.pos.y + sprite.height / 2.0,
        );
    }

    tiles.render(&mut **renderer);

    let mut expired: Vec<(ObjectId, Vec2)> = Vec::new();
    for item in renderables.iter() {
        let sheet = store.get(&item.sprite.sheet);
        let src = sheet.and_then(|s| {
            s.frame_rect(&item.animation.animation_key, item.animation.frame_index)
        });
        if let (Some(sheet), Some(src)) = (sheet, src) {
            let dst = Rect::new(
                item.position.pos.x,
                item.position.pos.y,
                item.sprite.width,
                item.sprite.height,
            );
            renderer.render_texture(sheet.texture, src, dst);
        }
        if item.fuse.is_some_and(|fuse| fuse.expired) {
            expired.push((item.id, item.position.pos));
        }
    }

    draw_hud(&mut **renderer, &session, players.single().ok().map(|(p, _, _)| p.hp));
    renderer.present();

    for (id, at) in expired {
        if !registry.remove(&mut commands, id) {
            continue;
        }
        debug!("Reaped {}", id);
        if let Ok((mut player, position, _)) = players.single_mut() {
            if in_blast_range(at, position.pos) {
                player.take_damage(config.bomb_damage);
                info!("Player caught in blast of {}, hp {}", id, player.hp);
            }
        }
    }
}

fn draw_hud(renderer: &mut dyn Renderer, session: &SessionState, hp: Option<i32>) {
    renderer.set_draw_color(Color::WHITE);
    let mut y = HUD_MARGIN;
    if let Some(hp) = hp {
        renderer.draw_text(&format!("HP: {hp}"), HUD_MARGIN, y, HUD_FONT_SIZE);
        y += HUD_FONT_SIZE + 4;
    }
    renderer.draw_text(&format!("Score: {}", session.score), HUD_MARGIN, y, HUD_FONT_SIZE);
    y += HUD_FONT_SIZE + 4;
    renderer.draw_text(
        &format!("Bombs: {}", session.charges.current()),
        HUD_MARGIN,
        y,
        HUD_FONT_SIZE,
    );

    if session.state.is_game_over() {
        let (width, height) = renderer.window_size();
        renderer.set_draw_color(Color::RED);
        renderer.draw_text("GAME OVER", width / 2 - 90, height / 2 - 30, 40);
        renderer.set_draw_color(Color::WHITE);
        renderer.draw_text("Press R to retry", width / 2 - 80, height / 2 + 20, HUD_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blast_range_is_strict_on_both_axes() {
        let player = Vec2::new(100.0, 100.0);
        assert!(in_blast_range(Vec2::new(100.0, 100.0), player));
        assert!(in_blast_range(Vec2::new(131.9, 68.1), player));
        assert!(!in_blast_range(Vec2::new(132.0, 100.0), player));
        assert!(!in_blast_range(Vec2::new(100.0, 68.0), player));
    }
}
