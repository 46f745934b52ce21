//! Animation system.
//!
//! [`animation_system`] advances every [`Animation`] by the frame's delta,
//! using the playback data of the entity's sprite sheet from the
//! [`AnimationStore`]. The render pass turns `frame_index` into a source
//! rectangle, so nothing else is written here.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity animation state
//! - [`crate::resources::animationstore::AnimationStore`] – animation definitions

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Looped animations wrap to frame 0; others stay on their last frame.
/// Unknown sheets or keys, and animations with a non-positive fps, are left
/// untouched.
pub fn animation_system(
    mut query: Query<(&Sprite, &mut Animation)>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (sprite, mut anim) in query.iter_mut() {
        let Some(resource) = store
            .get(&sprite.sheet)
            .and_then(|sheet| sheet.animation(&anim.animation_key))
        else {
            continue;
        };
        if resource.fps <= 0.0 {
            continue;
        }

        anim.elapsed_time += time.delta;
        let frame_duration = 1.0 / resource.fps;
        while anim.elapsed_time >= frame_duration {
            anim.elapsed_time -= frame_duration;
            anim.frame_index += 1;
            if anim.frame_index >= resource.frame_count {
                if resource.looped {
                    anim.frame_index = 0;
                } else {
                    anim.frame_index = resource.frame_count - 1; // stay on last frame
                    anim.elapsed_time = 0.0;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::SpriteSheetDef;
    use crate::resources::renderer::HeadlessRenderer;

    fn world() -> World {
        let def: SpriteSheetDef = serde_json::from_str(
            r#"{ "image": "p.png", "frame_width": 16, "frame_height": 16,
                 "animations": {
                     "walk":   { "row": 0, "frames": 4, "fps": 10 },
                     "attack": { "row": 1, "frames": 2, "fps": 10, "looped": false } } }"#,
        )
        .unwrap();
        let mut store = AnimationStore::new();
        store
            .load("player", def, &mut HeadlessRenderer::new(64, 64))
            .unwrap();

        let mut world = World::new();
        world.insert_resource(store);
        world.insert_resource(WorldTime::default());
        world
    }

    fn advance(world: &mut World, dt: f32) {
        world.resource_mut::<WorldTime>().delta = dt;
        let mut schedule = Schedule::default();
        schedule.add_systems(animation_system);
        schedule.run(world);
    }

    #[test]
    fn looped_animation_wraps() {
        let mut world = world();
        let e = world
            .spawn((Sprite::new("player", 16.0, 16.0), Animation::new("walk")))
            .id();

        advance(&mut world, 0.25);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 2);
        advance(&mut world, 0.2);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 0);
    }

    #[test]
    fn one_shot_animation_holds_last_frame() {
        let mut world = world();
        let e = world
            .spawn((Sprite::new("player", 16.0, 16.0), Animation::new("attack")))
            .id();

        advance(&mut world, 0.55);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 1);
    }

    #[test]
    fn unknown_sheet_is_ignored() {
        let mut world = world();
        let e = world
            .spawn((Sprite::new("ghost", 16.0, 16.0), Animation::new("walk")))
            .id();
        advance(&mut world, 1.0);
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 0);
    }
}
