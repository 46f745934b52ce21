//! World setup, reset and the per-frame driver.
//!
//! [`GameLoop`] owns the ECS [`World`] and the two schedules of a frame. The
//! world is built by [`load_world`] from the level and sprite sheets named in
//! [`GameConfig`]; [`reset_world`] tears every game object down and replays
//! the same setup.

use std::time::Instant;

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use log::info;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::objectid::ObjectId;
use crate::components::player::{DEFAULT_ATTACK_SECONDS, Player};
use crate::components::sprite::Sprite;
use crate::error::SetupError;
use crate::events::input::MouseClick;
use crate::resources::animationstore::AnimationStore;
use crate::resources::assets::{AssetLoader, AssetLoaderRes};
use crate::resources::entityregistry::EntityRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::inputsource::{InputSource, InputSourceRes};
use crate::resources::renderer::{Renderer, RendererRes};
use crate::resources::scripthost::{ScriptHost, ScriptHostRes};
use crate::resources::session::SessionState;
use crate::resources::tileworld::TileWorld;
use crate::resources::worldtime::{FrameClock, WorldTime};
use crate::systems::animation::animation_system;
use crate::systems::bombcharges::bomb_cooldown_system;
use crate::systems::bombs::{bomb_spawn_system, mouse_click_bomb_system, remember_secondary_button};
use crate::systems::fuse::fuse_system;
use crate::systems::gamestate::{
    check_player_health, player_exists, retry_system, state_is_game_over, state_is_running,
};
use crate::systems::input::update_input_state;
use crate::systems::playercontrol::{ATTACK_ANIMATION, IDLE_ANIMATION, player_control_system};
use crate::systems::render::render_system;
use crate::systems::scripting::script_hook_system;
use crate::systems::time::update_world_time;

type LoadParams<'w> = (
    NonSend<'w, AssetLoaderRes>,
    NonSendMut<'w, RendererRes>,
    Res<'w, GameConfig>,
);

/// Load the level, its tile sets and the sprite sheets through the asset
/// loader and resolve their textures.
fn build_level(world: &mut World) -> Result<(TileWorld, AnimationStore), SetupError> {
    let mut state: SystemState<LoadParams> = SystemState::new(world);
    let (assets, mut renderer, config) = state.get_mut(world);

    let level = assets.load_level(&config.level)?;
    let tilesets = level
        .tilesets
        .iter()
        .map(|reference| assets.load_tileset(&reference.source))
        .collect::<Result<Vec<_>, _>>()?;
    let tiles = TileWorld::build(level, tilesets, &mut **renderer)?;
    renderer.set_world_bounds(tiles.bounds());

    let mut store = AnimationStore::new();
    for name in [&config.player_sheet, &config.bomb_sheet] {
        if store.get(name).is_some() {
            continue;
        }
        let def = assets.load_sprite_sheet(name)?;
        store.load(name.clone(), def, &mut **renderer)?;
    }
    Ok((tiles, store))
}

fn spawn_player(world: &mut World) -> Result<ObjectId, SetupError> {
    let config = world.resource::<GameConfig>();
    let store = world.resource::<AnimationStore>();
    let sheet = store
        .get(&config.player_sheet)
        .ok_or_else(|| SetupError::MissingSpriteSheet {
            sheet: config.player_sheet.clone(),
        })?;

    let attack_duration = sheet
        .animation(ATTACK_ANIMATION)
        .and_then(|anim| anim.duration())
        .unwrap_or(DEFAULT_ATTACK_SECONDS);
    let animation = sheet
        .pick_animation(&[IDLE_ANIMATION])
        .ok_or_else(|| SetupError::MissingSpriteSheet {
            sheet: config.player_sheet.clone(),
        })?;
    let bundle = (
        MapPosition::new(config.spawn_x, config.spawn_y),
        Sprite::new(config.player_sheet.clone(), sheet.frame_width, sheet.frame_height),
        Animation::new(animation),
        Player::new(config.player_speed, attack_duration),
    );

    Ok(EntityRegistry::add_to_world(world, bundle))
}

/// Build the tile world and sprite sheets and spawn the player.
pub fn load_world(world: &mut World) -> Result<(), SetupError> {
    let (tiles, store) = build_level(world)?;
    let size = tiles.pixel_size();
    world.insert_resource(tiles);
    world.insert_resource(store);
    let player = spawn_player(world)?;
    info!(
        "World loaded: {}x{} px, player {} spawned",
        size.x, size.y, player
    );
    Ok(())
}

/// Despawn every game object and rebuild the world as on startup.
///
/// Session state (score, charges, game state) starts over. Loaded scripts
/// are kept.
pub fn reset_world(world: &mut World) -> Result<(), SetupError> {
    info!("Resetting world");
    let objects: Vec<Entity> = world
        .query_filtered::<Entity, With<ObjectId>>()
        .iter(world)
        .collect();
    for entity in objects {
        world.despawn(entity);
    }
    world.resource_mut::<EntityRegistry>().clear();
    world.remove_resource::<TileWorld>();
    world.remove_resource::<AnimationStore>();
    world.resource_mut::<Messages<MouseClick>>().clear();

    load_world(world)?;
    world.resource_mut::<SessionState>().reset();
    Ok(())
}

/// Systems of the update pass, in frame order.
pub fn update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            bomb_cooldown_system,
            (
                update_input_state,
                retry_system.run_if(state_is_game_over),
                mouse_click_bomb_system,
                player_control_system.run_if(state_is_running),
                check_player_health.run_if(state_is_running),
                script_hook_system.run_if(state_is_running),
                bomb_spawn_system.run_if(state_is_running),
                fuse_system,
                animation_system,
                remember_secondary_button,
            )
                .chain()
                .run_if(player_exists),
        )
            .chain(),
    );
    update
}

pub fn render_schedule() -> Schedule {
    let mut render = Schedule::default();
    render.add_systems(render_system.run_if(player_exists));
    render
}

/// Frame driver: one [`step`](GameLoop::step) is one update pass, an
/// optional reset and one render pass.
pub struct GameLoop {
    world: World,
    update: Schedule,
    render: Schedule,
    clock: FrameClock,
}

impl GameLoop {
    /// Assemble a world around the given backends. Nothing is loaded until
    /// [`setup`](GameLoop::setup).
    pub fn new(
        config: GameConfig,
        renderer: impl Renderer + 'static,
        input: impl InputSource + 'static,
        assets: impl AssetLoader + 'static,
        scripts: impl ScriptHost + 'static,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(WorldTime::default());
        world.insert_resource(SessionState::new());
        world.insert_resource(InputState::default());
        world.insert_resource(EntityRegistry::new());
        world.insert_resource(Messages::<MouseClick>::default());
        world.insert_non_send_resource(RendererRes::new(renderer));
        world.insert_non_send_resource(InputSourceRes::new(input));
        world.insert_non_send_resource(AssetLoaderRes::new(assets));
        world.insert_non_send_resource(ScriptHostRes::new(scripts));

        GameLoop {
            world,
            update: update_schedule(),
            render: render_schedule(),
            clock: FrameClock::new(),
        }
    }

    /// Load scripts, then the level and the player.
    pub fn setup(&mut self) -> Result<(), SetupError> {
        let scripts_dir = self.world.resource::<GameConfig>().scripts_dir.clone();
        let count = self
            .world
            .non_send_resource_mut::<ScriptHostRes>()
            .load_all(&scripts_dir)?;
        info!("{} script(s) ready", count);
        load_world(&mut self.world)
    }

    /// Run one frame timed by the wall clock. The first frame has a zero delta.
    pub fn frame(&mut self) -> Result<(), SetupError> {
        let dt = self.clock.tick(Instant::now());
        self.step(dt)
    }

    /// Run one frame covering `dt` seconds.
    pub fn step(&mut self, dt: f32) -> Result<(), SetupError> {
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);

        let reset = self
            .world
            .resource_mut::<SessionState>()
            .state
            .take_reset_request();
        if reset {
            reset_world(&mut self.world)?;
        }

        self.render.run(&mut self.world);

        self.world.resource_mut::<Messages<MouseClick>>().update();
        self.world.clear_trackers();
        Ok(())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
