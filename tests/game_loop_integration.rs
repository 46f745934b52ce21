//! Whole-frame tests driving `GameLoop` with headless backends.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use bevy_ecs::prelude::*;

use bombtiles::components::animation::Animation;
use bombtiles::components::fuse::Fuse;
use bombtiles::components::mapposition::MapPosition;
use bombtiles::components::player::Player;
use bombtiles::error::{ScriptError, SetupError};
use bombtiles::events::input::InputAction;
use bombtiles::game::GameLoop;
use bombtiles::geometry::{Rect, Vec2};
use bombtiles::resources::animationstore::SpriteSheetDef;
use bombtiles::resources::assets::MemoryAssets;
use bombtiles::resources::bombcharges::MAX_CHARGES;
use bombtiles::resources::entityregistry::EntityRegistry;
use bombtiles::resources::gameconfig::GameConfig;
use bombtiles::resources::gamestate::GameStates;
use bombtiles::resources::inputsource::ScriptedInput;
use bombtiles::resources::level::{Layer, Level, TileDef, TileSet, TileSetReference};
use bombtiles::resources::renderer::{DrawCall, HeadlessRenderer};
use bombtiles::resources::scripthost::{NoScripts, ScriptContext, ScriptHost};
use bombtiles::resources::session::SessionState;

const EPSILON: f32 = 1e-4;
const MAP_W: u32 = 20;
const MAP_H: u32 = 15;
const TILE: u32 = 32;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn level() -> Level {
    let data = (0..MAP_W * MAP_H).map(|i| 1 + i % 2).collect();
    Level {
        width: MAP_W,
        height: MAP_H,
        tile_width: TILE,
        tile_height: TILE,
        layers: vec![Layer {
            name: "ground".into(),
            width: MAP_W,
            height: MAP_H,
            data,
        }],
        tilesets: vec![TileSetReference {
            source: PathBuf::from("tiles/ground.json"),
            firstgid: Some(1),
        }],
    }
}

fn ground() -> TileSet {
    TileSet {
        name: "ground".into(),
        tiles: vec![
            TileDef {
                id: 0,
                image: PathBuf::from("tiles/grass.png"),
                width: TILE,
                height: TILE,
            },
            TileDef {
                id: 1,
                image: PathBuf::from("tiles/dirt.png"),
                width: TILE,
                height: TILE,
            },
        ],
    }
}

fn sheet(json: &str) -> SpriteSheetDef {
    serde_json::from_str(json).unwrap()
}

fn assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_level("levels/test.json", level())
        .with_tileset("tiles/ground.json", ground())
        .with_sprite_sheet(
            "player",
            sheet(
                r#"{ "image": "sprites/player.png", "frame_width": 32, "frame_height": 32,
                     "animations": {
                         "idle":   { "row": 0, "frames": 4, "fps": 8 },
                         "walk":   { "row": 1, "frames": 6, "fps": 12 },
                         "attack": { "row": 2, "frames": 3, "fps": 10, "looped": false } } }"#,
            ),
        )
        .with_sprite_sheet(
            "bomb",
            sheet(
                r#"{ "image": "sprites/bomb.png", "frame_width": 32, "frame_height": 32,
                     "animations": { "fuse": { "row": 0, "frames": 4, "fps": 8 } } }"#,
            ),
        )
}

fn config() -> GameConfig {
    GameConfig {
        level: PathBuf::from("levels/test.json"),
        scripts_dir: PathBuf::from("scripts"),
        ..GameConfig::new()
    }
}

struct Harness {
    game: GameLoop,
    input: ScriptedInput,
    draws: Rc<RefCell<Vec<DrawCall>>>,
    assets: MemoryAssets,
}

fn harness_with(config: GameConfig, scripts: impl ScriptHost + 'static) -> Harness {
    let renderer = HeadlessRenderer::new(640, 480);
    let draws = renderer.log();
    let input = ScriptedInput::new();
    let assets = assets();
    let mut game = GameLoop::new(config, renderer, input.clone(), assets.clone(), scripts);
    game.setup().unwrap();
    Harness {
        game,
        input,
        draws,
        assets,
    }
}

fn harness(config: GameConfig) -> Harness {
    harness_with(config, NoScripts)
}

impl Harness {
    fn step(&mut self, dt: f32) {
        self.game.step(dt).unwrap();
    }

    /// Press then release the secondary button over two zero-length frames.
    fn tap_secondary(&mut self) {
        self.input.press(InputAction::Secondary);
        self.step(0.0);
        self.input.release(InputAction::Secondary);
        self.step(0.0);
    }

    fn player(&mut self) -> (Player, Vec2) {
        let world = self.game.world_mut();
        let mut query = world.query::<(&Player, &MapPosition)>();
        let (player, position) = query.single(world).unwrap();
        (player.clone(), position.pos)
    }

    fn player_animation(&mut self) -> String {
        let world = self.game.world_mut();
        let mut query = world.query_filtered::<&Animation, With<Player>>();
        query.single(world).unwrap().animation_key.clone()
    }

    fn bombs(&mut self) -> Vec<Vec2> {
        let world = self.game.world_mut();
        let mut query = world.query_filtered::<&MapPosition, With<Fuse>>();
        query.iter(world).map(|p| p.pos).collect()
    }

    fn session(&self) -> &SessionState {
        self.game.world().resource::<SessionState>()
    }

    fn registry_len(&self) -> usize {
        self.game.world().resource::<EntityRegistry>().len()
    }

    fn take_draws(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.draws.borrow_mut())
    }
}

#[test]
fn setup_spawns_only_the_player() {
    let mut h = harness(config());
    assert_eq!(h.registry_len(), 1);
    let (player, pos) = h.player();
    assert_eq!(player.hp, 100);
    assert_eq!(pos, Vec2::new(100.0, 100.0));
    assert_eq!(h.player_animation(), "idle");
    assert!(approx_eq(player.attack_duration, 0.3));
    assert_eq!(h.assets.level_loads(), 1);
}

#[test]
fn first_frame_draws_tiles_then_objects_then_hud() {
    let mut h = harness(config());
    h.step(0.0);
    let draws = h.take_draws();

    assert!(matches!(draws.first(), Some(DrawCall::Clear(_))));
    assert_eq!(draws[1], DrawCall::CameraLookAt(Vec2::new(116.0, 116.0)));
    assert_eq!(draws.last(), Some(&DrawCall::Present));

    let textures: Vec<Rect> = draws
        .iter()
        .filter_map(|call| match call {
            DrawCall::Texture { dst, .. } => Some(*dst),
            _ => None,
        })
        .collect();
    let cells = (MAP_W * MAP_H) as usize;
    assert_eq!(textures.len(), cells + 1);
    // Column-major: the second tile drawn is the one below the first.
    assert_eq!(textures[0], Rect::new(0.0, 0.0, 32.0, 32.0));
    assert_eq!(textures[1], Rect::new(0.0, 32.0, 32.0, 32.0));
    assert_eq!(textures[cells], Rect::new(100.0, 100.0, 32.0, 32.0));

    let texts: Vec<&str> = draws
        .iter()
        .filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["HP: 100", "Score: 0", "Bombs: 5"]);
}

#[test]
fn secondary_held_two_frames_spawns_one_bomb() {
    let mut h = harness(config());
    h.input.press(InputAction::Secondary);
    h.step(0.016);
    h.step(0.016);

    assert_eq!(h.bombs(), vec![Vec2::new(100.0, 100.0)]);
    assert_eq!(h.session().charges.current(), MAX_CHARGES - 1);

    h.input.release(InputAction::Secondary);
    h.step(0.016);
    h.input.press(InputAction::Secondary);
    h.step(0.016);
    assert_eq!(h.bombs().len(), 2);
    assert_eq!(h.registry_len(), 3);
}

#[test]
fn empty_charges_ignore_the_request() {
    let mut h = harness(config());
    for _ in 0..MAX_CHARGES {
        h.tap_secondary();
    }
    assert_eq!(h.session().charges.current(), 0);
    h.tap_secondary();
    assert_eq!(h.bombs().len(), MAX_CHARGES as usize);
}

#[test]
fn bomb_is_reaped_after_its_lifetime_and_hurts_once() {
    let mut h = harness(config());
    h.tap_secondary();
    assert_eq!(h.bombs().len(), 1);

    h.step(1.1);
    assert_eq!(h.bombs().len(), 1);
    assert_eq!(h.player().0.hp, 100);

    h.step(1.1);
    assert!(h.bombs().is_empty());
    assert_eq!(h.registry_len(), 1);
    assert_eq!(h.player().0.hp, 90);

    h.step(0.5);
    assert_eq!(h.player().0.hp, 90);
}

#[test]
fn three_overlapping_blasts_stack() {
    let mut h = harness(GameConfig {
        bomb_damage: 15,
        ..config()
    });
    for _ in 0..3 {
        h.tap_secondary();
    }
    h.step(2.2);
    assert_eq!(h.player().0.hp, 55);
}

#[test]
fn three_overlapping_blasts_with_default_damage() {
    let mut h = harness(config());
    for _ in 0..3 {
        h.tap_secondary();
    }
    h.step(2.2);
    assert_eq!(h.player().0.hp, 70);
}

#[test]
fn clicked_bomb_is_free_and_far_blasts_do_not_hurt() {
    let mut h = harness(config());
    // Render once so the camera centers on the player.
    h.step(0.0);

    // Window center maps to the camera target (116, 116).
    h.input.click(320.0 + 200.0, 240.0);
    h.step(0.0);

    assert_eq!(h.bombs(), vec![Vec2::new(316.0, 116.0)]);
    assert_eq!(h.session().charges.current(), MAX_CHARGES);

    h.step(2.2);
    assert!(h.bombs().is_empty());
    assert_eq!(h.player().0.hp, 100);
}

#[test]
fn movement_is_clamped_to_the_world() {
    let mut h = harness(config());
    h.input.press(InputAction::Left);
    h.input.press(InputAction::Up);
    h.step(10.0);
    assert_eq!(h.player().1, Vec2::new(0.0, 0.0));

    h.input.release_all();
    h.input.press(InputAction::Right);
    h.input.press(InputAction::Down);
    h.step(100.0);
    let max = Vec2::new((MAP_W * TILE - 32) as f32, (MAP_H * TILE - 32) as f32);
    assert_eq!(h.player().1, max);
}

#[test]
fn movement_integrates_speed_times_delta() {
    let mut h = harness(config());
    h.input.press(InputAction::Right);
    h.step(0.5);
    let (_, pos) = h.player();
    assert!(approx_eq(pos.x, 100.0 + 160.0 * 0.5));
    assert!(approx_eq(pos.y, 100.0));
    assert_eq!(h.player_animation(), "walk");
}

#[test]
fn attack_needs_at_most_one_direction() {
    let mut h = harness(config());
    h.input.press(InputAction::Attack);
    h.input.press(InputAction::Up);
    h.input.press(InputAction::Left);
    h.step(0.016);
    assert!(!h.player().0.is_attacking());

    h.input.release(InputAction::Left);
    h.step(0.016);
    assert!(h.player().0.is_attacking());
    assert_eq!(h.player_animation(), "attack");

    h.input.release_all();
    h.step(0.31);
    assert!(!h.player().0.is_attacking());
    assert_eq!(h.player_animation(), "idle");
}

#[test]
fn charges_regenerate_through_the_loop() {
    let mut h = harness(config());
    h.tap_secondary();
    assert_eq!(h.session().charges.current(), 4);
    h.step(9.5);
    assert_eq!(h.session().charges.current(), 4);
    h.step(0.5);
    assert_eq!(h.session().charges.current(), 5);
}

fn kill_player(h: &mut Harness) {
    for _ in 0..2 {
        h.tap_secondary();
    }
    h.step(2.2);
    assert_eq!(h.player().0.hp, 0);
}

#[test]
fn depleted_hp_enters_game_over_once_and_freezes_play() {
    let mut h = harness(GameConfig {
        bomb_damage: 50,
        ..config()
    });
    kill_player(&mut h);
    // Damage lands in the render pass; the check runs on the next update.
    assert_eq!(h.session().state.get(), GameStates::Running);

    h.take_draws();
    h.step(0.0);
    assert_eq!(h.session().state.get(), GameStates::GameOver);
    let draws = h.take_draws();
    assert!(draws.iter().any(|call| matches!(
        call,
        DrawCall::Text { text, .. } if text == "GAME OVER"
    )));

    let before = h.player().1;
    let charges = h.session().charges.current();
    h.input.press(InputAction::Right);
    h.input.press(InputAction::Secondary);
    h.input.click(100.0, 100.0);
    h.step(1.0);
    assert_eq!(h.player().1, before);
    assert!(h.bombs().is_empty());
    assert_eq!(h.session().charges.current(), charges);
    assert_eq!(h.session().state.get(), GameStates::GameOver);
}

#[test]
fn retry_rebuilds_the_world() {
    let mut h = harness(GameConfig {
        bomb_damage: 50,
        ..config()
    });
    h.tap_secondary();
    kill_player(&mut h);
    h.step(0.0);
    h.game.world_mut().resource_mut::<SessionState>().score = 42;
    assert!(h.session().state.is_game_over());

    h.input.press(InputAction::Retry);
    h.step(0.016);

    assert_eq!(h.registry_len(), 1);
    assert!(h.bombs().is_empty());
    let (player, pos) = h.player();
    assert_eq!(player.hp, 100);
    assert_eq!(pos, Vec2::new(100.0, 100.0));
    let session = h.session();
    assert_eq!(session.score, 0);
    assert_eq!(session.charges.current(), MAX_CHARGES);
    assert_eq!(session.charges.accumulator(), 0.0);
    assert_eq!(session.state.get(), GameStates::Running);
    assert!(!session.secondary_was_down);
    assert_eq!(h.assets.level_loads(), 2);

    // Holding retry does nothing more once running again.
    h.step(0.016);
    assert_eq!(h.assets.level_loads(), 2);
}

#[test]
fn retry_is_ignored_while_running() {
    let mut h = harness(config());
    h.input.press(InputAction::Retry);
    h.step(0.016);
    assert_eq!(h.assets.level_loads(), 1);
}

#[derive(Clone, Default)]
struct RecordingScripts {
    calls: Rc<RefCell<Vec<ScriptContext>>>,
    bomb_at: Option<Vec2>,
    fail: bool,
}

impl ScriptHost for RecordingScripts {
    fn load_all(&mut self, _dir: &Path) -> Result<usize, ScriptError> {
        Ok(1)
    }

    fn execute_all(&mut self, ctx: &mut ScriptContext) -> Result<(), ScriptError> {
        self.calls.borrow_mut().push(ctx.clone());
        ctx.score += 1;
        if let Some(at) = self.bomb_at.take() {
            ctx.bomb_requests.push(at);
        }
        if self.fail {
            return Err(ScriptError::Runtime {
                script: "broken.lua".into(),
                message: "boom".into(),
            });
        }
        Ok(())
    }
}

#[test]
fn script_hook_sees_the_frame_and_writes_back() {
    let scripts = RecordingScripts {
        bomb_at: Some(Vec2::new(400.0, 300.0)),
        ..Default::default()
    };
    let calls = scripts.calls.clone();
    let mut h = harness_with(config(), scripts);

    h.step(0.25);
    h.step(0.25);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert!(approx_eq(calls[0].delta, 0.25));
    assert_eq!(calls[0].hp, 100);
    assert_eq!(calls[0].bombs, MAX_CHARGES);
    assert_eq!(calls[1].score, 1);
    assert_eq!(h.session().score, 2);
    assert_eq!(h.bombs(), vec![Vec2::new(400.0, 300.0)]);
    assert_eq!(h.session().charges.current(), MAX_CHARGES);
}

#[test]
fn failing_script_does_not_stop_the_frame() {
    let scripts = RecordingScripts {
        fail: true,
        ..Default::default()
    };
    let mut h = harness_with(config(), scripts);
    h.input.press(InputAction::Secondary);
    h.step(0.016);
    assert_eq!(h.session().score, 1);
    assert_eq!(h.bombs().len(), 1);
}

#[test]
fn script_hook_is_skipped_during_game_over() {
    let scripts = RecordingScripts::default();
    let calls = scripts.calls.clone();
    let mut h = harness_with(
        GameConfig {
            bomb_damage: 50,
            ..config()
        },
        scripts,
    );
    kill_player(&mut h);
    let before = calls.borrow().len();
    // The transition frame skips the hook, and so do the frames after it.
    h.step(0.0);
    h.step(0.0);
    assert_eq!(calls.borrow().len(), before);
}

#[test]
fn unresolved_tile_aborts_setup() {
    let mut broken = level();
    broken.layers[0].data[5] = 9;
    let assets = assets().with_level("levels/test.json", broken);
    let mut game = GameLoop::new(
        config(),
        HeadlessRenderer::new(640, 480),
        ScriptedInput::new(),
        assets,
        NoScripts,
    );
    let err = game.setup().unwrap_err();
    assert!(matches!(
        err,
        SetupError::UnresolvedTile {
            layer: 0,
            col: 5,
            row: 0,
            stored: 9
        }
    ));
}

#[test]
fn missing_player_sheet_aborts_setup() {
    let mut game = GameLoop::new(
        GameConfig {
            player_sheet: "hero".into(),
            ..config()
        },
        HeadlessRenderer::new(640, 480),
        ScriptedInput::new(),
        assets(),
        NoScripts,
    );
    assert!(matches!(
        game.setup(),
        Err(SetupError::MissingSpriteSheet { .. })
    ));
}

#[test]
fn nothing_runs_before_setup() {
    let renderer = HeadlessRenderer::new(640, 480);
    let draws = renderer.log();
    let mut game = GameLoop::new(
        config(),
        renderer,
        ScriptedInput::new(),
        assets(),
        NoScripts,
    );
    game.step(1.0).unwrap();
    assert!(draws.borrow().is_empty());
    assert_eq!(game.world().resource::<EntityRegistry>().len(), 0);
}
