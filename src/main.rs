//! bombtiles main entry point.
//!
//! A tile-based 2D action game written in Rust using:
//! - **raylib** for windowing, graphics, and input
//! - **bevy_ecs** for entity-component-system architecture
//! - **mlua** for per-frame Lua hooks
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and apply CLI overrides
//! 2. Open the window and build the [`GameLoop`] around the raylib backend
//! 3. Load scripts, the level and the player
//! 4. Run one frame per iteration until the window is closed

#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use bombtiles::game::GameLoop;
use bombtiles::raylib_backend::{RaylibInput, RaylibRenderer, open_window};
use bombtiles::resources::assets::JsonAssetLoader;
use bombtiles::resources::gameconfig::GameConfig;
use bombtiles::resources::lua_runtime::LuaScriptHost;
use clap::Parser;
use log::{error, info, warn};

#[derive(Parser)]
#[command(version, about = "Tile-based 2D action game with bombs and Lua hooks")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level file, relative to the asset root.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Directory with the Lua hooks.
    #[arg(long, value_name = "DIR")]
    scripts: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}, using defaults");
    }
    if let Some(level) = cli.level {
        config.level = level;
    }
    if let Some(scripts) = cli.scripts {
        config.scripts_dir = scripts;
    }

    let scripts = match LuaScriptHost::new() {
        Ok(host) => host,
        Err(e) => {
            error!("Failed to create Lua runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (rl, thread) = open_window(
        config.window_width as i32,
        config.window_height as i32,
        "bombtiles",
        config.target_fps,
    );
    let assets = JsonAssetLoader::new(&config.asset_root);
    let renderer = RaylibRenderer::new(rl.clone(), thread);
    let input = RaylibInput::new(rl.clone());

    let mut game = GameLoop::new(config, renderer, input, assets, scripts);
    if let Err(e) = game.setup() {
        error!("Setup failed: {e}");
        return ExitCode::FAILURE;
    }

    // --------------- Main loop ---------------
    while !rl.borrow().window_should_close() {
        if let Err(e) = game.frame() {
            error!("Reset failed: {e}");
            return ExitCode::FAILURE;
        }
    }

    info!("Window closed, bye");
    ExitCode::SUCCESS
}
