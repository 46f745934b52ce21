//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 120
//!
//! [assets]
//! root = ./assets
//! level = levels/level1.json
//! scripts = ./assets/scripts
//!
//! [player]
//! spawn_x = 100
//! spawn_y = 100
//! speed = 160
//! sheet = player
//!
//! [bombs]
//! sheet = bomb
//! lifetime = 2.1
//! damage = 10
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_ASSET_ROOT: &str = "./assets";
const DEFAULT_LEVEL: &str = "levels/level1.json";
const DEFAULT_SCRIPTS_DIR: &str = "./assets/scripts";
const DEFAULT_SPAWN: (f32, f32) = (100.0, 100.0);
const DEFAULT_PLAYER_SPEED: f32 = 160.0;
const DEFAULT_PLAYER_SHEET: &str = "player";
const DEFAULT_BOMB_SHEET: &str = "bomb";
const DEFAULT_BOMB_LIFETIME: f32 = 2.1;
const DEFAULT_BOMB_DAMAGE: i32 = 10;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Window settings, where assets live, and the tunables of the player and
/// bombs. Inserted into the world once by the game loop and read by setup,
/// reset and the bomb systems.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Directory every asset path is relative to.
    pub asset_root: PathBuf,
    /// Level file, relative to `asset_root`.
    pub level: PathBuf,
    /// Directory scanned for `*.lua` hooks.
    pub scripts_dir: PathBuf,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Player speed in pixels per second.
    pub player_speed: f32,
    pub player_sheet: String,
    pub bomb_sheet: String,
    /// Bomb fuse length in seconds.
    pub bomb_lifetime: f32,
    /// HP taken from the player per explosion in range.
    pub bomb_damage: i32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            level: PathBuf::from(DEFAULT_LEVEL),
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            spawn_x: DEFAULT_SPAWN.0,
            spawn_y: DEFAULT_SPAWN.1,
            player_speed: DEFAULT_PLAYER_SPEED,
            player_sheet: DEFAULT_PLAYER_SHEET.to_string(),
            bomb_sheet: DEFAULT_BOMB_SHEET.to_string(),
            bomb_lifetime: DEFAULT_BOMB_LIFETIME,
            bomb_damage: DEFAULT_BOMB_DAMAGE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.asset_root = PathBuf::from(root);
        }
        if let Some(level) = config.get("assets", "level") {
            self.level = PathBuf::from(level);
        }
        if let Some(scripts) = config.get("assets", "scripts") {
            self.scripts_dir = PathBuf::from(scripts);
        }

        // [player] section
        if let Some(x) = config.getfloat("player", "spawn_x").ok().flatten() {
            self.spawn_x = x as f32;
        }
        if let Some(y) = config.getfloat("player", "spawn_y").ok().flatten() {
            self.spawn_y = y as f32;
        }
        if let Some(speed) = config.getfloat("player", "speed").ok().flatten() {
            self.player_speed = speed as f32;
        }
        if let Some(sheet) = config.get("player", "sheet") {
            self.player_sheet = sheet;
        }

        // [bombs] section
        if let Some(sheet) = config.get("bombs", "sheet") {
            self.bomb_sheet = sheet;
        }
        if let Some(lifetime) = config.getfloat("bombs", "lifetime").ok().flatten() {
            self.bomb_lifetime = lifetime as f32;
        }
        match config.getint("bombs", "damage").ok().flatten() {
            Some(damage) if (1..=i64::from(i32::MAX)).contains(&damage) => {
                self.bomb_damage = damage as i32;
            }
            Some(damage) => warn!(
                "Ignoring bomb damage {}, keeping {}",
                damage, self.bomb_damage
            ),
            None => {}
        }

        info!(
            "Loaded config: {}x{} window, fps={}, level={:?}, bombs {}s/{}hp",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.asset_root.join(&self.level),
            self.bomb_lifetime,
            self.bomb_damage
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("assets", "root", Some(self.asset_root.display().to_string()));
        config.set("assets", "level", Some(self.level.display().to_string()));
        config.set(
            "assets",
            "scripts",
            Some(self.scripts_dir.display().to_string()),
        );

        config.set("player", "spawn_x", Some(self.spawn_x.to_string()));
        config.set("player", "spawn_y", Some(self.spawn_y.to_string()));
        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set("player", "sheet", Some(self.player_sheet.clone()));

        config.set("bombs", "sheet", Some(self.bomb_sheet.clone()));
        config.set("bombs", "lifetime", Some(self.bomb_lifetime.to_string()));
        config.set("bombs", "damage", Some(self.bomb_damage.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
