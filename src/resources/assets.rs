//! Asset loading contract and the JSON file loader.
//!
//! [`JsonAssetLoader`] reads Tiled-style JSON below an asset root. Paths
//! inside a file are relative to that file; the loader rewrites them so
//! everything it returns is ready to hand to the renderer or to the next
//! `load_*` call:
//!
//! - tile set references in a level become root-relative,
//! - tile and sprite sheet images become full paths under the root.

use std::cell::Cell;
use std::fs;
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use crate::error::SetupError;
use crate::resources::animationstore::SpriteSheetDef;
use crate::resources::level::{Level, LevelFile, TileSet};

/// Directory below the asset root holding sprite sheet files.
pub const SPRITES_DIR: &str = "sprites";

pub trait AssetLoader {
    fn load_level(&self, path: &Path) -> Result<Level, SetupError>;
    fn load_tileset(&self, path: &Path) -> Result<TileSet, SetupError>;
    /// Load the sheet registered under `name`.
    fn load_sprite_sheet(&self, name: &str) -> Result<SpriteSheetDef, SetupError>;
}

/// `NonSend` resource wrapping the active asset loader.
pub struct AssetLoaderRes(pub Box<dyn AssetLoader>);

impl AssetLoaderRes {
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        AssetLoaderRes(Box::new(loader))
    }
}

impl Deref for AssetLoaderRes {
    type Target = dyn AssetLoader;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for AssetLoaderRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Loads assets from JSON files below `root`.
#[derive(Debug, Clone)]
pub struct JsonAssetLoader {
    root: PathBuf,
}

impl JsonAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, SetupError> {
        let full = self.root.join(path);
        debug!("Reading {:?}", full);
        let text = fs::read_to_string(&full).map_err(|source| SetupError::Io {
            path: full.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SetupError::Parse { path: full, source })
    }
}

impl AssetLoader for JsonAssetLoader {
    fn load_level(&self, path: &Path) -> Result<Level, SetupError> {
        let file: LevelFile = self.read_json(path)?;
        let mut level = file.validate()?;
        let dir = parent_dir(path);
        for reference in level.tilesets.iter_mut() {
            reference.source = dir.join(&reference.source);
        }
        Ok(level)
    }

    fn load_tileset(&self, path: &Path) -> Result<TileSet, SetupError> {
        let mut set: TileSet = self.read_json(path)?;
        let dir = self.root.join(parent_dir(path));
        for tile in set.tiles.iter_mut() {
            tile.image = dir.join(&tile.image);
        }
        Ok(set)
    }

    fn load_sprite_sheet(&self, name: &str) -> Result<SpriteSheetDef, SetupError> {
        let path = Path::new(SPRITES_DIR).join(format!("{name}.json"));
        let mut def: SpriteSheetDef = self.read_json(&path)?;
        def.image = self.root.join(SPRITES_DIR).join(&def.image);
        Ok(def)
    }
}

/// In-memory asset loader for headless runs and tests.
///
/// Counts level loads so callers can tell a reset reloaded the world.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    levels: FxHashMap<PathBuf, Level>,
    tilesets: FxHashMap<PathBuf, TileSet>,
    sheets: FxHashMap<String, SpriteSheetDef>,
    level_loads: Rc<Cell<usize>>,
}

fn not_found(path: PathBuf) -> SetupError {
    SetupError::Io {
        path,
        source: io::Error::from(io::ErrorKind::NotFound),
    }
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, path: impl Into<PathBuf>, level: Level) -> Self {
        self.levels.insert(path.into(), level);
        self
    }

    pub fn with_tileset(mut self, path: impl Into<PathBuf>, set: TileSet) -> Self {
        self.tilesets.insert(path.into(), set);
        self
    }

    pub fn with_sprite_sheet(mut self, name: impl Into<String>, def: SpriteSheetDef) -> Self {
        self.sheets.insert(name.into(), def);
        self
    }

    /// How many times any level was loaded, shared between clones.
    pub fn level_loads(&self) -> usize {
        self.level_loads.get()
    }
}

impl AssetLoader for MemoryAssets {
    fn load_level(&self, path: &Path) -> Result<Level, SetupError> {
        let level = self
            .levels
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path.to_path_buf()))?;
        self.level_loads.set(self.level_loads.get() + 1);
        Ok(level)
    }

    fn load_tileset(&self, path: &Path) -> Result<TileSet, SetupError> {
        self.tilesets
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path.to_path_buf()))
    }

    fn load_sprite_sheet(&self, name: &str) -> Result<SpriteSheetDef, SetupError> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| SetupError::MissingSpriteSheet {
                sheet: name.to_string(),
            })
    }
}
