//! Tile world resource.
//!
//! Built once per level from a validated [`Level`] and the [`TileSet`]s it
//! references. Every tile image is turned into a texture up front and
//! indexed by global id, so drawing a cell is a single map lookup.
//!
//! Id scheme: a tile's global id is its set's base offset plus its local
//! id. Layers store `global_id + 1`, leaving `0` for empty cells, so a global
//! id must stay below `u32::MAX`.

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::error::SetupError;
use crate::geometry::{Rect, Vec2};
use crate::resources::level::{Level, TileSet};
use crate::resources::renderer::{Renderer, TextureHandle};

/// A drawable tile resolved from a global id.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub global_id: u32,
    pub image: PathBuf,
    pub texture: TextureHandle,
    pub width: u32,
    pub height: u32,
}

/// Level geometry plus every tile it can reference.
#[derive(Resource, Debug)]
pub struct TileWorld {
    level: Level,
    tilesets: FxHashMap<String, TileSet>,
    tiles: FxHashMap<u32, Tile>,
}

impl TileWorld {
    /// Resolve every tile of `tilesets` (given in the level's reference
    /// order) and check that all non-empty cells point at a known tile.
    pub fn build(
        level: Level,
        tilesets: Vec<TileSet>,
        renderer: &mut dyn Renderer,
    ) -> Result<Self, SetupError> {
        let mut tiles = FxHashMap::default();
        let mut textures: FxHashMap<PathBuf, TextureHandle> = FxHashMap::default();
        let mut next_free = 0u32;

        for (reference, set) in level.tilesets.iter().zip(tilesets.iter()) {
            let base = match reference.firstgid {
                Some(first) => first.saturating_sub(1),
                None => next_free,
            };
            debug!("Tile set '{}' gets base id {}", set.name, base);

            for def in set.tiles.iter() {
                let texture = match textures.get(&def.image) {
                    Some(handle) => *handle,
                    None => {
                        let handle = renderer.load_texture(&def.image).map_err(|message| {
                            SetupError::Texture {
                                path: def.image.clone(),
                                message,
                            }
                        })?;
                        textures.insert(def.image.clone(), handle);
                        handle
                    }
                };
                let global_id = base
                    .checked_add(def.id)
                    .filter(|id| *id < u32::MAX)
                    .ok_or_else(|| SetupError::DimensionOverflow {
                        what: format!("tile {} of set '{}'", def.id, set.name),
                    })?;
                tiles.insert(
                    global_id,
                    Tile {
                        global_id,
                        image: def.image.clone(),
                        texture,
                        width: def.width,
                        height: def.height,
                    },
                );
                next_free = next_free.max(global_id + 1);
            }
        }

        for (index, layer) in level.layers.iter().enumerate() {
            for row in 0..layer.height {
                for col in 0..layer.width {
                    let stored = layer.cell(col, row).unwrap_or(0);
                    if stored != 0 && !tiles.contains_key(&(stored - 1)) {
                        return Err(SetupError::UnresolvedTile {
                            layer: index,
                            col,
                            row,
                            stored,
                        });
                    }
                }
            }
        }

        info!(
            "Tile world ready: {}x{} tiles, {} layers, {} tiles from {} sets",
            level.width,
            level.height,
            level.layers.len(),
            tiles.len(),
            tilesets.len()
        );

        Ok(TileWorld {
            tilesets: tilesets
                .into_iter()
                .map(|set| (set.name.clone(), set))
                .collect(),
            level,
            tiles,
        })
    }

    /// The tile drawn at a cell, or `None` for empty cells and coordinates
    /// outside the layer.
    pub fn tile_at(&self, layer: usize, col: u32, row: u32) -> Option<&Tile> {
        let stored = self.level.layers.get(layer)?.cell(col, row)?;
        if stored == 0 {
            return None;
        }
        self.tiles.get(&(stored - 1))
    }

    pub fn tile(&self, global_id: u32) -> Option<&Tile> {
        self.tiles.get(&global_id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tileset(&self, name: &str) -> Option<&TileSet> {
        self.tilesets.get(name)
    }

    /// World size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.level.width as f32 * self.level.tile_width as f32,
            self.level.height as f32 * self.level.tile_height as f32,
        )
    }

    pub fn bounds(&self) -> Rect {
        let size = self.pixel_size();
        Rect::new(0.0, 0.0, size.x, size.y)
    }

    /// Draw every layer in order. Each tile's whole image is stretched into
    /// its grid cell.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let tile_w = self.level.tile_width as f32;
        let tile_h = self.level.tile_height as f32;
        for (index, layer) in self.level.layers.iter().enumerate() {
            for col in 0..layer.width {
                for row in 0..layer.height {
                    if let Some(tile) = self.tile_at(index, col, row) {
                        let src = Rect::new(0.0, 0.0, tile.width as f32, tile.height as f32);
                        let dst = Rect::new(col as f32 * tile_w, row as f32 * tile_h, tile_w, tile_h);
                        renderer.render_texture(tile.texture, src, dst);
                    }
                }
            }
        }
    }
}
