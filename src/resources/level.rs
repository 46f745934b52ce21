//! Level and tile set data model.
//!
//! Mirrors the Tiled JSON layout closely enough that maps exported from
//! Tiled load without conversion. Raw files are deserialized into
//! [`LevelFile`] first; [`LevelFile::validate`] turns it into a [`Level`]
//! whose dimensions are known to be present and positive, with every cell
//! count and the map size in pixels fitting a `u32`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// One row-major grid of stored tile ids. `0` is an empty cell.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Layer {
    #[serde(default)]
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

impl Layer {
    /// Stored id at `(col, row)`, or `None` outside the layer.
    pub fn cell(&self, col: u32, row: u32) -> Option<u32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let index = row as usize * self.width as usize + col as usize;
        self.data.get(index).copied()
    }
}

/// Reference from a level to a tile set file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileSetReference {
    pub source: PathBuf,
    /// Stored id of the set's local tile 0. When absent the set is placed
    /// right after the highest id registered by earlier sets.
    #[serde(default)]
    pub firstgid: Option<u32>,
}

/// Level as read from disk, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tilewidth: Option<u32>,
    pub tileheight: Option<u32>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub tilesets: Vec<TileSetReference>,
}

/// A validated level: every dimension is present and positive and every
/// layer holds exactly `width * height` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    pub layers: Vec<Layer>,
    pub tilesets: Vec<TileSetReference>,
}

fn positive(value: Option<u32>, field: &'static str) -> Result<u32, SetupError> {
    match value {
        Some(v) if v > 0 => Ok(v),
        _ => Err(SetupError::MissingDimension { field }),
    }
}

impl LevelFile {
    pub fn validate(self) -> Result<Level, SetupError> {
        let width = positive(self.width, "width")?;
        let height = positive(self.height, "height")?;
        let tile_width = positive(self.tilewidth, "tilewidth")?;
        let tile_height = positive(self.tileheight, "tileheight")?;

        for (field, cells, size) in [
            ("map width", width, tile_width),
            ("map height", height, tile_height),
        ] {
            if cells.checked_mul(size).is_none() {
                return Err(SetupError::DimensionOverflow {
                    what: format!("{field} in pixels"),
                });
            }
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let expected = layer
                .width
                .checked_mul(layer.height)
                .ok_or_else(|| SetupError::DimensionOverflow {
                    what: format!("layer {index}"),
                })? as usize;
            if layer.data.len() != expected {
                return Err(SetupError::LayerSize {
                    layer: index,
                    expected,
                    actual: layer.data.len(),
                });
            }
        }

        Ok(Level {
            width,
            height,
            tile_width,
            tile_height,
            layers: self.layers,
            tilesets: self.tilesets,
        })
    }
}

/// Single tile image inside a tile set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileDef {
    /// Tile id local to its set.
    pub id: u32,
    pub image: PathBuf,
    #[serde(rename = "imagewidth")]
    pub width: u32,
    #[serde(rename = "imageheight")]
    pub height: u32,
}

/// Named collection of tile images.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileSet {
    pub name: String,
    #[serde(default)]
    pub tiles: Vec<TileDef>,
}
