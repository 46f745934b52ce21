//! Sprite sheet and animation registry.
//!
//! Sprite sheets are described by small JSON files ([`SpriteSheetDef`]): one
//! image cut into equally sized frames, with named animations each taking a
//! run of frames from one row. Loading a definition resolves its image into a
//! texture and stores the result in the [`AnimationStore`] under the sheet's
//! name, where render and animation systems look it up by key.

use std::collections::BTreeMap;
use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::geometry::Rect;
use crate::resources::renderer::{Renderer, TextureHandle};

fn default_looped() -> bool {
    true
}

/// One animation inside a sheet, as written in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationDef {
    /// Row of the sheet holding the frames.
    pub row: u32,
    /// Column of the first frame.
    #[serde(default)]
    pub first_frame: u32,
    pub frames: usize,
    pub fps: f32,
    #[serde(default = "default_looped")]
    pub looped: bool,
}

/// Sprite sheet file contents.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpriteSheetDef {
    pub image: PathBuf,
    pub frame_width: u32,
    pub frame_height: u32,
    pub animations: BTreeMap<String, AnimationDef>,
}

/// Immutable playback data for one animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    pub row: u32,
    pub first_frame: u32,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

impl AnimationResource {
    /// Length of one full playback in seconds, if it advances at all.
    pub fn duration(&self) -> Option<f32> {
        (self.fps > 0.0).then(|| self.frame_count as f32 / self.fps)
    }
}

/// A loaded sheet: texture plus its animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    pub texture: TextureHandle,
    pub frame_width: f32,
    pub frame_height: f32,
    pub animations: FxHashMap<String, AnimationResource>,
}

impl SpriteSheet {
    pub fn animation(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }

    /// Source rectangle of a frame, or `None` for an unknown animation.
    pub fn frame_rect(&self, key: &str, frame_index: usize) -> Option<Rect> {
        let anim = self.animations.get(key)?;
        let column = anim.first_frame as usize + frame_index.min(anim.frame_count.saturating_sub(1));
        Some(Rect::new(
            column as f32 * self.frame_width,
            anim.row as f32 * self.frame_height,
            self.frame_width,
            self.frame_height,
        ))
    }

    /// The first of `preferred` the sheet defines, else its alphabetically
    /// first animation.
    pub fn pick_animation(&self, preferred: &[&str]) -> Option<String> {
        preferred
            .iter()
            .find(|key| self.animations.contains_key(**key))
            .map(|key| key.to_string())
            .or_else(|| self.animations.keys().min().cloned())
    }
}

/// Central registry of loaded sprite sheets keyed by name.
#[derive(Resource, Debug, Default)]
pub struct AnimationStore {
    pub sheets: FxHashMap<String, SpriteSheet>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `def`'s image into a texture and register the sheet as `name`.
    pub fn load(
        &mut self,
        name: impl Into<String>,
        def: SpriteSheetDef,
        renderer: &mut dyn Renderer,
    ) -> Result<&SpriteSheet, SetupError> {
        let name = name.into();
        if def.animations.is_empty() {
            return Err(SetupError::MissingSpriteSheet { sheet: name });
        }
        let texture = renderer
            .load_texture(&def.image)
            .map_err(|message| SetupError::Texture {
                path: def.image.clone(),
                message,
            })?;
        let animations = def
            .animations
            .into_iter()
            .map(|(key, anim)| {
                (
                    key,
                    AnimationResource {
                        row: anim.row,
                        first_frame: anim.first_frame,
                        frame_count: anim.frames.max(1),
                        fps: anim.fps,
                        looped: anim.looped,
                    },
                )
            })
            .collect();
        let sheet = SpriteSheet {
            texture,
            frame_width: def.frame_width as f32,
            frame_height: def.frame_height as f32,
            animations,
        };
        self.sheets.insert(name.clone(), sheet);
        Ok(&self.sheets[&name])
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSheet> {
        self.sheets.get(name)
    }
}
