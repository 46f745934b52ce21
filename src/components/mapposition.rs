//! World-space position component.
//!
//! [`MapPosition`] is the top-left corner of an entity in world pixels. Tiles,
//! sprites and the bomb proximity rule all use this anchor.

use bevy_ecs::prelude::Component;

use crate::geometry::Vec2;

/// Top-left world position of an entity, in pixels.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        MapPosition {
            pos: Vec2 { x, y },
        }
    }
}
