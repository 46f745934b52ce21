use bevy_ecs::prelude::Component;

/// Sprite is identified by a sprite-sheet key and the size of one frame in world units.
/// The frame inside the sheet is picked by the entity's [`Animation`](crate::components::animation::Animation).
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub sheet: String,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(sheet: impl Into<String>, width: f32, height: f32) -> Self {
        Sprite {
            sheet: sheet.into(),
            width,
            height,
        }
    }
}
