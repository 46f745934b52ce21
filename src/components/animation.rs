use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state of a sprite-sheet animation.
///
/// `animation_key` names an animation inside the sheet referenced by the
/// entity's [`Sprite`](crate::components::sprite::Sprite).
#[derive(Debug, Clone, Component, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}

impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }

    /// Switch to another animation, restarting playback only when the key changes.
    pub fn play(&mut self, animation_key: &str) {
        if self.animation_key != animation_key {
            self.animation_key = animation_key.to_owned();
            self.frame_index = 0;
            self.elapsed_time = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_same_key_keeps_progress() {
        let mut anim = Animation::new("walk");
        anim.frame_index = 3;
        anim.elapsed_time = 0.05;
        anim.play("walk");
        assert_eq!(anim.frame_index, 3);
        assert!((anim.elapsed_time - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn play_new_key_restarts() {
        let mut anim = Animation::new("walk");
        anim.frame_index = 3;
        anim.play("attack");
        assert_eq!(anim.animation_key, "attack");
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed_time, 0.0);
    }
}
