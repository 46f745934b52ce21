//! Stable game-object identity.
//!
//! Every entity spawned through the
//! [`EntityRegistry`](crate::resources::entityregistry::EntityRegistry)
//! carries an [`ObjectId`]. Ids are handed out in increasing order and are
//! never reused within a registry's lifetime, unlike bevy's recycled
//! [`Entity`](bevy_ecs::entity::Entity) indices.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
