//! Registry of live game objects.
//!
//! Bevy owns the component storage; the [`EntityRegistry`] owns identity. It
//! hands out monotonically increasing [`ObjectId`]s and maps each live id to
//! its bevy [`Entity`], so objects can be looked up and removed by a stable
//! id even though bevy recycles entity indices.
//!
//! All spawns and despawns of game objects go through the registry to keep
//! the map and the world in sync. Removal is deferred through [`Commands`]:
//! callers that iterate entities collect ids first and remove afterwards.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::components::fuse::Fuse;
use crate::components::mapposition::MapPosition;
use crate::components::objectid::ObjectId;
use crate::components::sprite::Sprite;

#[derive(Resource, Debug, Default)]
pub struct EntityRegistry {
    next_id: u64,
    live: FxHashMap<ObjectId, Entity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn `bundle` as a new game object and return its id.
    pub fn add(&mut self, commands: &mut Commands, bundle: impl Bundle) -> ObjectId {
        let id = self.allocate();
        let entity = commands.spawn((id, bundle)).id();
        self.live.insert(id, entity);
        debug!("Spawned object {id} as {entity:?}");
        id
    }

    /// Like [`EntityRegistry::add`], for code holding the whole world.
    pub fn add_to_world(world: &mut World, bundle: impl Bundle) -> ObjectId {
        let id = world.resource_mut::<EntityRegistry>().allocate();
        let entity = world.spawn((id, bundle)).id();
        world.resource_mut::<EntityRegistry>().live.insert(id, entity);
        debug!("Spawned object {id} as {entity:?}");
        id
    }

    /// Despawn the object with this id. Returns false if it is not live.
    pub fn remove(&mut self, commands: &mut Commands, id: ObjectId) -> bool {
        match self.live.remove(&id) {
            Some(entity) => {
                commands.entity(entity).try_despawn();
                debug!("Removed object {id}");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<Entity> {
        self.live.get(&id).copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Forget every object. The caller is responsible for despawning them.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}

/// Read-only view of one renderable object.
#[derive(Debug, Clone, Copy)]
pub struct RenderableRef<'a> {
    pub id: ObjectId,
    pub position: &'a MapPosition,
    pub sprite: &'a Sprite,
    pub animation: &'a Animation,
    /// Present on temporary objects only.
    pub fuse: Option<&'a Fuse>,
}

/// Every object that can be drawn.
///
/// [`Renderables::iter`] is lazy and can be called again for a fresh pass.
/// Order follows bevy's archetype storage: stable within a pass, not across
/// runs.
#[derive(SystemParam)]
pub struct Renderables<'w, 's> {
    query: Query<
        'w,
        's,
        (
            &'static ObjectId,
            &'static MapPosition,
            &'static Sprite,
            &'static Animation,
            Option<&'static Fuse>,
        ),
    >,
}

impl<'w, 's> Renderables<'w, 's> {
    pub fn iter(&self) -> impl Iterator<Item = RenderableRef<'_>> + '_ {
        self.query
            .iter()
            .map(|(id, position, sprite, animation, fuse)| RenderableRef {
                id: *id,
                position,
                sprite,
                animation,
                fuse,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Component)]
    struct Marker;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut world = World::new();
        world.insert_resource(EntityRegistry::new());
        let a = EntityRegistry::add_to_world(&mut world, Marker);
        let b = EntityRegistry::add_to_world(&mut world, Marker);
        assert!(b > a);
        let registry = world.resource::<EntityRegistry>();
        assert_eq!(registry.len(), 2);
        assert_ne!(registry.get(a), registry.get(b));
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut world = World::new();
        world.insert_resource(EntityRegistry::new());
        let a = EntityRegistry::add_to_world(&mut world, Marker);

        world.resource_scope(|world, mut registry: Mut<EntityRegistry>| {
            let mut commands = world.commands();
            assert!(registry.remove(&mut commands, a));
            assert!(!registry.remove(&mut commands, a));
        });
        world.flush();

        let b = EntityRegistry::add_to_world(&mut world, Marker);
        assert_ne!(a, b);
        let registry = world.resource::<EntityRegistry>();
        assert!(!registry.contains(a));
        assert!(registry.contains(b));
        assert_eq!(world.query::<&Marker>().iter(&world).count(), 1);
    }
}
