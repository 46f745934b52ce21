//! ECS components for entities.
//!
//! Game objects are plain bevy entities; what an object can do is decided by
//! the components attached to it rather than by a type hierarchy.
//!
//! Submodules overview:
//! - [`animation`] – playback state for sprite-sheet animations
//! - [`fuse`] – countdown lifetime for temporary entities (bombs)
//! - [`mapposition`] – world-space top-left position for an entity
//! - [`objectid`] – stable registry id for every game object
//! - [`player`] – health, speed and attack state of the controlled character
//! - [`sprite`] – 2D sprite rendering component

pub mod animation;
pub mod fuse;
pub mod mapposition;
pub mod objectid;
pub mod player;
pub mod sprite;
