//! bombtiles library.
//!
//! This module exposes the game's ECS components, resources, systems, and
//! messages, plus the [`game::GameLoop`] driver, for use by the binary and
//! by integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
#[cfg(feature = "raylib")]
pub mod raylib_backend;
pub mod resources;
pub mod systems;
