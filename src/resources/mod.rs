//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: session state, timing, the tile
//! world, asset stores and the backend contracts (renderer, input, assets,
//! scripts). Each submodule documents the semantics and intended usage of
//! its resource(s).
//!
//! Overview
//! - `animationstore` – sprite sheets and their named animations
//! - `assets` – asset loader contract, JSON loader and in-memory loader
//! - `bombcharges` – capped, regenerating bomb charges
//! - `entityregistry` – object ids of every live game object
//! - `gameconfig` – INI-backed settings
//! - `gamestate` – Running / GameOver state machine
//! - `input` – per-frame state of the logical buttons
//! - `inputsource` – input backend contract
//! - `level` – level and tile set data model
//! - `lua_runtime` – Lua script host (feature `lua`)
//! - `renderer` – rendering backend contract
//! - `scripthost` – per-frame script hook contract
//! - `session` – score, charges and state carried between frames
//! - `tileworld` – resolved tiles of the loaded level
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod assets;
pub mod bombcharges;
pub mod entityregistry;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod inputsource;
pub mod level;
#[cfg(feature = "lua")]
pub mod lua_runtime;
pub mod renderer;
pub mod scripthost;
pub mod session;
pub mod tileworld;
pub mod worldtime;
