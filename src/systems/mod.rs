//! Game systems.
//!
//! This module groups all ECS systems that advance the simulation, read
//! input and render a frame. [`crate::game::update_schedule`] and
//! [`crate::game::render_schedule`] put them in frame order.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations
//! - [`bombcharges`] – regenerate bomb charges
//! - [`bombs`] – spawn bombs from the secondary button, clicks and scripts
//! - [`fuse`] – count down temporary objects
//! - [`gamestate`] – game over / retry transitions and run conditions
//! - [`input`] – poll the input source into [`crate::resources::input::InputState`]
//! - [`playercontrol`] – player movement, attack and animation choice
//! - [`render`] – draw the frame and reap expired objects
//! - [`scripting`] – per-frame script hook
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod bombcharges;
pub mod bombs;
pub mod fuse;
pub mod gamestate;
pub mod input;
pub mod playercontrol;
pub mod render;
pub mod scripting;
pub mod time;
