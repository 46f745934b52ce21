//! Per-frame script hook contract.
//!
//! Before each update the game fills a [`ScriptContext`] from the session and
//! the player, hands it to the active [`ScriptHost`], and copies the writable
//! fields back afterwards. Bomb requests collected in the context are spawned
//! by the script hook system.

use std::ops::{Deref, DerefMut};
use std::path::Path;

use crate::error::ScriptError;
use crate::geometry::Vec2;

/// Game state visible to scripts for one frame.
///
/// `hp`, `score` and the player position are read back after the hook runs.
/// The rest is informational.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScriptContext {
    /// Seconds covered by this frame.
    pub delta: f32,
    pub player_x: f32,
    pub player_y: f32,
    pub hp: i32,
    pub score: i64,
    /// Bomb charges left.
    pub bombs: u32,
    /// World positions where scripts asked for a bomb.
    pub bomb_requests: Vec<Vec2>,
}

pub trait ScriptHost {
    /// Load every script in `dir`. Returns how many were loaded.
    fn load_all(&mut self, dir: &Path) -> Result<usize, ScriptError>;
    /// Run every loaded script once against `ctx`.
    fn execute_all(&mut self, ctx: &mut ScriptContext) -> Result<(), ScriptError>;
}

/// Host with no scripts, for builds without a scripting backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScripts;

impl ScriptHost for NoScripts {
    fn load_all(&mut self, _dir: &Path) -> Result<usize, ScriptError> {
        Ok(0)
    }

    fn execute_all(&mut self, _ctx: &mut ScriptContext) -> Result<(), ScriptError> {
        Ok(())
    }
}

/// `NonSend` resource wrapping the active script host.
pub struct ScriptHostRes(pub Box<dyn ScriptHost>);

impl ScriptHostRes {
    pub fn new(host: impl ScriptHost + 'static) -> Self {
        ScriptHostRes(Box::new(host))
    }
}

impl Deref for ScriptHostRes {
    type Target = dyn ScriptHost;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for ScriptHostRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
