//! Lua scripting host.
//!
//! Every `*.lua` file of the scripts directory is compiled once into a chunk
//! and called every frame, in file name order. Scripts see the frame through
//! a `ctx` table (also passed as the chunk's first argument) and talk to the
//! game through the global `engine` table.
//!
//! # Example
//!
//! ```lua
//! -- regen.lua
//! local ctx = ...
//! if ctx.hp < 100 and ctx.score > 0 then
//!     ctx.hp = ctx.hp + 1
//!     ctx.score = ctx.score - 1
//! end
//! if ctx.bombs == 0 then
//!     engine.log_warn("out of bombs")
//! end
//! engine.spawn_bomb(ctx.player_x + 64, ctx.player_y)
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use mlua::prelude::*;

use crate::error::ScriptError;
use crate::geometry::Vec2;
use crate::resources::scripthost::{ScriptContext, ScriptHost};

/// Shared state reachable from `engine` functions through Lua's app data.
struct LuaAppData {
    bomb_requests: RefCell<Vec<Vec2>>,
}

/// A compiled script file.
struct Chunk {
    name: String,
    function: LuaFunction,
}

/// Script host backed by an embedded Lua interpreter.
///
/// Not `Send`; it lives in the world as a `NonSend` resource.
pub struct LuaScriptHost {
    lua: Lua,
    chunks: Vec<Chunk>,
}

fn runtime_error(script: &str, err: LuaError) -> ScriptError {
    ScriptError::Runtime {
        script: script.to_string(),
        message: err.to_string(),
    }
}

impl LuaScriptHost {
    /// Create an interpreter with the `engine` table registered.
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();
        lua.set_app_data(LuaAppData {
            bomb_requests: RefCell::new(Vec::new()),
        });

        let host = Self {
            lua,
            chunks: Vec::new(),
        };
        host.register_engine_api()?;
        Ok(host)
    }

    fn register_engine_api(&self) -> LuaResult<()> {
        let lua = &self.lua;
        let engine = lua.create_table()?;

        engine.set(
            "log",
            lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;
        engine.set(
            "log_info",
            lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;
        engine.set(
            "log_warn",
            lua.create_function(|_, msg: String| {
                warn!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;
        engine.set(
            "log_error",
            lua.create_function(|_, msg: String| {
                error!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        // engine.spawn_bomb(x, y) - queue a bomb at a world position
        engine.set(
            "spawn_bomb",
            lua.create_function(|lua, (x, y): (f32, f32)| {
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .bomb_requests
                    .borrow_mut()
                    .push(Vec2::new(x, y));
                Ok(())
            })?,
        )?;

        lua.globals().set("engine", engine)?;
        Ok(())
    }

    /// Compile `source` and append it to the per-frame chunks.
    pub fn load_source(&mut self, name: &str, source: &str) -> Result<(), ScriptError> {
        let function = self
            .lua
            .load(source)
            .set_name(name)
            .into_function()
            .map_err(|e| runtime_error(name, e))?;
        self.chunks.push(Chunk {
            name: name.to_string(),
            function,
        });
        Ok(())
    }

    /// Names of the loaded scripts, in call order.
    pub fn script_names(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|chunk| chunk.name.as_str())
    }

    fn write_context(&self, ctx: &ScriptContext) -> LuaResult<LuaTable> {
        let table = self.lua.create_table()?;
        table.set("delta", ctx.delta)?;
        table.set("player_x", ctx.player_x)?;
        table.set("player_y", ctx.player_y)?;
        table.set("hp", ctx.hp)?;
        table.set("score", ctx.score)?;
        table.set("bombs", ctx.bombs)?;
        self.lua.globals().set("ctx", table.clone())?;
        Ok(table)
    }

    fn read_context(table: &LuaTable, ctx: &mut ScriptContext) -> LuaResult<()> {
        ctx.hp = table.get("hp")?;
        ctx.score = table.get("score")?;
        ctx.player_x = table.get("player_x")?;
        ctx.player_y = table.get("player_y")?;
        Ok(())
    }

    fn take_bomb_requests(&self) -> Vec<Vec2> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| std::mem::take(&mut *data.bomb_requests.borrow_mut()))
            .unwrap_or_default()
    }
}

impl ScriptHost for LuaScriptHost {
    fn load_all(&mut self, dir: &Path) -> Result<usize, ScriptError> {
        self.chunks.clear();
        if !dir.is_dir() {
            info!("No script directory at {:?}, running without scripts", dir);
            return Ok(0);
        }

        let entries = fs::read_dir(dir).map_err(|source| ScriptError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "lua"))
            .collect();
        paths.sort();

        for path in paths {
            let source = fs::read_to_string(&path).map_err(|source| ScriptError::Io {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.load_source(&name, &source)?;
            debug!("Loaded script {}", name);
        }

        info!("Loaded {} script(s) from {:?}", self.chunks.len(), dir);
        Ok(self.chunks.len())
    }

    fn execute_all(&mut self, ctx: &mut ScriptContext) -> Result<(), ScriptError> {
        if self.chunks.is_empty() {
            return Ok(());
        }
        let table = self
            .write_context(ctx)
            .map_err(|e| runtime_error("ctx", e))?;

        // A failing script does not stop the others; the first error is reported.
        let mut first_error = None;
        for chunk in &self.chunks {
            if let Err(e) = chunk.function.call::<()>(table.clone()) {
                if first_error.is_none() {
                    first_error = Some(runtime_error(&chunk.name, e));
                }
            }
        }

        Self::read_context(&table, ctx).map_err(|e| runtime_error("ctx", e))?;
        ctx.bomb_requests.extend(self.take_bomb_requests());

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ScriptContext {
        ScriptContext {
            delta: 0.016,
            player_x: 100.0,
            player_y: 50.0,
            hp: 80,
            score: 7,
            bombs: 3,
            bomb_requests: Vec::new(),
        }
    }

    #[test]
    fn writes_back_hp_score_and_position() {
        let mut host = LuaScriptHost::new().unwrap();
        host.load_source(
            "heal.lua",
            "local ctx = ...\nctx.hp = ctx.hp + 5\nctx.score = ctx.score * 2\nctx.player_x = 0",
        )
        .unwrap();

        let mut ctx = context();
        host.execute_all(&mut ctx).unwrap();

        assert_eq!(ctx.hp, 85);
        assert_eq!(ctx.score, 14);
        assert_eq!(ctx.player_x, 0.0);
        assert_eq!(ctx.player_y, 50.0);
    }

    #[test]
    fn spawn_bomb_is_queued_into_the_context() {
        let mut host = LuaScriptHost::new().unwrap();
        host.load_source("bomb.lua", "engine.spawn_bomb(ctx.player_x + 64, 10)")
            .unwrap();

        let mut ctx = context();
        host.execute_all(&mut ctx).unwrap();
        assert_eq!(ctx.bomb_requests, vec![Vec2::new(164.0, 10.0)]);

        let mut next = context();
        host.execute_all(&mut next).unwrap();
        assert_eq!(next.bomb_requests.len(), 1);
    }

    #[test]
    fn runtime_error_names_the_script_and_keeps_others_running() {
        let mut host = LuaScriptHost::new().unwrap();
        host.load_source("broken.lua", "error('boom')").unwrap();
        host.load_source("score.lua", "ctx.score = 99").unwrap();

        let mut ctx = context();
        let err = host.execute_all(&mut ctx).unwrap_err();

        assert!(matches!(err, ScriptError::Runtime { ref script, .. } if script == "broken.lua"));
        assert_eq!(ctx.score, 99);
    }

    #[test]
    fn syntax_error_fails_at_load() {
        let mut host = LuaScriptHost::new().unwrap();
        assert!(host.load_source("bad.lua", "if then").is_err());
        assert_eq!(host.script_names().count(), 0);
    }

    #[test]
    fn load_all_reads_lua_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_second.lua"), "ctx.score = ctx.score * 10").unwrap();
        fs::write(dir.path().join("a_first.lua"), "ctx.score = ctx.score + 1").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a script").unwrap();

        let mut host = LuaScriptHost::new().unwrap();
        assert_eq!(host.load_all(dir.path()).unwrap(), 2);
        assert_eq!(
            host.script_names().collect::<Vec<_>>(),
            vec!["a_first.lua", "b_second.lua"]
        );

        let mut ctx = context();
        host.execute_all(&mut ctx).unwrap();
        assert_eq!(ctx.score, 80);
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = LuaScriptHost::new().unwrap();
        assert_eq!(host.load_all(&dir.path().join("absent")).unwrap(), 0);
    }
}
