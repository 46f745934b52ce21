//! Error types.
//!
//! [`SetupError`] covers everything that can go wrong while building a world
//! from level data: it aborts setup or reset and is never retried.
//! [`ScriptError`] is raised by script hosts; at runtime it is only logged.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error while loading or validating the data a world is built from.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("level is missing a positive `{field}`")]
    MissingDimension { field: &'static str },

    #[error("{what} is too large")]
    DimensionOverflow { what: String },

    #[error("layer {layer} holds {actual} cells, expected {expected}")]
    LayerSize {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("layer {layer} cell ({col}, {row}) references unknown tile id {stored}")]
    UnresolvedTile {
        layer: usize,
        col: u32,
        row: u32,
        stored: u32,
    },

    #[error("sprite sheet `{sheet}` is not loaded or has no animations")]
    MissingSpriteSheet { sheet: String },

    #[error("failed to load texture {path}: {message}")]
    Texture { path: PathBuf, message: String },

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Error raised while loading or running scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("script `{script}` failed: {message}")]
    Runtime { script: String, message: String },
}
