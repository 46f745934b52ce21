//! Message types exchanged between systems.
//!
//! Submodules:
//! - [`input`] – logical input actions and queued mouse clicks
pub mod input;
