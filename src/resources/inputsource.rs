//! Input backend contract.
//!
//! The game never talks to a keyboard directly: it asks an [`InputSource`]
//! whether logical [`InputAction`]s are held and drains queued mouse clicks.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::events::input::InputAction;
use crate::geometry::Vec2;

pub trait InputSource {
    /// Whether the button bound to `action` is currently held.
    fn is_down(&self, action: InputAction) -> bool;
    /// Clicks since the last call, in screen coordinates, oldest first.
    fn poll_clicks(&mut self) -> Vec<Vec2>;
}

/// `NonSend` resource wrapping the active input source.
pub struct InputSourceRes(pub Box<dyn InputSource>);

impl InputSourceRes {
    pub fn new(source: impl InputSource + 'static) -> Self {
        InputSourceRes(Box::new(source))
    }
}

impl Deref for InputSourceRes {
    type Target = dyn InputSource;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for InputSourceRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

#[derive(Debug, Default)]
struct ScriptedState {
    held: FxHashSet<InputAction>,
    clicks: Vec<Vec2>,
}

/// Input source driven from code, for headless runs and tests.
///
/// Clones share the same state, so keep one clone to press buttons after
/// handing the other to the game loop.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, action: InputAction) {
        self.state.borrow_mut().held.insert(action);
    }

    pub fn release(&self, action: InputAction) {
        self.state.borrow_mut().held.remove(&action);
    }

    pub fn release_all(&self) {
        self.state.borrow_mut().held.clear();
    }

    pub fn click(&self, screen_x: f32, screen_y: f32) {
        self.state
            .borrow_mut()
            .clicks
            .push(Vec2::new(screen_x, screen_y));
    }
}

impl InputSource for ScriptedInput {
    fn is_down(&self, action: InputAction) -> bool {
        self.state.borrow().held.contains(&action)
    }

    fn poll_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.state.borrow_mut().clicks)
    }
}
