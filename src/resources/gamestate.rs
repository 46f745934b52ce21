//! High-level game state machine.
//!
//! Two states: the game is either [`GameStates::Running`] or
//! [`GameStates::GameOver`]. The switch to game over is driven by the
//! player's health (see [`crate::systems::gamestate::check_player_health`]);
//! the way back is an explicit retry, which requests a full world reset
//! that the game loop applies after the update pass.

/// Discrete high-level states the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    Running,
    GameOver,
}

/// Authoritative current state plus a pending reset request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameStateMachine {
    current: GameStates,
    reset_requested: bool,
}

impl GameStateMachine {
    /// Create a machine in [`GameStates::Running`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current == GameStates::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.current == GameStates::GameOver
    }

    /// Switch to game over. Returns true only on the transition itself, so
    /// callers can react exactly once per depletion.
    pub fn enter_game_over(&mut self) -> bool {
        if self.current == GameStates::GameOver {
            return false;
        }
        self.current = GameStates::GameOver;
        true
    }

    /// Ask for a reset. Ignored unless the game is over.
    pub fn request_reset(&mut self) -> bool {
        if self.current != GameStates::GameOver {
            return false;
        }
        self.reset_requested = true;
        true
    }

    pub fn reset_requested(&self) -> bool {
        self.reset_requested
    }

    /// Consume a pending reset request.
    pub fn take_reset_request(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
