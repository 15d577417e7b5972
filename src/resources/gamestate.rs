//! Session state machine resources.
//!
//! [`GameState`] is the state the game is in right now. Systems never switch
//! it directly: they request a transition through [`NextGameState`] and the
//! observer in `crate::events::gamestate` applies it on the next frame,
//! running the hook registered for the entered state.

use bevy_ecs::prelude::Resource;

/// States of a swapjump session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Load textures, animations and sounds.
    Setup,
    /// Turn cycle running.
    Playing,
    /// Every coin of the level has been collected; control is frozen until
    /// the players start a new round.
    RoundComplete,
    Quitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    /// Overwrite the state without running any hook.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Transition requested for the next frame.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Request a transition. A later request in the same frame wins.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
