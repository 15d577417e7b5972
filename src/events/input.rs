//! Input action events.
//!
//! [`InputEvent`] is triggered when one of the shared (non-movement) keys is
//! pressed or released. Player movement is read directly from
//! [`InputState`](crate::resources::input::InputState) because it must be
//! gated every frame.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Start the next round (Enter or Space).
    Confirm,
    /// Quit the game (Escape).
    Back,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}
