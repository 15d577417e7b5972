//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - Shared keys are turned into events: F11 toggles debug mode via
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent),
//!   confirm and back emit [`InputEvent`].
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let poll = |state: &mut BoolState| {
        let key: KeyboardKey = state.key_binding;
        state.update(
            rl.is_key_down(key),
            rl.is_key_pressed(key),
            rl.is_key_released(key),
        );
    };

    for keys in input.players.iter_mut() {
        for state in keys.states_mut() {
            poll(state);
        }
    }
    poll(&mut input.action_confirm);
    poll(&mut input.action_confirm_alt);
    poll(&mut input.action_back);
    poll(&mut input.mode_debug);

    emit_input_events(&input, &mut commands);
}

/// Trigger events for the shared keys that changed this frame.
pub fn emit_input_events(input: &InputState, commands: &mut Commands) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }

    if input.confirm_pressed() {
        commands.trigger(InputEvent {
            action: InputAction::Confirm,
            pressed: true,
        });
    }
    if input.action_confirm.just_released || input.action_confirm_alt.just_released {
        commands.trigger(InputEvent {
            action: InputAction::Confirm,
            pressed: false,
        });
    }

    if input.action_back.just_pressed {
        commands.trigger(InputEvent {
            action: InputAction::Back,
            pressed: true,
        });
    }
    if input.action_back.just_released {
        commands.trigger(InputEvent {
            action: InputAction::Back,
            pressed: false,
        });
    }
}
