//! Signal binding system for reactive HUD updates.
//!
//! Synchronizes [`DynamicText`](crate::components::dynamictext::DynamicText)
//! components with [`WorldSignals`] values based on their
//! [`SignalBinding`](crate::components::signalbinding::SignalBinding).

use std::borrow::Cow;

use crate::components::dynamictext::DynamicText;
use crate::components::signalbinding::SignalBinding;
use crate::resources::worldsignals::WorldSignals;
use bevy_ecs::prelude::*;

/// Updates [`DynamicText`] content based on signal bindings.
///
/// Integers are displayed as-is (`"42"`), strings verbatim. If a format
/// string is specified in the binding, the value replaces the `{}`
/// placeholder. Texts are only written when the rendered value changed.
pub fn update_world_signals_binding_system(
    mut query: Query<(&mut DynamicText, &SignalBinding)>,
    world_signals: Res<WorldSignals>,
) {
    for (mut dynamic_text, signal_binding) in query.iter_mut() {
        let Some(value) = world_signal_as_str(&world_signals, &signal_binding.signal_key) else {
            continue;
        };
        let new_content = signal_binding.render(&value);
        if dynamic_text.content != new_content {
            dynamic_text.set_content(new_content);
        }
    }
}

/// Integer first, then string. `None` if the key is not found.
fn world_signal_as_str<'a>(world_signals: &'a WorldSignals, signal_key: &str) -> Option<Cow<'a, str>> {
    if let Some(signal_value) = world_signals.get_integer(signal_key) {
        return Some(Cow::Owned(signal_value.to_string()));
    }
    world_signals
        .get_string(signal_key)
        .map(|s| Cow::Borrowed(s.as_str()))
}
