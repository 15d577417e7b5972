//! Signal binding component for reactive HUD updates.
//!
//! Binds a [`DynamicText`](super::dynamictext::DynamicText) to a key of the
//! [`WorldSignals`](crate::resources::worldsignals::WorldSignals) resource so
//! the text follows the value without the publisher knowing about the text.
//!
//! ```ignore
//! commands.spawn((
//!     DynamicText::new("", 20.0, Color::BLACK),
//!     SignalBinding::new(score_key(0)).with_format("Player 1: {}"),
//! ));
//! ```
//!
//! Integers are checked before strings. A missing key leaves the text as is.
//!
//! See [`crate::systems::signalbinding::update_world_signals_binding_system`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct SignalBinding {
    /// The key of the signal to read from.
    pub signal_key: String,
    /// Optional format string. Use `{}` as a placeholder for the value.
    pub format: Option<String>,
}

impl SignalBinding {
    pub fn new(signal_key: impl ToString) -> Self {
        SignalBinding {
            signal_key: signal_key.to_string(),
            format: None,
        }
    }

    /// Sets a format string for the displayed value.
    pub fn with_format(mut self, format: impl ToString) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Render `value` through the format string, if any.
    pub fn render(&self, value: &str) -> String {
        match &self.format {
            Some(format_str) => format_str.replace("{}", value),
            None => value.to_string(),
        }
    }
}
