//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource is a world-wide key/value board used by
//! gameplay systems to publish values for the HUD without knowing about the
//! text entities that display them. [`SignalBinding`] texts read from it.
//!
//! Keys written by the game:
//! - `"countdown"` – remaining time of the current turn phase (`"1.7"`)
//! - `"turn_label"` – transition banner, empty while a turn is running
//! - `"score_{index}"` – integer score of each player
//! - `"round_banner"` – summary shown once every coin is collected
//!
//! [`SignalBinding`]: crate::components::signalbinding::SignalBinding

use bevy_ecs::prelude::Resource;
use rustc_hash::{FxHashMap, FxHashSet};

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Resource, Default)]
pub struct WorldSignals {
    /// Integer numeric signals addressed by string keys.
    pub integers: FxHashMap<String, i32>,
    /// String signals addressed by string keys.
    pub strings: FxHashMap<String, String>,
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
}

impl WorldSignals {
    /// Set an integer signal value.
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }
    /// Get an integer signal by key.
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    /// Set a string signal value.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
    /// Get a string signal by key.
    pub fn get_string(&self, key: &str) -> Option<&String> {
        self.strings.get(key)
    }
    /// Mark a flag as present/true.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    /// Check whether a flag is present/true.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

/// Signal key holding the score of player `index`.
pub fn score_key(index: usize) -> String {
    format!("score_{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_and_integers_are_independent() {
        let mut ws = WorldSignals::default();
        ws.set_integer("score_0", 3);
        ws.set_string("score_0", "three");
        assert_eq!(ws.get_integer("score_0"), Some(3));
        assert_eq!(ws.get_string("score_0").map(String::as_str), Some("three"));
    }

    #[test]
    fn flags_are_presence_only() {
        let mut ws = WorldSignals::default();
        assert!(!ws.has_flag("quit_game"));
        ws.set_flag("quit_game");
        ws.set_flag("quit_game");
        assert!(ws.has_flag("quit_game"));
        assert_eq!(ws.flags.len(), 1);
    }
}
