// Per-entity signals read by the animation controller

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Component, Default)]
pub struct Signals {
    pub flags: FxHashSet<String>,
}

impl Signals {
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    /// Set or clear `key` in one call.
    pub fn put_flag(&mut self, key: &str, on: bool) {
        if on {
            self.set_flag(key);
        } else {
            self.clear_flag(key);
        }
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}
