use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Playback state of the animation an entity is showing.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct Animation {
    pub animation_key: String,
    pub frame_index: usize,
    pub elapsed_time: f32,
}
impl Animation {
    pub fn new(animation_key: impl Into<String>) -> Self {
        Self {
            animation_key: animation_key.into(),
            frame_index: 0,
            elapsed_time: 0.0,
        }
    }
}

// Animation Controller Component

/// Predicate over an entity's [`Signals`](super::signals::Signals).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Condition {
    HasFlag { key: String },
    All(Vec<Condition>),
}

impl Condition {
    pub fn flag(key: impl Into<String>) -> Self {
        Condition::HasFlag { key: key.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimRule {
    pub when: Condition,
    pub set_key: String,
}

/// Picks the animation to play: first matching rule wins, else the fallback.
#[derive(Debug, Clone, Component, Serialize, Deserialize)]
pub struct AnimationController {
    pub current_key: String,
    pub rules: Vec<AnimRule>,
    pub fallback_key: String,
}

impl AnimationController {
    pub fn new(fallback_key: impl Into<String>) -> Self {
        let fallback_key = fallback_key.into();
        Self {
            current_key: fallback_key.clone(),
            rules: Vec::new(),
            fallback_key,
        }
    }
    pub fn with_rule(mut self, when: Condition, set_key: impl Into<String>) -> Self {
        self.rules.push(AnimRule {
            when,
            set_key: set_key.into(),
        });
        self
    }
}
