//! Animation resource registry.
//!
//! Stores animation definitions by key so every player can share them. The
//! animation system looks up the key held by each entity's
//! [`Animation`](crate::components::animation::Animation) component.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// Walk cycle shown while a player moves horizontally.
pub const PLAYER_WALK: &str = "player_walk";
/// Still frame shown otherwise.
pub const PLAYER_IDLE: &str = "player_idle";

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: &str) -> Option<&AnimationResource> {
        self.animations.get(key)
    }
}

/// Immutable data describing a horizontal sprite-sheet strip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: Arc<str>,
    /// Offset of the first frame within the texture.
    pub position: Vector2,
    /// Horizontal distance between frames.
    pub displacement: f32,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}

/// Register the two player animations for a `frame_width`-wide sheet.
pub fn player_animations(tex_key: &str, frame_width: f32) -> AnimationStore {
    let tex_key: Arc<str> = Arc::from(tex_key);
    let mut store = AnimationStore::default();
    store.insert(
        PLAYER_WALK,
        AnimationResource {
            tex_key: tex_key.clone(),
            position: Vector2 { x: 0.0, y: 0.0 },
            displacement: frame_width,
            frame_count: 11,
            fps: 10.0,
            looped: true,
        },
    );
    store.insert(
        PLAYER_IDLE,
        AnimationResource {
            tex_key,
            position: Vector2 { x: 0.0, y: 0.0 },
            displacement: 0.0,
            frame_count: 1,
            fps: 1.0,
            looped: true,
        },
    );
    store
}
