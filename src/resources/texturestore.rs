//! Loaded textures keyed by name.
//!
//! Missing files are not fatal: the loader logs a warning and the renderer
//! draws coloured rectangles for anything it cannot find here.

use bevy_ecs::prelude::Resource;
use log::warn;
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

/// Tileset used for ground, coin and hazard tiles.
pub const TILES_TEXTURE: &str = "tiles";
/// Player spritesheet.
pub const PLAYER_TEXTURE: &str = "player";

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    /// Load `path` under `key`, logging and skipping on failure.
    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, key: &str, path: &str) {
        match rl.load_texture(thread, path) {
            Ok(texture) => {
                self.map.insert(key.to_string(), texture);
            }
            Err(e) => warn!("texture '{}' not loaded from '{}': {}", key, path, e),
        }
    }
}
