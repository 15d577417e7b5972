//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. The camera uses it
//! to keep the view inside the map and the HUD uses it to place texts.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn as_vec(&self) -> Vector2 {
        Vector2 {
            x: self.w as f32,
            y: self.h as f32,
        }
    }
}
