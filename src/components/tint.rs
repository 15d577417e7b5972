//! Color tint component for sprite rendering.
//!
//! Players share one spritesheet; [`Tint`] tells them apart. When the
//! texture is missing the tint is also the colour of the fallback rectangle.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}
