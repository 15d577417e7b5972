//! Platformer contact state.
//!
//! [`PlatformBody`] marks an entity as a platformer character: it collides
//! with the level's ground tiles, stays inside the map, and is pushed apart
//! from other platform bodies. The physics system refreshes `on_floor` every
//! frame.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlatformBody {
    /// Standing on a ground tile, the map floor, or another body.
    pub on_floor: bool,
    /// Fraction of vertical speed kept after landing.
    pub bounce: f32,
}

impl PlatformBody {
    pub fn new(bounce: f32) -> Self {
        Self {
            on_floor: false,
            bounce,
        }
    }
}

impl Default for PlatformBody {
    fn default() -> Self {
        Self::new(0.0)
    }
}
