//! Pickup events.
//!
//! The pickup system mutates game state (level tiles, scores, positions)
//! and then triggers one of these events. Observers in
//! [`crate::systems::pickups`] add the presentation on top: sound effects,
//! HUD values and the background flash.

use bevy_ecs::prelude::*;

/// A coin tile was removed and counted for `player`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinCollectedEvent {
    pub entity: Entity,
    pub player: usize,
    /// Tile coordinates of the removed coin.
    pub tile: (u32, u32),
    /// Player's score after the pickup.
    pub score: u32,
}

/// `player` touched a hazard and was moved back to a spawn point.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardTouchedEvent {
    pub entity: Entity,
    pub player: usize,
}
