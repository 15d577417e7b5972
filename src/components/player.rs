//! Player data component.
//!
//! Every controllable character carries a [`Player`]. Its `index` is assigned
//! once at spawn and doubles as the keyboard slot (see
//! [`DirectionKeys::for_slot`](crate::resources::input::DirectionKeys::for_slot)).
//! `has_control` is written only by the turn system, from
//! [`TurnController::controlling_player`](crate::resources::turncontroller::TurnController::controlling_player).

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Tint applied to player `index` so players can tell themselves apart.
pub fn player_color(index: usize) -> Color {
    match index % 4 {
        0 => Color::WHITE,
        1 => Color::new(0xff, 0xc8, 0x64, 0xff),
        2 => Color::new(0x96, 0xff, 0x96, 0xff),
        _ => Color::new(0x96, 0xc8, 0xff, 0xff),
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    /// Stable 0-based identifier.
    pub index: usize,
    /// True only while this player's turn is running.
    pub has_control: bool,
    pub score: u32,
    /// Length of this player's current or next turn.
    pub turn_duration_ms: u64,
}

impl Player {
    pub fn new(index: usize, turn_duration_ms: u64) -> Self {
        Self {
            index,
            has_control: false,
            score: 0,
            turn_duration_ms,
        }
    }

    /// Display name used in HUD labels.
    pub fn label(&self) -> String {
        format!("Player {}", self.index + 1)
    }
}

/// Scores ordered by player index, zero for missing indices.
pub fn scores_by_index<'a>(players: impl IntoIterator<Item = &'a Player>, count: usize) -> Vec<u32> {
    let mut scores = vec![0; count];
    for player in players {
        if let Some(slot) = scores.get_mut(player.index) {
            *slot = player.score;
        }
    }
    scores
}
