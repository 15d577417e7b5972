//! Turn controller: round-robin, timed, exclusive input control.
//!
//! The controller alternates between two phases:
//!
//! - [`TurnPhase::Neutral`] – nobody has control while a short cooldown runs.
//! - [`TurnPhase::Active`] – exactly one player has control for that
//!   player's turn duration.
//!
//! A session starts in `Neutral` with a zero-length cooldown, so the first
//! call to [`TurnController::advance`] immediately hands control to player 0.
//! After that, `Active(p)` is followed by `Neutral`, which is followed by
//! `Active((p + 1) % players)`, forever.
//!
//! The controller holds no timers. The turn system calls `advance` once per
//! frame with the current session clock, and the controller computes how long
//! the current phase has been running from the timestamp it stored when the
//! phase began. When a single frame spans more than one phase boundary, every
//! transition is replayed in order and each new phase starts at the scheduled
//! end of the previous one.
//!
//! [`TurnController::controlling_player`] is the only source of truth for
//! input control. The ECS layer copies it into every
//! [`Player::has_control`](crate::components::player::Player) after each
//! advance, so two players can never hold control at the same time.

use bevy_ecs::prelude::Resource;
use log::debug;
use smallvec::SmallVec;

/// Default cooldown between turns.
pub const DEFAULT_NEUTRAL_MS: u64 = 1000;
/// Default length of a turn.
pub const DEFAULT_TURN_MS: u64 = 3000;
/// Extra turn time granted per point of score deficit.
pub const DEFAULT_PENALTY_PER_POINT_MS: i64 = 200;
/// Shortest turn the catch-up rule may produce.
pub const DEFAULT_MIN_TURN_MS: u64 = 500;

/// Tunables for the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnRules {
    /// Turn length before any catch-up adjustment.
    pub base_turn_ms: u64,
    /// Length of the neutral window between turns.
    pub neutral_ms: u64,
    /// Recompute each turn's length from the score deficit.
    pub catch_up: bool,
    /// Milliseconds added per point the incoming player trails by.
    pub penalty_per_point_ms: i64,
    /// Lower bound applied to catch-up durations. Turns never last less
    /// than 1 ms whatever this is set to.
    pub min_turn_ms: u64,
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            base_turn_ms: DEFAULT_TURN_MS,
            neutral_ms: DEFAULT_NEUTRAL_MS,
            catch_up: true,
            penalty_per_point_ms: DEFAULT_PENALTY_PER_POINT_MS,
            min_turn_ms: DEFAULT_MIN_TURN_MS,
        }
    }
}

impl TurnRules {
    /// Duration of the next turn for `player`, given every player's score.
    ///
    /// Without catch-up this is always `base_turn_ms`. With catch-up the
    /// incoming player's own score counts negative and everybody else's
    /// counts positive, so a trailing player gets a longer turn.
    pub fn turn_duration_for(&self, player: usize, scores: &[u32]) -> u64 {
        if !self.catch_up {
            return self.base_turn_ms.max(1);
        }
        let deficit = score_deficit(player, scores);
        let adjusted = self.base_turn_ms as i64 + deficit * self.penalty_per_point_ms;
        adjusted.max(self.min_turn_ms.max(1) as i64) as u64
    }
}

/// Sum of the other players' scores minus `player`'s own score.
///
/// Players missing from `scores` count as zero.
pub fn score_deficit(player: usize, scores: &[u32]) -> i64 {
    scores
        .iter()
        .enumerate()
        .map(|(index, &score)| {
            if index == player {
                -(score as i64)
            } else {
                score as i64
            }
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Neutral,
    Active,
}

/// Snapshot of the controller's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Player holding control, `None` while neutral.
    pub active: Option<usize>,
    /// Player that will receive control when the neutral window ends.
    pub upcoming: usize,
    pub phase_started_ms: u64,
    pub phase_duration_ms: u64,
}

/// A phase boundary crossed during [`TurnController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnTransition {
    /// `Neutral -> Active(player)`.
    TurnStarted {
        player: usize,
        duration_ms: u64,
        at_ms: u64,
    },
    /// `Active(player) -> Neutral`; `upcoming` plays next.
    TurnEnded {
        player: usize,
        upcoming: usize,
        at_ms: u64,
    },
}

pub type Transitions = SmallVec<[TurnTransition; 2]>;

/// Session-scoped turn state machine.
///
/// Rebuilt from scratch whenever a level session starts, so no state from a
/// previous round can leak into the next one.
#[derive(Resource, Debug, Clone)]
pub struct TurnController {
    player_count: usize,
    rules: TurnRules,
    state: TurnState,
}

impl TurnController {
    /// Create a controller for `player_count` players starting at `now_ms`.
    ///
    /// Returns an error when there are no players to rotate between or when
    /// the base turn length is zero.
    pub fn new(player_count: usize, rules: TurnRules, now_ms: u64) -> Result<Self, String> {
        if player_count == 0 {
            return Err("turn controller needs at least one player".to_string());
        }
        if rules.base_turn_ms == 0 {
            return Err("base_turn_ms must be at least 1 ms".to_string());
        }
        Ok(Self {
            player_count,
            rules,
            state: TurnState {
                phase: TurnPhase::Neutral,
                active: None,
                upcoming: 0,
                phase_started_ms: now_ms,
                phase_duration_ms: 0,
            },
        })
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// The only player allowed to act right now.
    pub fn controlling_player(&self) -> Option<usize> {
        match self.state.phase {
            TurnPhase::Active => self.state.active,
            TurnPhase::Neutral => None,
        }
    }

    /// Player that receives control after the current neutral window, or
    /// after the current turn plus the next neutral window.
    pub fn upcoming_player(&self) -> usize {
        self.state.upcoming
    }

    /// Milliseconds left in the current phase, never negative.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.state.phase_started_ms);
        self.state.phase_duration_ms.saturating_sub(elapsed)
    }

    /// Countdown text for the current phase, see [`format_countdown`].
    pub fn countdown_text(&self, now_ms: u64) -> String {
        format_countdown(self.remaining_ms(now_ms))
    }

    /// Run every phase transition that is due at `now_ms`.
    ///
    /// `scores` is indexed by player index and feeds the catch-up rule.
    pub fn advance(&mut self, now_ms: u64, scores: &[u32]) -> Transitions {
        let mut fired = Transitions::new();
        loop {
            let due_at = self.state.phase_started_ms + self.state.phase_duration_ms;
            if now_ms < due_at {
                break;
            }
            let transition = match self.state.phase {
                TurnPhase::Neutral => self.begin_turn(due_at, scores),
                TurnPhase::Active => self.end_turn(due_at),
            };
            debug!("turn transition {:?}", transition);
            fired.push(transition);
        }
        fired
    }

    fn begin_turn(&mut self, at_ms: u64, scores: &[u32]) -> TurnTransition {
        let player = self.state.upcoming;
        let duration_ms = self.rules.turn_duration_for(player, scores);
        self.state = TurnState {
            phase: TurnPhase::Active,
            active: Some(player),
            upcoming: (player + 1) % self.player_count,
            phase_started_ms: at_ms,
            phase_duration_ms: duration_ms,
        };
        TurnTransition::TurnStarted {
            player,
            duration_ms,
            at_ms,
        }
    }

    fn end_turn(&mut self, at_ms: u64) -> TurnTransition {
        // Active always carries a player
        let player = self.state.active.unwrap_or(self.state.upcoming);
        let upcoming = self.state.upcoming;
        self.state = TurnState {
            phase: TurnPhase::Neutral,
            active: None,
            upcoming,
            phase_started_ms: at_ms,
            phase_duration_ms: self.rules.neutral_ms,
        };
        TurnTransition::TurnEnded {
            player,
            upcoming,
            at_ms,
        }
    }
}

/// Format a remaining duration as `"{seconds}.{tenths}"`, both floored.
///
/// `1766` renders as `"1.7"`, `999` as `"0.9"` and `0` as `"0.0"`.
pub fn format_countdown(remaining_ms: u64) -> String {
    let seconds = remaining_ms / 1000;
    let tenths = (remaining_ms % 1000) / 100;
    format!("{}.{}", seconds, tenths)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(players: usize) -> TurnController {
        TurnController::new(
            players,
            TurnRules {
                catch_up: false,
                ..TurnRules::default()
            },
            0,
        )
        .unwrap()
    }

    #[test]
    fn zero_players_is_rejected() {
        assert!(TurnController::new(0, TurnRules::default(), 0).is_err());
    }

    #[test]
    fn zero_length_turns_are_rejected() {
        let rules = TurnRules {
            base_turn_ms: 0,
            neutral_ms: 0,
            catch_up: false,
            ..TurnRules::default()
        };
        assert!(TurnController::new(2, rules, 0).is_err());
    }

    #[test]
    fn turns_last_at_least_one_ms() {
        let rules = TurnRules {
            base_turn_ms: 0,
            min_turn_ms: 0,
            ..TurnRules::default()
        };
        assert_eq!(rules.turn_duration_for(0, &[9, 0]), 1);
        let rules = TurnRules {
            catch_up: false,
            ..rules
        };
        assert_eq!(rules.turn_duration_for(0, &[0, 0]), 1);
    }

    #[test]
    fn no_cooldown_with_tiny_turns_still_terminates() {
        let rules = TurnRules {
            base_turn_ms: 1,
            neutral_ms: 0,
            catch_up: true,
            min_turn_ms: 0,
            ..TurnRules::default()
        };
        let mut c = TurnController::new(2, rules, 0).unwrap();
        // each turn is 1 ms, each cooldown 0 ms: three turns started and
        // three ended by t=3, then the fourth begins at t=3
        let fired = c.advance(3, &[0, 0]);
        assert_eq!(fired.len(), 7);
        assert_eq!(c.controlling_player(), Some(1));
        assert_eq!(c.state().phase_started_ms, 3);
    }

    #[test]
    fn starts_neutral_without_control() {
        let c = controller(2);
        assert_eq!(c.state().phase, TurnPhase::Neutral);
        assert_eq!(c.controlling_player(), None);
        assert_eq!(c.remaining_ms(0), 0);
    }

    #[test]
    fn first_advance_hands_control_to_player_zero() {
        let mut c = controller(2);
        let fired = c.advance(0, &[0, 0]);
        assert_eq!(
            fired.as_slice(),
            &[TurnTransition::TurnStarted {
                player: 0,
                duration_ms: 3000,
                at_ms: 0
            }]
        );
        assert_eq!(c.controlling_player(), Some(0));
        assert_eq!(c.upcoming_player(), 1);
    }

    #[test]
    fn turn_then_cooldown_then_next_player() {
        let mut c = controller(2);
        c.advance(0, &[0, 0]);

        assert!(c.advance(2999, &[0, 0]).is_empty());
        assert_eq!(c.controlling_player(), Some(0));

        let fired = c.advance(3000, &[0, 0]);
        assert_eq!(
            fired.as_slice(),
            &[TurnTransition::TurnEnded {
                player: 0,
                upcoming: 1,
                at_ms: 3000
            }]
        );
        assert_eq!(c.state().phase, TurnPhase::Neutral);
        assert_eq!(c.controlling_player(), None);

        assert!(c.advance(3999, &[0, 0]).is_empty());
        c.advance(4000, &[0, 0]);
        assert_eq!(c.controlling_player(), Some(1));
    }

    #[test]
    fn long_frame_replays_every_boundary_without_drift() {
        let mut c = controller(2);
        c.advance(0, &[0, 0]);
        // 3000 active + 1000 neutral + 3000 active + 1000 neutral, plus 500
        let fired = c.advance(8500, &[0, 0]);
        assert_eq!(fired.len(), 4);
        assert_eq!(c.controlling_player(), Some(0));
        assert_eq!(c.state().phase_started_ms, 8000);
        assert_eq!(c.remaining_ms(8500), 2500);
    }

    #[test]
    fn single_player_still_gets_a_cooldown() {
        let mut c = controller(1);
        c.advance(0, &[0]);
        assert_eq!(c.controlling_player(), Some(0));
        c.advance(3000, &[0]);
        assert_eq!(c.controlling_player(), None);
        c.advance(4000, &[0]);
        assert_eq!(c.controlling_player(), Some(0));
    }

    #[test]
    fn score_deficit_counts_self_negative() {
        assert_eq!(score_deficit(0, &[2, 5]), 3);
        assert_eq!(score_deficit(1, &[2, 5]), -3);
        assert_eq!(score_deficit(2, &[1, 1, 4]), -2);
    }

    #[test]
    fn catch_up_extends_trailing_player() {
        let rules = TurnRules::default();
        assert_eq!(rules.turn_duration_for(0, &[1, 4]), 3000 + 200 * 3);
        assert_eq!(rules.turn_duration_for(1, &[1, 4]), 3000 - 200 * 3);
    }

    #[test]
    fn catch_up_is_clamped_to_minimum() {
        let rules = TurnRules::default();
        assert_eq!(rules.turn_duration_for(0, &[40, 0]), DEFAULT_MIN_TURN_MS);
    }

    #[test]
    fn catch_up_disabled_uses_base() {
        let rules = TurnRules {
            catch_up: false,
            ..TurnRules::default()
        };
        assert_eq!(rules.turn_duration_for(0, &[0, 9]), 3000);
    }

    #[test]
    fn countdown_formats_seconds_and_tenths() {
        assert_eq!(format_countdown(3000 - 1234), "1.7");
        assert_eq!(format_countdown(999), "0.9");
        assert_eq!(format_countdown(0), "0.0");
        assert_eq!(format_countdown(12_050), "12.0");
    }

    #[test]
    fn countdown_text_tracks_phase_start() {
        let mut c = controller(2);
        c.advance(0, &[0, 0]);
        assert_eq!(c.countdown_text(1234), "1.7");
        c.advance(3000, &[0, 0]);
        assert_eq!(c.countdown_text(3250), "0.7");
    }
}
