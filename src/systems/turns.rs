//! Turn system.
//!
//! Drives the [`TurnController`] from the session clock once per frame and
//! applies what it decides:
//!
//! - copies [`TurnController::controlling_player`] into every
//!   [`Player::has_control`], so at most one player holds control;
//! - stores each new turn's length on the player who receives it;
//! - publishes the `"countdown"` and `"turn_label"` HUD signals;
//! - switches the [`Backdrop`] between the neutral and normal cues;
//! - points the camera at whoever acts next.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::{Player, scores_by_index};
use crate::resources::backdrop::{Backdrop, BackdropCue};
use crate::resources::camera2d::CameraFollow;
use crate::resources::turncontroller::{TurnController, TurnTransition};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// HUD key for the remaining time of the current phase.
pub const COUNTDOWN_SIGNAL: &str = "countdown";
/// HUD key for the banner shown between turns.
pub const TURN_LABEL_SIGNAL: &str = "turn_label";

/// Advance the turn cycle and sync control flags.
pub fn turn_system(
    time: Res<WorldTime>,
    controller: Option<ResMut<TurnController>>,
    mut players: Query<&mut Player>,
    mut signals: ResMut<WorldSignals>,
    mut backdrop: ResMut<Backdrop>,
    mut follow: ResMut<CameraFollow>,
) {
    let Some(mut controller) = controller else {
        return;
    };
    let now = time.elapsed_ms();
    let scores = scores_by_index(players.iter(), controller.player_count());

    for transition in controller.advance(now, &scores) {
        match transition {
            TurnTransition::TurnStarted {
                player,
                duration_ms,
                at_ms,
            } => {
                info!(
                    "Player {} takes control for {} ms (t={} ms)",
                    player + 1,
                    duration_ms,
                    at_ms
                );
                if let Some(mut p) = players.iter_mut().find(|p| p.index == player) {
                    p.turn_duration_ms = duration_ms;
                }
                signals.set_string(TURN_LABEL_SIGNAL, "");
                backdrop.set_base(BackdropCue::Normal);
                follow.player = player;
            }
            TurnTransition::TurnEnded {
                player,
                upcoming,
                at_ms,
            } => {
                info!(
                    "Player {} loses control, player {} is next (t={} ms)",
                    player + 1,
                    upcoming + 1,
                    at_ms
                );
                signals.set_string(TURN_LABEL_SIGNAL, format!("Player {} get ready!", upcoming + 1));
                backdrop.set_base(BackdropCue::NeutralGray);
                follow.player = upcoming;
            }
        }
    }

    let controlling = controller.controlling_player();
    for mut player in players.iter_mut() {
        let has_control = controlling == Some(player.index);
        if player.has_control != has_control {
            player.has_control = has_control;
        }
    }

    signals.set_string(COUNTDOWN_SIGNAL, controller.countdown_text(now));
    backdrop.expire(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::turncontroller::TurnRules;

    fn world_with_players(n: usize) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(WorldSignals::default());
        world.insert_resource(Backdrop::default());
        world.insert_resource(CameraFollow::default());
        world.insert_resource(TurnController::new(n, TurnRules::default(), 0).unwrap());
        for i in 0..n {
            world.spawn(Player::new(i, 3000));
        }
        world
    }

    fn run_at(world: &mut World, schedule: &mut Schedule, ms: u64) {
        world.resource_mut::<WorldTime>().set_elapsed_ms(ms);
        schedule.run(world);
    }

    fn controllers(world: &mut World) -> Vec<usize> {
        let mut q = world.query::<&Player>();
        let mut v: Vec<usize> = q.iter(world).filter(|p| p.has_control).map(|p| p.index).collect();
        v.sort();
        v
    }

    #[test]
    fn first_frame_gives_player_zero_control() {
        let mut world = world_with_players(2);
        let mut schedule = Schedule::default();
        schedule.add_systems(turn_system);

        run_at(&mut world, &mut schedule, 0);

        assert_eq!(controllers(&mut world), vec![0]);
        assert_eq!(world.resource::<Backdrop>().base, BackdropCue::Normal);
        assert_eq!(
            world.resource::<WorldSignals>().get_string(COUNTDOWN_SIGNAL).map(String::as_str),
            Some("3.0")
        );
    }

    #[test]
    fn neutral_window_revokes_control_and_shows_label() {
        let mut world = world_with_players(2);
        let mut schedule = Schedule::default();
        schedule.add_systems(turn_system);

        run_at(&mut world, &mut schedule, 0);
        run_at(&mut world, &mut schedule, 3200);

        assert!(controllers(&mut world).is_empty());
        let signals = world.resource::<WorldSignals>();
        assert_eq!(
            signals.get_string(TURN_LABEL_SIGNAL).map(String::as_str),
            Some("Player 2 get ready!")
        );
        assert_eq!(world.resource::<Backdrop>().base, BackdropCue::NeutralGray);
        assert_eq!(world.resource::<CameraFollow>().player, 1);
    }

    #[test]
    fn missing_controller_is_a_no_op() {
        let mut world = world_with_players(2);
        world.remove_resource::<TurnController>();
        let mut schedule = Schedule::default();
        schedule.add_systems(turn_system);
        run_at(&mut world, &mut schedule, 1000);
        assert!(controllers(&mut world).is_empty());
    }
}
