//! Animation systems.
//!
//! - [`animation`] advances animations based on elapsed time and updates the
//!   visible sprite frame.
//! - [`animation_controller`] selects which animation should be active based
//!   on a set of rule conditions evaluated against entity [`Signals`].
//!
//! # Animation Flow
//!
//! 1. Animation data is defined in [`AnimationStore`]
//! 2. Players carry an [`Animation`] component pointing to a key
//! 3. [`update_motion_signals`](crate::systems::platformphysics::update_motion_signals)
//!    publishes the `"walking"` flag from the body's actual velocity
//! 4. The `animation_controller` system switches between walk and idle
//! 5. The `animation` system advances frames based on `fps` and updates [`Sprite`] offset

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::{Animation, AnimationController, Condition};
use crate::components::signals::Signals;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite)>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim_comp, mut sprite) in query.iter_mut() {
        let Some(animation) = animation_store.get(&anim_comp.animation_key) else {
            continue;
        };
        anim_comp.elapsed_time += time.delta;

        let frame_duration = 1.0 / animation.fps;
        if anim_comp.elapsed_time >= frame_duration {
            anim_comp.frame_index += 1;
            anim_comp.elapsed_time -= frame_duration;

            if anim_comp.frame_index >= animation.frame_count {
                anim_comp.frame_index = if animation.looped {
                    0
                } else {
                    animation.frame_count - 1
                };
            }
        }

        sprite.offset = Vector2 {
            x: animation.position.x + anim_comp.frame_index as f32 * animation.displacement,
            y: animation.position.y,
        };
    }
}

/// Evaluate a controller condition against an entity's current signals.
fn evaluate_condition(signals: &Signals, condition: &Condition) -> bool {
    match condition {
        Condition::HasFlag { key } => signals.has_flag(key),
        Condition::All(conditions) => conditions
            .iter()
            .all(|cond| evaluate_condition(signals, cond)),
    }
}

/// Select the active animation track according to controller rules.
///
/// The first matching rule wins. If no rules match, the controller's default
/// target is used. When the selected key differs from the current one, the
/// animation state is reset.
pub fn animation_controller(
    mut query: Query<(&mut AnimationController, &mut Animation, &Signals)>,
) {
    for (mut controller, mut animation, signals) in query.iter_mut() {
        let target_key = controller
            .rules
            .iter()
            .find(|rule| evaluate_condition(signals, &rule.when))
            .map(|rule| rule.set_key.clone())
            .unwrap_or_else(|| controller.fallback_key.clone());
        if animation.animation_key != target_key {
            animation.animation_key = target_key.clone();
            animation.frame_index = 0;
            animation.elapsed_time = 0.0;
            controller.current_key = target_key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::{PLAYER_IDLE, PLAYER_WALK, player_animations};

    fn flag(key: &str) -> Condition {
        Condition::flag(key)
    }

    #[test]
    fn flags_and_conjunction() {
        let mut signals = Signals::default();
        signals.set_flag("walking");
        assert!(evaluate_condition(&signals, &flag("walking")));
        assert!(!evaluate_condition(&Signals::default(), &flag("walking")));
        let grounded_walk = Condition::All(vec![flag("walking"), flag("on_floor")]);
        assert!(!evaluate_condition(&signals, &grounded_walk));
        signals.set_flag("on_floor");
        assert!(evaluate_condition(&signals, &grounded_walk));
        assert!(evaluate_condition(&Signals::default(), &Condition::All(vec![])));
    }

    fn player_world(walking: bool) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(player_animations("player", 72.0));
        let mut time = WorldTime::default();
        time.delta = 0.25;
        world.insert_resource(time);
        let mut signals = Signals::default();
        signals.put_flag("walking", walking);
        signals.set_flag("on_floor");
        let e = world
            .spawn((
                Animation::new(PLAYER_IDLE),
                AnimationController::new(PLAYER_IDLE).with_rule(
                    Condition::All(vec![flag("walking"), flag("on_floor")]),
                    PLAYER_WALK,
                ),
                Sprite::new("player", 72.0, 97.0),
                signals,
            ))
            .id();
        (world, e)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems((animation_controller, animation).chain());
        schedule.run(world);
    }

    #[test]
    fn walking_flag_selects_walk_cycle() {
        let (mut world, e) = player_world(true);
        run(&mut world);
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.animation_key, PLAYER_WALK);
        // at most one frame per tick
        assert_eq!(anim.frame_index, 1);
        assert_eq!(world.get::<Sprite>(e).unwrap().offset.x, 72.0);
    }

    #[test]
    fn standing_player_shows_idle_frame() {
        let (mut world, e) = player_world(false);
        run(&mut world);
        run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().animation_key, PLAYER_IDLE);
        assert_eq!(world.get::<Sprite>(e).unwrap().offset.x, 0.0);
    }

    #[test]
    fn airborne_player_does_not_walk() {
        let (mut world, e) = player_world(true);
        world.get_mut::<Signals>(e).unwrap().clear_flag("on_floor");
        run(&mut world);
        assert_eq!(world.get::<Animation>(e).unwrap().animation_key, PLAYER_IDLE);
    }

    #[test]
    fn walk_cycle_loops() {
        let (mut world, e) = player_world(true);
        world.resource_mut::<WorldTime>().delta = 0.1;
        for _ in 0..11 {
            run(&mut world);
        }
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index, 0);
    }
}
