//! Keyboard control of players.
//!
//! A player without control is stopped horizontally and its keys are
//! ignored: no facing change, no jump. A player in control runs left or
//! right while a direction key is held, stands still otherwise, and jumps
//! when up is held while on the floor.

use bevy_ecs::prelude::*;

use crate::components::platformbody::PlatformBody;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::Sprite;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

pub fn player_controller(
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut query: Query<(&Player, &mut RigidBody, &PlatformBody, Option<&mut Sprite>)>,
) {
    let tuning = config.physics;
    for (player, mut rb, body, sprite) in query.iter_mut() {
        if !player.has_control {
            rb.velocity.x = 0.0;
            continue;
        }
        let Some(keys) = input.player(player.index) else {
            rb.velocity.x = 0.0;
            continue;
        };

        let mut facing_left = None;
        if keys.left.active {
            rb.velocity.x = -tuning.run_speed;
            facing_left = Some(true);
        } else if keys.right.active {
            rb.velocity.x = tuning.run_speed;
            facing_left = Some(false);
        } else {
            rb.velocity.x = 0.0;
        }
        if let (Some(left), Some(mut sprite)) = (facing_left, sprite) {
            sprite.flip_h = left;
        }

        if keys.up.active && body.on_floor {
            rb.velocity.y = -tuning.jump_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    fn setup(has_control: bool) -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(InputState::for_players(2));
        world.insert_resource(GameConfig::new());
        let mut player = Player::new(1, 3000);
        player.has_control = has_control;
        let mut rb = RigidBody::new();
        rb.velocity = Vector2 { x: 120.0, y: 0.0 };
        let e = world
            .spawn((
                player,
                rb,
                PlatformBody {
                    on_floor: true,
                    bounce: 0.2,
                },
                Sprite::new("player", 72.0, 97.0),
            ))
            .id();
        (world, e)
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(player_controller);
        schedule.run(world);
    }

    #[test]
    fn gated_player_ignores_keys() {
        let (mut world, e) = setup(false);
        {
            let mut input = world.resource_mut::<InputState>();
            let keys = &mut input.players[1];
            keys.left.active = true;
            keys.up.active = true;
        }
        run(&mut world);
        let rb = world.get::<RigidBody>(e).unwrap();
        assert_eq!(rb.velocity.x, 0.0);
        assert_eq!(rb.velocity.y, 0.0);
        assert!(!world.get::<Sprite>(e).unwrap().flip_h);
    }

    #[test]
    fn controlled_player_runs_flips_and_jumps() {
        let (mut world, e) = setup(true);
        {
            let mut input = world.resource_mut::<InputState>();
            let keys = &mut input.players[1];
            keys.left.active = true;
            keys.up.active = true;
        }
        run(&mut world);
        let rb = world.get::<RigidBody>(e).unwrap();
        assert_eq!(rb.velocity.x, -200.0);
        assert_eq!(rb.velocity.y, -500.0);
        assert!(world.get::<Sprite>(e).unwrap().flip_h);
    }

    #[test]
    fn no_key_stops_and_airborne_cannot_jump() {
        let (mut world, e) = setup(true);
        world.get_mut::<PlatformBody>(e).unwrap().on_floor = false;
        world
            .resource_mut::<InputState>()
            .players[1]
            .up
            .active = true;
        run(&mut world);
        let rb = world.get::<RigidBody>(e).unwrap();
        assert_eq!(rb.velocity.x, 0.0);
        assert_eq!(rb.velocity.y, 0.0);
    }

    #[test]
    fn other_players_keys_do_not_apply() {
        let (mut world, e) = setup(true);
        world
            .resource_mut::<InputState>()
            .players[0]
            .right
            .active = true;
        run(&mut world);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.x, 0.0);
    }
}
