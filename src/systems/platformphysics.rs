//! Platformer physics.
//!
//! [`platform_physics`] integrates every [`PlatformBody`] once per frame:
//!
//! 1. velocity += enabled forces × dt (gravity);
//! 2. move along x, then along y, pushing out of any ground tile entered;
//! 3. landing on a tile or on the map floor sets `on_floor` and bounces
//!    with the body's `bounce` factor until the rebound is too small to see;
//! 4. keep the collider inside the map;
//! 5. separate overlapping bodies along the smaller overlap, so players
//!    push each other sideways and can stand on each other's heads.
//!
//! Coin and hazard tiles are not solid; see [`crate::systems::pickups`].

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::{BoxCollider, aabb_overlap};
use crate::components::mapposition::MapPosition;
use crate::components::platformbody::PlatformBody;
use crate::components::rigidbody::RigidBody;
use crate::components::signals::Signals;
use crate::resources::level::Level;
use crate::resources::worldtime::WorldTime;

/// Longest time step integrated in one frame, in seconds.
pub const MAX_STEP: f32 = 0.05;
/// Rebounds slower than this (px/s) come to rest.
pub const SETTLE_SPEED: f32 = 40.0;
/// Horizontal speed (px/s) above which a body counts as walking.
const WALK_THRESHOLD: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Move `pos` by `delta` along `axis` and push it back out of ground tiles.
///
/// Returns true when a tile blocked the move.
fn move_axis(level: &Level, pos: &mut Vector2, collider: &BoxCollider, axis: Axis, delta: f32) -> bool {
    if delta == 0.0 {
        return false;
    }
    match axis {
        Axis::X => pos.x += delta,
        Axis::Y => pos.y += delta,
    }
    let (min, max) = collider.aabb(*pos);
    let mut blocked = false;
    for (tx, ty) in level.tiles_overlapping(min, max) {
        if !level.ground.has_tile(tx, ty) {
            continue;
        }
        let (tile_min, tile_max) = level.tile_rect(tx, ty);
        let (min, max) = collider.aabb(*pos);
        if !aabb_overlap(min, max, tile_min, tile_max) {
            continue;
        }
        match (axis, delta > 0.0) {
            (Axis::X, true) => pos.x -= max.x - tile_min.x,
            (Axis::X, false) => pos.x += tile_max.x - min.x,
            (Axis::Y, true) => pos.y -= max.y - tile_min.y,
            (Axis::Y, false) => pos.y += tile_max.y - min.y,
        }
        blocked = true;
    }
    blocked
}

fn land(rb: &mut RigidBody, body: &mut PlatformBody) {
    body.on_floor = true;
    if rb.velocity.y > 0.0 {
        let rebound = -rb.velocity.y * body.bounce;
        rb.velocity.y = if rebound.abs() < SETTLE_SPEED {
            0.0
        } else {
            rebound
        };
    }
}

fn clamp_to_map(
    map: Vector2,
    pos: &mut Vector2,
    collider: &BoxCollider,
    rb: &mut RigidBody,
    body: &mut PlatformBody,
) {
    let (min, max) = collider.aabb(*pos);
    if min.x < 0.0 {
        pos.x -= min.x;
        rb.velocity.x = rb.velocity.x.max(0.0);
    } else if max.x > map.x {
        pos.x -= max.x - map.x;
        rb.velocity.x = rb.velocity.x.min(0.0);
    }
    if min.y < 0.0 {
        pos.y -= min.y;
        rb.velocity.y = rb.velocity.y.max(0.0);
    } else if max.y >= map.y {
        pos.y -= max.y - map.y;
        land(rb, body);
    }
}

fn step_body(
    level: &Level,
    dt: f32,
    pos: &mut Vector2,
    collider: &BoxCollider,
    rb: &mut RigidBody,
    body: &mut PlatformBody,
) {
    body.on_floor = false;
    let acc = rb.total_acceleration();
    rb.velocity.x += acc.x * dt;
    rb.velocity.y += acc.y * dt;

    if move_axis(level, pos, collider, Axis::X, rb.velocity.x * dt) {
        rb.velocity.x = 0.0;
    }
    let dy = rb.velocity.y * dt;
    if move_axis(level, pos, collider, Axis::Y, dy) {
        if dy > 0.0 {
            land(rb, body);
        } else {
            rb.velocity.y = 0.0;
        }
    }
    clamp_to_map(level.pixel_size(), pos, collider, rb, body);
}

/// Integrate, collide and separate every platform body.
pub fn platform_physics(
    time: Res<WorldTime>,
    level: Option<Res<Level>>,
    mut query: Query<(
        &mut MapPosition,
        &mut RigidBody,
        &mut PlatformBody,
        &BoxCollider,
    )>,
) {
    let Some(level) = level else {
        return;
    };
    let dt = time.delta.clamp(0.0, MAX_STEP);

    for (mut pos, mut rb, mut body, collider) in query.iter_mut() {
        if rb.frozen {
            continue;
        }
        step_body(&level, dt, &mut pos.pos, collider, &mut rb, &mut body);
    }

    let mut pairs = query.iter_combinations_mut();
    while let Some([(mut pos_a, mut rb_a, mut body_a, col_a), (mut pos_b, mut rb_b, mut body_b, col_b)]) =
        pairs.fetch_next()
    {
        if rb_a.frozen || rb_b.frozen {
            continue;
        }
        let (a_min, a_max) = col_a.aabb(pos_a.pos);
        let (b_min, b_max) = col_b.aabb(pos_b.pos);
        if !aabb_overlap(a_min, a_max, b_min, b_max) {
            continue;
        }
        let overlap_x = a_max.x.min(b_max.x) - a_min.x.max(b_min.x);
        let overlap_y = a_max.y.min(b_max.y) - a_min.y.max(b_min.y);

        if overlap_y <= overlap_x {
            // upper body rests on the lower one
            if a_min.y + a_max.y < b_min.y + b_max.y {
                move_axis(&level, &mut pos_a.pos, col_a, Axis::Y, -overlap_y);
                rb_a.velocity.y = rb_a.velocity.y.min(0.0);
                body_a.on_floor = true;
            } else {
                move_axis(&level, &mut pos_b.pos, col_b, Axis::Y, -overlap_y);
                rb_b.velocity.y = rb_b.velocity.y.min(0.0);
                body_b.on_floor = true;
            }
        } else {
            let push = overlap_x * 0.5;
            let dir = if a_min.x + a_max.x < b_min.x + b_max.x {
                -1.0
            } else {
                1.0
            };
            move_axis(&level, &mut pos_a.pos, col_a, Axis::X, dir * push);
            move_axis(&level, &mut pos_b.pos, col_b, Axis::X, -dir * push);
        }
    }
}

/// Publish `"walking"` and `"on_floor"` flags for the animation controller.
pub fn update_motion_signals(mut query: Query<(&RigidBody, &PlatformBody, &mut Signals)>) {
    for (rb, body, mut signals) in query.iter_mut() {
        signals.put_flag("walking", rb.velocity.x.abs() > WALK_THRESHOLD);
        signals.put_flag("on_floor", body.on_floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::Tilemap;

    const DT: f32 = 1.0 / 60.0;

    /// 6×4 map of 70 px tiles, ground on the bottom row and a wall at x=4.
    fn level() -> Level {
        let map = Tilemap::from_json(
            r#"{"tile_size":70,"map_width":6,"map_height":4,"layers":[
                {"name":"World","positions":[
                    {"x":0,"y":3,"id":1},{"x":1,"y":3,"id":1},{"x":2,"y":3,"id":1},
                    {"x":3,"y":3,"id":1},{"x":4,"y":3,"id":1},{"x":4,"y":2,"id":1}
                ]}
            ]}"#,
        )
        .unwrap();
        Level::from_tilemap(&map).unwrap()
    }

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(level());
        let mut time = WorldTime::default();
        time.delta = DT;
        world.insert_resource(time);
        world
    }

    fn spawn_body(world: &mut World, x: f32, y: f32) -> Entity {
        world
            .spawn((
                MapPosition::new(x, y),
                RigidBody::with_gravity(500.0),
                PlatformBody::new(0.2),
                BoxCollider::new(50.0, 50.0),
                Signals::default(),
            ))
            .id()
    }

    fn run_frames(world: &mut World, frames: usize) {
        let mut schedule = Schedule::default();
        schedule.add_systems((platform_physics, update_motion_signals).chain());
        for _ in 0..frames {
            schedule.run(world);
        }
    }

    #[test]
    fn falls_lands_and_settles_on_ground() {
        let mut world = world();
        let e = spawn_body(&mut world, 20.0, 60.0);
        run_frames(&mut world, 120);

        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert!((pos.y - 160.0).abs() < 0.01, "y = {}", pos.y);
        assert!(world.get::<PlatformBody>(e).unwrap().on_floor);
        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 0.0);
        assert!(world.get::<Signals>(e).unwrap().has_flag("on_floor"));
    }

    #[test]
    fn hard_landing_bounces() {
        let mut world = world();
        let e = spawn_body(&mut world, 20.0, 155.0);
        world.get_mut::<RigidBody>(e).unwrap().velocity.y = 600.0;
        run_frames(&mut world, 1);
        let vy = world.get::<RigidBody>(e).unwrap().velocity.y;
        assert!(vy < -SETTLE_SPEED, "vy = {}", vy);
        assert!(world.get::<PlatformBody>(e).unwrap().on_floor);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let mut world = world();
        let e = spawn_body(&mut world, 220.0, 160.0);
        for _ in 0..30 {
            world.get_mut::<RigidBody>(e).unwrap().velocity.x = 200.0;
            run_frames(&mut world, 1);
        }
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert!((pos.x - 230.0).abs() < 0.01, "x = {}", pos.x);
        assert!(!world.get::<Signals>(e).unwrap().has_flag("walking"));
    }

    #[test]
    fn map_edges_contain_the_body() {
        let mut world = world();
        let e = spawn_body(&mut world, 2.0, 20.0);
        world.get_mut::<RigidBody>(e).unwrap().velocity = Vector2 { x: -300.0, y: -300.0 };
        run_frames(&mut world, 1);
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert!(pos.x >= 0.0);
        assert!(pos.y >= 0.0);
    }

    #[test]
    fn map_floor_counts_as_floor() {
        let mut world = world();
        // column 5 has no ground tile
        let e = spawn_body(&mut world, 360.0, 200.0);
        run_frames(&mut world, 120);
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        assert!((pos.y - 230.0).abs() < 0.01, "y = {}", pos.y);
        assert!(world.get::<PlatformBody>(e).unwrap().on_floor);
    }

    #[test]
    fn side_by_side_bodies_are_pushed_apart() {
        let mut world = world();
        let a = spawn_body(&mut world, 100.0, 160.0);
        let b = spawn_body(&mut world, 130.0, 160.0);
        run_frames(&mut world, 1);
        let pa = world.get::<MapPosition>(a).unwrap().pos;
        let pb = world.get::<MapPosition>(b).unwrap().pos;
        assert!((pb.x - pa.x) >= 50.0 - 0.01);
        assert!((pa.x - 90.0).abs() < 0.01);
        assert!((pb.x - 140.0).abs() < 0.01);
    }

    #[test]
    fn body_can_stand_on_another() {
        let mut world = world();
        let bottom = spawn_body(&mut world, 100.0, 160.0);
        let top = spawn_body(&mut world, 105.0, 105.0);
        run_frames(&mut world, 60);
        let pb = world.get::<MapPosition>(bottom).unwrap().pos;
        let pt = world.get::<MapPosition>(top).unwrap().pos;
        assert!((pt.y - (pb.y - 50.0)).abs() < 0.5, "top {} bottom {}", pt.y, pb.y);
        assert!(world.get::<PlatformBody>(top).unwrap().on_floor);
    }

    #[test]
    fn frozen_bodies_do_not_move() {
        let mut world = world();
        let e = spawn_body(&mut world, 20.0, 20.0);
        world.get_mut::<RigidBody>(e).unwrap().freeze();
        run_frames(&mut world, 10);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos.y, 20.0);
    }
}
