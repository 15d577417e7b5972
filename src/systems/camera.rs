//! Camera follow system.
//!
//! Centres [`Camera2DRes`] on the player named by [`CameraFollow`], keeping
//! the view inside the level. Nothing moves when that player does not exist.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::camera2d::{Camera2DRes, CameraFollow, clamp_camera_target};
use crate::resources::level::Level;
use crate::resources::screensize::ScreenSize;

pub fn camera_follow_system(
    follow: Res<CameraFollow>,
    screen: Res<ScreenSize>,
    level: Option<Res<Level>>,
    mut camera: ResMut<Camera2DRes>,
    players: Query<(&Player, &MapPosition, Option<&Sprite>)>,
) {
    let Some(level) = level else {
        return;
    };
    let Some((_, pos, sprite)) = players.iter().find(|(p, _, _)| p.index == follow.player) else {
        return;
    };
    let focus = match sprite {
        Some(s) => Vector2 {
            x: pos.pos.x + s.width * 0.5,
            y: pos.pos.y + s.height * 0.5,
        },
        None => pos.pos,
    };
    let view = screen.as_vec();
    camera.0.target = clamp_camera_target(focus, view, level.pixel_size());
    camera.0.offset = Vector2 {
        x: view.x * 0.5,
        y: view.y * 0.5,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::Tilemap;

    fn setup() -> World {
        let mut world = World::new();
        let map = Tilemap::from_json(
            r#"{"tile_size":70,"map_width":30,"map_height":12,"layers":[{"name":"World","positions":[]}]}"#,
        )
        .unwrap();
        world.insert_resource(Level::from_tilemap(&map).unwrap());
        world.insert_resource(ScreenSize { w: 800, h: 600 });
        world.insert_resource(Camera2DRes::centered(800.0, 600.0));
        world.insert_resource(CameraFollow { player: 1 });
        world.spawn((Player::new(0, 3000), MapPosition::new(100.0, 100.0)));
        world.spawn((
            Player::new(1, 3000),
            MapPosition::new(964.0, 400.0),
            Sprite::new("player", 72.0, 97.0),
        ));
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(camera_follow_system);
        schedule.run(world);
    }

    #[test]
    fn centres_on_followed_player() {
        let mut world = setup();
        run(&mut world);
        let cam = &world.resource::<Camera2DRes>().0;
        assert_eq!((cam.target.x, cam.target.y), (1000.0, 448.5));
        assert_eq!((cam.offset.x, cam.offset.y), (400.0, 300.0));
    }

    #[test]
    fn view_is_clamped_to_map() {
        let mut world = setup();
        world.resource_mut::<CameraFollow>().player = 0;
        run(&mut world);
        let cam = &world.resource::<Camera2DRes>().0;
        assert_eq!((cam.target.x, cam.target.y), (400.0, 300.0));
    }

    #[test]
    fn unknown_player_leaves_camera_alone() {
        let mut world = setup();
        world.resource_mut::<CameraFollow>().player = 3;
        run(&mut world);
        let cam = &world.resource::<Camera2DRes>().0;
        assert_eq!((cam.target.x, cam.target.y), (0.0, 0.0));
    }
}
