//! Shared 2D camera resources.
//!
//! [`Camera2DRes`] wraps raylib's [`Camera2D`] so render and camera systems
//! agree on one world/screen transform. [`CameraFollow`] says which player
//! the camera is tracking.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera with the target at the world origin and the offset at the
    /// centre of a `width` × `height` screen.
    pub fn centered(width: f32, height: f32) -> Self {
        Self(Camera2D {
            target: Vector2 { x: 0.0, y: 0.0 },
            offset: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}

/// Player index the camera should centre on.
///
/// Set to the upcoming player whenever a turn ends, so everybody sees who
/// acts next during the neutral window.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraFollow {
    pub player: usize,
}

/// Camera target that centres on `focus` without showing outside the map.
///
/// When the map is smaller than the view along an axis, the map is centred
/// on that axis instead.
pub fn clamp_camera_target(focus: Vector2, view: Vector2, map: Vector2) -> Vector2 {
    let clamp_axis = |focus: f32, view: f32, map: f32| {
        let half = view * 0.5;
        if map <= view {
            map * 0.5
        } else {
            focus.clamp(half, map - half)
        }
    };
    Vector2 {
        x: clamp_axis(focus.x, view.x, map.x),
        y: clamp_axis(focus.y, view.y, map.y),
    }
}
