//! Rendering.
//!
//! [`render_system`] draws one frame inside raylib's drawing scopes:
//!
//! 1. clear with the current [`Backdrop`] cue;
//! 2. in camera space, the visible part of the ground, coin and hazard
//!    layers, then sprites ordered by [`ZIndex`];
//! 3. collider outlines when [`DebugMode`] is present;
//! 4. in screen space, HUD texts and the debug overlay.
//!
//! Missing textures are replaced by coloured rectangles so the game stays
//! playable without its assets.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::mapposition::MapPosition;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::backdrop::Backdrop;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::level::{Level, TileLayer};
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::{TILES_TEXTURE, TextureStore};
use crate::resources::turncontroller::TurnController;
use crate::resources::worldtime::WorldTime;

const GROUND_COLOR: Color = Color::new(0x8b, 0x5a, 0x2b, 0xff);
const COIN_COLOR: Color = Color::new(0xff, 0xcb, 0x00, 0xff);
const HAZARD_COLOR: Color = Color::new(0xe6, 0x29, 0x37, 0xff);

/// World rectangle `(min, max)` seen through `cam` on a screen of `screen` pixels.
pub fn visible_world_rect(cam: &Camera2D, screen: Vector2) -> (Vector2, Vector2) {
    let zoom = if cam.zoom > 0.0 { cam.zoom } else { 1.0 };
    let min = Vector2 {
        x: cam.target.x - cam.offset.x / zoom,
        y: cam.target.y - cam.offset.y / zoom,
    };
    let max = Vector2 {
        x: min.x + screen.x / zoom,
        y: min.y + screen.y / zoom,
    };
    (min, max)
}

/// Source rectangle of tile `id` in a tileset of `columns` columns.
pub fn tile_source(id: u32, columns: u32, tile_size: f32) -> Rectangle {
    let columns = columns.max(1);
    Rectangle {
        x: (id % columns) as f32 * tile_size,
        y: (id / columns) as f32 * tile_size,
        width: tile_size,
        height: tile_size,
    }
}

fn draw_layer(
    d: &mut impl RaylibDraw,
    level: &Level,
    layer: &TileLayer,
    visible: &[(u32, u32)],
    tileset: Option<&Texture2D>,
    fallback: Color,
) {
    let ts = level.tile_size;
    for &(x, y) in visible {
        let Some(id) = layer.get(x, y) else {
            continue;
        };
        let (min, _) = level.tile_rect(x, y);
        match tileset {
            Some(tex) => {
                let columns = (tex.width as f32 / ts) as u32;
                let dest = Rectangle {
                    x: min.x,
                    y: min.y,
                    width: ts,
                    height: ts,
                };
                d.draw_texture_pro(
                    tex,
                    tile_source(id, columns, ts),
                    dest,
                    Vector2::zero(),
                    0.0,
                    Color::WHITE,
                );
            }
            None => d.draw_rectangle_v(min, Vector2 { x: ts, y: ts }, fallback),
        }
    }
}

/// Phase, holder and upcoming player of the turn cycle.
pub fn turn_debug_line(turns: &TurnController, now_ms: u64) -> String {
    let state = turns.state();
    let holder = match state.active {
        Some(index) => format!("P{}", index + 1),
        None => "-".to_string(),
    };
    format!(
        "Turn: {:?} holder={} next=P{} left={} ms",
        state.phase,
        holder,
        turns.upcoming_player() + 1,
        turns.remaining_ms(now_ms)
    )
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    time: Res<WorldTime>,
    backdrop: Res<Backdrop>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    textures: Res<TextureStore>,
    level: Option<Res<Level>>,
    debug: Option<Res<DebugMode>>,
    turns: Option<Res<TurnController>>,
    sprites: Query<(&Sprite, &MapPosition, Option<&ZIndex>, Option<&Tint>)>,
    colliders: Query<(&BoxCollider, &MapPosition)>,
    texts: Query<(&DynamicText, &ScreenPosition)>,
) {
    let cam = camera.0;
    let (view_min, view_max) = visible_world_rect(&cam, screen.as_vec());

    let mut d = rl.begin_drawing(&thread);
    d.clear_background(backdrop.cue_at(time.elapsed_ms()).color());

    {
        let mut d2 = d.begin_mode2D(cam);

        if let Some(level) = level.as_deref() {
            let visible = level.tiles_overlapping(view_min, view_max);
            let tileset = textures.get(TILES_TEXTURE);
            draw_layer(&mut d2, level, &level.ground, &visible, tileset, GROUND_COLOR);
            draw_layer(&mut d2, level, &level.hazards, &visible, tileset, HAZARD_COLOR);
            draw_layer(&mut d2, level, &level.coins, &visible, tileset, COIN_COLOR);
        }

        let mut to_draw: Vec<(&Sprite, &MapPosition, i32, Color)> = sprites
            .iter()
            .filter(|(s, p, _, _)| {
                !(p.pos.x + s.width < view_min.x
                    || p.pos.x > view_max.x
                    || p.pos.y + s.height < view_min.y
                    || p.pos.y > view_max.y)
            })
            .map(|(s, p, z, tint)| {
                (
                    s,
                    p,
                    z.map_or(0, |z| z.0),
                    tint.map_or(Color::WHITE, |t| t.color),
                )
            })
            .collect();
        to_draw.sort_by_key(|(_, _, z, _)| *z);

        for (sprite, pos, _, tint) in to_draw {
            let dest = Rectangle {
                x: pos.pos.x,
                y: pos.pos.y,
                width: sprite.width,
                height: sprite.height,
            };
            match textures.get(&sprite.tex_key) {
                Some(tex) => {
                    // negative source width mirrors the frame
                    let width = if sprite.flip_h {
                        -sprite.width
                    } else {
                        sprite.width
                    };
                    let src = Rectangle {
                        x: sprite.offset.x,
                        y: sprite.offset.y,
                        width,
                        height: sprite.height,
                    };
                    d2.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, tint);
                }
                None => d2.draw_rectangle_rec(dest, tint),
            }
        }

        if debug.is_some() {
            for (collider, position) in colliders.iter() {
                let (min, max) = collider.aabb(position.pos);
                d2.draw_rectangle_lines(
                    min.x as i32,
                    min.y as i32,
                    (max.x - min.x) as i32,
                    (max.y - min.y) as i32,
                    Color::RED,
                );
            }
        }
    }

    for (text, pos) in texts.iter() {
        if text.content.is_empty() {
            continue;
        }
        d.draw_text(
            &text.content,
            pos.pos.x as i32,
            pos.pos.y as i32,
            text.font_size as i32,
            text.color,
        );
    }

    if debug.is_some() {
        let fps = d.get_fps();
        d.draw_text(
            &format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
            10,
            10,
            10,
            Color::BLACK,
        );
        if let Some(level) = level.as_deref() {
            d.draw_text(
                &format!(
                    "Coins: {}/{}",
                    level.coins_total - level.coins_remaining,
                    level.coins_total
                ),
                10,
                30,
                10,
                Color::BLACK,
            );
        }
        if let Some(turns) = turns.as_deref() {
            d.draw_text(
                &turn_debug_line(turns, time.elapsed_ms()),
                10,
                50,
                10,
                Color::BLACK,
            );
        }
        d.draw_text(
            &format!(
                "Camera pos: ({:.1}, {:.1}) Zoom: {:.2}",
                cam.target.x, cam.target.y, cam.zoom
            ),
            10,
            screen.h - 30,
            10,
            Color::BLACK,
        );
    }
}
