//! swapjump main entry point.
//!
//! A local multiplayer platformer written in Rust using:
//! - **raylib** for windowing, graphics, input and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Two to four players share one keyboard and take turns: only one of them
//! can move at a time, a short neutral window separates turns, and whoever
//! trails in coins gets longer turns.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (players, bodies, sprites, HUD texts)
//! - [`events`] – events and observers (pickups, input, game state, audio)
//! - [`game`] – state hooks: setup, session rebuild, round end, quit
//! - [`resources`] – ECS resources (turn controller, level, config, stores)
//! - [`systems`] – ECS systems (turns, physics, pickups, rendering)
//!
//! # Main Loop
//!
//! 1. Parse CLI flags and read `config.ini`
//! 2. Load the level, open the window, build the ECS world
//! 3. Register state hooks and observers, enter `Setup`
//! 4. Every frame: input, turns, control, physics, pickups, animation, render
//! 5. Stop the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --players 3
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::components::persistent::Persistent;
use crate::events::gamestate::GameStateChangedEvent;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::audio::{AudioBridge, init_audio_messages, setup_audio, shutdown_audio};
use crate::resources::backdrop::Backdrop;
use crate::resources::camera2d::CameraFollow;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputState, MAX_PLAYERS};
use crate::resources::level::{Level, LevelTemplate, SpawnRng};
use crate::resources::screensize::ScreenSize;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::tilemap::Tilemap;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animation, animation_controller};
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, track_fx_playback, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::camera::camera_follow_system;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::input::update_input_state;
use crate::systems::pickups::{coin_collected_observer, hazard_touched_observer, pickup_system};
use crate::systems::platformphysics::{platform_physics, update_motion_signals};
use crate::systems::playercontroller::player_controller;
use crate::systems::render::render_system;
use crate::systems::signalbinding::update_world_signals_binding_system;
use crate::systems::time::update_world_time;
use crate::systems::turns::turn_system;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// swapjump: take turns, grab coins, dodge spikes
#[derive(Parser)]
#[command(version, about = "Local multiplayer platformer where players take turns.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level JSON file, overrides the config file.
    #[arg(long, value_name = "PATH")]
    level: Option<String>,

    /// Number of players sharing the keyboard (1-4).
    #[arg(long, value_name = "N")]
    players: Option<usize>,

    /// Run without sound.
    #[arg(long)]
    no_audio: bool,
}

fn load_level(path: &str) -> Result<Level, String> {
    let tilemap = Tilemap::load(path)?;
    Level::from_tilemap(&tilemap).map_err(|e| format!("Invalid level '{}': {}", path, e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(level) = cli.level {
        config.level_path = level;
    }
    if let Some(players) = cli.players {
        config.players = players;
    }
    if cli.no_audio {
        config.audio_enabled = false;
    }
    if config.players == 0 || config.players > MAX_PLAYERS {
        eprintln!("Error: players must be between 1 and {}", MAX_PLAYERS);
        std::process::exit(1);
    }

    let level = match load_level(&config.level_path) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Level '{}': {}x{} tiles, {} coins, {} spawn points",
        config.level_path,
        level.width,
        level.height,
        level.coins_total,
        level.spawn_points.len()
    );

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .title("swapjump");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Escape is the quit key, handled as an input action
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(WorldSignals::default());
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::for_players(config.players));
    world.insert_resource(Backdrop::default());
    world.insert_resource(CameraFollow::default());
    world.insert_resource(SpawnRng::default());
    world.insert_resource(LevelTemplate(level));

    // Audio queues must exist before setup writes LoadFx
    if config.audio_enabled {
        setup_audio(&mut world);
    } else {
        init_audio_messages(&mut world);
    }
    world.insert_resource(config);

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    // Registered systems are entities; `register` marks them Persistent.
    let mut systems_store = SystemsStore::new();
    systems_store.register(&mut world, "setup", game::setup);
    systems_store.register(&mut world, "enter_play", game::enter_play);
    systems_store.register(&mut world, "enter_round_complete", game::enter_round_complete);
    systems_store.register(&mut world, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(game::on_input_action), Persistent));
    world.spawn((Observer::new(coin_collected_observer), Persistent));
    world.spawn((Observer::new(hazard_touched_observer), Persistent));
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup immediately
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(update_input_state);
    update.add_systems(check_pending_state.after(update_input_state));
    update.add_systems(
        // audio systems must be together
        (
            update_bevy_audio_cmds,
            forward_audio_cmds.run_if(resource_exists::<AudioBridge>),
            poll_audio_messages.run_if(resource_exists::<AudioBridge>),
            update_bevy_audio_messages,
            track_fx_playback,
        )
            .chain(),
    );
    update.add_systems(
        (
            turn_system,
            player_controller,
            platform_physics,
            pickup_system,
            update_motion_signals,
        )
            .chain()
            .run_if(state_is_playing)
            .after(check_pending_state),
    );
    update.add_systems(animation_controller.after(update_motion_signals));
    update.add_systems(animation.after(animation_controller));
    update.add_systems(camera_follow_system.after(platform_physics));
    update.add_systems(update_world_signals_binding_system.after(pickup_system));
    update.add_systems(
        render_system
            .after(animation)
            .after(camera_follow_system)
            .after(update_world_signals_binding_system),
    );

    if let Err(e) = update.initialize(&mut world) {
        eprintln!("Error: failed to initialize schedule: {e}");
        std::process::exit(1);
    }

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<WorldSignals>().has_flag(game::QUIT_FLAG)
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    shutdown_audio(&mut world);
}
