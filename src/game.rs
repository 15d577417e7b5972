//! Game state hooks.
//!
//! These systems are registered in [`SystemsStore`](crate::resources::systemsstore::SystemsStore)
//! and run by the game state observer when a state is entered:
//!
//! - [`setup`] – load textures, animations and sound effects, then start playing
//! - [`enter_play`] – build a fresh session from the level template
//! - [`enter_round_complete`] – freeze everybody and show the final scores
//! - [`quit_game`] – ask the main loop to stop
//!
//! [`on_input_action`] maps the shared keys to state changes.

use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::prelude::*;

use crate::components::animation::{Animation, AnimationController, Condition};
use crate::components::boxcollider::BoxCollider;
use crate::components::dynamictext::DynamicText;
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::platformbody::PlatformBody;
use crate::components::player::{Player, player_color};
use crate::components::rigidbody::RigidBody;
use crate::components::screenposition::ScreenPosition;
use crate::components::signalbinding::SignalBinding;
use crate::components::signals::Signals;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::events::audio::AudioCmd;
use crate::events::input::{InputAction, InputEvent};
use crate::resources::animationstore::{PLAYER_IDLE, PLAYER_WALK, player_animations};
use crate::resources::audio::FxPlayback;
use crate::resources::backdrop::{Backdrop, BackdropCue};
use crate::resources::camera2d::{Camera2DRes, CameraFollow};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::level::{Level, LevelTemplate, SpawnRng};
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::{PLAYER_TEXTURE, TILES_TEXTURE, TextureStore};
use crate::resources::turncontroller::TurnController;
use crate::resources::worldsignals::{WorldSignals, score_key};
use crate::resources::worldtime::WorldTime;
use crate::systems::pickups::{COIN_FX, DEATH_FX};
use crate::systems::turns::{COUNTDOWN_SIGNAL, TURN_LABEL_SIGNAL};

/// Player frame size in the spritesheet.
pub const PLAYER_WIDTH: f32 = 72.0;
pub const PLAYER_HEIGHT: f32 = 97.0;
/// The collider is the frame shrunk by this much on every side.
pub const PLAYER_COLLIDER_INSET: f32 = 15.0;

/// HUD key for the end-of-round summary.
pub const ROUND_BANNER_SIGNAL: &str = "round_banner";
/// World flag that stops the main loop.
pub const QUIT_FLAG: &str = "quit_game";

const HUD_FONT_SIZE: f32 = 20.0;
const HUD_COLOR: Color = Color::BLACK;

pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    config: Res<GameConfig>,
    template: Option<Res<LevelTemplate>>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    if template.is_none() {
        error!("No level loaded, nothing to play");
        next_state.set(GameStates::Quitting);
        return;
    }

    commands.insert_resource(Camera2DRes::centered(
        rl.get_screen_width() as f32,
        rl.get_screen_height() as f32,
    ));

    let mut textures = TextureStore::default();
    textures.load(&mut rl, &th, TILES_TEXTURE, "./assets/textures/tiles.png");
    textures.load(&mut rl, &th, PLAYER_TEXTURE, "./assets/textures/player.png");
    commands.insert_resource(textures);

    commands.insert_resource(player_animations(PLAYER_TEXTURE, PLAYER_WIDTH));

    if config.audio_enabled {
        for (id, path) in [
            (COIN_FX, "./assets/audio/coin.wav"),
            (DEATH_FX, "./assets/audio/death.wav"),
        ] {
            audio_cmd_writer.write(AudioCmd::LoadFx {
                id: id.to_string(),
                path: path.to_string(),
            });
        }
    }
    commands.insert_resource(FxPlayback::new(config.audio_enabled));

    next_state.set(GameStates::Playing);
}

fn spawn_player(commands: &mut Commands, level: &Level, config: &GameConfig, index: usize) {
    let inset = PLAYER_COLLIDER_INSET;
    commands.spawn((
        Player::new(index, config.turns.base_turn_ms),
        MapPosition::from_vec(level.initial_spawn(index)),
        RigidBody::with_gravity(config.physics.gravity),
        PlatformBody::new(config.physics.bounce),
        BoxCollider::new(PLAYER_WIDTH - 2.0 * inset, PLAYER_HEIGHT - 2.0 * inset)
            .with_offset(Vector2 { x: inset, y: inset }),
        Sprite::new(PLAYER_TEXTURE, PLAYER_WIDTH, PLAYER_HEIGHT),
        Tint::new(player_color(index)),
        ZIndex(10 + index as i32),
        Signals::default(),
        Animation::new(PLAYER_IDLE),
        // walk only with feet on the ground; airborne shows the idle frame
        AnimationController::new(PLAYER_IDLE).with_rule(
            Condition::All(vec![Condition::flag("walking"), Condition::flag("on_floor")]),
            PLAYER_WALK,
        ),
    ));
}

fn spawn_hud(commands: &mut Commands, screen: &ScreenSize, players: usize) {
    let w = screen.w as f32;
    let h = screen.h as f32;

    for index in 0..players {
        commands.spawn((
            DynamicText::new(
                format!("Player {}: 0", index + 1),
                HUD_FONT_SIZE,
                HUD_COLOR,
            ),
            ScreenPosition::new(20.0 + 160.0 * index as f32, h - 30.0),
            SignalBinding::new(score_key(index)).with_format(format!("Player {}: {{}}", index + 1)),
        ));
    }
    commands.spawn((
        DynamicText::new("", HUD_FONT_SIZE * 1.5, HUD_COLOR),
        ScreenPosition::new(w * 0.5 - 20.0, 20.0),
        SignalBinding::new(COUNTDOWN_SIGNAL),
    ));
    commands.spawn((
        DynamicText::new("", HUD_FONT_SIZE * 1.5, HUD_COLOR),
        ScreenPosition::new(w * 0.5 - 140.0, h * 0.5 - 80.0),
        SignalBinding::new(TURN_LABEL_SIGNAL),
    ));
    commands.spawn((
        DynamicText::new("", HUD_FONT_SIZE, HUD_COLOR),
        ScreenPosition::new(40.0, h * 0.5 - 40.0),
        SignalBinding::new(ROUND_BANNER_SIGNAL),
    ));
}

/// Start a new session: fresh level, players, HUD and turn cycle.
///
/// Everything not marked [`Persistent`] is despawned first and every
/// per-session resource is replaced, so nothing from the previous round
/// (timers included) survives.
#[allow(clippy::too_many_arguments)]
pub fn enter_play(
    mut commands: Commands,
    template: Option<Res<LevelTemplate>>,
    config: Res<GameConfig>,
    time: Res<WorldTime>,
    screen: Res<ScreenSize>,
    stale: Query<Entity, Without<Persistent>>,
    mut next_state: ResMut<NextGameState>,
) {
    for entity in stale.iter() {
        commands.entity(entity).despawn();
    }

    let Some(template) = template else {
        error!("enter_play: no level template");
        next_state.set(GameStates::Quitting);
        return;
    };
    let controller = match TurnController::new(config.players, config.turns, time.elapsed_ms()) {
        Ok(controller) => controller,
        Err(e) => {
            error!("enter_play: {}", e);
            next_state.set(GameStates::Quitting);
            return;
        }
    };
    let level = template.0.clone();

    let mut signals = WorldSignals::default();
    for index in 0..config.players {
        signals.set_integer(score_key(index), 0);
        spawn_player(&mut commands, &level, &config, index);
    }
    spawn_hud(&mut commands, &screen, config.players);

    info!(
        "New round: {} players, {} coins",
        config.players, level.coins_total
    );
    commands.insert_resource(level);
    commands.insert_resource(controller);
    commands.insert_resource(signals);
    commands.insert_resource(Backdrop::default());
    commands.insert_resource(CameraFollow::default());
    commands.insert_resource(SpawnRng::default());
}

/// One line summarising every score, in player order.
pub fn round_summary(players: &[&Player]) -> String {
    let mut sorted: Vec<&&Player> = players.iter().collect();
    sorted.sort_by_key(|p| p.index);
    let scores: Vec<String> = sorted
        .iter()
        .map(|p| format!("{}: {}", p.label(), p.score))
        .collect();
    format!(
        "Round complete! {}. Press Enter to play again.",
        scores.join("  ")
    )
}

/// Every coin is gone: stop the turn cycle and freeze all players.
pub fn enter_round_complete(
    mut commands: Commands,
    mut players: Query<(&mut Player, &mut RigidBody)>,
    mut signals: ResMut<WorldSignals>,
    mut backdrop: ResMut<Backdrop>,
) {
    commands.remove_resource::<TurnController>();
    for (mut player, mut rb) in players.iter_mut() {
        player.has_control = false;
        rb.stop();
        rb.freeze();
    }
    let summary = {
        let all: Vec<&Player> = players.iter().map(|(p, _)| p).collect();
        round_summary(&all)
    };
    info!("{}", summary);
    signals.set_string(COUNTDOWN_SIGNAL, "");
    signals.set_string(TURN_LABEL_SIGNAL, "");
    signals.set_string(ROUND_BANNER_SIGNAL, summary);
    backdrop.set_base(BackdropCue::Normal);
}

pub fn quit_game(mut signals: ResMut<WorldSignals>) {
    info!("Quitting");
    signals.set_flag(QUIT_FLAG);
}

/// Back quits from anywhere; confirm restarts once a round is complete.
pub fn on_input_action(
    trigger: On<InputEvent>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    if !event.pressed {
        return;
    }
    match (event.action, state.get()) {
        (InputAction::Back, _) => next_state.set(GameStates::Quitting),
        (InputAction::Confirm, GameStates::RoundComplete) => next_state.set(GameStates::Playing),
        _ => {}
    }
}
