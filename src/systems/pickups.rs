//! Coin and hazard contacts.
//!
//! [`pickup_system`] checks each player's collider against the coin and
//! hazard layers. Coins are removed from the level and credited to the
//! player, whether or not that player currently holds control. A hazard
//! moves the player back to a spawn point. Once the last coin is gone the
//! round is over.
//!
//! The observers add the feedback: HUD score values, sound effects and the
//! red background flash.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::pickup::{CoinCollectedEvent, HazardTouchedEvent};
use crate::resources::audio::FxPlayback;
use crate::resources::backdrop::Backdrop;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState, NextGameStates};
use crate::resources::level::{Level, SpawnRng};
use crate::resources::worldsignals::{WorldSignals, score_key};
use crate::resources::worldtime::WorldTime;

/// Sound effect played on coin pickup.
pub const COIN_FX: &str = "coin";
/// Sound effect played on hazard contact.
pub const DEATH_FX: &str = "death";

pub fn pickup_system(
    mut commands: Commands,
    level: Option<ResMut<Level>>,
    mut rng: ResMut<SpawnRng>,
    mut next_state: ResMut<NextGameState>,
    mut players: Query<(Entity, &mut Player, &mut MapPosition, &mut RigidBody, &BoxCollider)>,
) {
    let Some(mut level) = level else {
        return;
    };

    for (entity, mut player, mut pos, mut rb, collider) in players.iter_mut() {
        let (min, max) = collider.aabb(pos.pos);
        let tiles = level.tiles_overlapping(min, max);

        for &(tx, ty) in &tiles {
            if level.collect_coin(tx, ty) {
                player.score += 1;
                debug!("{} collected coin at ({}, {})", player.label(), tx, ty);
                commands.trigger(CoinCollectedEvent {
                    entity,
                    player: player.index,
                    tile: (tx, ty),
                    score: player.score,
                });
            }
        }

        if tiles.iter().any(|&(tx, ty)| level.hazards.has_tile(tx, ty)) {
            let spawn = level.pick_spawn(&mut rng.0);
            debug!(
                "{} touched a hazard, respawning at ({}, {})",
                player.label(),
                spawn.x,
                spawn.y
            );
            pos.pos = spawn;
            rb.stop();
            commands.trigger(HazardTouchedEvent {
                entity,
                player: player.index,
            });
        }
    }

    if level.all_coins_collected() && *next_state.get() == NextGameStates::Unchanged {
        info!("All {} coins collected", level.coins_total);
        next_state.set(GameStates::RoundComplete);
    }
}

/// Play `id` unless it is disabled, unloaded or already audible.
fn play_fx(fx: &mut FxPlayback, audio_cmds: &mut MessageWriter<AudioCmd>, id: &str) {
    if fx.play_once(id) {
        audio_cmds.write(AudioCmd::PlayFx { id: id.to_string() });
    }
}

pub fn coin_collected_observer(
    trigger: On<CoinCollectedEvent>,
    mut signals: ResMut<WorldSignals>,
    mut fx: ResMut<FxPlayback>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let event = trigger.event();
    signals.set_integer(score_key(event.player), event.score as i32);
    play_fx(&mut fx, &mut audio_cmds, COIN_FX);
}

pub fn hazard_touched_observer(
    _trigger: On<HazardTouchedEvent>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut backdrop: ResMut<Backdrop>,
    mut fx: ResMut<FxPlayback>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    backdrop.flash_danger(time.elapsed_ms(), config.danger_flash_ms);
    play_fx(&mut fx, &mut audio_cmds, DEATH_FX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::audio::init_audio_messages;
    use crate::resources::backdrop::BackdropCue;
    use crate::resources::tilemap::Tilemap;
    use raylib::prelude::Vector2;

    /// 4×2 map of 10 px tiles: coins at (1,0) and (2,0), a hazard at (3,1).
    fn level() -> Level {
        let map = Tilemap::from_json(
            r#"{"tile_size":10,"map_width":4,"map_height":2,"layers":[
                {"name":"World","positions":[{"x":0,"y":1,"id":1}]},
                {"name":"Coins","positions":[{"x":1,"y":0,"id":17},{"x":2,"y":0,"id":17}]},
                {"name":"Hazards","positions":[{"x":3,"y":1,"id":5}]}
            ],
            "spawn_points":[{"name":"start","x":0.0,"y":0.0}]}"#,
        )
        .unwrap();
        Level::from_tilemap(&map).unwrap()
    }

    fn setup() -> World {
        let mut world = World::new();
        world.insert_resource(level());
        world.insert_resource(SpawnRng(fastrand::Rng::with_seed(3)));
        world.insert_resource(NextGameState::new());
        world.insert_resource(WorldSignals::default());
        world.insert_resource(WorldTime::default());
        world.insert_resource(GameConfig::new());
        world.insert_resource(Backdrop::default());
        let mut fx = FxPlayback::new(true);
        fx.mark_loaded(COIN_FX);
        fx.mark_loaded(DEATH_FX);
        world.insert_resource(fx);
        init_audio_messages(&mut world);
        world.add_observer(coin_collected_observer);
        world.add_observer(hazard_touched_observer);
        world
    }

    fn spawn_player(world: &mut World, index: usize, x: f32, y: f32) -> Entity {
        world
            .spawn((
                Player::new(index, 3000),
                MapPosition::new(x, y),
                RigidBody::new(),
                BoxCollider::new(8.0, 8.0),
            ))
            .id()
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(pickup_system);
        schedule.run(world);
    }

    fn play_requests(world: &mut World) -> Vec<String> {
        let mut cmds = world.resource_mut::<Messages<AudioCmd>>();
        cmds.drain()
            .filter_map(|c| match c {
                AudioCmd::PlayFx { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn coin_is_credited_once_even_without_control() {
        let mut world = setup();
        let p = spawn_player(&mut world, 1, 11.0, 1.0);
        run(&mut world);
        run(&mut world);

        assert_eq!(world.get::<Player>(p).unwrap().score, 1);
        let level = world.resource::<Level>();
        assert_eq!(level.coins_remaining, 1);
        assert!(!level.coins.has_tile(1, 0));
        assert_eq!(world.resource::<WorldSignals>().get_integer("score_1"), Some(1));
        assert_eq!(play_requests(&mut world), vec![COIN_FX.to_string()]);
    }

    #[test]
    fn two_players_on_one_coin_count_it_once() {
        let mut world = setup();
        let a = spawn_player(&mut world, 0, 11.0, 1.0);
        let b = spawn_player(&mut world, 1, 12.0, 1.0);
        run(&mut world);
        let total = world.get::<Player>(a).unwrap().score + world.get::<Player>(b).unwrap().score;
        assert_eq!(total, 1);
        assert_eq!(world.resource::<Level>().coins_remaining, 1);
    }

    #[test]
    fn collecting_the_last_coin_completes_the_round() {
        let mut world = setup();
        spawn_player(&mut world, 0, 11.0, 1.0);
        spawn_player(&mut world, 1, 21.0, 1.0);
        run(&mut world);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Pending(GameStates::RoundComplete)
        );
    }

    #[test]
    fn hazard_respawns_and_flashes() {
        let mut world = setup();
        world.resource_mut::<WorldTime>().set_elapsed_ms(2000);
        let p = spawn_player(&mut world, 0, 31.0, 11.0);
        world.get_mut::<RigidBody>(p).unwrap().velocity = Vector2 { x: 50.0, y: 80.0 };
        run(&mut world);

        assert_eq!(world.get::<MapPosition>(p).unwrap().pos, Vector2 { x: 0.0, y: 0.0 });
        assert_eq!(world.get::<RigidBody>(p).unwrap().velocity, Vector2 { x: 0.0, y: 0.0 });
        assert_eq!(world.resource::<Backdrop>().cue_at(2100), BackdropCue::DangerRed);
        assert_eq!(play_requests(&mut world), vec![DEATH_FX.to_string()]);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Unchanged
        );
    }

    #[test]
    fn playing_effect_is_not_restarted() {
        let mut world = setup();
        spawn_player(&mut world, 0, 11.0, 1.0);
        spawn_player(&mut world, 1, 21.0, 1.0);
        run(&mut world);
        assert_eq!(play_requests(&mut world), vec![COIN_FX.to_string()]);
        assert!(world.resource::<FxPlayback>().is_playing(COIN_FX));
    }
}
