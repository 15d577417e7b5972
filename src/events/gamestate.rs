//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and invokes the enter hook stored in
//! [`crate::resources::systemsstore::SystemsStore`].
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::SystemsStore;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], logs the exit of
///   the previous state, runs the enter hook of the new one and resets
///   [`NextGameState`] to [`Unchanged`].
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    systems_store: Res<SystemsStore>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state.clone());
                next_game_state.reset();
                debug!("Exited {:?} state", old_state);
                on_state_enter(&new_state, &mut commands, &systems_store);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Name of the hook system run when entering `state`, if it has one.
pub fn enter_hook_name(state: &GameStates) -> Option<&'static str> {
    match state {
        GameStates::None => None,
        GameStates::Setup => Some("setup"),
        GameStates::Playing => Some("enter_play"),
        GameStates::RoundComplete => Some("enter_round_complete"),
        GameStates::Quitting => Some("quit_game"),
    }
}

/// Internal: run the "enter" system for the given state.
fn on_state_enter(state: &GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    let Some(name) = enter_hook_name(state) else {
        debug!("Entered {:?} state", state);
        return;
    };
    match systems_store.get(name) {
        Some(id) => commands.run_system(*id),
        None => error!("'{}' system not found in SystemsStore", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Entered(Vec<&'static str>);

    fn enter_round_complete(mut entered: ResMut<Entered>) {
        entered.0.push("enter_round_complete");
    }

    #[test]
    fn pending_state_runs_enter_hook() {
        let mut world = World::new();
        world.insert_resource(GameState::new());
        world.insert_resource(NextGameState::new());
        world.insert_resource(Entered::default());
        let mut store = SystemsStore::new();
        store.register(&mut world, "enter_round_complete", enter_round_complete);
        world.insert_resource(store);
        world.add_observer(observe_gamestate_change_event);
        world.flush();

        world
            .resource_mut::<NextGameState>()
            .set(GameStates::RoundComplete);
        world.trigger(GameStateChangedEvent {});
        world.flush();

        assert_eq!(world.resource::<GameState>().get(), &GameStates::RoundComplete);
        assert_eq!(world.resource::<NextGameState>().get(), &Unchanged);
        assert_eq!(world.resource::<Entered>().0, vec!["enter_round_complete"]);
    }

    #[test]
    fn every_state_but_none_has_a_hook() {
        assert!(enter_hook_name(&GameStates::None).is_none());
        assert_eq!(enter_hook_name(&GameStates::Playing), Some("enter_play"));
        assert_eq!(enter_hook_name(&GameStates::Quitting), Some("quit_game"));
    }
}
