//! Registry of state hook systems.
//!
//! Systems are registered under string keys (`"setup"`, `"enter_play"`,
//! `"enter_round_complete"`, `"quit_game"`) and later run by the game state
//! observer via their [`bevy_ecs::system::SystemId`].

use bevy_ecs::prelude::{Resource, World};
use bevy_ecs::system::{IntoSystem, SystemId};
use rustc_hash::FxHashMap;

use crate::components::persistent::Persistent;

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    /// Insert a system ID under a human-readable name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }

    /// Register `system` in `world` and store it under `name`.
    ///
    /// Registered systems live as entities; they are marked [`Persistent`]
    /// so the session rebuild does not despawn them.
    pub fn register<M>(
        &mut self,
        world: &mut World,
        name: impl Into<String>,
        system: impl IntoSystem<(), (), M> + 'static,
    ) -> SystemId {
        let id = world.register_system(system);
        world.entity_mut(id.entity()).insert(Persistent);
        self.insert(name, id);
        id
    }
}
