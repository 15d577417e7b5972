//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive the session rebuild
//! that happens every time a round starts. Observers and registered
//! one-shot systems carry it; players and HUD texts do not.

use bevy_ecs::prelude::Component;

/// Tag component for entities that outlive a play session.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
