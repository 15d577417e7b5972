//! Kinematic body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and named acceleration forces
//! for an entity; players carry a single `"gravity"` force.
//!
//! The `frozen` flag disables all movement calculations, used while a round
//! is complete.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// Name of the downward force added to every player.
pub const GRAVITY_FORCE: &str = "gravity";

/// Kinematic body storing velocity and named acceleration forces.
///
/// Written by the player controller, integrated by the platform physics
/// system into [`MapPosition`](super::mapposition::MapPosition).
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Named accelerations in world units per second squared, summed.
    pub forces: FxHashMap<String, Vector2>,
    /// When true, physics skips this entity entirely.
    pub frozen: bool,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            forces: FxHashMap::default(),
            frozen: false,
        }
    }

    /// Body falling under `gravity` px/s².
    pub fn with_gravity(gravity: f32) -> Self {
        let mut rb = Self::new();
        rb.add_force(GRAVITY_FORCE, Vector2 { x: 0.0, y: gravity });
        rb
    }

    /// Add or replace a named acceleration force.
    pub fn add_force(&mut self, name: &str, value: Vector2) {
        self.forces.insert(name.to_string(), value);
    }

    pub fn total_acceleration(&self) -> Vector2 {
        self.forces
            .values()
            .fold(Vector2 { x: 0.0, y: 0.0 }, |total, force| total + *force)
    }

    pub fn stop(&mut self) {
        self.velocity = Vector2 { x: 0.0, y: 0.0 };
    }

    /// Freeze the rigid body, preventing physics from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_body_accelerates_down() {
        let rb = RigidBody::with_gravity(500.0);
        let acc = rb.total_acceleration();
        assert_eq!(acc.x, 0.0);
        assert_eq!(acc.y, 500.0);
    }

    #[test]
    fn re_adding_a_force_replaces_it() {
        let mut rb = RigidBody::with_gravity(500.0);
        rb.add_force(GRAVITY_FORCE, Vector2 { x: 0.0, y: 800.0 });
        assert_eq!(rb.forces.len(), 1);
        assert_eq!(rb.total_acceleration().y, 800.0);
    }

    #[test]
    fn stop_and_freeze() {
        let mut rb = RigidBody::new();
        rb.velocity = Vector2 { x: 3.0, y: -4.0 };
        rb.stop();
        assert_eq!((rb.velocity.x, rb.velocity.y), (0.0, 0.0));
        rb.freeze();
        assert!(rb.frozen);
    }
}
