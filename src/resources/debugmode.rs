//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay: collider
//! outlines, turn phase and coin counters. Remove it to disable.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws the debug overlay.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
