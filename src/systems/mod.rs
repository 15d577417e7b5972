//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations and select tracks via rules
//! - [`audio`] – bridge with the audio thread (poll/update message queues)
//! - [`camera`] – follow the player whose turn is running or coming up
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`pickups`] – coin and hazard contacts, round completion
//! - [`platformphysics`] – gravity, tile collision, bounce and player separation
//! - [`playercontroller`] – gated keyboard control of players
//! - [`render`] – draw world, HUD and debug overlays using Raylib
//! - [`signalbinding`] – update DynamicText components based on signal values
//! - [`time`] – update simulation time and delta
//! - [`turns`] – drive the turn controller and hand out control

pub mod animation;
pub mod audio;
pub mod camera;
pub mod gamestate;
pub mod input;
pub mod pickups;
pub mod platformphysics;
pub mod playercontroller;
pub mod render;
pub mod signalbinding;
pub mod time;
pub mod turns;
