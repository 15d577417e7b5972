//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world: players and their bodies, sprites and animation, and
//! screen-space HUD texts.
//!
//! Submodules overview:
//! - [`animation`] – playback state and a rule-based controller for sprite animations
//! - [`boxcollider`] – axis-aligned rectangular collider
//! - [`dynamictext`] – text component for rendering variable strings
//! - [`mapposition`] – world-space position (top-left) for an entity
//! - [`persistent`] – marker for entities that survive a session rebuild
//! - [`platformbody`] – on-floor state and bounce factor
//! - [`player`] – index, control flag, score and turn length
//! - [`rigidbody`] – velocity and named acceleration forces
//! - [`screenposition`] – screen-space position for HUD elements
//! - [`signalbinding`] – binds a text to a world signal
//! - [`signals`] – per-entity signal storage read by the animation controller
//! - [`sprite`] – 2D sprite rendering component
//! - [`tint`] – colour multiplier for sprites
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boxcollider;
pub mod dynamictext;
pub mod mapposition;
pub mod persistent;
pub mod platformbody;
pub mod player;
pub mod rigidbody;
pub mod screenposition;
pub mod signalbinding;
pub mod signals;
pub mod sprite;
pub mod tint;
pub mod zindex;
