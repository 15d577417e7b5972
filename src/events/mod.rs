//! Event types and their observers.
//!
//! - `audio` – commands to and reports from the audio thread
//! - `gamestate` – applies pending high-level state transitions
//! - `input` – confirm/back key actions
//! - `pickup` – coin and hazard contacts
//! - `switchdebug` – toggles the debug overlay
pub mod audio;
pub mod gamestate;
pub mod input;
pub mod pickup;
pub mod switchdebug;
