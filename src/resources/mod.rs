//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the turn cycle, level data, input
//! state, timing, rendering handles and asset stores.
//!
//! Overview
//! - `animationstore` – definitions for sprite animations reused across entities
//! - `audio` – bridge and channels for the background audio thread
//! - `backdrop` – background colour cue (normal, neutral, danger flash)
//! - `camera2d` – shared 2D camera and the player it follows
//! - `debugmode` – presence toggles optional debug overlays
//! - `gameconfig` – INI-backed configuration
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard state, one key set per player
//! - `level` – ground, coin and hazard grids plus spawn points
//! - `screensize` – current framebuffer dimensions in pixels
//! - `systemsstore` – registry of state hook systems by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilemap` – on-disk JSON level format
//! - `turncontroller` – exclusive, timed, round-robin control
//! - `worldsignals` – key/value board read by HUD texts
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod backdrop;
pub mod camera2d;
pub mod debugmode;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod screensize;
pub mod systemsstore;
pub mod texturestore;
pub mod tilemap;
pub mod turncontroller;
pub mod worldsignals;
pub mod worldtime;
