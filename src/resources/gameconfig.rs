//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Every key has
//! a default so a missing file or key never blocks startup.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//! vsync = true
//!
//! [level]
//! path = ./assets/levels/level01.json
//! players = 2
//!
//! [turns]
//! base_turn_ms = 3000
//! neutral_ms = 1000
//! catch_up = true
//! penalty_per_point_ms = 200
//! min_turn_ms = 500
//!
//! [physics]
//! gravity = 500
//! run_speed = 200
//! jump_speed = 500
//! bounce = 0.2
//!
//! [audio]
//! enabled = true
//!
//! [effects]
//! danger_flash_ms = 300
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::resources::turncontroller::{
    DEFAULT_MIN_TURN_MS, DEFAULT_NEUTRAL_MS, DEFAULT_PENALTY_PER_POINT_MS, DEFAULT_TURN_MS,
    TurnRules,
};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_LEVEL_PATH: &str = "./assets/levels/level01.json";
const DEFAULT_PLAYERS: usize = 2;
const DEFAULT_GRAVITY: f32 = 500.0;
const DEFAULT_RUN_SPEED: f32 = 200.0;
const DEFAULT_JUMP_SPEED: f32 = 500.0;
const DEFAULT_BOUNCE: f32 = 0.2;
const DEFAULT_DANGER_FLASH_MS: u64 = 300;

/// Movement tuning shared by the controller and physics systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsTuning {
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Horizontal speed in px/s while a direction key is held.
    pub run_speed: f32,
    /// Upward launch speed in px/s.
    pub jump_speed: f32,
    /// Fraction of vertical speed kept when bouncing off a floor.
    pub bounce: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            run_speed: DEFAULT_RUN_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            bounce: DEFAULT_BOUNCE,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Tilemap JSON to play.
    pub level_path: String,
    /// Number of players sharing the keyboard.
    pub players: usize,
    pub turns: TurnRules,
    pub physics: PhysicsTuning,
    pub audio_enabled: bool,
    /// Length of the red background flash after hazard contact.
    pub danger_flash_ms: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            level_path: DEFAULT_LEVEL_PATH.to_string(),
            players: DEFAULT_PLAYERS,
            turns: TurnRules::default(),
            physics: PhysicsTuning::default(),
            audio_enabled: true,
            danger_flash_ms: DEFAULT_DANGER_FLASH_MS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let text = std::fs::read_to_string(&self.config_path)
            .map_err(|e| format!("Failed to load config file {:?}: {}", self.config_path, e))?;
        self.load_from_str(&text)?;

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, level='{}', players={}, audio={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.level_path,
            self.players,
            self.audio_enabled
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [level] section
        if let Some(path) = config.get("level", "path") {
            self.level_path = path;
        }
        if let Some(players) = config.getuint("level", "players").ok().flatten() {
            self.players = players as usize;
        }

        // [turns] section
        if let Some(ms) = config.getuint("turns", "base_turn_ms").ok().flatten() {
            self.turns.base_turn_ms = ms;
        }
        if let Some(ms) = config.getuint("turns", "neutral_ms").ok().flatten() {
            self.turns.neutral_ms = ms;
        }
        if let Some(on) = config.getbool("turns", "catch_up").ok().flatten() {
            self.turns.catch_up = on;
        }
        if let Some(ms) = config.getint("turns", "penalty_per_point_ms").ok().flatten() {
            self.turns.penalty_per_point_ms = ms;
        }
        if let Some(ms) = config.getuint("turns", "min_turn_ms").ok().flatten() {
            self.turns.min_turn_ms = ms;
        }

        // [physics] section
        if let Some(v) = config.getfloat("physics", "gravity").ok().flatten() {
            self.physics.gravity = v as f32;
        }
        if let Some(v) = config.getfloat("physics", "run_speed").ok().flatten() {
            self.physics.run_speed = v as f32;
        }
        if let Some(v) = config.getfloat("physics", "jump_speed").ok().flatten() {
            self.physics.jump_speed = v as f32;
        }
        if let Some(v) = config.getfloat("physics", "bounce").ok().flatten() {
            self.physics.bounce = v.clamp(0.0, 1.0) as f32;
        }

        // [audio] section
        if let Some(on) = config.getbool("audio", "enabled").ok().flatten() {
            self.audio_enabled = on;
        }

        // [effects] section
        if let Some(ms) = config.getuint("effects", "danger_flash_ms").ok().flatten() {
            self.danger_flash_ms = ms;
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
