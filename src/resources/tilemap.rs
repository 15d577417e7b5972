//! On-disk tilemap format.
//!
//! Levels are stored as JSON exported from Tilesetter and extended with a
//! list of named spawn points:
//!
//! ```json
//! {
//!   "tile_size": 70,
//!   "map_width": 30,
//!   "map_height": 12,
//!   "layers": [
//!     { "name": "World", "positions": [ { "x": 0, "y": 11, "id": 2 } ] },
//!     { "name": "Coins", "positions": [ { "x": 4, "y": 8, "id": 0 } ] }
//!   ],
//!   "spawn_points": [ { "name": "left", "x": 200.0, "y": 200.0 } ]
//! }
//! ```
//!
//! Use [`Level::from_tilemap`](crate::resources::level::Level::from_tilemap)
//! to turn a parsed [`Tilemap`] into the grids used by gameplay systems.

use serde::{Deserialize, Serialize};

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Tile identifier (tileset-local).
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Named point, in pixels, where a player may (re)appear.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnPointDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// Tilemap metadata and layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub spawn_points: Vec<SpawnPointDef>,
}

impl Tilemap {
    /// Parse a tilemap from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse tilemap JSON: {}", e))
    }

    /// Read and parse a tilemap file.
    pub fn load(path: &str) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tilemap '{}': {}", path, e))?;
        Self::from_json(&json)
    }

    /// First layer whose name matches any of `names`, ignoring ASCII case.
    pub fn layer(&self, names: &[&str]) -> Option<&Tilelayer> {
        self.layers
            .iter()
            .find(|layer| names.iter().any(|n| layer.name.eq_ignore_ascii_case(n)))
    }
}
