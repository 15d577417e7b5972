//! Level resource: tile grids and spawn points for one play session.
//!
//! A [`Level`] holds three [`TileLayer`] grids built from a
//! [`Tilemap`](crate::resources::tilemap::Tilemap):
//!
//! - `ground` – solid tiles players stand on and bump into
//! - `coins` – collectible tiles, removed as they are picked up
//! - `hazards` – tiles that send a player back to a spawn point
//!
//! The pristine copy loaded at setup lives in [`LevelTemplate`]; each new
//! session clones it into the mutable [`Level`] resource.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;

use crate::resources::tilemap::Tilemap;

/// Layer names recognised for each role.
pub const GROUND_LAYER_NAMES: &[&str] = &["World", "ground"];
pub const COIN_LAYER_NAMES: &[&str] = &["Coins"];
pub const HAZARD_LAYER_NAMES: &[&str] = &["Hazards", "spikes"];

/// Largest grid accepted per layer, in cells.
pub const MAX_LAYER_CELLS: usize = 1 << 20;

/// Fixed spawn used when the map defines none.
pub const DEFAULT_SPAWN: Vector2 = Vector2 { x: 200.0, y: 200.0 };

/// Dense grid of optional tile ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    width: u32,
    height: u32,
    cells: Vec<Option<u32>>,
}

impl TileLayer {
    /// Empty `width`×`height` grid. Fails when the cell count overflows or
    /// exceeds [`MAX_LAYER_CELLS`].
    pub fn new(width: u32, height: u32) -> Result<Self, String> {
        let cells = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= MAX_LAYER_CELLS)
            .ok_or_else(|| {
                format!(
                    "Tile layer {}x{} exceeds {} cells",
                    width, height, MAX_LAYER_CELLS
                )
            })?;
        Ok(Self {
            width,
            height,
            cells: vec![None; cells],
        })
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    pub fn has_tile(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some()
    }

    /// Place a tile; out-of-range coordinates are ignored.
    pub fn put(&mut self, x: u32, y: u32, id: u32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(id);
        }
    }

    /// Remove and return the tile at `(x, y)`, `None` if the cell was empty.
    pub fn remove_tile_at(&mut self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).and_then(|i| self.cells[i].take())
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate `(x, y, id)` over occupied cells, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|id| ((i % width) as u32, (i / width) as u32, id))
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    pub name: String,
    pub position: Vector2,
}

#[derive(Resource, Debug, Clone)]
pub struct Level {
    pub tile_size: f32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub ground: TileLayer,
    pub coins: TileLayer,
    pub hazards: TileLayer,
    pub spawn_points: Vec<SpawnPoint>,
    /// Coins present when the session began.
    pub coins_total: usize,
    /// Coins still on the map.
    pub coins_remaining: usize,
}

impl Level {
    /// Build grids from a parsed tilemap.
    ///
    /// Tiles outside the declared map size are dropped. Missing coin or
    /// hazard layers produce empty grids; a missing ground layer is an error.
    pub fn from_tilemap(map: &Tilemap) -> Result<Self, String> {
        if map.tile_size == 0 || map.map_width == 0 || map.map_height == 0 {
            return Err(format!(
                "Invalid tilemap dimensions: tile_size={} map={}x{}",
                map.tile_size, map.map_width, map.map_height
            ));
        }
        let fill = |names: &[&str]| -> Result<TileLayer, String> {
            let mut layer = TileLayer::new(map.map_width, map.map_height)?;
            if let Some(source) = map.layer(names) {
                for pos in &source.positions {
                    layer.put(pos.x, pos.y, pos.id);
                }
            }
            Ok(layer)
        };
        if map.layer(GROUND_LAYER_NAMES).is_none() {
            return Err("Tilemap has no ground layer ('World')".to_string());
        }
        let ground = fill(GROUND_LAYER_NAMES)?;
        let coins = fill(COIN_LAYER_NAMES)?;
        let hazards = fill(HAZARD_LAYER_NAMES)?;
        let coins_total = coins.count();

        Ok(Self {
            tile_size: map.tile_size as f32,
            width: map.map_width,
            height: map.map_height,
            ground,
            coins,
            hazards,
            spawn_points: map
                .spawn_points
                .iter()
                .map(|s| SpawnPoint {
                    name: s.name.clone(),
                    position: Vector2 { x: s.x, y: s.y },
                })
                .collect(),
            coins_total,
            coins_remaining: coins_total,
        })
    }

    /// Map size in pixels.
    pub fn pixel_size(&self) -> Vector2 {
        Vector2 {
            x: self.width as f32 * self.tile_size,
            y: self.height as f32 * self.tile_size,
        }
    }

    /// World-space rectangle `(min, max)` covered by tile `(x, y)`.
    pub fn tile_rect(&self, x: u32, y: u32) -> (Vector2, Vector2) {
        let min = Vector2 {
            x: x as f32 * self.tile_size,
            y: y as f32 * self.tile_size,
        };
        let max = Vector2 {
            x: min.x + self.tile_size,
            y: min.y + self.tile_size,
        };
        (min, max)
    }

    /// Tile coordinates whose cells strictly overlap the box `(min, max)`.
    ///
    /// Touching edges do not count; cells outside the map are skipped.
    pub fn tiles_overlapping(&self, min: Vector2, max: Vector2) -> Vec<(u32, u32)> {
        const EDGE: f32 = 1e-3;
        let ts = self.tile_size;
        let x0 = (min.x / ts).floor().max(0.0) as i64;
        let y0 = (min.y / ts).floor().max(0.0) as i64;
        let x1 = ((max.x - EDGE) / ts).floor() as i64;
        let y1 = ((max.y - EDGE) / ts).floor() as i64;
        let x1 = x1.min(self.width as i64 - 1);
        let y1 = y1.min(self.height as i64 - 1);

        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.push((x as u32, y as u32));
            }
        }
        out
    }

    /// Remove a coin and count it, returning `false` if it was already gone.
    ///
    /// Removal and the counter update happen together so a coin can never be
    /// counted twice.
    pub fn collect_coin(&mut self, x: u32, y: u32) -> bool {
        if self.coins.remove_tile_at(x, y).is_some() {
            self.coins_remaining = self.coins_remaining.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// A round is complete once a level that had coins has none left.
    pub fn all_coins_collected(&self) -> bool {
        self.coins_total > 0 && self.coins_remaining == 0
    }

    /// Pick a respawn point uniformly among the named spawn points, or the
    /// fixed default spawn when the map defines none.
    pub fn pick_spawn(&self, rng: &mut fastrand::Rng) -> Vector2 {
        if self.spawn_points.is_empty() {
            DEFAULT_SPAWN
        } else {
            self.spawn_points[rng.usize(..self.spawn_points.len())].position
        }
    }

    /// Spawn position for player `index` at session start.
    pub fn initial_spawn(&self, index: usize) -> Vector2 {
        if self.spawn_points.is_empty() {
            DEFAULT_SPAWN
        } else {
            self.spawn_points[index % self.spawn_points.len()].position
        }
    }
}

/// Unmodified level data, cloned into [`Level`] whenever a session starts.
#[derive(Resource, Debug, Clone)]
pub struct LevelTemplate(pub Level);

/// Random source for respawn selection.
#[derive(Resource, Debug, Clone)]
pub struct SpawnRng(pub fastrand::Rng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
