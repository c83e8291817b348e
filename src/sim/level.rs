//! Tile level grid
//!
//! A level is a `width x height` grid of tile ids with an optional parallel
//! collision mask. The physics world only sees the `LevelGrid` trait; the
//! file parser that produces `LevelData` lives outside this crate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::TILE_SIZE;

/// Number of entries in the tile-id lookup table
pub const TILE_SET_SIZE: usize = 256;

/// Read-only view of a tile grid, as queried by the physics world
pub trait LevelGrid {
    /// Width in tiles
    fn width(&self) -> i32;
    /// Height in tiles
    fn height(&self) -> i32;
    /// Pixels per tile
    fn tile_size(&self) -> f32;
    /// Solidity of one tile; indices outside the grid are solid
    fn check_tile(&self, tile_x: i32, tile_y: i32) -> bool;

    /// Is any tile touched by `rect` solid?
    ///
    /// Extents are floor-divided into an inclusive tile range, so a rectangle
    /// whose edge sits exactly on a tile boundary also tests the next tile.
    fn check_collision(&self, rect: &Rect) -> bool {
        let ts = self.tile_size();
        let start_x = (rect.x / ts).floor() as i32;
        let end_x = (rect.right() / ts).floor() as i32;
        let start_y = (rect.y / ts).floor() as i32;
        let end_y = (rect.bottom() / ts).floor() as i32;

        (start_y..=end_y).any(|y| (start_x..=end_x).any(|x| self.check_tile(x, y)))
    }

    /// Level extent in pixels
    fn bounds(&self) -> Rect {
        let ts = self.tile_size();
        Rect::new(0.0, 0.0, self.width() as f32 * ts, self.height() as f32 * ts)
    }
}

/// Tile-set entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub id: i32,
    pub solid: bool,
}

impl Tile {
    pub fn new(id: i32, solid: bool) -> Self {
        Self { id, solid }
    }
}

/// Write one cell of a row-major grid; ignores positions the grid doesn't have
fn set_cell(grid: &mut [Vec<i32>], x: i32, y: i32, value: i32) -> bool {
    let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
        return false;
    };
    match grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        Some(cell) => {
            *cell = value;
            true
        }
        None => false,
    }
}

/// Raw level description, as produced by a level loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub width: i32,
    pub height: i32,
    /// Foreground tile ids, `tiles[y][x]`
    pub tiles: Vec<Vec<i32>>,
    /// Background layer tile ids (render only)
    #[serde(default)]
    pub background: Vec<Vec<i32>>,
    /// Collision mask (0 = passable, >0 = solid). Empty means "use tile ids".
    #[serde(default)]
    pub collision: Vec<Vec<i32>>,
    pub player_spawn: Vec2,
    #[serde(default)]
    pub goal_position: Vec2,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub music_track: String,
    /// Seconds
    #[serde(default = "default_time_limit")]
    pub time_limit: u32,
}

fn default_time_limit() -> u32 {
    300
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            tiles: Vec::new(),
            background: Vec::new(),
            collision: Vec::new(),
            player_spawn: Vec2::new(64.0, 400.0),
            goal_position: Vec2::ZERO,
            name: String::new(),
            music_track: String::new(),
            time_limit: default_time_limit(),
        }
    }
}

impl LevelData {
    /// Empty (all passable) grid of the given size with a collision mask
    pub fn empty(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            width,
            height,
            tiles: vec![vec![0; w]; h],
            background: vec![vec![0; w]; h],
            collision: vec![vec![0; w]; h],
            ..Default::default()
        }
    }

    /// Mark a tile solid in both the tile layer and the collision mask
    pub fn fill_solid(&mut self, x: i32, y: i32, tile_id: i32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        set_cell(&mut self.tiles, x, y, tile_id);
        set_cell(&mut self.collision, x, y, 1);
    }

    /// Generated fallback level: ground band three tiles deep, two floating
    /// platforms, a pit and a goal block
    pub fn test_level(width: i32, height: i32) -> Self {
        let mut data = Self::empty(width, height);
        data.name = "Test Level".to_string();
        data.music_track = "overworld".to_string();
        data.time_limit = 400;
        data.player_spawn = Vec2::new(64.0, (height - 5) as f32 * TILE_SIZE);
        data.goal_position = Vec2::new(
            (width - 5) as f32 * TILE_SIZE,
            (height - 8) as f32 * TILE_SIZE,
        );

        let ground = height - 3;
        for x in 0..width {
            for y in ground.max(0)..height {
                let id = if y == ground { 1 } else { 2 };
                data.fill_solid(x, y, id);
            }
        }

        for x in 10..13 {
            data.fill_solid(x, ground - 3, 1);
        }
        for x in 20..22 {
            data.fill_solid(x, ground - 5, 1);
        }

        // Pit: carve the ground surface
        for x in 30..35.min(width) {
            set_cell(&mut data.tiles, x, ground, 0);
            set_cell(&mut data.collision, x, ground, 0);
        }

        // Goal marker block is decorative only
        set_cell(&mut data.tiles, width - 5, ground - 8, 3);

        data
    }
}

/// A loaded level with its tile set
#[derive(Debug, Clone)]
pub struct Level {
    data: LevelData,
    tile_set: Vec<Tile>,
    tile_size: f32,
}

impl Level {
    pub fn new(data: LevelData) -> Self {
        log::info!(
            "Level '{}' loaded: {}x{} tiles",
            data.name,
            data.width,
            data.height
        );
        let tile_set = (0..TILE_SET_SIZE as i32)
            .map(|id| Tile::new(id, matches!(id, 1..=3)))
            .collect();
        Self {
            data,
            tile_set,
            tile_size: TILE_SIZE,
        }
    }

    /// Override the pixel size of a tile
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn data(&self) -> &LevelData {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.data.player_spawn
    }

    pub fn goal_position(&self) -> Vec2 {
        self.data.goal_position
    }

    /// Tile at a grid position (default tile outside the grid)
    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        if !self.in_grid(x, y) {
            return Tile::default();
        }
        let id = self
            .data
            .tiles
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(0);
        usize::try_from(id)
            .ok()
            .and_then(|i| self.tile_set.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Replace the tile id at a grid position (no-op outside the grid)
    ///
    /// The collision mask, when present, is updated to the tile's solidity.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if !self.in_grid(x, y) {
            return;
        }
        if set_cell(&mut self.data.tiles, x, y, tile.id) {
            set_cell(&mut self.data.collision, x, y, i32::from(tile.solid));
        }
    }

    /// Replace a tile-set entry
    pub fn set_tile_kind(&mut self, tile: Tile) {
        if let Some(slot) = usize::try_from(tile.id)
            .ok()
            .and_then(|i| self.tile_set.get_mut(i))
        {
            *slot = tile;
        }
    }

    #[inline]
    fn in_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.data.width && y < self.data.height
    }
}

impl LevelGrid for Level {
    fn width(&self) -> i32 {
        self.data.width
    }

    fn height(&self) -> i32 {
        self.data.height
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn check_tile(&self, tile_x: i32, tile_y: i32) -> bool {
        if !self.in_grid(tile_x, tile_y) {
            return true;
        }
        let (x, y) = (tile_x as usize, tile_y as usize);

        if !self.data.collision.is_empty() {
            return self
                .data
                .collision
                .get(y)
                .and_then(|row| row.get(x))
                .is_some_and(|&mask| mask > 0);
        }

        let id = self
            .data
            .tiles
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0);
        id > 0
            && usize::try_from(id)
                .ok()
                .and_then(|i| self.tile_set.get(i))
                .is_some_and(|tile| tile.solid)
    }
}
