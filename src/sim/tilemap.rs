//! Tile grid and solidity queries
//!
//! The world is a grid of rooms, each 16x11 tiles of 32px. Entities only ever
//! ask one question of it: is this world-space point solid?

use serde::{Deserialize, Serialize};

use super::room::WorldManifest;
use crate::consts::*;
use crate::error::ManifestError;

/// Anything that can answer point solidity queries in world pixels.
///
/// Out-of-grid coordinates must report solid.
pub trait TileCollision {
    fn is_solid(&self, x: f32, y: f32) -> bool;
}

/// Tile kinds (manifest ids in parentheses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tile {
    #[default]
    Floor, // 0
    Wall,   // 1
    Water,  // 2
    Block,  // 3
    Tree,   // 4
    Sand,   // 5
    Grave,  // 6
    Stairs, // 7
}

impl Tile {
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            Tile::Wall | Tile::Water | Tile::Block | Tile::Tree | Tile::Grave
        )
    }
}

impl TryFrom<u8> for Tile {
    type Error = ManifestError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            0 => Tile::Floor,
            1 => Tile::Wall,
            2 => Tile::Water,
            3 => Tile::Block,
            4 => Tile::Tree,
            5 => Tile::Sand,
            6 => Tile::Grave,
            7 => Tile::Stairs,
            other => return Err(ManifestError::UnknownTile(other)),
        })
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile as u8
    }
}

/// Default layout for a room with no authored tiles: walled edges with
/// two-tile door gaps on every side, plus an obstacle pattern picked from
/// the room coordinates.
pub fn default_room_layout(room_col: usize, room_row: usize) -> Vec<Vec<Tile>> {
    let mid_x = ROOM_COLS / 2;
    let mid_y = ROOM_ROWS / 2;

    let mut grid = vec![vec![Tile::Floor; ROOM_COLS]; ROOM_ROWS];
    for (y, row) in grid.iter_mut().enumerate() {
        for (x, tile) in row.iter_mut().enumerate() {
            let edge = x == 0 || x == ROOM_COLS - 1 || y == 0 || y == ROOM_ROWS - 1;
            let vertical_gap = (mid_x - 1..=mid_x).contains(&x) && (y == 0 || y == ROOM_ROWS - 1);
            let horizontal_gap =
                (mid_y - 1..=mid_y).contains(&y) && (x == 0 || x == ROOM_COLS - 1);
            if edge && !vertical_gap && !horizontal_gap {
                *tile = Tile::Wall;
            }
        }
    }

    match (room_col * 10 + room_row) % 3 {
        0 => {
            grid[5][7] = Tile::Block;
            grid[5][8] = Tile::Block;
        }
        1 => {
            grid[2][2] = Tile::Block;
            grid[2][13] = Tile::Block;
            grid[8][2] = Tile::Block;
            grid[8][13] = Tile::Block;
        }
        _ => {}
    }

    grid
}

/// Whole-world tile grid
#[derive(Debug, Clone)]
pub struct Tilemap {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl Tilemap {
    /// Build a world of `world_cols` x `world_rows` default rooms
    pub fn new(world_cols: usize, world_rows: usize) -> Self {
        let mut map = Self {
            cols: world_cols * ROOM_COLS,
            rows: world_rows * ROOM_ROWS,
            tiles: vec![Tile::Floor; world_cols * ROOM_COLS * world_rows * ROOM_ROWS],
        };
        for room_row in 0..world_rows {
            for room_col in 0..world_cols {
                map.set_room(room_col, room_row, &default_room_layout(room_col, room_row));
            }
        }
        map
    }

    /// Build the world grid, using authored tiles where a room provides them
    pub fn from_world(world: &WorldManifest) -> Self {
        let mut map = Self::new(world.cols, world.rows);
        for (key, room) in world.rooms() {
            if let Some(tiles) = &room.tiles {
                // Keys are validated against the world size at load time
                map.set_room(key.col as usize, key.row as usize, tiles);
            }
        }
        map
    }

    /// Overwrite one room's tiles; rows/cols beyond the room size are ignored
    pub fn set_room(&mut self, room_col: usize, room_row: usize, grid: &[Vec<Tile>]) {
        let start_x = room_col * ROOM_COLS;
        let start_y = room_row * ROOM_ROWS;
        for (y, row) in grid.iter().take(ROOM_ROWS).enumerate() {
            for (x, &tile) in row.iter().take(ROOM_COLS).enumerate() {
                self.set_tile(start_x + x, start_y + y, tile);
            }
        }
    }

    pub fn set_tile(&mut self, col: usize, row: usize, tile: Tile) {
        if col < self.cols && row < self.rows {
            self.tiles[row * self.cols + col] = tile;
        }
    }

    /// Tile at grid coordinates, `None` outside the world
    pub fn tile_at(&self, col: i64, row: i64) -> Option<Tile> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(self.tiles[row as usize * self.cols + col as usize])
    }

    /// World width in pixels
    pub fn width(&self) -> f32 {
        self.cols as f32 * TILE_SIZE
    }

    /// World height in pixels
    pub fn height(&self) -> f32 {
        self.rows as f32 * TILE_SIZE
    }
}

impl TileCollision for Tilemap {
    fn is_solid(&self, x: f32, y: f32) -> bool {
        let col = (x / TILE_SIZE).floor() as i64;
        let row = (y / TILE_SIZE).floor() as i64;
        self.tile_at(col, row).is_none_or(Tile::is_solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_grid_is_solid() {
        let map = Tilemap::new(1, 1);
        assert!(map.is_solid(-1.0, 100.0));
        assert!(map.is_solid(100.0, -0.5));
        assert!(map.is_solid(ROOM_WIDTH + 1.0, 100.0));
        assert!(map.is_solid(100.0, ROOM_HEIGHT));
    }

    #[test]
    fn test_default_room_has_walls_and_door_gaps() {
        let grid = default_room_layout(0, 2);
        assert_eq!(grid.len(), ROOM_ROWS);
        assert_eq!(grid[0].len(), ROOM_COLS);
        assert_eq!(grid[0][0], Tile::Wall);
        assert_eq!(grid[0][7], Tile::Floor);
        assert_eq!(grid[0][8], Tile::Floor);
        assert_eq!(grid[4][0], Tile::Floor);
        assert_eq!(grid[5][15], Tile::Floor);
        assert_eq!(grid[3][0], Tile::Wall);
        assert_eq!(grid[3][3], Tile::Floor);
    }

    #[test]
    fn test_obstacle_patterns() {
        // (0,0) -> center blocks
        let center = default_room_layout(0, 0);
        assert_eq!(center[5][7], Tile::Block);
        // (0,1) -> corner blocks
        let corners = default_room_layout(0, 1);
        assert_eq!(corners[2][2], Tile::Block);
        assert_eq!(corners[8][13], Tile::Block);
        assert_eq!(corners[5][7], Tile::Floor);
    }

    #[test]
    fn test_world_point_queries() {
        let map = Tilemap::new(2, 1);
        // Top-left wall tile of room (1,0)
        assert!(map.is_solid(ROOM_WIDTH + 1.0, 1.0));
        // Interior floor of room (0,0)
        assert!(!map.is_solid(3.0 * TILE_SIZE + 4.0, 3.0 * TILE_SIZE + 4.0));
    }

    #[test]
    fn test_tile_id_conversion() {
        assert_eq!(Tile::try_from(2).unwrap(), Tile::Water);
        assert!(matches!(Tile::try_from(42), Err(ManifestError::UnknownTile(42))));
        assert!(Tile::Water.is_solid());
        assert!(!Tile::Sand.is_solid());
        assert!(!Tile::Stairs.is_solid());
    }
}
