//! Room manifests
//!
//! Static per-screen data: authored tiles plus the enemies, items, doors and
//! secret walls placed when the room is entered. Positions are room-local
//! pixels; the encounter offsets them by the room origin.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::geom::Rect;
use super::items::ItemKind;
use super::player::Facing;
use super::tilemap::Tile;
use crate::consts::*;
use crate::error::ManifestError;

const BUILTIN_WORLD: &str = include_str!("../../data/overworld.json");

/// Room coordinates on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct RoomKey {
    pub col: i32,
    pub row: i32,
}

impl RoomKey {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Room containing a world-space point
    pub fn containing(point: Vec2) -> Self {
        Self {
            col: (point.x / ROOM_WIDTH).floor() as i32,
            row: (point.y / ROOM_HEIGHT).floor() as i32,
        }
    }

    /// World-space top-left corner
    pub fn origin(self) -> Vec2 {
        Vec2::new(self.col as f32 * ROOM_WIDTH, self.row as f32 * ROOM_HEIGHT)
    }

    pub fn bounds(self) -> Rect {
        Rect::from_pos_size(self.origin(), Vec2::new(ROOM_WIDTH, ROOM_HEIGHT))
    }

    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

impl FromStr for RoomKey {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ManifestError::BadRoomKey(s.to_string());
        let (col, row) = s.split_once(',').ok_or_else(bad)?;
        let col = col.trim().parse().map_err(|_| bad())?;
        let row = row.trim().parse().map_err(|_| bad())?;
        Ok(Self { col, row })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

/// Gate on when a manifest item appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCondition {
    /// Appears once every enemy in the room is dead
    ClearRoom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<SpawnCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorSpawn {
    pub x: f32,
    pub y: f32,
    pub direction: Facing,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretWallSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub requires_candle: bool,
}

/// Everything placed in one room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomManifest {
    /// Authored 16x11 grid; rooms without one use the default layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<Vec<Tile>>>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub items: Vec<ItemSpawn>,
    #[serde(default)]
    pub doors: Vec<DoorSpawn>,
    #[serde(default)]
    pub secret_walls: Vec<SecretWallSpawn>,
}

impl RoomManifest {
    fn validate(&self, key: RoomKey) -> Result<(), ManifestError> {
        let Some(tiles) = &self.tiles else {
            return Ok(());
        };
        let rows = tiles.len();
        let bad_row = tiles.iter().find(|row| row.len() != ROOM_COLS);
        if rows != ROOM_ROWS || bad_row.is_some() {
            return Err(ManifestError::GridMismatch {
                key: key.to_string(),
                expected_cols: ROOM_COLS,
                expected_rows: ROOM_ROWS,
                actual_cols: bad_row.map_or(ROOM_COLS, Vec::len),
                actual_rows: rows,
            });
        }
        Ok(())
    }
}

/// Anything that can hand out room manifests by key
pub trait RoomSource {
    fn room(&self, key: RoomKey) -> Option<&RoomManifest>;
}

/// On-disk form; keys are `"col,row"` strings
#[derive(Debug, Deserialize)]
struct RawWorld {
    cols: usize,
    rows: usize,
    #[serde(default)]
    start_room: Option<String>,
    #[serde(default)]
    rooms: BTreeMap<String, RoomManifest>,
}

/// The full overworld
#[derive(Debug, Clone, PartialEq)]
pub struct WorldManifest {
    pub cols: usize,
    pub rows: usize,
    pub start_room: RoomKey,
    rooms: BTreeMap<RoomKey, RoomManifest>,
}

impl WorldManifest {
    /// World with no authored rooms
    pub fn empty(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            start_room: RoomKey::default(),
            rooms: BTreeMap::new(),
        }
    }

    /// The overworld bundled with the crate
    pub fn builtin() -> Result<Self, ManifestError> {
        Self::from_json_str(BUILTIN_WORLD)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let raw: RawWorld = serde_json::from_str(json)?;
        let mut world = Self::empty(raw.cols, raw.rows);

        if let Some(start) = raw.start_room {
            world.start_room = start.parse()?;
        }
        for (key, room) in raw.rooms {
            let key: RoomKey = key.parse()?;
            world.insert(key, room)?;
        }
        Ok(world)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let world = Self::from_json_str(&json)?;
        log::info!(
            "Loaded world {}x{} with {} rooms from {}",
            world.cols,
            world.rows,
            world.rooms.len(),
            path.display()
        );
        Ok(world)
    }

    /// Add or replace a room after checking it fits the world
    pub fn insert(&mut self, key: RoomKey, room: RoomManifest) -> Result<(), ManifestError> {
        if !self.contains(key) {
            return Err(ManifestError::RoomOutOfBounds {
                key: key.to_string(),
                cols: self.cols,
                rows: self.rows,
            });
        }
        room.validate(key)?;
        self.rooms.insert(key, room);
        Ok(())
    }

    /// Key lies on the world grid
    pub fn contains(&self, key: RoomKey) -> bool {
        key.col >= 0 && key.row >= 0 && (key.col as usize) < self.cols && (key.row as usize) < self.rows
    }

    pub fn rooms(&self) -> impl Iterator<Item = (&RoomKey, &RoomManifest)> {
        self.rooms.iter()
    }

    /// World size in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.cols as f32 * ROOM_WIDTH, self.rows as f32 * ROOM_HEIGHT)
    }
}

impl RoomSource for WorldManifest {
    fn room(&self, key: RoomKey) -> Option<&RoomManifest> {
        self.rooms.get(&key)
    }
}
