//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the host, clamped
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (spawn order within each list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod doors;
pub mod encounter;
pub mod enemy;
pub mod geom;
pub mod input;
pub mod items;
pub mod player;
pub mod room;
pub mod state;
pub mod tick;
pub mod tilemap;
pub mod weapons;

use serde::{Deserialize, Serialize};

/// Stable handle for an enemy within the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

pub use collision::{Resolution, resolve};
pub use encounter::{DropEconomy, Encounter};
pub use enemy::{Enemy, EnemyKind, EnemyState, HitOutcome, WeaponKind};
pub use geom::Rect;
pub use input::{InputSource, Key, Keyboard, TickInput};
pub use items::{Inventory, Item, ItemKind};
pub use player::{DefenseRing, Facing, Player};
pub use room::{RoomKey, RoomManifest, RoomSource, WorldManifest};
pub use state::{Camera, GameEvent, GamePhase, GameState};
pub use tick::tick;
pub use tilemap::{Tile, TileCollision, Tilemap};
pub use weapons::{Arrow, Bomb, BombState, Boomerang, BoomerangOwner, Projectile, ProjectileKind};
