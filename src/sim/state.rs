//! Game state and core simulation types
//!
//! Everything the tick reads or mutates lives in [`GameState`]. The host
//! renders from it and drains [`GameEvent`]s after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::encounter::Encounter;
use super::enemy::EnemyKind;
use super::geom::Rect;
use super::items::{Inventory, ItemKind};
use super::player::Player;
use super::room::{RoomKey, WorldManifest};
use super::tilemap::Tilemap;
use super::weapons::{Arrow, Bomb, Boomerang, Projectile};
use crate::consts::*;
use crate::settings::Settings;

/// Player spawn point inside the start room
pub const PLAYER_START: Vec2 = Vec2::new(256.0, 240.0);

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Title,
    /// Active gameplay
    Playing,
    /// World map overlay; simulation frozen
    MapView,
    /// Player ran out of health
    GameOver,
    /// Triforce collected
    Victory,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoomEntered { room: RoomKey },
    EnemyDefeated { kind: EnemyKind, pos: Vec2 },
    EnemyStunned { kind: EnemyKind },
    /// Darknut shield deflected the sword
    AttackBlocked { kind: EnemyKind },
    BossDefeated { kind: EnemyKind },
    ItemDropped { kind: ItemKind, pos: Vec2 },
    ItemCollected { kind: ItemKind },
    PlayerHurt { damage: f32 },
    /// Magical shield absorbed a bolt
    MagicBlocked,
    BombPlaced,
    ArrowFired,
    BoomerangThrown,
    DoorUnlocked { pos: Vec2 },
    SecretRevealed { pos: Vec2 },
    Victory,
    GameOver,
}

/// Viewport onto the world, one room in size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Camera {
    pub fn on_room(key: RoomKey) -> Self {
        Self {
            pos: key.origin(),
            size: Vec2::new(ROOM_WIDTH, ROOM_HEIGHT),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Point lies within the view (edges inclusive)
    pub fn sees(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.x <= self.pos.x + self.size.x
            && p.y >= self.pos.y
            && p.y <= self.pos.y + self.size.y
    }
}

/// An in-progress camera scroll between rooms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Unit cardinal scroll direction
    pub dir: Vec2,
    pub target: RoomKey,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub world: WorldManifest,
    pub tilemap: Tilemap,
    pub settings: Settings,

    pub player: Player,
    pub inventory: Inventory,
    /// Enemies, items, doors and secrets of the current room
    pub encounter: Encounter,

    // Weapon lists
    pub projectiles: Vec<Projectile>,
    pub arrows: Vec<Arrow>,
    pub bombs: Vec<Bomb>,
    pub boomerangs: Vec<Boomerang>,

    pub camera: Camera,
    pub transition: Option<Transition>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub rng: Pcg32,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a game on the title screen
    pub fn new(world: WorldManifest, settings: Settings, seed: u64) -> Self {
        let start = world.start_room;
        let mut state = Self {
            seed,
            phase: GamePhase::Title,
            tilemap: Tilemap::from_world(&world),
            world,
            player: Player::new(start.origin() + PLAYER_START, settings.starting_hearts),
            inventory: Inventory {
                rupees: settings.starting_rupees,
                bombs: settings.starting_bombs,
            },
            settings,
            encounter: Encounter::new(),
            projectiles: Vec::new(),
            arrows: Vec::new(),
            bombs: Vec::new(),
            boomerangs: Vec::new(),
            camera: Camera::on_room(start),
            transition: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        state.enter_room(start);
        state
    }

    /// Fresh run in the same world, straight into play
    pub fn restart(&mut self) {
        let start = self.world.start_room;
        self.player = Player::new(start.origin() + PLAYER_START, self.settings.starting_hearts);
        self.inventory = Inventory {
            rupees: self.settings.starting_rupees,
            bombs: self.settings.starting_bombs,
        };
        self.encounter = Encounter::new();
        self.clear_weapons();
        self.camera = Camera::on_room(start);
        self.transition = None;
        self.enter_room(start);
        self.phase = GamePhase::Playing;
        log::info!("Run restarted");
    }

    /// Populate the encounter for `key`
    pub fn enter_room(&mut self, key: RoomKey) {
        self.encounter
            .enter_room(key, &self.world, &self.player, &mut self.rng, &mut self.events);
    }

    pub fn clear_weapons(&mut self) {
        self.projectiles.clear();
        self.arrows.clear();
        self.bombs.clear();
        self.boomerangs.clear();
    }

    pub fn current_room(&self) -> RoomKey {
        self.encounter.room
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
