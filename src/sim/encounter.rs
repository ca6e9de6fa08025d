//! Encounter and drop manager
//!
//! Owns the per-room entity lists. Entering a room rebuilds them from the
//! manifest; killing an enemy runs the death handler (splits, boss rewards
//! and the drop economy).

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use super::EntityId;
use super::doors::{Door, SecretWall};
use super::enemy::{Enemy, EnemyKind};
use super::items::{Item, ItemKind};
use super::player::Player;
use super::room::{RoomKey, RoomSource, SpawnCondition};
use super::state::GameEvent;
use crate::settings::{DropChances, Settings};
use crate::snap_vec;

/// Kills between forced fairy drops
pub const FAIRY_INTERVAL: u32 = 16;
/// Kills between forced rupee/bomb drops
pub const TEN_INTERVAL: u32 = 10;

/// Running kill counters behind forced drops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropEconomy {
    pub ten_count: u32,
    pub fairy_count: u32,
    /// Next ten-count drop is bombs instead of five rupees
    pub bomb_flag: bool,
}

impl DropEconomy {
    /// Count a kill and decide its drop. `roll` is uniform in `[0, 1)` and is
    /// only consulted when no forced drop applies.
    pub fn record_kill(&mut self, killed_by_bomb: bool, roll: f32, chances: &DropChances) -> Option<ItemKind> {
        self.ten_count += 1;
        self.fairy_count += 1;
        if killed_by_bomb {
            self.bomb_flag = true;
        }

        if self.fairy_count >= FAIRY_INTERVAL {
            self.reset();
            return Some(ItemKind::Fairy);
        }
        if self.ten_count >= TEN_INTERVAL {
            let kind = if self.bomb_flag {
                ItemKind::Bomb
            } else {
                ItemKind::FiveRupee
            };
            self.ten_count = 0;
            self.bomb_flag = false;
            return Some(kind);
        }

        if roll < chances.heart {
            Some(ItemKind::Heart)
        } else if roll < chances.green_rupee {
            Some(ItemKind::RupeeGreen)
        } else {
            None
        }
    }

    /// Contact damage wipes the streak
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The live contents of the current room
#[derive(Debug, Clone, Default)]
pub struct Encounter {
    pub room: RoomKey,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub doors: Vec<Door>,
    pub secret_walls: Vec<SecretWall>,
    /// Room rewards waiting for the last enemy to fall
    pub pending_rewards: Vec<Item>,
    pub economy: DropEconomy,
    /// Rooms whose boss is dead and stays dead
    pub cleared_bosses: BTreeSet<RoomKey>,
    next_id: u32,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enemy with a fresh id
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, rng: &mut impl Rng) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.enemies.push(Enemy::new(id, kind, pos, rng));
        id
    }

    pub fn enemy_by_id(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Replace the room contents with a fresh spawn from the manifest
    pub fn enter_room(
        &mut self,
        key: RoomKey,
        rooms: &impl RoomSource,
        player: &Player,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        self.room = key;
        self.enemies.clear();
        self.items.clear();
        self.doors.clear();
        self.secret_walls.clear();
        self.pending_rewards.clear();

        let Some(manifest) = rooms.room(key) else {
            log::warn!("No data for room {key}; loading it empty");
            events.push(GameEvent::RoomEntered { room: key });
            return;
        };
        let origin = key.origin();
        let boss_cleared = self.cleared_bosses.contains(&key);

        for spawn in &manifest.enemies {
            if boss_cleared && spawn.kind.is_boss() {
                continue;
            }
            let pos = snap_vec(origin + Vec2::new(spawn.x, spawn.y));
            self.spawn_enemy(spawn.kind, pos, rng);
        }

        for spawn in &manifest.items {
            if spawn.kind.is_unique() && spawn.kind.already_owned(player) {
                continue;
            }
            let item = Item::placed(spawn.kind, origin + Vec2::new(spawn.x, spawn.y));
            match spawn.condition {
                Some(SpawnCondition::ClearRoom) if !self.enemies.is_empty() => {
                    self.pending_rewards.push(item)
                }
                _ => self.items.push(item),
            }
        }

        for spawn in &manifest.doors {
            let pos = origin + Vec2::new(spawn.x, spawn.y);
            self.doors.push(Door::new(pos, spawn.direction, spawn.locked));
        }
        for spawn in &manifest.secret_walls {
            let pos = origin + Vec2::new(spawn.x, spawn.y);
            self.secret_walls.push(SecretWall::new(pos, spawn.requires_candle));
        }

        log::info!(
            "Entered room {key}: {} enemies, {} items",
            self.enemies.len(),
            self.items.len()
        );
        events.push(GameEvent::RoomEntered { room: key });
    }

    /// Remove the enemy at `index` and run its death handler.
    ///
    /// Returns true when the kill ends the game's final encounter (Ganon).
    pub fn kill_enemy(
        &mut self,
        index: usize,
        killed_by_bomb: bool,
        rng: &mut impl Rng,
        settings: &Settings,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if index >= self.enemies.len() {
            return false;
        }
        let enemy = self.enemies.remove(index);
        events.push(GameEvent::EnemyDefeated {
            kind: enemy.kind,
            pos: enemy.pos,
        });
        let mut final_boss = false;

        match enemy.kind {
            EnemyKind::Zol => {
                log::debug!("Zol split");
                for dx in [-8.0, 8.0] {
                    self.spawn_enemy(EnemyKind::Gel, enemy.pos + Vec2::new(dx, 0.0), rng);
                }
            }
            EnemyKind::Ganon => {
                log::info!("Ganon defeated");
                self.items.push(Item::placed(ItemKind::Triforce, enemy.pos));
                self.cleared_bosses.insert(self.room);
                events.push(GameEvent::BossDefeated { kind: enemy.kind });
                final_boss = true;
            }
            kind => {
                if kind.is_boss() {
                    log::info!("{kind:?} defeated");
                    self.cleared_bosses.insert(self.room);
                    events.push(GameEvent::BossDefeated { kind });
                }
                let roll = rng.random::<f32>();
                if let Some(drop) = self.economy.record_kill(killed_by_bomb, roll, &settings.drops) {
                    let pos = enemy.pos + Vec2::splat(4.0);
                    log::debug!("{kind:?} dropped {drop:?}");
                    self.items.push(Item::dropped(drop, pos, settings.item_lifetime));
                    events.push(GameEvent::ItemDropped { kind: drop, pos });
                }
            }
        }

        if self.enemies.is_empty() && !self.pending_rewards.is_empty() {
            log::debug!("Room {} cleared", self.room);
            self.items.append(&mut self.pending_rewards);
        }
        final_boss
    }

    pub fn update_doors(&mut self, dt: f32) {
        for door in &mut self.doors {
            door.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::room::WorldManifest;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const NO_DROP: f32 = 0.99;

    fn setup() -> (Encounter, WorldManifest, Player, Pcg32, Vec<GameEvent>) {
        (
            Encounter::new(),
            WorldManifest::builtin().unwrap(),
            Player::new(Vec2::new(256.0, 240.0), 3.0),
            Pcg32::seed_from_u64(42),
            Vec::new(),
        )
    }

    #[test]
    fn test_forced_drops() {
        let chances = DropChances::default();
        let mut eco = DropEconomy::default();
        for _ in 0..9 {
            assert_eq!(eco.record_kill(false, NO_DROP, &chances), None);
        }
        assert_eq!(eco.record_kill(false, NO_DROP, &chances), Some(ItemKind::FiveRupee));
        assert_eq!(eco.ten_count, 0);
        assert_eq!(eco.fairy_count, 10);

        for _ in 0..5 {
            assert_eq!(eco.record_kill(false, NO_DROP, &chances), None);
        }
        assert_eq!(eco.record_kill(false, NO_DROP, &chances), Some(ItemKind::Fairy));
        assert_eq!(eco, DropEconomy::default());
    }

    #[test]
    fn test_bomb_flag_turns_rupees_into_bombs() {
        let chances = DropChances::default();
        let mut eco = DropEconomy::default();
        eco.record_kill(true, NO_DROP, &chances);
        for _ in 0..8 {
            eco.record_kill(false, NO_DROP, &chances);
        }
        assert_eq!(eco.record_kill(false, NO_DROP, &chances), Some(ItemKind::Bomb));
        assert!(!eco.bomb_flag);
    }

    #[test]
    fn test_random_drop_thresholds() {
        let chances = DropChances::default();
        let mut eco = DropEconomy::default();
        assert_eq!(eco.record_kill(false, 0.01, &chances), Some(ItemKind::Heart));
        assert_eq!(eco.record_kill(false, 0.10, &chances), Some(ItemKind::RupeeGreen));
        assert_eq!(eco.record_kill(false, 0.15, &chances), None);
    }

    #[test]
    fn test_enter_room_spawns_from_manifest() {
        let (mut enc, world, player, mut rng, mut events) = setup();
        let key = RoomKey::new(1, 0);
        enc.enter_room(key, &world, &player, &mut rng, &mut events);

        let manifest = world.room(key).unwrap();
        assert_eq!(enc.enemies.len(), manifest.enemies.len());
        for (enemy, spawn) in enc.enemies.iter().zip(&manifest.enemies) {
            assert_eq!(enemy.kind, spawn.kind);
            assert!(key.bounds().contains_point(enemy.pos));
            assert_eq!(enemy.pos.x % GRID_SIZE, 0.0);
        }
        assert!(matches!(events.last(), Some(GameEvent::RoomEntered { room }) if *room == key));
    }

    #[test]
    fn test_missing_room_loads_empty() {
        let world = WorldManifest::empty(2, 2);
        let (mut enc, _, player, mut rng, mut events) = setup();
        enc.spawn_enemy(EnemyKind::Stalfos, Vec2::ZERO, &mut rng);
        enc.enter_room(RoomKey::new(1, 1), &world, &player, &mut rng, &mut events);
        assert!(enc.enemies.is_empty());
        assert!(enc.items.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_owned_equipment_not_respawned() {
        let json = r#"{ "cols": 1, "rows": 1, "rooms": { "0,0": {
            "items": [{ "type": "boomerang", "x": 100, "y": 100 }, { "type": "key", "x": 140, "y": 100 }]
        } } }"#;
        let world = WorldManifest::from_json_str(json).unwrap();
        let (mut enc, _, mut player, mut rng, mut events) = setup();
        player.equipment.boomerang = true;
        enc.enter_room(RoomKey::new(0, 0), &world, &player, &mut rng, &mut events);
        assert_eq!(enc.items.len(), 1);
        assert_eq!(enc.items[0].kind, ItemKind::Key);
    }

    #[test]
    fn test_clear_room_reward_waits_for_last_kill() {
        let json = r#"{ "cols": 1, "rows": 1, "rooms": { "0,0": {
            "enemies": [{ "type": "stalfos", "x": 96, "y": 96 }, { "type": "stalfos", "x": 160, "y": 96 }],
            "items": [{ "type": "heart_container", "x": 256, "y": 176, "condition": "clear_room" }]
        } } }"#;
        let world = WorldManifest::from_json_str(json).unwrap();
        let (mut enc, _, player, mut rng, mut events) = setup();
        let settings = Settings::default();
        enc.enter_room(RoomKey::new(0, 0), &world, &player, &mut rng, &mut events);
        assert!(enc.items.is_empty());
        assert_eq!(enc.pending_rewards.len(), 1);

        enc.kill_enemy(0, false, &mut rng, &settings, &mut events);
        assert!(!enc.items.iter().any(|i| i.kind == ItemKind::HeartContainer));
        enc.kill_enemy(0, false, &mut rng, &settings, &mut events);
        let reward = enc.items.iter().find(|i| i.kind == ItemKind::HeartContainer).unwrap();
        assert_eq!(reward.lifetime, None);
        assert!(enc.pending_rewards.is_empty());
    }

    #[test]
    fn test_zol_splits_into_two_gels_without_drop() {
        let (mut enc, _, _, mut rng, mut events) = setup();
        let settings = Settings::default();
        let zol_pos = Vec2::new(160.0, 128.0);
        enc.spawn_enemy(EnemyKind::Zol, zol_pos, &mut rng);

        enc.kill_enemy(0, false, &mut rng, &settings, &mut events);
        assert_eq!(enc.enemies.len(), 2);
        assert!(enc.enemies.iter().all(|e| e.kind == EnemyKind::Gel));
        assert_eq!(enc.enemies[0].pos, Vec2::new(152.0, 128.0));
        assert_eq!(enc.enemies[1].pos, Vec2::new(168.0, 128.0));
        assert!(enc.items.is_empty());
        assert_eq!(enc.economy, DropEconomy::default());
        assert_ne!(enc.enemies[0].id, enc.enemies[1].id);
    }

    #[test]
    fn test_ganon_drops_triforce_and_stays_dead() {
        let (mut enc, world, player, mut rng, mut events) = setup();
        let settings = Settings::default();
        let key = RoomKey::new(3, 1);
        enc.enter_room(key, &world, &player, &mut rng, &mut events);
        let idx = enc.enemies.iter().position(|e| e.kind == EnemyKind::Ganon).unwrap();
        let ganon_pos = enc.enemies[idx].pos;

        assert!(enc.kill_enemy(idx, false, &mut rng, &settings, &mut events));
        assert!(
            enc.items
                .iter()
                .any(|i| i.kind == ItemKind::Triforce && i.pos == ganon_pos && i.lifetime.is_none())
        );
        assert!(events.iter().any(|e| matches!(e, GameEvent::BossDefeated { kind: EnemyKind::Ganon })));

        enc.enter_room(key, &world, &player, &mut rng, &mut events);
        assert!(!enc.enemies.iter().any(|e| e.kind == EnemyKind::Ganon));
    }

    #[test]
    fn test_kill_out_of_range_is_noop() {
        let (mut enc, _, _, mut rng, mut events) = setup();
        assert!(!enc.kill_enemy(3, false, &mut rng, &Settings::default(), &mut events));
        assert!(events.is_empty());
    }
}
