//! Player controller
//!
//! Movement, sword window, damage intake with ring reduction, invulnerability
//! and knockback. Weapon launches are requested by the tick and only read the
//! player's facing and equipment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::input::TickInput;
use super::tilemap::TileCollision;
use crate::consts::*;
use crate::{knockback_direction, snap_vec};

/// Cardinal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Right, Facing::Left, Facing::Down, Facing::Up];

    /// Unit vector in screen space (y down)
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Facing::Up | Facing::Down)
    }
}

/// Defense ring tier
///
/// Damage is divided by 2 (blue) or 4 (red) with no rounding, so a 1.0 hit
/// costs 0.5 or 0.25 hearts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefenseRing {
    #[default]
    None,
    Blue,
    Red,
}

impl DefenseRing {
    pub fn reduce(self, amount: f32) -> f32 {
        match self {
            DefenseRing::None => amount,
            DefenseRing::Blue => amount / 2.0,
            DefenseRing::Red => amount / 4.0,
        }
    }
}

/// Collected equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub boomerang: bool,
    pub silver_arrows: bool,
    pub magical_shield: bool,
    pub candle: bool,
    pub ladder: bool,
    pub magic_rod: bool,
    pub compass: bool,
    pub map: bool,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Hearts, half-heart granularity; always within `[0, max_health]`
    pub health: f32,
    pub max_health: f32,
    pub heart_containers: u32,

    pub equipment: Equipment,
    /// 1 = wooden, 2 = white, 3 = magical, 4 = master
    pub sword_level: u8,
    /// 1 = small, 2 = magical
    pub shield_level: u8,
    pub defense_ring: DefenseRing,
    pub keys: u32,

    pub facing: Facing,
    pub is_attacking: bool,
    attack_timer: f32,
    pub invulnerability_timer: f32,
    pub knockback_timer: f32,
    pub knockback_velocity: Vec2,
    /// Sword unusable while positive (Bubble curse)
    pub sword_disabled_timer: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, hearts: f32) -> Self {
        let hearts = hearts.max(1.0);
        Self {
            pos,
            size: Vec2::splat(PLAYER_SIZE),
            health: hearts,
            max_health: hearts,
            heart_containers: hearts as u32,
            equipment: Equipment::default(),
            sword_level: 1,
            shield_level: 1,
            defense_ring: DefenseRing::None,
            keys: 0,
            facing: Facing::Down,
            is_attacking: false,
            attack_timer: 0.0,
            invulnerability_timer: 0.0,
            knockback_timer: 0.0,
            knockback_velocity: Vec2::ZERO,
            sword_disabled_timer: 0.0,
            speed: PLAYER_SPEED,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_knocked_back(&self) -> bool {
        self.knockback_timer > 0.0
    }

    /// Point `distance` pixels ahead of the player's center
    pub fn ahead(&self, distance: f32) -> Vec2 {
        self.center() + self.facing.unit() * distance
    }

    /// Advance timers, knockback, the attack window and movement
    pub fn update(&mut self, dt: f32, input: &TickInput, tiles: &dyn TileCollision) {
        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);
        }
        if self.sword_disabled_timer > 0.0 {
            self.sword_disabled_timer = (self.sword_disabled_timer - dt).max(0.0);
        }

        // Input is ignored during knockback and while the sword is out
        if self.knockback_timer > 0.0 {
            self.resolve_knockback(dt, tiles);
            return;
        }

        if self.is_attacking {
            self.attack_timer -= dt;
            if self.attack_timer <= 0.0 {
                self.is_attacking = false;
            }
            return;
        }

        let mut dir = Vec2::ZERO;
        if input.up {
            dir.y -= 1.0;
            self.facing = Facing::Up;
        }
        if input.down {
            dir.y += 1.0;
            self.facing = Facing::Down;
        }
        if input.left {
            dir.x -= 1.0;
            self.facing = Facing::Left;
        }
        if input.right {
            dir.x += 1.0;
            self.facing = Facing::Right;
        }

        if input.attack && self.sword_disabled_timer <= 0.0 {
            self.attack();
            return;
        }

        let dir = dir.normalize_or_zero();
        self.try_move(dir * self.speed * dt, tiles);
    }

    fn attack(&mut self) {
        self.is_attacking = true;
        self.attack_timer = PLAYER_ATTACK_DURATION;
        log::debug!("Sword swing (level {})", self.sword_level);
    }

    fn blocked_at(&self, pos: Vec2, tiles: &dyn TileCollision) -> bool {
        tiles.is_solid(pos.x, pos.y)
            || tiles.is_solid(pos.x + self.size.x, pos.y)
            || tiles.is_solid(pos.x, pos.y + self.size.y)
            || tiles.is_solid(pos.x + self.size.x, pos.y + self.size.y)
    }

    /// Axis-separated move so the player slides along walls
    fn try_move(&mut self, delta: Vec2, tiles: &dyn TileCollision) {
        let next_x = Vec2::new(self.pos.x + delta.x, self.pos.y);
        if !self.blocked_at(next_x, tiles) {
            self.pos.x = next_x.x;
        }
        let next_y = Vec2::new(self.pos.x, self.pos.y + delta.y);
        if !self.blocked_at(next_y, tiles) {
            self.pos.y = next_y.y;
        }

        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                self.facing = Facing::Right;
            } else if delta.x < 0.0 {
                self.facing = Facing::Left;
            }
        } else if delta.y > 0.0 {
            self.facing = Facing::Down;
        } else if delta.y < 0.0 {
            self.facing = Facing::Up;
        }
    }

    fn resolve_knockback(&mut self, dt: f32, tiles: &dyn TileCollision) {
        self.knockback_timer -= dt;
        if self.knockback_timer <= 0.0 {
            self.knockback_timer = 0.0;
            let snapped = snap_vec(self.pos);
            if !self.blocked_at(snapped, tiles) {
                self.pos = snapped;
            }
            return;
        }

        let next = self.pos + self.knockback_velocity * dt;
        if self.blocked_at(next, tiles) {
            self.knockback_timer = 0.0;
            return;
        }
        self.pos = next;
    }

    /// Apply a hit from a source at `source` (world point).
    ///
    /// Returns the damage actually taken, or `None` while invulnerable.
    pub fn take_damage(&mut self, amount: f32, source: Vec2) -> Option<f32> {
        if self.invulnerability_timer > 0.0 {
            return None;
        }

        let damage = self.defense_ring.reduce(amount);
        self.health = (self.health - damage).clamp(0.0, self.max_health);
        self.invulnerability_timer = PLAYER_INVULNERABILITY;

        let dir = knockback_direction(source, self.center());
        self.knockback_velocity = dir * PLAYER_KNOCKBACK_SPEED;
        self.knockback_timer = PLAYER_KNOCKBACK_DURATION;

        log::debug!("Player took {damage} damage, health {}", self.health);
        Some(damage)
    }

    /// Magical shield absorbs magic coming at the player's face
    pub fn can_block_magic(&self, projectile_dir: Vec2) -> bool {
        if !self.equipment.magical_shield || self.is_attacking {
            return false;
        }
        self.facing.unit().dot(projectile_dir) < -0.5
    }

    /// Sword hitbox while swinging
    pub fn sword_hitbox(&self) -> Option<Rect> {
        if !self.is_attacking {
            return None;
        }
        let c = self.center();
        let rect = match self.facing {
            Facing::Down => Rect::new(c.x, c.y + 20.0, 10.0, 30.0),
            Facing::Up => Rect::new(c.x, c.y - 30.0, 10.0, 30.0),
            Facing::Left => Rect::new(c.x - 30.0, c.y, 30.0, 10.0),
            Facing::Right => Rect::new(c.x + 20.0, c.y, 30.0, 10.0),
        };
        Some(rect)
    }

    pub fn sword_damage(&self) -> f32 {
        match self.sword_level {
            0 | 1 => 1.0,
            2 => 2.0,
            _ => 4.0,
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn restore_full(&mut self) {
        self.health = self.max_health;
    }

    pub fn add_heart_container(&mut self) {
        self.heart_containers += 1;
        self.max_health = self.heart_containers as f32;
        self.health = self.max_health;
    }

    pub fn curse_sword(&mut self, duration: f32) {
        self.sword_disabled_timer = self.sword_disabled_timer.max(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::Tilemap;

    fn open_room() -> Tilemap {
        Tilemap::new(1, 1)
    }

    #[test]
    fn test_red_ring_quarters_damage_and_grants_invulnerability() {
        let mut player = Player::new(Vec2::new(128.0, 128.0), 3.0);
        player.defense_ring = DefenseRing::Red;

        let taken = player.take_damage(1.0, Vec2::new(100.0, 142.0));
        assert_eq!(taken, Some(0.25));
        assert_eq!(player.health, 2.75);
        assert_eq!(player.invulnerability_timer, PLAYER_INVULNERABILITY);

        // Second hit inside the window is ignored
        assert_eq!(player.take_damage(1.0, Vec2::ZERO), None);
        assert_eq!(player.health, 2.75);
    }

    #[test]
    fn test_invulnerability_lasts_one_and_a_half_seconds() {
        let tiles = open_room();
        let mut player = Player::new(Vec2::new(128.0, 128.0), 3.0);
        player.take_damage(1.0, player.center() + Vec2::new(-10.0, 0.0));

        let input = TickInput::default();
        for _ in 0..5 {
            player.update(0.25, &input, &tiles);
        }
        assert!(player.invulnerability_timer > 0.0);
        player.update(0.25, &input, &tiles);
        assert_eq!(player.invulnerability_timer, 0.0);
        assert!(player.take_damage(0.5, Vec2::ZERO).is_some());
    }

    #[test]
    fn test_health_never_below_zero() {
        let mut player = Player::new(Vec2::new(128.0, 128.0), 1.0);
        player.take_damage(4.0, Vec2::ZERO);
        assert_eq!(player.health, 0.0);
        assert!(player.is_dead());
    }

    #[test]
    fn test_input_ignored_while_attacking() {
        let tiles = open_room();
        let mut player = Player::new(Vec2::new(128.0, 128.0), 3.0);
        let swing = TickInput {
            attack: true,
            ..Default::default()
        };
        player.update(0.016, &swing, &tiles);
        assert!(player.is_attacking);
        assert!(player.sword_hitbox().is_some());

        let start = player.pos;
        let walk = TickInput {
            right: true,
            ..Default::default()
        };
        player.update(0.1, &walk, &tiles);
        assert_eq!(player.pos, start);

        // Window closes after 0.3s
        player.update(0.25, &walk, &tiles);
        assert!(!player.is_attacking);
        player.update(0.1, &walk, &tiles);
        assert!(player.pos.x > start.x);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_cursed_sword_cannot_swing() {
        let tiles = open_room();
        let mut player = Player::new(Vec2::new(128.0, 128.0), 3.0);
        player.curse_sword(SWORD_CURSE_DURATION);
        let swing = TickInput {
            attack: true,
            ..Default::default()
        };
        player.update(0.016, &swing, &tiles);
        assert!(!player.is_attacking);
    }

    #[test]
    fn test_walls_stop_movement() {
        let tiles = open_room();
        // Hugging the top wall (row 0 is wall except the door gap)
        let mut player = Player::new(Vec2::new(64.0, 33.0), 3.0);
        let up = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..30 {
            player.update(0.05, &up, &tiles);
        }
        assert!(player.pos.y >= TILE_SIZE);
        assert_eq!(player.facing, Facing::Up);
    }

    #[test]
    fn test_knockback_pushes_away_then_snaps() {
        let tiles = open_room();
        let mut player = Player::new(Vec2::new(160.0, 160.0), 3.0);
        let source = player.center() - Vec2::new(10.0, 0.0);
        player.take_damage(0.5, source);
        assert!(player.is_knocked_back());

        let input = TickInput::default();
        player.update(0.1, &input, &tiles);
        assert!(player.pos.x > 160.0);
        player.update(0.2, &input, &tiles);
        assert!(!player.is_knocked_back());
        assert_eq!(player.pos.x % GRID_SIZE, 0.0);
        assert_eq!(player.pos.y % GRID_SIZE, 0.0);
    }

    #[test]
    fn test_magic_block_requires_shield_and_facing() {
        let mut player = Player::new(Vec2::new(128.0, 128.0), 3.0);
        player.facing = Facing::Right;
        let incoming = Vec2::new(-1.0, 0.0);
        assert!(!player.can_block_magic(incoming));

        player.equipment.magical_shield = true;
        assert!(player.can_block_magic(incoming));
        // From behind
        assert!(!player.can_block_magic(Vec2::new(1.0, 0.0)));
        // Mid-swing
        player.is_attacking = true;
        assert!(!player.can_block_magic(incoming));
    }

    #[test]
    fn test_sword_damage_by_level() {
        let mut player = Player::new(Vec2::ZERO, 3.0);
        assert_eq!(player.sword_damage(), 1.0);
        player.sword_level = 2;
        assert_eq!(player.sword_damage(), 2.0);
        player.sword_level = 4;
        assert_eq!(player.sword_damage(), 4.0);
    }
}
