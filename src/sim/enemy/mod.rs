//! Enemies
//!
//! One [`Enemy`] struct covers every archetype. The per-frame entry point
//! applies the shared gates (invulnerability, stun, knockback) and then hands
//! off to the archetype routine in [`behavior`]. Hit handling lives in
//! [`damage`].

mod behavior;
mod damage;

pub use damage::{HitOutcome, ImmunityFlags, WeaponKind};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::geom::Rect;
use super::tilemap::TileCollision;
use super::weapons::{Boomerang, Projectile, ProjectileKind};
use crate::consts::*;
use crate::{knockback_direction, snap_vec};

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    OctorokRed,
    OctorokBlue,
    TektiteRed,
    TektiteBlue,
    MoblinRed,
    MoblinBlue,
    DarknutRed,
    DarknutBlue,
    Dodongo,
    Gohma,
    Stalfos,
    Keese,
    Zol,
    Gel,
    WizzrobeRed,
    WizzrobeBlue,
    Aquamentus,
    Ganon,
    LeeverRed,
    LeeverBlue,
    Peahat,
    LynelRed,
    LynelBlue,
    Zola,
    Armos,
    Ghini,
    Rope,
    GoriyaRed,
    GoriyaBlue,
    Wallmaster,
    PolsVoice,
    LikeLike,
    Gibdo,
    Moldorm,
    Bubble,
    Manhandla,
    Gleeok,
    Digdogger,
    Vire,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 39] = [
        EnemyKind::OctorokRed,
        EnemyKind::OctorokBlue,
        EnemyKind::TektiteRed,
        EnemyKind::TektiteBlue,
        EnemyKind::MoblinRed,
        EnemyKind::MoblinBlue,
        EnemyKind::DarknutRed,
        EnemyKind::DarknutBlue,
        EnemyKind::Dodongo,
        EnemyKind::Gohma,
        EnemyKind::Stalfos,
        EnemyKind::Keese,
        EnemyKind::Zol,
        EnemyKind::Gel,
        EnemyKind::WizzrobeRed,
        EnemyKind::WizzrobeBlue,
        EnemyKind::Aquamentus,
        EnemyKind::Ganon,
        EnemyKind::LeeverRed,
        EnemyKind::LeeverBlue,
        EnemyKind::Peahat,
        EnemyKind::LynelRed,
        EnemyKind::LynelBlue,
        EnemyKind::Zola,
        EnemyKind::Armos,
        EnemyKind::Ghini,
        EnemyKind::Rope,
        EnemyKind::GoriyaRed,
        EnemyKind::GoriyaBlue,
        EnemyKind::Wallmaster,
        EnemyKind::PolsVoice,
        EnemyKind::LikeLike,
        EnemyKind::Gibdo,
        EnemyKind::Moldorm,
        EnemyKind::Bubble,
        EnemyKind::Manhandla,
        EnemyKind::Gleeok,
        EnemyKind::Digdogger,
        EnemyKind::Vire,
    ];

    /// Starting (health, speed)
    pub fn base_stats(self) -> (f32, f32) {
        match self {
            EnemyKind::OctorokBlue => (3.0, 40.0),
            EnemyKind::DarknutBlue => (6.0, 45.0),
            EnemyKind::Dodongo => (8.0, 20.0),
            EnemyKind::Gohma => (6.0, 40.0),
            EnemyKind::Aquamentus => (6.0, 30.0),
            EnemyKind::Ganon => (8.0, 30.0),
            EnemyKind::Zola => (2.0, 0.0),
            EnemyKind::Wallmaster => (2.0, 20.0),
            EnemyKind::PolsVoice => (10.0, 40.0),
            EnemyKind::LikeLike => (6.0, 25.0),
            EnemyKind::Gibdo => (8.0, 30.0),
            EnemyKind::Moldorm => (4.0, 40.0),
            EnemyKind::Bubble => (255.0, 50.0),
            EnemyKind::LeeverBlue => (4.0, 40.0),
            EnemyKind::Peahat => (2.0, 40.0),
            EnemyKind::LynelRed => (6.0, 40.0),
            EnemyKind::LynelBlue => (8.0, 50.0),
            EnemyKind::Manhandla => (16.0, 30.0),
            EnemyKind::Gleeok => (8.0, 0.0),
            _ => (2.0, 30.0),
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Gohma => Vec2::new(32.0, 16.0),
            EnemyKind::Keese => Vec2::new(32.0, 32.0),
            _ => Vec2::new(16.0, 16.0),
        }
    }

    pub fn immunity(self) -> ImmunityFlags {
        match self {
            EnemyKind::Bubble | EnemyKind::Digdogger => {
                ImmunityFlags::SWORD | ImmunityFlags::ARROW | ImmunityFlags::BOMB
            }
            _ => ImmunityFlags::NONE,
        }
    }

    /// Bosses end their room's encounter when defeated
    pub fn is_boss(self) -> bool {
        matches!(
            self,
            EnemyKind::Gohma
                | EnemyKind::Aquamentus
                | EnemyKind::Ganon
                | EnemyKind::Dodongo
                | EnemyKind::Manhandla
                | EnemyKind::Gleeok
                | EnemyKind::Digdogger
        )
    }
}

/// Shared state machine states; each archetype uses a subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Idle,
    Moving,
    Attacking,
    Stunned,
    Jumping,
    EyeClosed,
    EyeOpen,
    Flying,
    Resting,
    TeleportOut,
    TeleportIn,
    Invisible,
}

/// In-flight Tektite jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpArc {
    pub target: Vec2,
    pub duration: f32,
    pub timer: f32,
}

/// Everything an enemy may read or spawn into during its update
pub struct AiContext<'a> {
    pub tiles: &'a dyn TileCollision,
    /// World-space bounds of the current room
    pub room: Rect,
    pub player: Rect,
    pub projectiles: &'a mut Vec<Projectile>,
    pub boomerangs: &'a mut Vec<Boomerang>,
    pub rng: &'a mut Pcg32,
}

const CARDINALS: [Vec2; 4] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub pos: Vec2,
    /// Height above ground while jumping (draw offset only)
    pub z: f32,
    pub size: Vec2,
    pub health: f32,
    pub speed: f32,
    pub direction: Vec2,
    pub immunity: ImmunityFlags,

    pub move_timer: f32,
    pub stun_timer: f32,
    pub invulnerability_timer: f32,
    pub jump: Option<JumpArc>,
    knockback_timer: f32,
    knockback_dir: Vec2,
}

impl Enemy {
    /// Build an enemy at `pos` (world space, not grid-snapped)
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2, rng: &mut impl Rng) -> Self {
        let (health, speed) = kind.base_stats();
        let mut enemy = Self {
            id,
            kind,
            state: EnemyState::Moving,
            pos,
            z: 0.0,
            size: kind.size(),
            health,
            speed,
            direction: CARDINALS[rng.random_range(0..CARDINALS.len())],
            immunity: kind.immunity(),
            move_timer: 0.0,
            stun_timer: 0.0,
            invulnerability_timer: 0.0,
            jump: None,
            knockback_timer: 0.0,
            knockback_dir: Vec2::ZERO,
        };

        match kind {
            EnemyKind::Gohma => {
                enemy.state = EnemyState::EyeClosed;
                enemy.move_timer = 2.0;
                enemy.direction = Vec2::X;
            }
            EnemyKind::Keese => {
                enemy.state = EnemyState::Resting;
                enemy.move_timer = 1.0;
            }
            EnemyKind::TektiteRed | EnemyKind::TektiteBlue => {
                enemy.state = EnemyState::Idle;
                enemy.move_timer = 0.5 + rng.random::<f32>() * 0.5;
            }
            EnemyKind::WizzrobeRed => {
                enemy.state = EnemyState::TeleportIn;
                enemy.move_timer = 1.0;
            }
            EnemyKind::WizzrobeBlue => enemy.move_timer = 1.0,
            EnemyKind::Aquamentus => {
                enemy.direction = Vec2::Y;
                enemy.move_timer = 2.0;
            }
            EnemyKind::Ganon => enemy.state = EnemyState::Invisible,
            EnemyKind::Zola => {
                enemy.state = EnemyState::Idle;
                enemy.move_timer = 2.0;
            }
            EnemyKind::LeeverRed | EnemyKind::LeeverBlue | EnemyKind::Armos => {
                enemy.state = EnemyState::Idle;
            }
            EnemyKind::Peahat => {
                enemy.state = EnemyState::Flying;
                enemy.move_timer = 3.0;
            }
            EnemyKind::PolsVoice => enemy.state = EnemyState::Jumping,
            EnemyKind::Bubble => enemy.direction = Vec2::ONE.normalize(),
            _ => {}
        }
        enemy
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

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, ctx: &mut AiContext) {
        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer -= dt;
        }

        if self.stun_timer > 0.0 {
            self.stun_timer -= dt;
            return;
        }

        if self.is_knocked_back() {
            self.resolve_knockback(dt, ctx.tiles);
            return;
        }

        self.run_behavior(dt, ctx);
    }

    fn resolve_knockback(&mut self, dt: f32, tiles: &dyn TileCollision) {
        self.knockback_timer -= dt;
        if self.knockback_timer <= 0.0 {
            self.knockback_timer = 0.0;
            self.pos = snap_vec(self.pos);
            return;
        }

        let next = self.pos + self.knockback_dir * ENEMY_KNOCKBACK_SPEED * dt;
        let c = next + self.size / 2.0;
        if tiles.is_solid(c.x, c.y) {
            self.knockback_timer = 0.0;
            return;
        }
        self.pos = next;
    }

    pub(crate) fn start_knockback(&mut self, dir: Vec2) {
        self.knockback_dir = dir;
        self.knockback_timer = ENEMY_KNOCKBACK_DURATION;
    }

    /// Pick a new cardinal direction that is not a reversal, then re-align
    /// to the movement grid
    pub(crate) fn change_direction(&mut self, rng: &mut impl Rng) {
        let opposite = -self.direction;
        let mut pool = [Vec2::ZERO; 4];
        let mut n = 0;
        for dir in CARDINALS {
            if dir != opposite {
                pool[n] = dir;
                n += 1;
            }
        }
        let pool = if n > 0 { &pool[..n] } else { &CARDINALS[..] };
        self.direction = pool[rng.random_range(0..pool.len())];
        self.pos = snap_vec(self.pos);
    }

    fn blocked_at(&self, pos: Vec2, tiles: &dyn TileCollision) -> bool {
        Rect::from_pos_size(pos, self.size)
            .inset_corners(2.0)
            .iter()
            .any(|c| tiles.is_solid(c.x, c.y))
    }

    /// Walk along the current direction; turn on walls, and occasionally
    /// at grid intersections
    pub(crate) fn move_grid(&mut self, dt: f32, tiles: &dyn TileCollision, rng: &mut impl Rng) {
        let next = self.pos + self.direction * self.speed * dt;
        if self.blocked_at(next, tiles) {
            self.change_direction(rng);
            return;
        }
        self.pos = next;

        let aligned_x = (self.pos.x % GRID_SIZE).abs() < 1.0;
        let aligned_y = (self.pos.y % GRID_SIZE).abs() < 1.0;
        if aligned_x && aligned_y && rng.random::<f32>() < 0.05 {
            self.change_direction(rng);
        }
    }

    /// Jump to a random interior grid cell, avoiding solid tiles when possible
    pub(crate) fn teleport(&mut self, room: Rect, tiles: &dyn TileCollision, rng: &mut impl Rng) {
        for _ in 0..8 {
            let col = rng.random_range(1..ROOM_COLS - 1) as f32;
            let row = rng.random_range(1..ROOM_ROWS - 1) as f32;
            let pos = room.pos() + Vec2::new(col, row) * TILE_SIZE;
            if !self.blocked_at(pos, tiles) {
                self.pos = pos;
                return;
            }
        }
    }

    /// Absolute center distance to the player on each axis
    pub(crate) fn alignment(&self, player: &Rect) -> Vec2 {
        (self.center() - player.center()).abs()
    }

    /// Cardinal direction that best points at the player
    pub(crate) fn cardinal_toward(&self, player: &Rect) -> Vec2 {
        let d = player.center() - self.center();
        if d.x.abs() > d.y.abs() {
            Vec2::new(d.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, if d.y > 0.0 { 1.0 } else { -1.0 })
        }
    }

    pub(crate) fn aim_at(&self, player: &Rect) -> Vec2 {
        knockback_direction(self.center(), player.center())
    }

    pub(crate) fn shoot_rock(&self, ctx: &mut AiContext) {
        let damage = if self.kind == EnemyKind::OctorokBlue { 1.0 } else { 0.5 };
        let origin = self.center() + self.direction * 10.0;
        ctx.projectiles.push(Projectile::new(
            ProjectileKind::Rock,
            origin,
            self.direction,
            ROCK_SPEED,
            damage,
        ));
    }

    pub(crate) fn shoot_magic(&self, ctx: &mut AiContext) {
        let damage = if self.kind == EnemyKind::WizzrobeBlue { 2.0 } else { 1.0 };
        ctx.projectiles.push(Projectile::new(
            ProjectileKind::Magic,
            self.center(),
            self.aim_at(&ctx.player),
            MAGIC_SPEED,
            damage,
        ));
    }

    pub(crate) fn shoot_fireball(&self, ctx: &mut AiContext) {
        ctx.projectiles.push(Projectile::new(
            ProjectileKind::Fireball,
            self.center(),
            self.aim_at(&ctx.player),
            FIREBALL_SPEED,
            FIREBALL_DAMAGE,
        ));
    }

    /// Three fireballs fanned around the aim line
    pub(crate) fn shoot_fireball_fan(&self, ctx: &mut AiContext) {
        let aim = self.aim_at(&ctx.player);
        let angle = aim.y.atan2(aim.x);
        for offset in [0.0, -FIREBALL_FAN_SPREAD, FIREBALL_FAN_SPREAD] {
            let a = angle + offset;
            ctx.projectiles.push(Projectile::new(
                ProjectileKind::Fireball,
                self.center(),
                Vec2::new(a.cos(), a.sin()),
                FIREBALL_FAN_SPEED,
                FIREBALL_DAMAGE,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::Tilemap;
    use rand::SeedableRng;

    pub(super) struct Fixture {
        pub tiles: Tilemap,
        pub projectiles: Vec<Projectile>,
        pub boomerangs: Vec<Boomerang>,
        pub rng: Pcg32,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                tiles: Tilemap::new(1, 1),
                projectiles: Vec::new(),
                boomerangs: Vec::new(),
                rng: Pcg32::seed_from_u64(7),
            }
        }

        pub fn step(&mut self, enemy: &mut Enemy, dt: f32, player: Rect) {
            let mut ctx = AiContext {
                tiles: &self.tiles,
                room: Rect::new(0.0, 0.0, ROOM_WIDTH, ROOM_HEIGHT),
                player,
                projectiles: &mut self.projectiles,
                boomerangs: &mut self.boomerangs,
                rng: &mut self.rng,
            };
            enemy.update(dt, &mut ctx);
        }
    }

    fn far_player() -> Rect {
        Rect::new(400.0, 280.0, PLAYER_SIZE, PLAYER_SIZE)
    }

    #[test]
    fn test_stats_by_kind() {
        let mut rng = Pcg32::seed_from_u64(1);
        let blue = Enemy::new(EntityId(1), EnemyKind::OctorokBlue, Vec2::ZERO, &mut rng);
        assert_eq!((blue.health, blue.speed), (3.0, 40.0));

        let gohma = Enemy::new(EntityId(2), EnemyKind::Gohma, Vec2::ZERO, &mut rng);
        assert_eq!(gohma.size, Vec2::new(32.0, 16.0));
        assert_eq!(gohma.state, EnemyState::EyeClosed);

        let ganon = Enemy::new(EntityId(3), EnemyKind::Ganon, Vec2::ZERO, &mut rng);
        assert_eq!(ganon.state, EnemyState::Invisible);
        assert_eq!(ganon.health, 8.0);
    }

    #[test]
    fn test_change_direction_never_reverses_and_snaps() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut e = Enemy::new(EntityId(1), EnemyKind::Stalfos, Vec2::new(37.0, 70.0), &mut rng);
        for _ in 0..50 {
            let before = e.direction;
            e.change_direction(&mut rng);
            assert_ne!(e.direction, -before);
            assert_eq!(e.pos.x % GRID_SIZE, 0.0);
            assert_eq!(e.pos.y % GRID_SIZE, 0.0);
        }
    }

    #[test]
    fn test_stun_skips_movement() {
        let mut fx = Fixture::new();
        let mut e = Enemy::new(EntityId(1), EnemyKind::Stalfos, Vec2::new(96.0, 96.0), &mut fx.rng);
        e.stun_timer = 1.0;
        let start = e.pos;
        fx.step(&mut e, 0.5, far_player());
        assert_eq!(e.pos, start);
        assert!(e.is_stunned());
    }

    #[test]
    fn test_knockback_moves_then_snaps() {
        let mut fx = Fixture::new();
        let mut e = Enemy::new(EntityId(1), EnemyKind::Stalfos, Vec2::new(96.0, 96.0), &mut fx.rng);
        e.start_knockback(Vec2::X);
        fx.step(&mut e, 0.05, far_player());
        assert!((e.pos.x - 108.0).abs() < 1e-3);
        assert_eq!(e.pos.y, 96.0);
        fx.step(&mut e, 0.05, far_player());
        fx.step(&mut e, 0.1, far_player());
        assert!(!e.is_knocked_back());
        assert!(e.pos.x >= 112.0);
        assert_eq!(e.pos.x % GRID_SIZE, 0.0);
        assert_eq!(e.pos.y, 96.0);
    }

    #[test]
    fn test_knockback_stops_at_wall() {
        let mut fx = Fixture::new();
        // Next to the left wall, pushed into it
        let mut e = Enemy::new(EntityId(1), EnemyKind::Stalfos, Vec2::new(34.0, 96.0), &mut fx.rng);
        e.start_knockback(-Vec2::X);
        fx.step(&mut e, 0.1, far_player());
        assert!(!e.is_knocked_back());
        assert_eq!(e.pos, Vec2::new(34.0, 96.0));
    }

    #[test]
    fn test_teleport_lands_on_floor_inside_room() {
        let mut fx = Fixture::new();
        let mut e = Enemy::new(EntityId(1), EnemyKind::WizzrobeRed, Vec2::new(64.0, 64.0), &mut fx.rng);
        let room = Rect::new(0.0, 0.0, ROOM_WIDTH, ROOM_HEIGHT);
        for _ in 0..20 {
            e.teleport(room, &fx.tiles, &mut fx.rng);
            assert!(e.pos.x >= TILE_SIZE && e.pos.x < ROOM_WIDTH - TILE_SIZE);
            assert!(e.pos.y >= TILE_SIZE && e.pos.y < ROOM_HEIGHT - TILE_SIZE);
            assert_eq!(e.pos.x % TILE_SIZE, 0.0);
        }
    }

    #[test]
    fn test_every_kind_survives_a_minute_of_updates() {
        let mut fx = Fixture::new();
        let player = Rect::new(240.0, 160.0, PLAYER_SIZE, PLAYER_SIZE);
        for (i, kind) in EnemyKind::ALL.into_iter().enumerate() {
            let mut e = Enemy::new(EntityId(i as u32), kind, Vec2::new(96.0, 96.0), &mut fx.rng);
            for _ in 0..3600 {
                fx.step(&mut e, SIM_DT, player);
                assert!(e.pos.is_finite(), "{kind:?} left the number line");
            }
            fx.projectiles.clear();
            fx.boomerangs.clear();
        }
    }
}
