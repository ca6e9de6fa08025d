//! Weapon entities
//!
//! Projectiles, arrows, bombs and boomerangs. Each is a small lifecycle that
//! only knows how to move itself; hits are decided by the collision pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::geom::Rect;
use super::player::Facing;
use super::tilemap::TileCollision;
use crate::consts::*;

/// Enemy projectile flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Rock,
    Spear,
    Magic,
    Fireball,
}

/// An enemy-fired shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Unit travel direction
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub should_remove: bool,
}

impl Projectile {
    /// Spawn a projectile centered on `center`
    pub fn new(kind: ProjectileKind, center: Vec2, direction: Vec2, speed: f32, damage: f32) -> Self {
        let size = Vec2::splat(PROJECTILE_SIZE);
        Self {
            kind,
            pos: center - size / 2.0,
            size,
            direction: direction.normalize_or_zero(),
            speed,
            damage,
            should_remove: false,
        }
    }

    /// Magic bolts and fireballs can be absorbed by the magical shield
    pub fn is_magic(&self) -> bool {
        matches!(self.kind, ProjectileKind::Magic | ProjectileKind::Fireball)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32, tiles: &dyn TileCollision) {
        self.pos += self.direction * self.speed * dt;
        let c = self.bounds().center();
        if tiles.is_solid(c.x, c.y) {
            self.should_remove = true;
        }
    }
}

/// A player arrow
#[derive(Debug, Clone)]
pub struct Arrow {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub silver: bool,
    pub damage: f32,
    pub active: bool,
}

impl Arrow {
    pub fn new(pos: Vec2, facing: Facing, silver: bool) -> Self {
        let size = if facing.is_vertical() {
            Vec2::new(4.0, 16.0)
        } else {
            Vec2::new(16.0, 4.0)
        };
        Self {
            pos,
            size,
            facing,
            silver,
            damage: if silver { SILVER_ARROW_DAMAGE } else { ARROW_DAMAGE },
            active: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.facing.unit() * ARROW_SPEED * dt;
    }
}

/// Bomb lifecycle; only ever advances forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BombState {
    Fuse,
    Exploding,
    Done,
}

/// A placed bomb
#[derive(Debug, Clone)]
pub struct Bomb {
    pub pos: Vec2,
    pub size: Vec2,
    pub state: BombState,
    pub damage: f32,
    timer: f32,
}

impl Bomb {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(BOMB_SIZE),
            state: BombState::Fuse,
            damage: BOMB_DAMAGE,
            timer: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_exploding(&self) -> bool {
        self.state == BombState::Exploding
    }

    pub fn is_done(&self) -> bool {
        self.state == BombState::Done
    }

    pub fn update(&mut self, dt: f32) {
        self.timer += dt;
        match self.state {
            BombState::Fuse => {
                if self.timer >= BOMB_FUSE_TIME {
                    // Carry the overshoot so the blast ends on schedule
                    self.timer -= BOMB_FUSE_TIME;
                    self.explode();
                }
            }
            BombState::Exploding => {
                if self.timer >= BOMB_EXPLOSION_TIME {
                    self.state = BombState::Done;
                }
            }
            BombState::Done => {}
        }
    }

    fn explode(&mut self) {
        let grow = (BOMB_BLAST_SIZE - BOMB_SIZE) / 2.0;
        self.pos -= Vec2::splat(grow);
        self.size = Vec2::splat(BOMB_BLAST_SIZE);
        self.state = BombState::Exploding;
        log::debug!("Bomb exploded at ({:.0}, {:.0})", self.pos.x, self.pos.y);
    }
}

/// Who threw a boomerang; used only to find the return target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoomerangOwner {
    Player,
    Enemy(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoomerangState {
    Outward,
    Returning,
}

/// A thrown boomerang
#[derive(Debug, Clone)]
pub struct Boomerang {
    pub owner: BoomerangOwner,
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Vec2,
    pub state: BoomerangState,
    pub distance_traveled: f32,
    pub should_remove: bool,
}

impl Boomerang {
    pub fn new(owner: BoomerangOwner, pos: Vec2, direction: Vec2) -> Self {
        Self {
            owner,
            pos,
            size: Vec2::splat(BOOMERANG_SIZE),
            direction: direction.normalize_or_zero(),
            state: BoomerangState::Outward,
            distance_traveled: 0.0,
            should_remove: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one step. `owner_center` is `None` once the owner is gone,
    /// which retires the boomerang.
    pub fn update(&mut self, dt: f32, owner_center: Option<Vec2>) {
        let Some(target) = owner_center else {
            self.should_remove = true;
            return;
        };

        let step = BOOMERANG_SPEED * dt;
        match self.state {
            BoomerangState::Outward => {
                self.pos += self.direction * step;
                self.distance_traveled += step;
                if self.distance_traveled >= BOOMERANG_MAX_DISTANCE {
                    self.state = BoomerangState::Returning;
                }
            }
            BoomerangState::Returning => {
                let delta = target - self.bounds().center();
                let dist = delta.length();
                if dist < BOOMERANG_CATCH_RADIUS {
                    self.should_remove = true;
                    return;
                }
                self.pos += delta / dist * step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::Tilemap;
    use proptest::prelude::*;

    #[test]
    fn test_bomb_timeline() {
        let start = Vec2::new(100.0, 100.0);
        let mut bomb = Bomb::new(start);

        // t = 0.25 .. 1.25 still fusing
        for _ in 0..5 {
            bomb.update(0.25);
            assert_eq!(bomb.state, BombState::Fuse);
        }
        // t = 1.5
        bomb.update(0.25);
        assert_eq!(bomb.state, BombState::Exploding);
        assert_eq!(bomb.pos, start - Vec2::splat(16.0));
        assert_eq!(bomb.size, Vec2::splat(48.0));

        // t = 1.75
        bomb.update(0.25);
        assert!(bomb.is_exploding());
        // t = 2.0
        bomb.update(0.25);
        assert!(bomb.is_done());
    }

    #[test]
    fn test_arrow_damage_and_shape() {
        let plain = Arrow::new(Vec2::ZERO, Facing::Right, false);
        assert_eq!(plain.damage, 2.0);
        assert_eq!(plain.size, Vec2::new(16.0, 4.0));

        let silver = Arrow::new(Vec2::ZERO, Facing::Up, true);
        assert_eq!(silver.damage, 4.0);
        assert_eq!(silver.size, Vec2::new(4.0, 16.0));
    }

    #[test]
    fn test_arrow_flies_along_facing() {
        let mut arrow = Arrow::new(Vec2::new(50.0, 50.0), Facing::Left, false);
        arrow.update(0.5);
        assert_eq!(arrow.pos, Vec2::new(-50.0, 50.0));
    }

    #[test]
    fn test_projectile_removed_on_wall() {
        let tiles = Tilemap::new(1, 1);
        // Heading into the left wall
        let mut shot = Projectile::new(
            ProjectileKind::Rock,
            Vec2::new(48.0, 100.0),
            Vec2::new(-1.0, 0.0),
            ROCK_SPEED,
            0.5,
        );
        shot.update(0.05, &tiles);
        assert!(!shot.should_remove);
        for _ in 0..10 {
            shot.update(0.05, &tiles);
        }
        assert!(shot.should_remove);
        assert!(!shot.is_magic());
    }

    #[test]
    fn test_boomerang_returns_to_owner() {
        let owner = Vec2::new(100.0, 100.0);
        let mut rang = Boomerang::new(BoomerangOwner::Player, owner, Vec2::X);
        let mut frames = 0;
        while !rang.should_remove && frames < 600 {
            rang.update(1.0 / 60.0, Some(owner));
            frames += 1;
        }
        assert!(rang.should_remove);
        assert_eq!(rang.state, BoomerangState::Returning);
        assert!(rang.distance_traveled >= BOOMERANG_MAX_DISTANCE);
    }

    #[test]
    fn test_boomerang_without_owner_is_removed() {
        let mut rang = Boomerang::new(BoomerangOwner::Enemy(EntityId(7)), Vec2::ZERO, Vec2::Y);
        rang.update(0.016, None);
        assert!(rang.should_remove);
    }

    proptest! {
        #[test]
        fn test_bomb_state_never_goes_backwards(steps in prop::collection::vec(0.0f32..0.4, 1..40)) {
            let mut bomb = Bomb::new(Vec2::ZERO);
            let mut last = bomb.state;
            for dt in steps {
                bomb.update(dt);
                prop_assert!(bomb.state >= last);
                last = bomb.state;
            }
        }
    }
}
