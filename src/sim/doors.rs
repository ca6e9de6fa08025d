//! Doors, secret walls and the composite solidity view
//!
//! Locked doors and hidden walls are solid on top of the tile grid until they
//! are opened. [`Blockers`] layers them over any [`TileCollision`] so movers
//! keep asking a single question.

use glam::Vec2;

use super::geom::Rect;
use super::player::Facing;
use super::tilemap::TileCollision;

/// A door in a room edge
#[derive(Debug, Clone)]
pub struct Door {
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: Facing,
    pub locked: bool,
    /// Opening animation, 0..=1
    pub open_progress: f32,
}

impl Door {
    pub fn new(pos: Vec2, direction: Facing, locked: bool) -> Self {
        let size = if direction.is_vertical() {
            Vec2::new(64.0, 16.0)
        } else {
            Vec2::new(16.0, 64.0)
        };
        Self {
            pos,
            size,
            direction,
            locked,
            open_progress: if locked { 0.0 } else { 1.0 },
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Returns true if the door was locked
    pub fn unlock(&mut self) -> bool {
        if !self.locked {
            return false;
        }
        self.locked = false;
        self.open_progress = 0.0;
        true
    }

    pub fn update(&mut self, dt: f32) {
        if !self.locked && self.open_progress < 1.0 {
            self.open_progress = (self.open_progress + dt * 2.0).min(1.0);
        }
    }
}

/// A bombable wall segment
#[derive(Debug, Clone)]
pub struct SecretWall {
    pub pos: Vec2,
    pub size: Vec2,
    pub requires_candle: bool,
    pub revealed: bool,
}

impl SecretWall {
    pub fn new(pos: Vec2, requires_candle: bool) -> Self {
        Self {
            pos,
            size: Vec2::splat(32.0),
            requires_candle,
            revealed: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Reveal if the blast qualifies. Returns true on the first reveal.
    pub fn try_reveal(&mut self, has_candle: bool) -> bool {
        if self.revealed || (self.requires_candle && !has_candle) {
            return false;
        }
        self.revealed = true;
        true
    }
}

/// Tile grid plus locked doors and unrevealed secret walls
pub struct Blockers<'a> {
    pub tiles: &'a dyn TileCollision,
    pub doors: &'a [Door],
    pub secret_walls: &'a [SecretWall],
}

impl TileCollision for Blockers<'_> {
    fn is_solid(&self, x: f32, y: f32) -> bool {
        let p = Vec2::new(x, y);
        self.tiles.is_solid(x, y)
            || self
                .doors
                .iter()
                .any(|d| d.locked && d.bounds().contains_point(p))
            || self
                .secret_walls
                .iter()
                .any(|w| !w.revealed && w.bounds().contains_point(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tilemap::Tilemap;

    #[test]
    fn test_door_shape_follows_direction() {
        assert_eq!(Door::new(Vec2::ZERO, Facing::Up, true).size, Vec2::new(64.0, 16.0));
        assert_eq!(Door::new(Vec2::ZERO, Facing::Left, true).size, Vec2::new(16.0, 64.0));
    }

    #[test]
    fn test_unlock_once_and_animate() {
        let mut door = Door::new(Vec2::ZERO, Facing::Up, true);
        assert!(door.unlock());
        assert!(!door.unlock());
        door.update(0.25);
        assert_eq!(door.open_progress, 0.5);
        door.update(1.0);
        assert_eq!(door.open_progress, 1.0);
    }

    #[test]
    fn test_candle_gated_wall() {
        let mut wall = SecretWall::new(Vec2::ZERO, true);
        assert!(!wall.try_reveal(false));
        assert!(wall.try_reveal(true));
        assert!(!wall.try_reveal(true));
    }

    #[test]
    fn test_blockers_layer_over_tiles() {
        let tiles = Tilemap::new(1, 1);
        let mut doors = vec![Door::new(Vec2::new(64.0, 64.0), Facing::Up, true)];
        let walls = vec![SecretWall::new(Vec2::new(128.0, 128.0), false)];

        let view = Blockers { tiles: &tiles, doors: &doors, secret_walls: &walls };
        assert!(view.is_solid(70.0, 70.0));
        assert!(view.is_solid(140.0, 140.0));
        assert!(!view.is_solid(100.0, 100.0));
        // Out of grid stays solid
        assert!(view.is_solid(-5.0, 10.0));

        doors[0].unlock();
        let view = Blockers { tiles: &tiles, doors: &doors, secret_walls: &walls };
        assert!(!view.is_solid(70.0, 70.0));
    }
}
