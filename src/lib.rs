//! Overworld Sim - combat and encounter core for a top-down action-adventure
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (player, enemies, weapons, collision, rooms)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Error types for the data loading layer
//!
//! Rendering, audio and keyboard capture live outside this crate. They read
//! entity bounds from [`sim::GameState`] and feed [`sim::TickInput`] back in.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ManifestError, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed step used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted from the host before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Movement grid that enemies re-align to
    pub const GRID_SIZE: f32 = 16.0;
    /// Tile edge length in world pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Room dimensions in tiles
    pub const ROOM_COLS: usize = 16;
    pub const ROOM_ROWS: usize = 11;
    /// Room dimensions in pixels (one camera screen)
    pub const ROOM_WIDTH: f32 = ROOM_COLS as f32 * TILE_SIZE;
    pub const ROOM_HEIGHT: f32 = ROOM_ROWS as f32 * TILE_SIZE;

    /// Default world dimensions in rooms
    pub const WORLD_COLS: usize = 4;
    pub const WORLD_ROWS: usize = 4;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 28.0;
    pub const PLAYER_SPEED: f32 = 80.0;
    pub const PLAYER_ATTACK_DURATION: f32 = 0.3;
    pub const PLAYER_INVULNERABILITY: f32 = 1.5;
    pub const PLAYER_KNOCKBACK_SPEED: f32 = 150.0;
    pub const PLAYER_KNOCKBACK_DURATION: f32 = 0.2;
    /// Sword lockout after touching a Bubble
    pub const SWORD_CURSE_DURATION: f32 = 3.0;

    /// Enemy hit response (4 px per frame at 60 fps)
    pub const ENEMY_KNOCKBACK_SPEED: f32 = 240.0;
    pub const ENEMY_KNOCKBACK_DURATION: f32 = 0.15;
    pub const ENEMY_INVULNERABILITY: f32 = 0.5;
    pub const BOOMERANG_STUN: f32 = 2.0;
    pub const HEAVY_STUN: f32 = 3.0;

    /// Damage dealt to the player by touching an enemy
    pub const CONTACT_DAMAGE: f32 = 0.5;

    /// Bomb timings and blast
    pub const BOMB_SIZE: f32 = 16.0;
    pub const BOMB_BLAST_SIZE: f32 = 48.0;
    pub const BOMB_FUSE_TIME: f32 = 1.5;
    pub const BOMB_EXPLOSION_TIME: f32 = 0.5;
    pub const BOMB_DAMAGE: f32 = 4.0;
    pub const BOMB_SELF_DAMAGE: f32 = 1.0;

    /// Arrows
    pub const ARROW_SPEED: f32 = 200.0;
    pub const ARROW_DAMAGE: f32 = 2.0;
    pub const SILVER_ARROW_DAMAGE: f32 = 4.0;

    /// Boomerangs
    pub const BOOMERANG_SIZE: f32 = 8.0;
    pub const BOOMERANG_SPEED: f32 = 200.0;
    pub const BOOMERANG_MAX_DISTANCE: f32 = 150.0;
    pub const BOOMERANG_CATCH_RADIUS: f32 = 10.0;
    pub const ENEMY_BOOMERANG_DAMAGE: f32 = 0.5;

    /// Enemy projectiles
    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const ROCK_SPEED: f32 = 150.0;
    pub const MAGIC_SPEED: f32 = 200.0;
    pub const FIREBALL_SPEED: f32 = 180.0;
    pub const FIREBALL_FAN_SPEED: f32 = 150.0;
    pub const FIREBALL_DAMAGE: f32 = 2.0;
    /// Angular offset of the outer bolts in a boss fan (radians)
    pub const FIREBALL_FAN_SPREAD: f32 = 0.5;

    /// Rope charge
    pub const CHARGE_SPEED: f32 = 90.0;
    /// Center alignment tolerance for charges and aimed shots
    pub const ALIGN_TOLERANCE: f32 = 16.0;

    /// Tektite jump apex height
    pub const JUMP_HEIGHT: f32 = 30.0;
}

/// Round a coordinate to the nearest multiple of the movement grid
#[inline]
pub fn snap_to_grid(v: f32) -> f32 {
    (v / consts::GRID_SIZE).round() * consts::GRID_SIZE
}

/// Snap both axes of a position to the movement grid
#[inline]
pub fn snap_vec(pos: Vec2) -> Vec2 {
    Vec2::new(snap_to_grid(pos.x), snap_to_grid(pos.y))
}

/// Normalized direction from `source` to `target`, or +X when they coincide
#[inline]
pub fn knockback_direction(source: Vec2, target: Vec2) -> Vec2 {
    let delta = target - source;
    let len = delta.length();
    if len > 0.0 { delta / len } else { Vec2::X }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid_rounds_to_nearest() {
        assert_eq!(snap_to_grid(0.0), 0.0);
        assert_eq!(snap_to_grid(7.9), 0.0);
        assert_eq!(snap_to_grid(8.0), 16.0);
        assert_eq!(snap_to_grid(23.0), 16.0);
        assert_eq!(snap_to_grid(-9.0), -16.0);
    }

    #[test]
    fn test_knockback_direction_defaults_on_coincident_points() {
        let p = Vec2::new(40.0, 40.0);
        assert_eq!(knockback_direction(p, p), Vec2::X);
    }

    #[test]
    fn test_knockback_direction_is_normalized() {
        let dir = knockback_direction(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }
}
