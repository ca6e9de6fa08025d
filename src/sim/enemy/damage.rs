//! Enemy vulnerability rules
//!
//! A raw hit (amount, direction, weapon) becomes damage, a stun, a block or
//! nothing depending on the immunity bits and a short chain of archetype
//! overrides.

use std::ops::BitOr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Enemy, EnemyKind, EnemyState};
use crate::consts::*;

/// Weapons an enemy can be immune to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImmunityFlags(pub u8);

impl ImmunityFlags {
    pub const NONE: Self = Self(0);
    pub const SWORD: Self = Self(1);
    pub const BOOMERANG: Self = Self(1 << 1);
    pub const ARROW: Self = Self(1 << 2);
    pub const BOMB: Self = Self(1 << 3);
    pub const ROD: Self = Self(1 << 4);
    pub const FIRE: Self = Self(1 << 5);

    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for ImmunityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// What hit the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Sword,
    Boomerang,
    Arrow,
    SilverArrow,
    Bomb,
}

impl WeaponKind {
    pub fn is_arrow(self) -> bool {
        matches!(self, WeaponKind::Arrow | WeaponKind::SilverArrow)
    }

    fn immunity_bit(self) -> ImmunityFlags {
        match self {
            WeaponKind::Sword => ImmunityFlags::SWORD,
            WeaponKind::Boomerang => ImmunityFlags::BOOMERANG,
            WeaponKind::Arrow | WeaponKind::SilverArrow => ImmunityFlags::ARROW,
            WeaponKind::Bomb => ImmunityFlags::BOMB,
        }
    }
}

/// Result of [`Enemy::take_damage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Nothing happened
    Ignored,
    /// Deflected by a shield
    Blocked,
    Stunned,
    Damaged,
    /// Health reached zero on this hit
    Killed,
}

impl Enemy {
    /// Apply a hit. `knockback_dir` points from the source toward this enemy.
    pub fn take_damage(&mut self, amount: f32, knockback_dir: Vec2, weapon: WeaponKind) -> HitOutcome {
        if self.invulnerability_timer > 0.0 || self.is_dead() {
            return HitOutcome::Ignored;
        }

        // Stuns even enemies otherwise immune to it
        if weapon == WeaponKind::Boomerang {
            self.stun_timer = BOOMERANG_STUN;
            log::debug!("{:?} {:?} stunned by boomerang", self.kind, self.id);
            return HitOutcome::Stunned;
        }

        if self.immunity.contains(weapon.immunity_bit()) {
            return HitOutcome::Ignored;
        }

        match self.kind {
            EnemyKind::DarknutRed | EnemyKind::DarknutBlue => {
                if self.direction.dot(knockback_dir) < -0.5 {
                    log::debug!("{:?} blocked {weapon:?}", self.kind);
                    return HitOutcome::Blocked;
                }
            }
            EnemyKind::Dodongo => {
                if weapon == WeaponKind::Bomb {
                    self.state = EnemyState::Stunned;
                    self.stun_timer = HEAVY_STUN;
                    return HitOutcome::Stunned;
                }
                if self.state != EnemyState::Stunned {
                    return HitOutcome::Ignored;
                }
            }
            EnemyKind::Gohma => {
                if !(weapon.is_arrow() && self.state == EnemyState::EyeOpen) {
                    return HitOutcome::Ignored;
                }
            }
            EnemyKind::Ganon => match self.state {
                EnemyState::Invisible => {
                    if weapon == WeaponKind::Sword {
                        self.state = EnemyState::Stunned;
                        self.stun_timer = HEAVY_STUN;
                        log::debug!("Ganon revealed");
                        return HitOutcome::Stunned;
                    }
                    return HitOutcome::Ignored;
                }
                EnemyState::Stunned => {
                    if weapon == WeaponKind::SilverArrow {
                        self.health = 0.0;
                        return HitOutcome::Killed;
                    }
                    return HitOutcome::Ignored;
                }
                _ => {}
            },
            EnemyKind::PolsVoice => {
                if weapon.is_arrow() {
                    self.health = 0.0;
                    return HitOutcome::Killed;
                }
                return HitOutcome::Ignored;
            }
            EnemyKind::Peahat => {
                if self.state == EnemyState::Flying {
                    return HitOutcome::Ignored;
                }
            }
            _ => {}
        }

        self.health = (self.health - amount).max(0.0);
        self.invulnerability_timer = ENEMY_INVULNERABILITY;
        self.start_knockback(knockback_dir);
        log::debug!(
            "{:?} {:?} took {amount} from {weapon:?}, {} left",
            self.kind,
            self.id,
            self.health
        );

        if self.is_dead() {
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityId;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn(kind: EnemyKind) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(11);
        Enemy::new(EntityId(1), kind, Vec2::new(128.0, 128.0), &mut rng)
    }

    #[test]
    fn test_ganon_needs_sword_then_silver_arrow() {
        let mut ganon = spawn(EnemyKind::Ganon);
        assert_eq!(ganon.take_damage(4.0, Vec2::X, WeaponKind::Bomb), HitOutcome::Ignored);
        assert_eq!(ganon.take_damage(2.0, Vec2::X, WeaponKind::Arrow), HitOutcome::Ignored);

        assert_eq!(ganon.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Stunned);
        assert_eq!(ganon.state, EnemyState::Stunned);
        assert_eq!(ganon.stun_timer, 3.0);
        assert_eq!(ganon.health, 8.0);

        assert_eq!(ganon.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(ganon.take_damage(2.0, Vec2::X, WeaponKind::Arrow), HitOutcome::Ignored);
        assert_eq!(ganon.health, 8.0);

        assert_eq!(ganon.take_damage(4.0, Vec2::X, WeaponKind::SilverArrow), HitOutcome::Killed);
        assert_eq!(ganon.health, 0.0);
    }

    #[test]
    fn test_arrow_damage() {
        let mut gibdo = spawn(EnemyKind::Gibdo);
        assert_eq!(gibdo.take_damage(ARROW_DAMAGE, Vec2::X, WeaponKind::Arrow), HitOutcome::Damaged);
        assert_eq!(gibdo.health, 6.0);

        gibdo.invulnerability_timer = 0.0;
        gibdo.take_damage(SILVER_ARROW_DAMAGE, Vec2::X, WeaponKind::SilverArrow);
        assert_eq!(gibdo.health, 2.0);
    }

    #[test]
    fn test_invulnerability_swallows_hits() {
        let mut octorok = spawn(EnemyKind::OctorokRed);
        assert_eq!(octorok.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Damaged);
        assert_eq!(octorok.invulnerability_timer, 0.5);
        assert!(octorok.is_knocked_back());
        assert_eq!(octorok.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(octorok.health, 1.0);
    }

    #[test]
    fn test_darknut_blocks_from_the_front() {
        let mut darknut = spawn(EnemyKind::DarknutRed);
        darknut.direction = Vec2::X;
        // Source in front pushes it backwards
        assert_eq!(darknut.take_damage(1.0, -Vec2::X, WeaponKind::Sword), HitOutcome::Blocked);
        assert_eq!(darknut.health, 2.0);
        assert_eq!(darknut.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Damaged);
        assert_eq!(darknut.health, 1.0);
    }

    #[test]
    fn test_dodongo_only_hurt_after_bomb() {
        let mut dodongo = spawn(EnemyKind::Dodongo);
        assert_eq!(dodongo.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(dodongo.take_damage(4.0, Vec2::X, WeaponKind::Bomb), HitOutcome::Stunned);
        assert_eq!(dodongo.stun_timer, 3.0);
        assert_eq!(dodongo.health, 8.0);
        assert_eq!(dodongo.take_damage(2.0, Vec2::X, WeaponKind::Sword), HitOutcome::Damaged);
        assert_eq!(dodongo.health, 6.0);
    }

    #[test]
    fn test_gohma_only_open_eye_arrows() {
        let mut gohma = spawn(EnemyKind::Gohma);
        assert_eq!(gohma.take_damage(2.0, Vec2::X, WeaponKind::Arrow), HitOutcome::Ignored);
        gohma.state = EnemyState::EyeOpen;
        assert_eq!(gohma.take_damage(4.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(gohma.take_damage(2.0, Vec2::X, WeaponKind::Arrow), HitOutcome::Damaged);
        assert_eq!(gohma.health, 4.0);
    }

    #[test]
    fn test_pols_voice_dies_to_any_arrow() {
        let mut pols = spawn(EnemyKind::PolsVoice);
        assert_eq!(pols.take_damage(4.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(pols.take_damage(2.0, Vec2::X, WeaponKind::Arrow), HitOutcome::Killed);
        assert_eq!(pols.health, 0.0);
    }

    #[test]
    fn test_peahat_untouchable_in_flight() {
        let mut peahat = spawn(EnemyKind::Peahat);
        assert_eq!(peahat.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        peahat.state = EnemyState::Idle;
        assert_eq!(peahat.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Damaged);
    }

    #[test]
    fn test_boomerang_stuns_through_immunity() {
        let mut bubble = spawn(EnemyKind::Bubble);
        assert_eq!(bubble.take_damage(1.0, Vec2::X, WeaponKind::Sword), HitOutcome::Ignored);
        assert_eq!(bubble.take_damage(0.0, Vec2::X, WeaponKind::Boomerang), HitOutcome::Stunned);
        assert_eq!(bubble.stun_timer, 2.0);
        assert_eq!(bubble.health, 255.0);
    }

    #[test]
    fn test_immunity_flags() {
        let flags = ImmunityFlags::SWORD | ImmunityFlags::BOMB;
        assert!(flags.contains(ImmunityFlags::SWORD));
        assert!(flags.contains(ImmunityFlags::BOMB));
        assert!(!flags.contains(ImmunityFlags::ARROW));
        assert!(!flags.contains(ImmunityFlags::NONE));
    }

    fn weapon() -> impl Strategy<Value = WeaponKind> {
        prop_oneof![
            Just(WeaponKind::Sword),
            Just(WeaponKind::Boomerang),
            Just(WeaponKind::Arrow),
            Just(WeaponKind::SilverArrow),
            Just(WeaponKind::Bomb),
        ]
    }

    proptest! {
        #[test]
        fn test_health_never_negative(
            kind_idx in 0usize..EnemyKind::ALL.len(),
            hits in prop::collection::vec((0.0f32..10.0, weapon()), 1..20),
        ) {
            let mut enemy = spawn(EnemyKind::ALL[kind_idx]);
            for (amount, weapon) in hits {
                enemy.invulnerability_timer = 0.0;
                enemy.take_damage(amount, Vec2::Y, weapon);
                prop_assert!(enemy.health >= 0.0);
            }
        }
    }
}
