//! Collectible items and pickup effects

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::player::{DefenseRing, Player};

/// Item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Heart,
    RupeeGreen,
    RupeeBlue,
    Fairy,
    Bomb,
    Clock,
    FiveRupee,
    MagicalShield,
    SilverArrow,
    Triforce,
    Boomerang,
    Compass,
    Map,
    Key,
    Candle,
    Ladder,
    MagicRod,
    BlueRing,
    RedRing,
    HeartContainer,
}

impl ItemKind {
    pub fn size(self) -> Vec2 {
        match self {
            ItemKind::Heart => Vec2::new(8.0, 8.0),
            _ => Vec2::new(8.0, 16.0),
        }
    }

    /// Equipment the player can only own once
    pub fn is_unique(self) -> bool {
        matches!(
            self,
            ItemKind::MagicalShield
                | ItemKind::SilverArrow
                | ItemKind::Boomerang
                | ItemKind::Compass
                | ItemKind::Map
                | ItemKind::Candle
                | ItemKind::Ladder
                | ItemKind::MagicRod
        )
    }

    /// True when collecting this again would do nothing
    pub fn already_owned(self, player: &Player) -> bool {
        let eq = &player.equipment;
        match self {
            ItemKind::MagicalShield => eq.magical_shield,
            ItemKind::SilverArrow => eq.silver_arrows,
            ItemKind::Boomerang => eq.boomerang,
            ItemKind::Compass => eq.compass,
            ItemKind::Map => eq.map,
            ItemKind::Candle => eq.candle,
            ItemKind::Ladder => eq.ladder,
            ItemKind::MagicRod => eq.magic_rod,
            _ => false,
        }
    }
}

/// An item lying in the room
#[derive(Debug, Clone)]
pub struct Item {
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Seconds until a dropped item vanishes; placed items never expire
    pub lifetime: Option<f32>,
    pub should_remove: bool,
}

impl Item {
    /// Item authored in the room manifest
    pub fn placed(kind: ItemKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            size: kind.size(),
            lifetime: None,
            should_remove: false,
        }
    }

    /// Item dropped by a defeated enemy
    pub fn dropped(kind: ItemKind, pos: Vec2, lifetime: f32) -> Self {
        Self {
            lifetime: Some(lifetime),
            ..Self::placed(kind, pos)
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.lifetime.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.should_remove = true;
            }
        }
    }
}

/// Consumables that are not part of the player body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub rupees: u32,
    pub bombs: u32,
}

/// Apply a pickup. Returns true when the item wins the game.
pub fn collect(kind: ItemKind, player: &mut Player, inventory: &mut Inventory) -> bool {
    match kind {
        ItemKind::Heart => player.heal(1.0),
        ItemKind::HeartContainer => player.add_heart_container(),
        ItemKind::Fairy => player.restore_full(),
        ItemKind::RupeeGreen => inventory.rupees += 1,
        ItemKind::RupeeBlue | ItemKind::FiveRupee => inventory.rupees += 5,
        ItemKind::Bomb => inventory.bombs += 4,
        ItemKind::MagicalShield => {
            player.equipment.magical_shield = true;
            player.shield_level = 2;
        }
        ItemKind::SilverArrow => player.equipment.silver_arrows = true,
        ItemKind::Boomerang => player.equipment.boomerang = true,
        ItemKind::Compass => player.equipment.compass = true,
        ItemKind::Map => player.equipment.map = true,
        ItemKind::Candle => player.equipment.candle = true,
        ItemKind::Ladder => player.equipment.ladder = true,
        ItemKind::MagicRod => player.equipment.magic_rod = true,
        ItemKind::Key => player.keys += 1,
        ItemKind::BlueRing => {
            // Never downgrade from red
            if player.defense_ring == DefenseRing::None {
                player.defense_ring = DefenseRing::Blue;
            }
        }
        ItemKind::RedRing => player.defense_ring = DefenseRing::Red,
        ItemKind::Clock => {}
        ItemKind::Triforce => return true,
    }
    log::debug!("Collected {kind:?}");
    false
}
