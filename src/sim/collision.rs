//! Collision and damage resolution
//!
//! One pass per frame over every weapon/enemy/player pairing, in a fixed
//! order that decides who wins simultaneous interactions:
//!
//! 1. enemy projectiles (and enemy boomerangs) vs player
//! 2. items vs player
//! 3. exploding bombs vs enemies, player and secret walls
//! 4. arrows vs the first enemy they overlap
//! 5. player boomerangs vs every overlapping enemy (stun only)
//! 6. sword vs enemies, newest first
//! 7. enemy body contact vs player
//! 8. player vs locked doors
//!
//! Any lethal hit removes the enemy right away through the encounter's death
//! handler, so a dead enemy is never hit twice in one pass.

use glam::Vec2;

use super::enemy::{EnemyKind, HitOutcome, WeaponKind};
use super::items::collect;
use super::state::{GameEvent, GameState};
use super::weapons::BoomerangOwner;
use crate::consts::*;
use crate::knockback_direction;

/// Summary of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub kills: u32,
    pub triforce_collected: bool,
    pub final_boss_defeated: bool,
}

/// Run every collision check for the current frame
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut res = Resolution::default();
    projectiles_vs_player(state);
    items_vs_player(state, &mut res);
    bombs(state, &mut res);
    arrows_vs_enemies(state, &mut res);
    boomerangs_vs_enemies(state);
    sword_vs_enemies(state, &mut res);
    contact_damage(state);
    doors_vs_player(state);
    res
}

/// Route a hit outcome into events, and the death handler when lethal
fn settle_hit(state: &mut GameState, index: usize, outcome: HitOutcome, by_bomb: bool, res: &mut Resolution) {
    let kind = state.encounter.enemies[index].kind;
    match outcome {
        HitOutcome::Killed => {
            res.kills += 1;
            res.final_boss_defeated |= state.encounter.kill_enemy(
                index,
                by_bomb,
                &mut state.rng,
                &state.settings,
                &mut state.events,
            );
        }
        HitOutcome::Blocked => state.events.push(GameEvent::AttackBlocked { kind }),
        HitOutcome::Stunned => state.events.push(GameEvent::EnemyStunned { kind }),
        HitOutcome::Damaged | HitOutcome::Ignored => {}
    }
}

fn hurt_player(state: &mut GameState, amount: f32, source: Vec2) -> bool {
    match state.player.take_damage(amount, source) {
        Some(damage) => {
            state.events.push(GameEvent::PlayerHurt { damage });
            true
        }
        None => false,
    }
}

fn projectiles_vs_player(state: &mut GameState) {
    let player = state.player.bounds();
    for i in (0..state.projectiles.len()).rev() {
        let shot = &state.projectiles[i];
        if !shot.bounds().overlaps(&player) {
            continue;
        }
        if shot.is_magic() && state.player.can_block_magic(shot.direction) {
            log::debug!("Magic blocked");
            state.events.push(GameEvent::MagicBlocked);
        } else {
            let (damage, source) = (shot.damage, shot.bounds().center());
            hurt_player(state, damage, source);
        }
        state.projectiles.remove(i);
    }

    for i in 0..state.boomerangs.len() {
        let rang = &state.boomerangs[i];
        if matches!(rang.owner, BoomerangOwner::Enemy(_)) && rang.bounds().overlaps(&player) {
            let source = rang.bounds().center();
            hurt_player(state, ENEMY_BOOMERANG_DAMAGE, source);
        }
    }
}

fn items_vs_player(state: &mut GameState, res: &mut Resolution) {
    let player = state.player.bounds();
    for i in (0..state.encounter.items.len()).rev() {
        if !state.encounter.items[i].bounds().overlaps(&player) {
            continue;
        }
        let item = state.encounter.items.remove(i);
        if collect(item.kind, &mut state.player, &mut state.inventory) {
            res.triforce_collected = true;
        }
        state.events.push(GameEvent::ItemCollected { kind: item.kind });
    }
}

fn bombs(state: &mut GameState, res: &mut Resolution) {
    for b in 0..state.bombs.len() {
        if !state.bombs[b].is_exploding() {
            continue;
        }
        let blast = state.bombs[b].bounds();
        let damage = state.bombs[b].damage;
        let center = blast.center();

        for i in (0..state.encounter.enemies.len()).rev() {
            let enemy = &mut state.encounter.enemies[i];
            if !blast.overlaps(&enemy.bounds()) {
                continue;
            }
            let dir = knockback_direction(center, enemy.center());
            let outcome = enemy.take_damage(damage, dir, WeaponKind::Bomb);
            settle_hit(state, i, outcome, true, res);
        }

        if blast.overlaps(&state.player.bounds()) {
            hurt_player(state, BOMB_SELF_DAMAGE, center);
        }

        let has_candle = state.player.equipment.candle;
        for wall in &mut state.encounter.secret_walls {
            if blast.overlaps(&wall.bounds()) && wall.try_reveal(has_candle) {
                log::info!("Secret revealed at ({:.0}, {:.0})", wall.pos.x, wall.pos.y);
                state.events.push(GameEvent::SecretRevealed { pos: wall.pos });
            }
        }
    }
}

fn arrows_vs_enemies(state: &mut GameState, res: &mut Resolution) {
    for a in (0..state.arrows.len()).rev() {
        let arrow = &state.arrows[a];
        let bounds = arrow.bounds();
        let Some(i) = state
            .encounter
            .enemies
            .iter()
            .position(|e| e.bounds().overlaps(&bounds))
        else {
            continue;
        };

        let weapon = if arrow.silver {
            WeaponKind::SilverArrow
        } else {
            WeaponKind::Arrow
        };
        let (damage, dir) = (arrow.damage, arrow.facing.unit());
        state.arrows.remove(a);

        let outcome = state.encounter.enemies[i].take_damage(damage, dir, weapon);
        settle_hit(state, i, outcome, false, res);
    }
}

fn boomerangs_vs_enemies(state: &mut GameState) {
    for rang in &state.boomerangs {
        if rang.owner != BoomerangOwner::Player {
            continue;
        }
        let bounds = rang.bounds();
        let center = bounds.center();
        // Every overlapping enemy, every frame
        for enemy in &mut state.encounter.enemies {
            if !bounds.overlaps(&enemy.bounds()) {
                continue;
            }
            let fresh = !enemy.is_stunned();
            let dir = knockback_direction(center, enemy.center());
            if enemy.take_damage(0.0, dir, WeaponKind::Boomerang) == HitOutcome::Stunned && fresh {
                state.events.push(GameEvent::EnemyStunned { kind: enemy.kind });
            }
        }
    }
}

fn sword_vs_enemies(state: &mut GameState, res: &mut Resolution) {
    let Some(hitbox) = state.player.sword_hitbox() else {
        return;
    };
    let damage = state.player.sword_damage();
    let origin = state.player.center();

    for i in (0..state.encounter.enemies.len()).rev() {
        let enemy = &mut state.encounter.enemies[i];
        if !hitbox.overlaps(&enemy.bounds()) {
            continue;
        }
        let dir = knockback_direction(origin, enemy.center());
        let outcome = enemy.take_damage(damage, dir, WeaponKind::Sword);
        settle_hit(state, i, outcome, false, res);
    }
}

fn contact_damage(state: &mut GameState) {
    if state.player.is_dead() {
        return;
    }
    let player = state.player.bounds();
    for i in 0..state.encounter.enemies.len() {
        let enemy = &state.encounter.enemies[i];
        if !enemy.bounds().overlaps(&player) {
            continue;
        }
        let (kind, source) = (enemy.kind, enemy.center());
        if kind == EnemyKind::Bubble {
            state.player.curse_sword(SWORD_CURSE_DURATION);
        }
        if hurt_player(state, CONTACT_DAMAGE, source) {
            state.encounter.economy.reset();
        }
    }
}

fn doors_vs_player(state: &mut GameState) {
    if state.player.keys == 0 {
        return;
    }
    // Touching counts, so look just past the player's edges
    let reach = state.player.bounds().inflate(2.0);
    for door in &mut state.encounter.doors {
        if state.player.keys == 0 {
            break;
        }
        if door.locked && reach.overlaps(&door.bounds()) && door.unlock() {
            state.player.keys -= 1;
            log::info!("Door unlocked, {} keys left", state.player.keys);
            state.events.push(GameEvent::DoorUnlocked { pos: door.pos });
        }
    }
}
