//! Fixed timestep simulation tick
//!
//! Advances the game by one frame. Within `Playing` the order is: player,
//! room exit check (a transition suspends everything else), fire requests,
//! entity updates, then the collision pass.

use glam::Vec2;

use super::collision;
use super::doors::Blockers;
use super::encounter::Encounter;
use super::enemy::AiContext;
use super::input::TickInput;
use super::player::Facing;
use super::state::{GameEvent, GamePhase, GameState, Transition};
use super::weapons::{Arrow, Bomb, Boomerang, BoomerangOwner};
use crate::consts::*;

/// Gap between the player and the edge they entered through
const ENTRY_MARGIN: f32 = 4.0;

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    match state.phase {
        GamePhase::Title => {
            if input.start {
                state.phase = GamePhase::Playing;
                log::info!("Game started");
            }
            return;
        }
        GamePhase::MapView => {
            if input.map {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.start {
                state.restart();
            } else if input.back {
                state.phase = GamePhase::Title;
            }
            return;
        }
        GamePhase::Victory => {
            if input.start {
                state.restart();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    if state.player.is_dead() {
        game_over(state);
        return;
    }
    if input.map {
        state.phase = GamePhase::MapView;
        return;
    }

    if let Some(transition) = state.transition {
        advance_transition(state, transition, dt);
        return;
    }

    {
        let blockers = Blockers {
            tiles: &state.tilemap,
            doors: &state.encounter.doors,
            secret_walls: &state.encounter.secret_walls,
        };
        state.player.update(dt, input, &blockers);
    }

    if start_transition(state) {
        return;
    }

    fire_weapons(state, input);
    update_entities(state, dt);

    let res = collision::resolve(state);
    if res.triforce_collected {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        log::info!("Triforce collected after {} ticks", state.time_ticks);
    } else if state.player.is_dead() {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver);
    log::info!("Game over in room {}", state.current_room());
}

/// Begin scrolling if the player stepped past the camera edge
fn start_transition(state: &mut GameState) -> bool {
    let p = state.player.bounds();
    let cam = state.camera.bounds();
    let (dir, dcol, drow) = if p.right() > cam.right() {
        (Vec2::X, 1, 0)
    } else if p.x < cam.x {
        (Vec2::NEG_X, -1, 0)
    } else if p.bottom() > cam.bottom() {
        (Vec2::Y, 0, 1)
    } else if p.y < cam.y {
        (Vec2::NEG_Y, 0, -1)
    } else {
        return false;
    };

    let target = state.current_room().offset(dcol, drow);
    if !state.world.contains(target) {
        return false;
    }
    log::debug!("Scrolling {} -> {target}", state.current_room());
    state.transition = Some(Transition { dir, target });
    state.clear_weapons();
    true
}

fn advance_transition(state: &mut GameState, transition: Transition, dt: f32) {
    let goal = transition.target.origin();
    let step = state.settings.transition_speed * dt;

    if state.camera.pos.distance(goal) > step {
        state.camera.pos += transition.dir * step;
        state.player.pos += transition.dir * step * state.settings.player_drift_ratio;
        return;
    }

    state.camera.pos = goal;
    let size = state.player.size;
    let pos = &mut state.player.pos;
    match transition.dir {
        d if d.x > 0.0 => pos.x = goal.x + ENTRY_MARGIN,
        d if d.x < 0.0 => pos.x = goal.x + ROOM_WIDTH - size.x - ENTRY_MARGIN,
        d if d.y > 0.0 => pos.y = goal.y + ENTRY_MARGIN,
        _ => pos.y = goal.y + ROOM_HEIGHT - size.y - ENTRY_MARGIN,
    }
    state.player.knockback_timer = 0.0;
    state.transition = None;
    state.enter_room(transition.target);
}

/// Spawn player weapons for this frame's button presses
fn fire_weapons(state: &mut GameState, input: &TickInput) {
    let player = &state.player;
    let center = player.center();
    let facing = player.facing;

    if input.bomb && state.inventory.bombs > 0 {
        state.inventory.bombs -= 1;
        let pos = center - Vec2::splat(BOMB_SIZE / 2.0) + facing.unit() * 16.0;
        state.bombs.push(Bomb::new(pos));
        state.events.push(GameEvent::BombPlaced);
    }

    let in_flight = state
        .boomerangs
        .iter()
        .any(|b| b.owner == BoomerangOwner::Player);
    if input.boomerang && player.equipment.boomerang && !in_flight {
        let pos = center - Vec2::splat(BOOMERANG_SIZE / 2.0) + facing.unit() * 8.0;
        state
            .boomerangs
            .push(Boomerang::new(BoomerangOwner::Player, pos, facing.unit()));
        state.events.push(GameEvent::BoomerangThrown);
    }

    if input.bow && state.inventory.rupees > 0 {
        state.inventory.rupees -= 1;
        let mut pos = center + facing.unit() * 16.0;
        // Centre the thin shaft on the facing axis
        match facing {
            Facing::Up | Facing::Down => pos.x -= 2.0,
            Facing::Left | Facing::Right => pos.y -= 2.0,
        }
        let silver = player.equipment.silver_arrows;
        state.arrows.push(Arrow::new(pos, facing, silver));
        state.events.push(GameEvent::ArrowFired);
    }
}

fn update_entities(state: &mut GameState, dt: f32) {
    let GameState {
        tilemap,
        encounter,
        player,
        projectiles,
        arrows,
        bombs,
        boomerangs,
        camera,
        rng,
        ..
    } = state;
    let Encounter {
        room,
        enemies,
        items,
        doors,
        secret_walls,
        ..
    } = encounter;

    let blockers = Blockers {
        tiles: &*tilemap,
        doors: doors.as_slice(),
        secret_walls: secret_walls.as_slice(),
    };
    let mut ctx = AiContext {
        tiles: &blockers,
        room: room.bounds(),
        player: player.bounds(),
        projectiles: &mut *projectiles,
        boomerangs: &mut *boomerangs,
        rng: &mut *rng,
    };
    for enemy in enemies.iter_mut() {
        enemy.update(dt, &mut ctx);
    }

    for shot in projectiles.iter_mut() {
        shot.update(dt, &blockers);
    }
    projectiles.retain(|p| !p.should_remove && camera.sees(p.bounds().center()));

    for item in items.iter_mut() {
        item.update(dt);
    }
    items.retain(|i| !i.should_remove);

    for bomb in bombs.iter_mut() {
        bomb.update(dt);
    }
    bombs.retain(|b| !b.is_done());

    for arrow in arrows.iter_mut() {
        arrow.update(dt);
    }
    arrows.retain(|a| camera.sees(a.pos));

    let player_center = player.center();
    for rang in boomerangs.iter_mut() {
        let owner_center = match rang.owner {
            BoomerangOwner::Player => Some(player_center),
            BoomerangOwner::Enemy(id) => enemies.iter().find(|e| e.id == id).map(|e| e.center()),
        };
        rang.update(dt, owner_center);
    }
    boomerangs.retain(|b| !b.should_remove);

    state.encounter.update_doors(dt);
}
