//! Overworld Sim headless driver
//!
//! Seeds a run on the built-in overworld, drives it with a scripted input
//! pattern for a fixed number of frames and logs what happened.
//!
//! Usage: `overworld-sim [seed] [frames] [settings.json] [world.json]`

use std::collections::BTreeMap;
use std::process::ExitCode;

use overworld_sim::Settings;
use overworld_sim::consts::SIM_DT;
use overworld_sim::sim::{GameEvent, GamePhase, GameState, TickInput, WorldManifest, tick};

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_FRAMES: u32 = 3600;

/// Wander the start room: walk a square, swing often, drop the odd bomb
fn scripted_input(frame: u32) -> TickInput {
    let leg = (frame / 90) % 4;
    TickInput {
        up: leg == 0,
        right: leg == 1,
        down: leg == 2,
        left: leg == 3,
        attack: frame % 20 == 0,
        bomb: frame % 400 == 200,
        bow: frame % 150 == 75,
        boomerang: frame % 240 == 0,
        start: frame == 0,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let settings = args
        .next()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    let world = match args.next() {
        Some(path) => WorldManifest::load(path),
        None => WorldManifest::builtin(),
    };
    let world = match world {
        Ok(world) => world,
        Err(e) => {
            log::error!("Failed to load world: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Overworld Sim starting (seed {seed}, {frames} frames)");
    let mut state = GameState::new(world, settings, seed);

    let mut counts: BTreeMap<&'static str, u32> = BTreeMap::new();
    for frame in 0..frames {
        tick(&mut state, &scripted_input(frame), SIM_DT);

        for event in state.drain_events() {
            let name = match event {
                GameEvent::RoomEntered { room } => {
                    log::info!("Entered room {room}");
                    "rooms entered"
                }
                GameEvent::EnemyDefeated { kind, .. } => {
                    log::debug!("Defeated {kind:?}");
                    "enemies defeated"
                }
                GameEvent::BossDefeated { kind } => {
                    log::info!("Boss {kind:?} defeated");
                    "bosses defeated"
                }
                GameEvent::ItemCollected { kind } => {
                    log::info!("Collected {kind:?}");
                    "items collected"
                }
                GameEvent::ItemDropped { .. } => "items dropped",
                GameEvent::PlayerHurt { .. } => "hits taken",
                GameEvent::EnemyStunned { .. } => "stuns",
                GameEvent::AttackBlocked { .. } | GameEvent::MagicBlocked => "blocks",
                GameEvent::BombPlaced | GameEvent::ArrowFired | GameEvent::BoomerangThrown => {
                    "weapons used"
                }
                GameEvent::DoorUnlocked { .. } => "doors unlocked",
                GameEvent::SecretRevealed { .. } => "secrets revealed",
                GameEvent::Victory | GameEvent::GameOver => "endings",
            };
            *counts.entry(name).or_default() += 1;
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            log::info!("Run ended at frame {frame}: {:?}", state.phase);
            break;
        }
    }

    log::info!(
        "Finished in room {} with {:.1}/{:.0} hearts, {} rupees, {} bombs",
        state.current_room(),
        state.player.health,
        state.player.max_health,
        state.inventory.rupees,
        state.inventory.bombs
    );
    for (name, count) in &counts {
        log::info!("  {name}: {count}");
    }
    ExitCode::SUCCESS
}
