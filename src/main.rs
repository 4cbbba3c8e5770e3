use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod core;
mod engine;
mod game;

use engine::{CommandRecorder, FrameClock, LogAudio};
use game::definitions::{CRATE, PLAYER, SLIME};
use game::{ControlInput, CoreConfig, Entity, World};

/// Simulated wall-clock time per rendered frame
const FRAME_TIME: Duration = Duration::from_millis(16);
const FRAMES: u32 = 120;
/// Experience granted per defeated enemy level
const EXP_PER_LEVEL: u32 = 5;

/// Scripted control input for `frame`: shoot first, then walk right
fn scripted_input(frame: u32) -> ControlInput {
    match frame {
        0..=29 => ControlInput {
            movement: Vec2::ZERO,
            fire: true,
        },
        30..=59 => ControlInput {
            movement: Vec2::new(1.0, 0.0),
            fire: false,
        },
        _ => ControlInput::default(),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tiny Blaster...");

    let config = CoreConfig::default();
    let mut rng = StdRng::from_entropy();
    let mut world = World::new(config);
    let mut audio = LogAudio;

    let player = world.spawn(Entity::player(&PLAYER, Vec2::new(32.0, 32.0), &config, &mut rng)?);
    let slime = world.spawn(Entity::enemy(&SLIME, Vec2::new(32.0, 60.0), 1, &config, &mut rng)?);
    world.spawn(Entity::obstacle(&CRATE, Vec2::new(80.0, 32.0))?);

    info!("World ready with {} entities", world.len());

    let mut clock = FrameClock::new();
    let mut recorder = CommandRecorder::new();

    for frame in 0..FRAMES {
        if let Some(entity) = world.get_mut(player) {
            entity.set_input(scripted_input(frame));
        }

        for _ in 0..clock.advance(FRAME_TIME) {
            world.step(clock.timestep(), &mut audio)?;
        }

        recorder.clear();
        world.render(&mut recorder);
    }

    let defeated = world
        .get(slime)
        .filter(|enemy| enemy.is_dead())
        .and_then(|enemy| enemy.combat())
        .map(|combat| combat.level());

    if let (Some(level), Some(entity)) = (defeated, world.get_mut(player)) {
        entity.get_exp(level * EXP_PER_LEVEL, &mut rng)?;
    }
    world.step(clock.timestep(), &mut audio)?;

    if let Some(combat) = world.get(player).and_then(|entity| entity.combat()) {
        info!(
            "Player at level {} with {} hp and {} exp",
            combat.level(),
            combat.hp(),
            combat.exp()
        );
    }

    info!(
        "Simulated {} frames ({} steps), last frame drew {} commands",
        clock.frame_count(),
        clock.step_count(),
        recorder.commands().len()
    );

    Ok(())
}
