use anyhow::{Context, Result};
use glam::Vec2;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{path::PathBuf, time::Duration};

use voxbox::{
    config::{default_config_path, EngineConfig},
    engine::VoxelEngine,
    player::{InteractAction, PlayerInput},
    render::RecordingRenderer,
    world::BlockMaterial,
};

const FRAME_TIME: Duration = Duration::from_millis(16);

fn load_config() -> Result<EngineConfig> {
    let path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match default_config_path() {
            Ok(path) => path,
            Err(err) => {
                eprintln!("No config directory ({err:#}), using defaults");
                return Ok(EngineConfig::default());
            }
        },
    };
    EngineConfig::load_or_create(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Scripted input standing in for a keyboard: walk, hop, turn, walk again.
fn scripted_input(tick: u32, yaw: f32) -> PlayerInput {
    match tick % 240 {
        0..=59 => PlayerInput::idle(),
        60..=149 => PlayerInput::from_axes(1.0, 0.0, yaw, tick % 240 == 100),
        150..=179 => PlayerInput::from_axes(0.0, 1.0, yaw, false),
        _ => PlayerInput::from_axes(-1.0, 0.0, yaw, false),
    }
}

fn main() -> Result<()> {
    let config = load_config()?;
    let level = config.level_filter().unwrap_or(LevelFilter::Info);
    SimpleLogger::new().with_level(level).init()?;
    info!("Starting voxbox session ({} ticks)", config.session_ticks);

    let ticks = config.session_ticks;
    let mut engine = VoxelEngine::new(config).context("Failed to create engine")?;
    let mut renderer = RecordingRenderer::new();

    for tick in 0..ticks {
        let input = scripted_input(tick, engine.player().yaw());
        engine.tick(FRAME_TIME, &input);

        if tick % 240 == 200 {
            engine.look(Vec2::new(0.0, 400.0));
            match engine.interact(InteractAction::Break) {
                Ok(Some(done)) => info!("Broke {} at {}", done.previous.material(), done.position),
                Ok(None) => info!("Nothing in reach to break"),
                Err(err) => warn!("Break failed: {err}"),
            }
            match engine.interact(InteractAction::Place(BlockMaterial::Stone)) {
                Ok(Some(done)) => info!("Placed stone at {}", done.position),
                Ok(None) => info!("Nothing in reach to place against"),
                Err(err) => warn!("Place failed: {err}"),
            }
            engine.look(Vec2::new(0.0, -400.0));
        }

        engine.render(&mut renderer)?;
        if tick % 60 == 0 {
            info!("{}", engine.stats());
        }
    }

    info!(
        "Session finished: {} ({} draws in the last frame, {} frames rendered)",
        engine.stats(),
        renderer.draws.len(),
        renderer.frames
    );
    Ok(())
}
