use crate::{
    config::core::EngineConfig,
    physics::handler::PlayerPhysicsHandler,
    player::{InteractAction, Interaction, PlayerController, PlayerInput, PlayerState},
    render::pipeline::BlockRenderer,
    utils::Result,
    world::{ChunkCoord, SharedWorld, World},
};
use glam::{Vec2, Vec3};
use log::{info, trace};
use std::{fmt, sync::Arc, time::Duration};

/// Snapshot of engine counters for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStats {
    pub frames: u64,
    pub physics_steps: u64,
    pub chunks: usize,
    pub solid_blocks: usize,
    pub player_position: Vec3,
    pub player_chunk: ChunkCoord,
    pub on_ground: bool,
}

impl fmt::Display for EngineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames={} steps={} chunks={} solid={} player={:.2} in chunk {} on_ground={}",
            self.frames,
            self.physics_steps,
            self.chunks,
            self.solid_blocks,
            self.player_position,
            self.player_chunk,
            self.on_ground
        )
    }
}

/// One world, one player, ticked and rendered from a single thread.
///
/// Each tick holds the world's write lock for physics and block updates and
/// releases it before rendering takes the read lock.
pub struct VoxelEngine {
    world: SharedWorld,
    player: PlayerState,
    physics: PlayerPhysicsHandler,
    controller: PlayerController,
    pub config: EngineConfig,
    frame_counter: u64,
    physics_steps: u64,
}

impl VoxelEngine {
    /// Validates the config and generates the world it describes.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let world = World::new(&config.worldgen)?;
        Ok(Self::with_world(config, world))
    }

    /// Runs on a prepared world; the config's world generation settings are ignored.
    pub fn with_world(config: EngineConfig, world: World) -> Self {
        let gameplay = &config.gameplay;
        let player = PlayerState::new(
            Vec3::from_array(gameplay.spawn_point),
            Vec3::from_array(gameplay.player_size),
        );
        info!(
            "Engine ready: {} chunks, player at {}",
            world.chunk_count(),
            player.position
        );

        Self {
            world: world.into_shared(),
            player,
            physics: PlayerPhysicsHandler::from_config(gameplay),
            controller: PlayerController::from_config(gameplay),
            config,
            frame_counter: 0,
            physics_steps: 0,
        }
    }

    pub fn world(&self) -> SharedWorld {
        Arc::clone(&self.world)
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Advances the simulation by one frame of wall time.
    pub fn tick(&mut self, frame_time: Duration, input: &PlayerInput) {
        let mut world = self.world.write();
        let (player, steps) = self.physics.advance(frame_time, self.player, input, &world);
        self.player = player;
        if steps > 0 {
            world.update(steps as f32 * self.physics.fixed_timestep());
        }
        drop(world);

        self.frame_counter += 1;
        self.physics_steps += u64::from(steps);
        trace!(
            "Frame {}: {} steps, player at {}",
            self.frame_counter,
            steps,
            self.player.position
        );
    }

    pub fn look(&mut self, mouse_delta: Vec2) {
        self.controller.look(&mut self.player, mouse_delta);
    }

    pub fn interact(&mut self, action: InteractAction) -> Result<Option<Interaction>> {
        let mut world = self.world.write();
        self.controller.interact(&self.player, &mut world, action)
    }

    /// Draws the whole world for one frame; returns the number of blocks drawn.
    pub fn render<R: BlockRenderer + ?Sized>(&self, renderer: &mut R) -> Result<usize> {
        let world = self.world.read();
        renderer.begin_frame();
        let drawn = world.render(renderer)?;
        renderer.end_frame();
        Ok(drawn)
    }

    pub fn stats(&self) -> EngineStats {
        let world = self.world.read();
        EngineStats {
            frames: self.frame_counter,
            physics_steps: self.physics_steps,
            chunks: world.chunk_count(),
            solid_blocks: world.chunks().map(|c| c.solid_count()).sum(),
            player_position: self.player.position,
            player_chunk: ChunkCoord::from_world_pos(self.player.position),
            on_ground: self.player.on_ground,
        }
    }
}
