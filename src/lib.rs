pub mod config;
pub mod engine;
pub mod physics;
pub mod player;
pub mod render;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::core::EngineConfig;
pub use config::gameplay::GameplayConfig;
pub use config::worldgen::{GeneratorKind, WorldGenConfig};
pub use engine::{EngineStats, VoxelEngine};
pub use physics::{check_collision, Collision, PlayerPhysicsHandler};
pub use player::{InteractAction, PlayerController, PlayerInput, PlayerState};
pub use render::pipeline::{BlockRenderer, RecordingRenderer};
pub use utils::error::{Result, VoxelError};
pub use utils::math::AABB;
pub use world::{Block, BlockMaterial, Chunk, ChunkCoord, SharedWorld, World, CHUNK_SIZE};
