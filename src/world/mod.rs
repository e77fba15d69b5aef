pub mod block;
pub mod block_material;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod generator;

// Re-export commonly used types
pub use self::core::{DirectionalLight, RaycastHit, SharedWorld, World};
pub use block::Block;
pub use block_material::BlockMaterial;
pub use chunk::{Chunk, CHUNK_SIZE, CHUNK_VOLUME};
pub use chunk_coord::ChunkCoord;
pub use generator::{FlatTerrain, NoiseTerrain, ScatterTerrain, TerrainGenerator};
