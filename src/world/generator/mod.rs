pub mod core;
pub mod terrain;

pub use self::core::{classify, TerrainGenerator, DIRT_THRESHOLD, STONE_THRESHOLD};
pub use terrain::{from_config, FlatTerrain, NoiseTerrain, ScatterTerrain};
