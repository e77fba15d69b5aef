pub mod core;
pub mod gameplay;
pub mod worldgen;

pub use self::core::{default_config_path, EngineConfig};
pub use gameplay::GameplayConfig;
pub use worldgen::{GeneratorKind, WorldGenConfig};
