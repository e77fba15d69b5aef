use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Noise,
    Scatter,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u64,
    /// Chunks generated on each side of the origin chunk; 1 gives a 3x1x3 layer.
    pub chunk_radius: i32,
    pub generator: GeneratorKind,
    pub noise_scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
    pub flat_stone_height: i32,
    pub flat_dirt_height: i32,
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            chunk_radius: 1,
            generator: GeneratorKind::Noise,
            noise_scale: 10.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            flat_stone_height: 3,
            flat_dirt_height: 5,
            light_direction: [0.0, -1.0, 0.0],
            light_color: [1.0, 1.0, 1.0],
        }
    }
}
