use crate::config::worldgen::{GeneratorKind, WorldGenConfig};
use crate::world::generator::core::TerrainGenerator;
use glam::IVec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Coherent fractal Perlin noise sampled in three dimensions.
pub struct NoiseTerrain {
    noise: Fbm<Perlin>,
    scale: f64,
}

impl NoiseTerrain {
    pub fn new(seed: u64, scale: f64, octaves: usize, persistence: f64, lacunarity: f64) -> Self {
        let noise = Fbm::<Perlin>::new(fold_seed(seed))
            .set_octaves(octaves.max(1))
            .set_frequency(1.0)
            .set_persistence(persistence)
            .set_lacunarity(lacunarity);

        Self {
            noise,
            scale: if scale > 0.0 { scale } else { 1.0 },
        }
    }
}

impl TerrainGenerator for NoiseTerrain {
    fn sample(&self, world: IVec3) -> f64 {
        let value = self.noise.get([
            world.x as f64 / self.scale,
            world.y as f64 / self.scale,
            world.z as f64 / self.scale,
        ]);
        ((value + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "noise"
    }
}

/// Per-cell random layering: a base sample plus octaves of averaged pairs,
/// normalized into `[0, 1]`. Each cell seeds its own RNG, so output is reproducible.
pub struct ScatterTerrain {
    seed: u64,
    octaves: usize,
    persistence: f64,
}

impl ScatterTerrain {
    pub fn new(seed: u64, octaves: usize, persistence: f64) -> Self {
        Self {
            seed,
            octaves,
            persistence,
        }
    }

    fn cell_rng(&self, world: IVec3) -> ChaCha12Rng {
        let hash = self
            .seed
            .wrapping_add((world.x as i64 as u64).wrapping_mul(341873128712))
            .wrapping_add((world.y as i64 as u64).wrapping_mul(2654435761))
            .wrapping_add((world.z as i64 as u64).wrapping_mul(132897987541));
        ChaCha12Rng::seed_from_u64(hash)
    }
}

impl TerrainGenerator for ScatterTerrain {
    fn sample(&self, world: IVec3) -> f64 {
        let mut rng = self.cell_rng(world);
        let mut value: f64 = rng.gen();
        let mut total_amplitude = 1.0;

        for octave in 0..self.octaves {
            let amplitude = self.persistence.powi(octave as i32);
            let pair = (rng.gen::<f64>() + rng.gen::<f64>()) / 2.0;
            value += pair * amplitude;
            total_amplitude += amplitude;
        }

        (value / total_amplitude).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "scatter"
    }
}

/// Horizontal layers: stone up to `stone_height`, dirt up to `dirt_height`, air above.
pub struct FlatTerrain {
    pub stone_height: i32,
    pub dirt_height: i32,
}

impl FlatTerrain {
    pub fn new(stone_height: i32, dirt_height: i32) -> Self {
        Self {
            stone_height,
            dirt_height: dirt_height.max(stone_height),
        }
    }

    /// No solid blocks anywhere.
    pub fn empty() -> Self {
        Self::new(i32::MIN, i32::MIN)
    }
}

impl TerrainGenerator for FlatTerrain {
    fn sample(&self, world: IVec3) -> f64 {
        if world.y < self.stone_height {
            1.0
        } else if world.y < self.dirt_height {
            0.5
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}

pub fn from_config(config: &WorldGenConfig) -> Box<dyn TerrainGenerator> {
    match config.generator {
        GeneratorKind::Noise => Box::new(NoiseTerrain::new(
            config.seed,
            config.noise_scale,
            config.octaves,
            config.persistence,
            config.lacunarity,
        )),
        GeneratorKind::Scatter => Box::new(ScatterTerrain::new(
            config.seed,
            config.octaves,
            config.persistence,
        )),
        GeneratorKind::Flat => Box::new(FlatTerrain::new(
            config.flat_stone_height,
            config.flat_dirt_height,
        )),
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
