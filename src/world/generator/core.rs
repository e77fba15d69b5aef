use crate::world::block_material::BlockMaterial;
use glam::IVec3;

/// Samples strictly above this become stone.
pub const STONE_THRESHOLD: f64 = 0.6;
/// Samples strictly above this (and not stone) become dirt.
pub const DIRT_THRESHOLD: f64 = 0.4;

/// Pluggable terrain strategy. Implementations must be pure: the same
/// world position always yields the same sample.
pub trait TerrainGenerator: Send + Sync {
    /// Scalar in `[0, 1]` for the cell at `world`.
    fn sample(&self, world: IVec3) -> f64;

    fn material_at(&self, world: IVec3) -> BlockMaterial {
        classify(self.sample(world))
    }

    fn name(&self) -> &'static str;
}

pub fn classify(value: f64) -> BlockMaterial {
    if value > STONE_THRESHOLD {
        BlockMaterial::Stone
    } else if value > DIRT_THRESHOLD {
        BlockMaterial::Dirt
    } else {
        BlockMaterial::Air
    }
}

impl<F> TerrainGenerator for F
where
    F: Fn(IVec3) -> f64 + Send + Sync,
{
    fn sample(&self, world: IVec3) -> f64 {
        self(world)
    }

    fn name(&self) -> &'static str {
        "closure"
    }
}
