use crate::utils::{Result, VoxelError};
use crate::world::block_material::BlockMaterial;
use crate::world::chunk::CHUNK_SIZE;
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_LIGHT_LEVEL: u8 = 15;
pub const DEFAULT_HARDNESS: f32 = 1.0;

/// One voxel. `position` is chunk-local, each axis in `[0, CHUNK_SIZE)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    position: IVec3,
    material: BlockMaterial,
    hardness: f32,
    light_level: u8,
}

impl Block {
    /// Block with the default hardness (1.0) and no emitted light.
    pub fn new(position: IVec3, material: BlockMaterial) -> Self {
        Self {
            position,
            material,
            hardness: DEFAULT_HARDNESS,
            light_level: 0,
        }
    }

    /// Block whose hardness comes from its material.
    pub fn from_material(position: IVec3, material: BlockMaterial) -> Self {
        Self {
            hardness: material.default_hardness(),
            ..Self::new(position, material)
        }
    }

    pub fn with_properties(
        position: IVec3,
        material: BlockMaterial,
        hardness: f32,
        light_level: i32,
    ) -> Result<Self> {
        let mut block = Self::new(position, material);
        block.set_hardness(hardness)?;
        block.set_light_level(light_level)?;
        Ok(block)
    }

    pub fn air(position: IVec3) -> Self {
        Self::from_material(position, BlockMaterial::Air)
    }

    pub fn position(&self) -> IVec3 {
        self.position
    }

    /// Re-homes the block to a local cell; used by the owning chunk on write.
    pub(crate) fn set_position(&mut self, position: IVec3) {
        debug_assert!(position.cmpge(IVec3::ZERO).all() && position.cmplt(IVec3::splat(CHUNK_SIZE)).all());
        self.position = position;
    }

    pub fn material(&self) -> BlockMaterial {
        self.material
    }

    pub fn set_material(&mut self, material: BlockMaterial) {
        self.material = material;
    }

    pub fn hardness(&self) -> f32 {
        self.hardness
    }

    pub fn set_hardness(&mut self, hardness: f32) -> Result<()> {
        if !hardness.is_finite() || hardness < 0.0 {
            return Err(VoxelError::invalid(format!(
                "hardness must be a finite value >= 0, got {}",
                hardness
            )));
        }
        self.hardness = hardness;
        Ok(())
    }

    pub fn light_level(&self) -> u8 {
        self.light_level
    }

    pub fn set_light_level(&mut self, light_level: i32) -> Result<()> {
        if !(0..=MAX_LIGHT_LEVEL as i32).contains(&light_level) {
            return Err(VoxelError::invalid(format!(
                "light level must be between 0 and {}, got {}",
                MAX_LIGHT_LEVEL, light_level
            )));
        }
        self.light_level = light_level as u8;
        Ok(())
    }

    pub fn is_air(&self) -> bool {
        self.material.is_air()
    }

    pub fn is_solid(&self) -> bool {
        self.material.is_solid()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(position={}, material={}, hardness={}, light_level={})",
            self.position, self.material, self.hardness, self.light_level
        )
    }
}
