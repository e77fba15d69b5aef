use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::VoxelError;

/// Closed set of block materials. `Air` is a real material, not an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockMaterial {
    #[default]
    Air,
    Dirt,
    Grass,
    Stone,
    Sand,
    Wood,
}

impl BlockMaterial {
    pub const ALL: [BlockMaterial; 6] = [
        Self::Air,
        Self::Dirt,
        Self::Grass,
        Self::Stone,
        Self::Sand,
        Self::Wood,
    ];

    pub fn is_air(self) -> bool {
        self == Self::Air
    }

    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// How long the material resists breaking, relative to dirt-like blocks.
    pub fn default_hardness(self) -> f32 {
        match self {
            Self::Air => 0.0,
            Self::Dirt | Self::Grass | Self::Sand => 0.5,
            Self::Wood => 2.0,
            Self::Stone => 1.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Stone => "stone",
            Self::Sand => "sand",
            Self::Wood => "wood",
        }
    }
}

impl fmt::Display for BlockMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlockMaterial {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| VoxelError::invalid(format!("unknown block material '{}'", s)))
    }
}
