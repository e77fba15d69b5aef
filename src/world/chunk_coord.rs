use crate::world::chunk::CHUNK_SIZE;
use glam::{IVec3, Vec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Chunk-grid coordinate. The chunk's world-space origin is `coord * CHUNK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChunkCoord(pub IVec3);

impl Serialize for ChunkCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.0.x, self.0.y, self.0.z).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, y, z) = <(i32, i32, i32)>::deserialize(deserializer)?;
        Ok(ChunkCoord(IVec3::new(x, y, z)))
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .cmp(&other.0.x)
            .then(self.0.y.cmp(&other.0.y))
            .then(self.0.z.cmp(&other.0.z))
    }
}

impl ChunkCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// Chunk owning an integer world block position (floor division).
    pub fn from_world_block(pos: IVec3) -> Self {
        Self(IVec3::new(
            pos.x.div_euclid(CHUNK_SIZE),
            pos.y.div_euclid(CHUNK_SIZE),
            pos.z.div_euclid(CHUNK_SIZE),
        ))
    }

    /// Chunk owning a continuous world position.
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self::from_world_block(pos.floor().as_ivec3())
    }

    /// World-space position of local cell (0, 0, 0).
    pub fn origin(&self) -> IVec3 {
        self.0 * CHUNK_SIZE
    }

    /// Local cell of a world block position, each axis in `[0, CHUNK_SIZE)`.
    pub fn local_of(pos: IVec3) -> IVec3 {
        IVec3::new(
            pos.x.rem_euclid(CHUNK_SIZE),
            pos.y.rem_euclid(CHUNK_SIZE),
            pos.z.rem_euclid(CHUNK_SIZE),
        )
    }

    pub fn to_world_block(&self, local: IVec3) -> IVec3 {
        self.origin() + local
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0.x, self.0.y, self.0.z)
    }
}
