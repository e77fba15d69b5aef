//! src/utils/math.rs
//! Geometric types shared by collision and physics
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box spanning `position` to `position + size`.
    pub fn from_position_size(position: Vec3, size: Vec3) -> Self {
        Self::new(position, position + size)
    }

    /// The unit cube occupied by the block at an integer world position.
    pub fn unit_block(position: IVec3) -> Self {
        let min = position.as_vec3();
        Self::new(min, min + Vec3::ONE)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Strict overlap test; boxes that only share a face do not intersect.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &AABB) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Integer cells touched by the box interior, inclusive on both ends.
    pub fn block_range(&self) -> (IVec3, IVec3) {
        let min = self.min.floor().as_ivec3();
        // A box ending exactly on a grid line does not reach into the next cell.
        let max = self.max.ceil().as_ivec3() - IVec3::ONE;
        (min, max)
    }
}
