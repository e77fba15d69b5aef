use crate::utils::AABB;
use crate::world::{Block, Chunk, World, CHUNK_SIZE};
use glam::IVec3;

/// A solid block overlapping a queried box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub block: Block,
    /// World-space cell of the block.
    pub position: IVec3,
}

impl Collision {
    pub fn aabb(&self) -> AABB {
        AABB::unit_block(self.position)
    }
}

/// First solid block whose unit box strictly intersects `aabb`, or `None`.
///
/// Only chunks overlapping the box are scanned. Air never collides.
pub fn check_collision(aabb: &AABB, world: &World) -> Option<Collision> {
    overlapping_solids(aabb, world).next()
}

/// Every solid block strictly intersecting `aabb`, chunk by chunk in load order.
pub fn collect_collisions(aabb: &AABB, world: &World) -> Vec<Collision> {
    overlapping_solids(aabb, world).collect()
}

fn overlapping_solids<'a>(aabb: &'a AABB, world: &'a World) -> impl Iterator<Item = Collision> + 'a {
    let (min, max) = aabb.block_range();
    world
        .chunks_overlapping(aabb)
        .flat_map(move |chunk| solids_in_chunk(chunk, aabb, min, max))
}

fn solids_in_chunk<'a>(
    chunk: &'a Chunk,
    aabb: &'a AABB,
    min: IVec3,
    max: IVec3,
) -> impl Iterator<Item = Collision> + 'a {
    let origin = chunk.origin();
    let lo = (min - origin).max(IVec3::ZERO);
    let hi = (max - origin).min(IVec3::splat(CHUNK_SIZE - 1));

    (lo.z..=hi.z).flat_map(move |z| {
        (lo.y..=hi.y).flat_map(move |y| {
            (lo.x..=hi.x).filter_map(move |x| {
                let block = chunk.get_block(x, y, z)?;
                if !block.is_solid() {
                    return None;
                }
                let position = origin + IVec3::new(x, y, z);
                AABB::unit_block(position)
                    .intersects(aabb)
                    .then_some(Collision { block: *block, position })
            })
        })
    })
}
