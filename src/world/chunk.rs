use crate::render::pipeline::BlockRenderer;
use crate::utils::{Result, VoxelError};
use crate::world::block::Block;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::generator::TerrainGenerator;
use glam::{IVec3, Mat4};
use log::trace;

pub const CHUNK_SIZE: i32 = 16;
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE as usize;

/// A 16³ cube of blocks. Every cell always holds a block; empty cells hold air.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub position: ChunkCoord,
    blocks: Box<[Block]>,
    dirty: bool,
}

impl Chunk {
    /// Chunk filled with air.
    pub fn new(position: ChunkCoord) -> Self {
        let blocks = (0..CHUNK_VOLUME)
            .map(|index| Block::air(Self::local_of_index(index)))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            position,
            blocks,
            dirty: true,
        }
    }

    /// Fills every cell from `generator`, sampled at the cell's world position.
    pub fn generate(position: ChunkCoord, generator: &dyn TerrainGenerator) -> Self {
        let origin = position.origin();
        let blocks = (0..CHUNK_VOLUME)
            .map(|index| {
                let local = Self::local_of_index(index);
                let material = generator.material_at(origin + local);
                Block::from_material(local, material)
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        let chunk = Self {
            position,
            blocks,
            dirty: true,
        };
        trace!(
            "Generated chunk {} with '{}' ({} solid blocks)",
            position,
            generator.name(),
            chunk.solid_count()
        );
        chunk
    }

    pub fn origin(&self) -> IVec3 {
        self.position.origin()
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_SIZE).contains(&x) && (0..CHUNK_SIZE).contains(&y) && (0..CHUNK_SIZE).contains(&z)
    }

    /// Linear index `x + y*16 + z*256`. Caller guarantees bounds.
    #[inline]
    fn get_index(x: i32, y: i32, z: i32) -> usize {
        (x + y * CHUNK_SIZE + z * CHUNK_SIZE * CHUNK_SIZE) as usize
    }

    #[inline]
    fn local_of_index(index: usize) -> IVec3 {
        let index = index as i32;
        IVec3::new(
            index % CHUNK_SIZE,
            (index / CHUNK_SIZE) % CHUNK_SIZE,
            index / (CHUNK_SIZE * CHUNK_SIZE),
        )
    }

    /// `None` when any coordinate is outside `[0, CHUNK_SIZE)`.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<&Block> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        self.blocks.get(Self::get_index(x, y, z))
    }

    /// Overwrites the cell in place and returns the block it replaced.
    ///
    /// The stored block is re-homed to `(x, y, z)`. Nothing propagates to
    /// neighbouring cells or chunks; callers that need light or physics
    /// updates react to the returned block and the dirty flag.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, mut block: Block) -> Result<Block> {
        if !Self::in_bounds(x, y, z) {
            return Err(VoxelError::OutOfBounds { x, y, z });
        }

        block.set_position(IVec3::new(x, y, z));
        let index = Self::get_index(x, y, z);
        let previous = std::mem::replace(&mut self.blocks[index], block);
        self.dirty = true;
        Ok(previous)
    }

    /// Block-level simulation hook (falling blocks, fluids). Nothing simulates yet.
    pub fn update(&mut self, _delta_time: f32) {}

    /// Blocks in storage order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn solid_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_solid())
    }

    pub fn solid_count(&self) -> usize {
        self.solid_blocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.solid_count() == 0
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_some_and(Block::is_solid)
    }

    /// Model matrix of a block: chunk origin plus the block's local position.
    pub fn block_transform(&self, block: &Block) -> Mat4 {
        Mat4::from_translation(self.origin().as_vec3() + block.position().as_vec3())
    }

    /// One draw per non-air block.
    pub fn render<R: BlockRenderer + ?Sized>(&self, renderer: &mut R) -> Result<usize> {
        let mut drawn = 0;
        for block in self.solid_blocks() {
            let model = self.block_transform(block).to_cols_array();
            renderer.render_block(block, &model)?;
            drawn += 1;
        }
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pipeline::RecordingRenderer;
    use crate::world::block_material::BlockMaterial;
    use crate::world::generator::{FlatTerrain, ScatterTerrain};
    use glam::Vec3;

    fn stone(x: i32, y: i32, z: i32) -> Block {
        Block::with_properties(IVec3::new(x, y, z), BlockMaterial::Stone, 2.0, 3).unwrap()
    }

    #[test]
    fn test_set_get_round_trip_every_cell() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        for z in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                for x in 0..CHUNK_SIZE {
                    let block = stone(x, y, z);
                    chunk.set_block(x, y, z, block).unwrap();
                    assert_eq!(chunk.get_block(x, y, z), Some(&block));
                }
            }
        }
        assert_eq!(chunk.solid_count(), CHUNK_VOLUME);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        let outside = [
            (-1, 0, 0),
            (0, -1, 0),
            (0, 0, -1),
            (16, 0, 0),
            (0, 16, 0),
            (0, 0, 16),
            (100, -100, 3),
        ];
        for (x, y, z) in outside {
            assert!(chunk.get_block(x, y, z).is_none());
            assert_eq!(
                chunk.set_block(x, y, z, stone(0, 0, 0)),
                Err(VoxelError::OutOfBounds { x, y, z })
            );
        }
    }

    #[test]
    fn test_index_layout() {
        assert_eq!(Chunk::get_index(1, 0, 0), 1);
        assert_eq!(Chunk::get_index(0, 1, 0), 16);
        assert_eq!(Chunk::get_index(0, 0, 1), 256);
        for index in [0, 17, 300, CHUNK_VOLUME - 1] {
            let local = Chunk::local_of_index(index);
            assert_eq!(Chunk::get_index(local.x, local.y, local.z), index);
        }
    }

    #[test]
    fn test_every_cell_holds_a_block_at_its_position() {
        let chunk = Chunk::generate(ChunkCoord::new(-1, 0, 2), &ScatterTerrain::new(3, 6, 0.5));
        assert_eq!(chunk.blocks().len(), CHUNK_VOLUME);
        for (index, block) in chunk.blocks().iter().enumerate() {
            assert_eq!(block.position(), Chunk::local_of_index(index));
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let generator = ScatterTerrain::new(99, 6, 0.5);
        let a = Chunk::generate(ChunkCoord::new(1, 0, 0), &generator);
        let b = Chunk::generate(ChunkCoord::new(1, 0, 0), &generator);
        assert_eq!(a.blocks(), b.blocks());
    }

    #[test]
    fn test_flat_generation_uses_world_height() {
        let chunk = Chunk::generate(ChunkCoord::new(0, 0, 0), &FlatTerrain::new(2, 3));
        assert_eq!(chunk.get_block(4, 1, 4).unwrap().material(), BlockMaterial::Stone);
        assert_eq!(chunk.get_block(4, 2, 4).unwrap().material(), BlockMaterial::Dirt);
        assert_eq!(chunk.get_block(4, 3, 4).unwrap().material(), BlockMaterial::Air);
        assert_eq!(chunk.solid_count(), 3 * CHUNK_AREA);
    }

    #[test]
    fn test_set_block_rehomes_and_returns_previous() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0, 0));
        chunk.mark_clean();
        let previous = chunk.set_block(3, 4, 5, stone(0, 0, 0)).unwrap();
        assert!(previous.is_air());
        assert_eq!(chunk.get_block(3, 4, 5).unwrap().position(), IVec3::new(3, 4, 5));
        assert!(chunk.is_dirty());
    }

    #[test]
    fn test_render_skips_air_and_translates() {
        let mut chunk = Chunk::new(ChunkCoord::new(1, 0, -1));
        chunk.set_block(2, 3, 4, stone(2, 3, 4)).unwrap();
        let mut renderer = RecordingRenderer::default();
        assert_eq!(chunk.render(&mut renderer).unwrap(), 1);
        assert_eq!(renderer.draws.len(), 1);
        assert_eq!(renderer.draws[0].translation, Vec3::new(18.0, 3.0, -12.0));
    }

    #[test]
    fn test_update_is_a_no_op() {
        let mut chunk = Chunk::generate(ChunkCoord::new(0, 0, 0), &FlatTerrain::new(1, 2));
        let before = chunk.blocks().to_vec();
        chunk.update(0.016);
        assert_eq!(chunk.blocks(), &before[..]);
    }
}
