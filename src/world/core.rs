use crate::config::worldgen::WorldGenConfig;
use crate::render::pipeline::BlockRenderer;
use crate::utils::{Ray, Result, VoxelError, AABB};
use crate::world::block::Block;
use crate::world::block_material::BlockMaterial;
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::generator::{self, TerrainGenerator};
use glam::{IVec3, Vec3};
use log::{debug, info};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// World handle shared between the simulation and a renderer.
/// Updates take the write lock; rendering reads only after the update released it.
pub type SharedWorld = Arc<RwLock<World>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub color: Vec3,
}

/// First solid block along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub block: Block,
    pub chunk: ChunkCoord,
    pub local: IVec3,
    /// World-space cell of the hit block.
    pub position: IVec3,
    /// Outward normal of the face the ray entered through; zero when the ray starts inside the block.
    pub normal: IVec3,
    pub distance: f32,
}

impl RaycastHit {
    /// Empty cell in front of the struck face.
    pub fn adjacent(&self) -> IVec3 {
        self.position + self.normal
    }
}

/// Static set of chunks keyed by chunk coordinate.
#[derive(Debug, Default)]
pub struct World {
    chunks: HashMap<ChunkCoord, Chunk>,
    order: Vec<ChunkCoord>,
    directional_light: Option<DirectionalLight>,
}

impl World {
    /// Generates the configured neighbourhood and applies the configured light.
    pub fn new(config: &WorldGenConfig) -> Result<Self> {
        let generator = generator::from_config(config);
        let mut world = Self::generate(config.chunk_radius, generator.as_ref());
        world.set_directional_light(
            Vec3::from_array(config.light_direction),
            Vec3::from_array(config.light_color),
        )?;
        info!(
            "World ready: {} chunks, generator '{}', seed {}",
            world.chunk_count(),
            generator.name(),
            config.seed
        );
        Ok(world)
    }

    /// A `(2r+1) x 1 x (2r+1)` layer of chunks centred on the origin chunk.
    pub fn generate(radius: i32, generator: &dyn TerrainGenerator) -> Self {
        let radius = radius.max(0);
        let coords: Vec<ChunkCoord> = (-radius..=radius)
            .flat_map(|x| (-radius..=radius).map(move |z| ChunkCoord::new(x, 0, z)))
            .collect();

        let chunks: Vec<Chunk> = coords
            .par_iter()
            .map(|&coord| Chunk::generate(coord, generator))
            .collect();

        let mut world = Self::empty();
        for chunk in chunks {
            world.order.push(chunk.position);
            world.chunks.insert(chunk.position, chunk);
        }
        world
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedWorld {
        Arc::new(RwLock::new(self))
    }

    /// Adds a chunk; each chunk coordinate may be occupied once.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Result<()> {
        if self.chunks.contains_key(&chunk.position) {
            return Err(VoxelError::invalid(format!(
                "chunk {} is already loaded",
                chunk.position
            )));
        }
        self.order.push(chunk.position);
        self.chunks.insert(chunk.position, chunk);
        Ok(())
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Chunks in load order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.order.iter().filter_map(|coord| self.chunks.get(coord))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Owning chunk and local cell of an integer world position.
    pub fn world_to_chunk(world_pos: IVec3) -> (ChunkCoord, IVec3) {
        (
            ChunkCoord::from_world_block(world_pos),
            ChunkCoord::local_of(world_pos),
        )
    }

    pub fn chunk_to_world(coord: ChunkCoord, local: IVec3) -> IVec3 {
        coord.to_world_block(local)
    }

    /// `None` when no loaded chunk covers the position.
    pub fn get_block_at(&self, world_pos: IVec3) -> Option<&Block> {
        let (coord, local) = Self::world_to_chunk(world_pos);
        self.chunks.get(&coord)?.get_block(local.x, local.y, local.z)
    }

    pub fn is_solid_at(&self, world_pos: IVec3) -> bool {
        self.get_block_at(world_pos).is_some_and(Block::is_solid)
    }

    /// Writes `block` into the owning chunk and returns the block it replaced.
    pub fn set_block_at(&mut self, world_pos: IVec3, block: Block) -> Result<Block> {
        let (coord, local) = Self::world_to_chunk(world_pos);
        let chunk = self
            .chunks
            .get_mut(&coord)
            .ok_or(VoxelError::ChunkNotFound(world_pos))?;
        chunk.set_block(local.x, local.y, local.z, block)
    }

    /// Replaces the target with air and returns what was there.
    pub fn break_block(&mut self, target: IVec3) -> Result<Block> {
        let (_, local) = Self::world_to_chunk(target);
        let removed = self.set_block_at(target, Block::air(local))?;
        debug!("Broke {} at {}", removed.material(), target);
        Ok(removed)
    }

    /// Writes `material` at the target and returns the block it replaced.
    pub fn place_block(&mut self, target: IVec3, material: BlockMaterial) -> Result<Block> {
        let (_, local) = Self::world_to_chunk(target);
        let replaced = self.set_block_at(target, Block::from_material(local, material))?;
        debug!("Placed {} at {} (was {})", material, target, replaced.material());
        Ok(replaced)
    }

    /// Voxel traversal along the ray; reports the first solid block within `max_distance`.
    ///
    /// Each cell is visited at most once, so a block is never reported twice.
    /// A non-finite or negative `max_distance` hits nothing.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let ray = Ray::new(origin, direction)?;
        if !max_distance.is_finite() || max_distance < 0.0 {
            return None;
        }

        let mut cell = origin.floor().as_ivec3();
        let (step_x, mut t_max_x, t_delta_x) = ray.axis_step(0);
        let (step_y, mut t_max_y, t_delta_y) = ray.axis_step(1);
        let (step_z, mut t_max_z, t_delta_z) = ray.axis_step(2);
        let mut normal = IVec3::ZERO;
        let mut distance = 0.0_f32;

        loop {
            if let Some(block) = self.get_block_at(cell) {
                if block.is_solid() {
                    let (chunk, local) = Self::world_to_chunk(cell);
                    return Some(RaycastHit {
                        block: *block,
                        chunk,
                        local,
                        position: cell,
                        normal,
                        distance,
                    });
                }
            }

            if t_max_x <= t_max_y && t_max_x <= t_max_z {
                if t_max_x > max_distance {
                    return None;
                }
                cell.x += step_x;
                distance = t_max_x;
                t_max_x += t_delta_x;
                normal = IVec3::new(-step_x, 0, 0);
            } else if t_max_y <= t_max_z {
                if t_max_y > max_distance {
                    return None;
                }
                cell.y += step_y;
                distance = t_max_y;
                t_max_y += t_delta_y;
                normal = IVec3::new(0, -step_y, 0);
            } else {
                if t_max_z > max_distance {
                    return None;
                }
                cell.z += step_z;
                distance = t_max_z;
                t_max_z += t_delta_z;
                normal = IVec3::new(0, 0, -step_z);
            }
        }
    }

    /// Loaded chunks whose volume intersects the box, looked up by key in x, y, z order.
    pub fn chunks_overlapping<'a>(&'a self, aabb: &AABB) -> impl Iterator<Item = &'a Chunk> + 'a {
        let (min, max) = aabb.block_range();
        let min = ChunkCoord::from_world_block(min).0;
        let max = ChunkCoord::from_world_block(max).0;
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).flat_map(move |y| {
                (min.z..=max.z).filter_map(move |z| self.chunks.get(&ChunkCoord::new(x, y, z)))
            })
        })
    }

    pub fn set_directional_light(&mut self, direction: Vec3, color: Vec3) -> Result<()> {
        let direction = direction
            .try_normalize()
            .ok_or_else(|| VoxelError::invalid("light direction must be non-zero"))?;
        self.directional_light = Some(DirectionalLight { direction, color });
        Ok(())
    }

    pub fn clear_directional_light(&mut self) {
        self.directional_light = None;
    }

    pub fn directional_light(&self) -> Option<&DirectionalLight> {
        self.directional_light.as_ref()
    }

    pub fn update(&mut self, delta_time: f32) {
        for chunk in self.chunks.values_mut() {
            chunk.update(delta_time);
        }
    }

    /// Draws every chunk in load order and returns the number of blocks drawn.
    pub fn render<R: BlockRenderer + ?Sized>(&self, renderer: &mut R) -> Result<usize> {
        let mut drawn = 0;
        for chunk in self.chunks() {
            drawn += chunk.render(renderer)?;
        }
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::chunk::CHUNK_SIZE;
    use crate::world::generator::FlatTerrain;

    fn flat_world() -> World {
        World::generate(1, &FlatTerrain::new(4, 5))
    }

    fn empty_world() -> World {
        World::generate(1, &FlatTerrain::empty())
    }

    #[test]
    fn test_generates_three_by_three_layer() {
        let world = flat_world();
        assert_eq!(world.chunk_count(), 9);
        let mut origins: Vec<IVec3> = world.chunks().map(|c| c.origin()).collect();
        origins.sort_by_key(|o| (o.x, o.y, o.z));
        origins.dedup();
        assert_eq!(origins.len(), 9);
        for origin in origins {
            assert_eq!(origin.x.rem_euclid(CHUNK_SIZE), 0);
            assert_eq!(origin.y, 0);
            assert_eq!(origin.z.rem_euclid(CHUNK_SIZE), 0);
        }
        assert!(world.contains_chunk(ChunkCoord::new(-1, 0, 1)));
        assert!(!world.contains_chunk(ChunkCoord::new(2, 0, 0)));
    }

    #[test]
    fn test_world_to_chunk() {
        let (coord, local) = World::world_to_chunk(IVec3::new(16, 0, 16));
        assert_eq!(coord.origin(), IVec3::new(16, 0, 16));
        assert_eq!(local, IVec3::ZERO);

        let (coord, local) = World::world_to_chunk(IVec3::new(-1, 15, -17));
        assert_eq!(coord, ChunkCoord::new(-1, 0, -2));
        assert_eq!(local, IVec3::new(15, 15, 15));
        assert_eq!(World::chunk_to_world(coord, local), IVec3::new(-1, 15, -17));
    }

    #[test]
    fn test_block_lookup_and_missing_chunks() {
        let mut world = flat_world();
        assert_eq!(world.get_block_at(IVec3::new(-16, 3, 20)).unwrap().material(), BlockMaterial::Stone);
        assert_eq!(world.get_block_at(IVec3::new(0, 4, 0)).unwrap().material(), BlockMaterial::Dirt);
        assert!(world.get_block_at(IVec3::new(0, -1, 0)).is_none());
        assert!(world.get_block_at(IVec3::new(32, 0, 0)).is_none());

        let target = IVec3::new(0, 16, 0);
        let err = world.set_block_at(target, Block::air(IVec3::ZERO)).unwrap_err();
        assert_eq!(err, VoxelError::ChunkNotFound(target));
        assert!(err.is_recoverable());
        assert!(world.break_block(IVec3::new(-17, 0, 0)).is_err());
        assert!(world.place_block(IVec3::new(0, 0, 40), BlockMaterial::Stone).is_err());
    }

    #[test]
    fn test_break_then_place() {
        let mut world = flat_world();
        let p = IVec3::new(-3, 2, 7);
        assert_eq!(world.break_block(p).unwrap().material(), BlockMaterial::Stone);
        assert!(world.get_block_at(p).unwrap().is_air());
        world.place_block(p, BlockMaterial::Stone).unwrap();
        let block = world.get_block_at(p).unwrap();
        assert_eq!(block.material(), BlockMaterial::Stone);
        assert_eq!(block.position(), ChunkCoord::local_of(p));
    }

    #[test]
    fn test_raycast_hits_first_solid_once() {
        let world = flat_world();
        let hit = world
            .raycast(Vec3::new(0.5, 10.5, 0.5), Vec3::NEG_Y, 20.0)
            .expect("ray should hit the dirt layer");
        assert_eq!(hit.position, IVec3::new(0, 4, 0));
        assert_eq!(hit.block.material(), BlockMaterial::Dirt);
        assert_eq!(hit.normal, IVec3::Y);
        assert_eq!(hit.adjacent(), IVec3::new(0, 5, 0));
        assert!((hit.distance - 5.5).abs() < 1e-5);

        assert!(world.raycast(Vec3::new(0.5, 10.5, 0.5), Vec3::NEG_Y, 5.0).is_none());
        assert!(world.raycast(Vec3::new(0.5, 10.5, 0.5), Vec3::Y, 50.0).is_none());
        assert!(world.raycast(Vec3::new(0.5, 10.5, 0.5), Vec3::ZERO, 50.0).is_none());
    }

    #[test]
    fn test_raycast_rejects_unbounded_distance() {
        let world = empty_world();
        let origin = Vec3::new(0.5, 5.5, 0.5);
        assert!(world.raycast(origin, Vec3::X, f32::INFINITY).is_none());
        assert!(world.raycast(origin, Vec3::X, f32::NAN).is_none());
        assert!(world.raycast(origin, Vec3::X, -1.0).is_none());
        assert!(world.raycast(origin, Vec3::X, 1.0e4).is_none());
    }

    #[test]
    fn test_raycast_crosses_negative_chunk_boundary() {
        let mut world = empty_world();
        world.place_block(IVec3::new(-3, 5, 0), BlockMaterial::Wood).unwrap();
        world.place_block(IVec3::new(-6, 5, 0), BlockMaterial::Stone).unwrap();
        let hit = world
            .raycast(Vec3::new(2.5, 5.5, 0.5), Vec3::NEG_X, 16.0)
            .unwrap();
        assert_eq!(hit.position, IVec3::new(-3, 5, 0));
        assert_eq!(hit.chunk, ChunkCoord::new(-1, 0, 0));
        assert_eq!(hit.local, IVec3::new(13, 5, 0));
        assert_eq!(hit.normal, IVec3::X);
    }

    #[test]
    fn test_raycast_starting_inside_block() {
        let world = flat_world();
        let hit = world.raycast(Vec3::new(1.5, 1.5, 1.5), Vec3::X, 3.0).unwrap();
        assert_eq!(hit.position, IVec3::new(1, 1, 1));
        assert_eq!(hit.normal, IVec3::ZERO);
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_chunks_overlapping() {
        let world = flat_world();
        let aabb = AABB::from_position_size(Vec3::new(15.5, 2.0, -0.3), Vec3::new(0.6, 1.8, 0.6));
        let mut coords: Vec<ChunkCoord> = world.chunks_overlapping(&aabb).map(|c| c.position).collect();
        coords.sort();
        assert_eq!(
            coords,
            vec![
                ChunkCoord::new(0, 0, -1),
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(1, 0, -1),
                ChunkCoord::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_chunks_overlapping_only_visits_loaded_keys() {
        let world = flat_world();
        let far = AABB::from_position_size(Vec3::new(500.0, 2.0, 500.0), Vec3::ONE);
        assert_eq!(world.chunks_overlapping(&far).count(), 0);

        let wide = AABB::new(Vec3::new(-40.0, -20.0, -40.0), Vec3::new(40.0, 20.0, 40.0));
        let mut coords: Vec<ChunkCoord> = world.chunks_overlapping(&wide).map(|c| c.position).collect();
        assert_eq!(coords.len(), 9);
        coords.dedup();
        assert_eq!(coords.len(), 9);
    }

    #[test]
    fn test_directional_light() {
        let mut world = empty_world();
        assert!(world.directional_light().is_none());
        world.set_directional_light(Vec3::new(0.0, -2.0, 0.0), Vec3::ONE).unwrap();
        assert_eq!(world.directional_light().unwrap().direction, Vec3::NEG_Y);
        assert!(world.set_directional_light(Vec3::ZERO, Vec3::ONE).is_err());
        world.clear_directional_light();
        assert!(world.directional_light().is_none());
    }

    #[test]
    fn test_insert_chunk_rejects_duplicates() {
        let mut world = World::empty();
        world.insert_chunk(Chunk::new(ChunkCoord::new(0, 0, 0))).unwrap();
        assert!(matches!(
            world.insert_chunk(Chunk::new(ChunkCoord::new(0, 0, 0))),
            Err(VoxelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_world_from_config() {
        let config = WorldGenConfig::default();
        let world = World::new(&config).unwrap();
        assert_eq!(world.chunk_count(), 9);
        assert!(world.directional_light().is_some());
    }
}
