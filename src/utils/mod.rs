pub mod error;
pub mod math;
pub mod ray;

pub use error::{Result, VoxelError};
pub use math::AABB;
pub use ray::Ray;
