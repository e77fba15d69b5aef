use glam::IVec3;
use thiserror::Error;

/// Failure kinds shared by the block, chunk, world and render seams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoxelError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Local coordinate ({x}, {y}, {z}) is outside the chunk")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("No loaded chunk owns world position {0}")]
    ChunkNotFound(IVec3),

    #[error("Shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

impl VoxelError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// World-level lookups that missed a chunk are recoverable "no effect" conditions.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ChunkNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, VoxelError>;
