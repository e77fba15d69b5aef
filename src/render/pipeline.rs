use crate::utils::{Result, VoxelError};
use crate::world::{Block, BlockMaterial};
use glam::{Mat4, Vec3};

/// Number of floats in a column-major 4x4 model matrix.
pub const MODEL_MATRIX_LEN: usize = 16;

/// Backend that draws one block at a time.
///
/// `model` is a column-major 4x4 matrix flattened to 16 floats, as produced by
/// [`Mat4::to_cols_array`]. Backends that need a typed matrix go through
/// [`model_matrix_from_slice`], which rejects any other length.
pub trait BlockRenderer {
    fn render_block(&mut self, block: &Block, model: &[f32]) -> Result<()>;

    /// Called once before a frame's first block.
    fn begin_frame(&mut self) {}

    /// Called once after a frame's last block.
    fn end_frame(&mut self) {}
}

pub fn model_matrix_from_slice(model: &[f32]) -> Result<Mat4> {
    if model.len() != MODEL_MATRIX_LEN {
        return Err(VoxelError::ShapeMismatch {
            expected: MODEL_MATRIX_LEN,
            actual: model.len(),
        });
    }
    Ok(Mat4::from_cols_slice(model))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub material: BlockMaterial,
    pub translation: Vec3,
    pub light_level: u8,
}

/// Renderer that keeps every draw of the current frame instead of rasterising.
/// Used by the headless binary and by tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub draws: Vec<DrawCall>,
    pub frames: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, material: BlockMaterial) -> usize {
        self.draws.iter().filter(|d| d.material == material).count()
    }
}

impl BlockRenderer for RecordingRenderer {
    fn render_block(&mut self, block: &Block, model: &[f32]) -> Result<()> {
        let model = model_matrix_from_slice(model)?;
        self.draws.push(DrawCall {
            material: block.material(),
            translation: model.w_axis.truncate(),
            light_level: block.light_level(),
        });
        Ok(())
    }

    fn begin_frame(&mut self) {
        self.draws.clear();
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
