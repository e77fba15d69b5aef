pub mod pipeline;

pub use pipeline::{model_matrix_from_slice, BlockRenderer, DrawCall, RecordingRenderer};
