//! Image resizing and re-encoding

pub mod resize;
pub mod transcoder;

pub use resize::{DimensionError, ResizePlan, MAX_IMAGE_DIMENSION};
pub use transcoder::{ImageTranscoder, OutputFormat};
