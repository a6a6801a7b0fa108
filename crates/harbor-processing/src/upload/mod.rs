pub mod file_ingestor;
#[cfg(feature = "image")]
pub mod image_ingestor;
mod pipeline;
pub mod types;

pub use file_ingestor::ingest_files;
#[cfg(feature = "image")]
pub use image_ingestor::ingest_images;
pub use types::*;
