use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::upload::{ImageDimensions, ImageUploadConfiguration};

/// Largest width or height an image may be resized to
pub const MAX_IMAGE_DIMENSION: u32 = 65535;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimensionError {
    #[error("Maximum allowable image height is 65535px")]
    HeightTooLarge(u32),

    #[error("Maximum allowable image width is 65535px")]
    WidthTooLarge(u32),

    #[error("Image dimensions must be greater than 0")]
    Zero,
}

/// How images of an upload are resized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePlan {
    /// Resize to exactly these dimensions, ignoring the aspect ratio
    Exact { width: u32, height: u32 },
    /// Scale to `width` in either direction, keeping the aspect ratio.
    /// `compress` selects the harder lossy preset.
    ScaleToWidth { width: u32, compress: bool },
    /// Keep the original size
    Original,
}

impl ResizePlan {
    pub fn from_config(config: &ImageUploadConfiguration) -> Result<Self, DimensionError> {
        if config.max_width == Some(0) {
            return Err(DimensionError::Zero);
        }

        match config.dimensions {
            ImageDimensions::Exact { width, height } => {
                if height > MAX_IMAGE_DIMENSION {
                    return Err(DimensionError::HeightTooLarge(height));
                }
                if width > MAX_IMAGE_DIMENSION {
                    return Err(DimensionError::WidthTooLarge(width));
                }
                if width == 0 || height == 0 {
                    return Err(DimensionError::Zero);
                }

                if config.preserve_ratio {
                    tracing::debug!(
                        width,
                        height,
                        "preserve_ratio ignored because exact dimensions are configured"
                    );
                }

                let width = match config.max_width {
                    Some(max_width) if max_width < width => max_width,
                    _ => width,
                };
                Ok(ResizePlan::Exact { width, height })
            }
            ImageDimensions::Unset => match config.max_width {
                Some(max_width) => Ok(ResizePlan::ScaleToWidth {
                    width: max_width.min(MAX_IMAGE_DIMENSION),
                    compress: config.preserve_ratio,
                }),
                None => Ok(ResizePlan::Original),
            },
        }
    }

    /// Whether encoders should use the harder lossy preset
    pub fn compresses_harder(&self) -> bool {
        match *self {
            ResizePlan::Exact { .. } => false,
            ResizePlan::ScaleToWidth { compress, .. } => compress,
            ResizePlan::Original => true,
        }
    }

    pub fn apply(&self, img: DynamicImage) -> DynamicImage {
        let target = match *self {
            ResizePlan::Exact { width, height } => (width, height),
            ResizePlan::ScaleToWidth { width: target_width, .. } => {
                let (width, height) = img.dimensions();
                let scaled = (u64::from(height) * u64::from(target_width) + u64::from(width) / 2)
                    / u64::from(width.max(1));
                let scaled = scaled.clamp(1, u64::from(MAX_IMAGE_DIMENSION)) as u32;
                (target_width, scaled)
            }
            ResizePlan::Original => return img,
        };

        if img.dimensions() == target {
            img
        } else {
            img.resize_exact(target.0, target.1, FilterType::Lanczos3)
        }
    }
}
