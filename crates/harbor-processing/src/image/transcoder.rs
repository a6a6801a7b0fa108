use std::io::Cursor;

use anyhow::Result;
use bytes::Bytes;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView};

use super::resize::ResizePlan;
use crate::mime::ImageMime;

/// Encoding of a stored image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Images are stored in the format they were declared as.
    pub fn from_mime(mime: ImageMime) -> Self {
        match mime {
            ImageMime::Png => OutputFormat::Png,
            ImageMime::Jpeg | ImageMime::Jpg => OutputFormat::Jpeg,
            ImageMime::Webp => OutputFormat::WebP,
        }
    }

    /// Lossy quality (0-100)
    pub fn quality(self, compress_harder: bool) -> u8 {
        if compress_harder {
            35
        } else {
            60
        }
    }
}

/// Decodes, resizes and re-encodes uploaded images
pub struct ImageTranscoder;

impl ImageTranscoder {
    /// Decode `data`, apply `plan` and encode in the declared format.
    ///
    /// CPU bound; run it on the blocking pool.
    pub fn transcode(data: &[u8], mime: ImageMime, plan: ResizePlan) -> Result<Bytes> {
        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()?;

        let resized = plan.apply(img);
        let format = OutputFormat::from_mime(mime);
        let quality = format.quality(plan.compresses_harder());

        tracing::debug!(
            mime = %mime,
            width = resized.width(),
            height = resized.height(),
            quality,
            "Encoding image"
        );

        match format {
            OutputFormat::Png => Self::encode_png(&resized),
            OutputFormat::Jpeg => Self::encode_jpeg(&resized, quality),
            OutputFormat::WebP => Self::encode_webp(&resized, quality),
        }
    }

    /// Lossless PNG with adaptive row filtering
    fn encode_png(img: &DynamicImage) -> Result<Bytes> {
        let mut buffer = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);
        img.write_with_encoder(encoder)?;

        Ok(Bytes::from(buffer))
    }

    /// JPEG via mozjpeg
    fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Bytes> {
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
        comp.set_size(width as usize, height as usize);
        comp.set_quality(quality as f32);
        comp.set_optimize_coding(true);

        let mut comp = comp.start_compress(Vec::new())?;
        comp.write_scanlines(&rgb_img)?;
        let jpeg_data = comp.finish()?;

        Ok(Bytes::from(jpeg_data))
    }

    /// Lossy WebP via libwebp
    fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Bytes> {
        let (width, height) = img.dimensions();
        let rgba_img = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
        let webp_data = encoder.encode(quality as f32);

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn fixture(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, format)
            .unwrap();
        buffer.into_inner()
    }

    fn decoded(data: &[u8]) -> (ImageFormat, (u32, u32)) {
        let format = image::guess_format(data).unwrap();
        let img = image::load_from_memory(data).unwrap();
        (format, img.dimensions())
    }

    #[test]
    fn test_quality_by_mode() {
        assert_eq!(OutputFormat::Jpeg.quality(true), 35);
        assert_eq!(OutputFormat::WebP.quality(false), 60);
    }

    #[test]
    fn test_quality_follows_resize_plan() {
        assert_eq!(OutputFormat::Jpeg.quality(ResizePlan::Original.compresses_harder()), 35);
        let exact = ResizePlan::Exact { width: 10, height: 10 };
        assert_eq!(OutputFormat::Jpeg.quality(exact.compresses_harder()), 60);
        let plain = ResizePlan::ScaleToWidth { width: 60, compress: false };
        assert_eq!(OutputFormat::WebP.quality(plain.compresses_harder()), 60);
        let preserving = ResizePlan::ScaleToWidth { width: 60, compress: true };
        assert_eq!(OutputFormat::WebP.quality(preserving.compresses_harder()), 35);
    }

    #[test]
    fn test_jpg_is_encoded_as_jpeg() {
        assert_eq!(OutputFormat::from_mime(ImageMime::Jpg), OutputFormat::Jpeg);
    }

    #[test]
    fn test_png_exact_resize() {
        let data = fixture(ImageFormat::Png, 80, 40);
        let out = ImageTranscoder::transcode(
            &data,
            ImageMime::Png,
            ResizePlan::Exact { width: 30, height: 30 },
        )
        .unwrap();
        assert_eq!(decoded(&out), (ImageFormat::Png, (30, 30)));
    }

    #[test]
    fn test_jpeg_ratio_preserving_resize() {
        let data = fixture(ImageFormat::Jpeg, 120, 60);
        let out = ImageTranscoder::transcode(
            &data,
            ImageMime::Jpeg,
            ResizePlan::ScaleToWidth { width: 60, compress: true },
        )
        .unwrap();
        assert_eq!(decoded(&out), (ImageFormat::Jpeg, (60, 30)));
    }

    #[test]
    fn test_webp_keeps_original_size() {
        let data = fixture(ImageFormat::Png, 40, 20);
        let out = ImageTranscoder::transcode(
            &data,
            ImageMime::Webp,
            ResizePlan::Original,
        )
        .unwrap();
        assert_eq!(decoded(&out), (ImageFormat::WebP, (40, 20)));
    }

    #[test]
    fn test_undecodable_data_is_an_error() {
        let result = ImageTranscoder::transcode(
            b"definitely not an image",
            ImageMime::Png,
            ResizePlan::Original,
        );
        assert!(result.is_err());
    }
}
