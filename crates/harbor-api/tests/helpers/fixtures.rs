//! Test fixtures: multipart parts for plain files and generated images.

use std::io::Cursor;

use axum_test::multipart::Part;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

pub fn text_part(file_name: &str, contents: &str) -> Part {
    Part::bytes(contents.as_bytes().to_vec())
        .file_name(file_name.to_string())
        .mime_type("text/plain")
}

/// Encoded RGB image of the given size
pub fn image_bytes(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    });
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, format)
        .expect("encode fixture image");
    buffer.into_inner()
}

pub fn image_part(file_name: &str, mime: &str, format: ImageFormat) -> Part {
    Part::bytes(image_bytes(format, 800, 400))
        .file_name(file_name.to_string())
        .mime_type(mime.to_string())
}
