//! Image decode / resize / encode helpers.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::ConvertError;

pub const MIN_JPEG_QUALITY: u8 = 10;

pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
    image::load_from_memory(bytes)
        .map_err(|e| ConvertError::ImageProcessing(format!("Failed to load image: {}", e)))
}

/// Mime type of an encoded image, if the format is recognized.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

pub fn resize_exact(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, FilterType::Lanczos3)
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, ConvertError> {
    let rgb = img.to_rgb8();
    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(|e| ConvertError::ImageProcessing(format!("Failed to encode image: {}", e)))?;
    Ok(buffer)
}

pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ConvertError> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| ConvertError::ImageProcessing(format!("Failed to encode image: {}", e)))?;
    Ok(buffer)
}

/// Encodes as JPEG at `quality`, then keeps lowering the quality by 10%
/// until the output fits `max_bytes` or the quality floor is reached.
pub fn encode_jpeg_within(
    img: &DynamicImage,
    quality: u8,
    max_bytes: usize,
) -> Result<Vec<u8>, ConvertError> {
    let mut quality = quality.clamp(MIN_JPEG_QUALITY, 100);
    let mut output = encode_jpeg(img, quality)?;

    while output.len() > max_bytes && quality > MIN_JPEG_QUALITY {
        quality = next_quality(quality);
        debug!(
            size_kb = output.len() / 1024,
            quality, "Output too large, compressing further"
        );
        output = encode_jpeg(img, quality)?;
    }

    Ok(output)
}

fn next_quality(quality: u8) -> u8 {
    ((quality as f32 * 0.9) as u8).max(MIN_JPEG_QUALITY)
}
