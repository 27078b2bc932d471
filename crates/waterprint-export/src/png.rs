//! PNG export format
//!
//! Encodes tile rasters with the `image` crate.

use image::{ImageBuffer, ImageEncoder, RgbaImage};
use waterprint_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BitmapData,
};

/// Encode a straight-alpha RGBA bitmap to PNG.
///
/// Returns a valid PNG with proper IHDR, IDAT, and IEND chunks.
pub fn encode_bitmap_to_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    let expected_size = bitmap.width as usize * bitmap.height as usize * 4;
    if bitmap.data.len() < expected_size {
        return Err(ExportError::EncodingFailed(format!(
            "Buffer too small: expected {} bytes for {}x{} RGBA, got {}",
            expected_size,
            bitmap.width,
            bitmap.height,
            bitmap.data.len()
        ))
        .into());
    }

    let img: RgbaImage = ImageBuffer::from_raw(
        bitmap.width,
        bitmap.height,
        bitmap.data[..expected_size].to_vec(),
    )
    .ok_or_else(|| {
        ExportError::EncodingFailed("Failed to create image buffer from RGBA data".into())
    })?;

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(img.as_raw(), bitmap.width, bitmap.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    log::debug!(
        "png: encoded {}x{} tile into {} bytes",
        bitmap.width,
        bitmap.height,
        png_data.len()
    );

    Ok(png_data)
}

/// PNG exporter for tile rasters
///
/// # Examples
///
/// ```
/// use waterprint_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
