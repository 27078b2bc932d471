//! Export module for Waterprint
//!
//! Turns a finished tile raster into something a stylesheet can embed:
//! PNG bytes from [`PngExporter`], wrapped as a `data:` URL by [`data_url`].

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use waterprint_core::{error::Result, traits::Exporter, types::BitmapData};

pub mod png;

pub use png::PngExporter;

/// What a zero-area raster exports as
pub const EMPTY_DATA_URL: &str = "data:,";

/// Encode `bitmap` with `exporter` and wrap it as a base64 `data:` URL
///
/// A zero-area bitmap has no pixels to encode and yields [`EMPTY_DATA_URL`].
pub fn data_url(exporter: &dyn Exporter, bitmap: &BitmapData) -> Result<String> {
    if bitmap.is_empty() {
        return Ok(EMPTY_DATA_URL.to_string());
    }

    let bytes = exporter.export(bitmap)?;
    Ok(format!(
        "data:{};base64,{}",
        exporter.mime_type(),
        BASE64.encode(bytes)
    ))
}
