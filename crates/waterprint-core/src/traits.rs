//! The contracts between the generator and its collaborators
//!
//! - [`SurfaceProvider`] - Hands out fresh raster surfaces
//! - [`Surface`] - A 2-D drawing context over one raster
//! - [`Exporter`] - Turns a finished raster into encoded bytes
//!
//! The generator only ever talks to these traits, so a host can swap the
//! tiny-skia backend for a browser canvas, a GPU surface, or a test double.

use crate::{error::Result, types::*, Color};

/// A drawable 2-D surface scoped to one render call
///
/// Calls follow canvas semantics: state setters affect every later draw,
/// and `rotate` composes with the current transform.
pub trait Surface {
    /// Pixel width of the raster
    fn width(&self) -> u32;

    /// Pixel height of the raster
    fn height(&self) -> u32;

    /// Set the font from a CSS font shorthand
    ///
    /// Strings the surface cannot parse are ignored and the current font
    /// stays in effect.
    fn set_font(&mut self, font: &str);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Rotate subsequent drawing by `radians` (clockwise in y-down space)
    fn rotate(&mut self, radians: f64);

    fn set_fill_style(&mut self, color: Color);

    /// Draw `text` with its baseline anchored at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;

    /// Copy the current raster out as straight-alpha RGBA
    fn snapshot(&self) -> Result<BitmapData>;
}

/// Where surfaces come from
pub trait SurfaceProvider: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Allocate a surface of `width x height` pixels
    ///
    /// Dimensions arrive unvalidated and may be fractional, zero, negative
    /// or non-finite; each provider applies its own rules.
    fn create(&self, width: f64, height: f64) -> Result<Box<dyn Surface>>;
}

/// Encodes a finished raster
pub trait Exporter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode the bitmap as bytes
    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// MIME type of the encoded bytes
    fn mime_type(&self) -> &'static str;
}
