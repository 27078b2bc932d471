//! Skia Surface - watermark tiles rasterized with tiny-skia
//!
//! The default raster surface for Waterprint. It behaves like a small 2-D
//! canvas: a transparent premultiplied pixmap, a CSS font, a text baseline,
//! a fill color and an affine transform that `rotate` composes into.
//!
//! Fonts come from a shared [`fontdb::Database`]. Glyph outlines are pulled
//! with skrifa, traced into kurbo paths and filled by tiny-skia with
//! anti-aliasing.

pub mod font;
pub mod text;

use std::sync::Arc;

use tiny_skia::{FillRule, Paint, Pixmap, Transform};
use waterprint_core::{
    error::{RenderError, Result},
    traits::{Surface, SurfaceProvider},
    types::{BitmapData, TextBaseline},
    Color,
};

pub use font::{parse_font, FamilyName, FontSpec};

/// Largest surface edge backed by pixels, same as Chrome's canvas limit
pub const MAX_DIMENSION: u32 = 32767;

/// Width a canvas falls back to when assigned an unusable value
pub const DEFAULT_WIDTH: u32 = 300;

/// Height a canvas falls back to when assigned an unusable value
pub const DEFAULT_HEIGHT: u32 = 150;

/// Hands out tiny-skia surfaces that share one font database
pub struct SkiaSurfaceProvider {
    fonts: Arc<fontdb::Database>,
    /// Keeps a runaway username from allocating an enormous pixmap
    max_size: u32,
}

impl SkiaSurfaceProvider {
    /// Provider backed by every font installed on the system
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::info!("skia: loaded {} system font faces", db.len());
        Self::with_fonts(Arc::new(db))
    }

    /// Provider backed by a caller-supplied database
    pub fn with_fonts(fonts: Arc<fontdb::Database>) -> Self {
        Self {
            fonts,
            max_size: MAX_DIMENSION,
        }
    }

    pub fn fonts(&self) -> &Arc<fontdb::Database> {
        &self.fonts
    }
}

impl Default for SkiaSurfaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for SkiaSurfaceProvider {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn create(&self, width: f64, height: f64) -> Result<Box<dyn Surface>> {
        let w = canvas_dimension(width, DEFAULT_WIDTH);
        let h = canvas_dimension(height, DEFAULT_HEIGHT);

        if w > self.max_size || h > self.max_size {
            // A browser canvas this large has no backing store either and
            // encodes as "data:,"
            log::warn!(
                "skia: {}x{} exceeds the {}px edge limit, tile will be blank",
                w,
                h,
                self.max_size
            );
            return Ok(Box::new(SkiaSurface::unbacked(w, h, Arc::clone(&self.fonts))));
        }

        log::debug!("skia: allocating {}x{} surface for {}x{}", w, h, width, height);
        Ok(Box::new(SkiaSurface::new(w, h, Arc::clone(&self.fonts))?))
    }
}

/// Pixels a canvas keeps when `value` is assigned to one of its edges
///
/// The assignment goes through an `unsigned long` conversion: non-finite
/// values become 0, fractions truncate toward zero and the result wraps
/// modulo 2^32. Anything above `i32::MAX` after wrapping, which includes
/// every value of -1 or below, resets the edge to `default`.
pub fn canvas_dimension(value: f64, default: u32) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(4_294_967_296.0);
    if wrapped > i32::MAX as f64 {
        default
    } else {
        wrapped as u32
    }
}

/// One tile being drawn
pub struct SkiaSurface {
    width: u32,
    height: u32,
    /// `None` when the surface has no area or is too large to back
    pixmap: Option<Pixmap>,
    fonts: Arc<fontdb::Database>,
    font: FontSpec,
    baseline: TextBaseline,
    fill: Color,
    transform: Transform,
}

impl SkiaSurface {
    /// Transparent surface; a zero edge gives a surface that draws nothing
    pub fn new(width: u32, height: u32, fonts: Arc<fontdb::Database>) -> Result<Self> {
        let mut surface = Self::unbacked(width, height, fonts);
        if width > 0 && height > 0 {
            let pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed)?;
            surface.pixmap = Some(pixmap);
        }
        Ok(surface)
    }

    fn unbacked(width: u32, height: u32, fonts: Arc<fontdb::Database>) -> Self {
        Self {
            width,
            height,
            pixmap: None,
            fonts,
            font: FontSpec::default(),
            baseline: TextBaseline::default(),
            fill: Color::black(),
            transform: Transform::identity(),
        }
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint {
            anti_alias: true,
            ..Default::default()
        };
        paint.set_color_rgba8(self.fill.r, self.fill.g, self.fill.b, self.fill.a);
        paint
    }
}

impl Surface for SkiaSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_font(&mut self, font: &str) {
        match parse_font(font) {
            Some(spec) => self.font = spec,
            None => log::warn!("skia: ignoring unparsable font {:?}", font),
        }
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = (radians as f32).sin_cos();
        let rotation = Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0);
        self.transform = self.transform.pre_concat(rotation);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        if text.is_empty() || self.pixmap.is_none() {
            return Ok(());
        }

        let id = crate::text::resolve_face(&self.fonts, &self.font).ok_or_else(|| {
            RenderError::FontNotFound(format!("{:?}", self.font.families))
        })?;

        let path = self
            .fonts
            .with_face_data(id, |data, index| {
                crate::text::text_path(data, index, text, &self.font, self.baseline, x, y)
            })
            .ok_or_else(|| RenderError::FontNotFound(format!("face {:?} has no data", id)))??;

        let paint = self.paint();
        if let (Some(path), Some(pixmap)) = (path, self.pixmap.as_mut()) {
            pixmap.fill_path(&path, &paint, FillRule::Winding, self.transform, None);
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<BitmapData> {
        let Some(pixmap) = &self.pixmap else {
            return Ok(BitmapData::transparent(0, 0));
        };

        let mut data = Vec::with_capacity(pixmap.data().len());
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(BitmapData {
            width: pixmap.width(),
            height: pixmap.height(),
            data,
        })
    }
}
