//! Waterprint Core: from a username to a tiled watermark
//!
//! A watermark is made in five steps, and this crate holds the parts that
//! do not depend on any particular rasterizer:
//!
//! 1. **Validate** - [`validate()`] turns raw parameters into [`ValidParams`]
//! 2. **Measure** - [`TileGeometry`] works out tile size, tilt and pen position
//! 3. **Rasterize** - a [`Surface`] from a [`SurfaceProvider`] draws the text
//! 4. **Encode** - an [`Exporter`] turns the raster into bytes
//! 5. **Describe** - a [`StyleDescriptor`] wraps the result for the caller
//!
//! The generator that strings these together lives in the `waterprint`
//! crate; backends implement the traits in [`traits`].

pub mod error;
pub mod geometry;
pub mod params;
pub mod style;
pub mod traits;
pub mod validate;

#[cfg(test)]
mod proptests;

pub use error::{Result, ValidationFailure, WaterprintError};
pub use geometry::TileGeometry;
pub use params::{Angle, WatermarkParams};
pub use style::StyleDescriptor;
pub use traits::{Exporter, Surface, SurfaceProvider};
pub use validate::{validate, validate_value, Defaults, ValidParams};

/// Data that crosses the surface/exporter boundary
pub mod types {
    /// Raw pixels copied out of a surface
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BitmapData {
        pub width: u32,
        pub height: u32,
        /// Straight (non-premultiplied) RGBA, row-major
        pub data: Vec<u8>,
    }

    impl BitmapData {
        /// Fully transparent bitmap
        pub fn transparent(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                data: vec![0; width as usize * height as usize * 4],
            }
        }

        pub fn is_empty(&self) -> bool {
            self.width == 0 || self.height == 0
        }
    }

    /// Which line of the em box sits on the anchor's y coordinate
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum TextBaseline {
        Top,
        Hanging,
        Middle,
        #[default]
        Alphabetic,
        Ideographic,
        Bottom,
    }
}

/// Text color painted into the tile
pub const FILL_COLOR: Color = Color::rgba(0xdd, 0xdd, 0xdd, 0xff);

/// Color behind the repeated tiles
pub const BACKGROUND_COLOR: Color = Color::rgba(0xf5, 0xf7, 0xfb, 0xff);

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    /// Shortest hex form: `#ddd` when every channel repeats its nibble,
    /// `#f5f7fb` otherwise; alpha only when not opaque
    pub fn to_hex(&self) -> String {
        let short = [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| c >> 4 == c & 0x0f);
        match (short, self.a == 255) {
            (true, true) => format!("#{:x}{:x}{:x}", self.r >> 4, self.g >> 4, self.b >> 4),
            (true, false) => format!(
                "#{:x}{:x}{:x}{:x}",
                self.r >> 4,
                self.g >> 4,
                self.b >> 4,
                self.a >> 4
            ),
            (false, true) => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            (false, false) => {
                format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
            },
        }
    }
}
