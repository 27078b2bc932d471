//! Tile geometry
//!
//! Everything the render stage needs to know about the tile before a surface
//! exists. Two angle conventions meet here: the tile height feeds the raw
//! degree value to `sin`, while the rotation converts degrees to radians.

use std::f64::consts::PI;

/// Horizontal pixels reserved per UTF-16 code unit of text
pub const PX_PER_UNIT: u32 = 20;

/// Pen position x, in unrotated surface space
pub const ANCHOR_X: f32 = -10.0;

/// Size, rotation and pen position of one watermark tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGeometry {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height before any truncation; may be fractional or negative
    pub height: f64,
    /// Rotation applied to the drawing context, in radians
    pub rotation: f64,
    /// Where the text baseline starts
    pub anchor_x: f32,
    pub anchor_y: f32,
}

impl TileGeometry {
    pub fn compute(text: &str, angle_deg: i64) -> Self {
        let width = text_units(text).saturating_mul(PX_PER_UNIT);
        let angle = angle_deg as f64;
        // sin() takes the degree value as-is
        let height = angle.sin() * width as f64;
        let rotation = -angle * PI / 180.0;

        Self {
            width,
            height,
            rotation,
            anchor_x: ANCHOR_X,
            anchor_y: (height / 2.0) as f32,
        }
    }

    /// Width at which the tile repeats on the target surface
    pub fn tile_size(&self) -> u32 {
        self.width / 2
    }

    /// `background-size` value, e.g. `"50px"`
    pub fn background_size(&self) -> String {
        format!("{}px", self.tile_size())
    }
}

/// Length of `text` in UTF-16 code units
pub fn text_units(text: &str) -> u32 {
    u32::try_from(text.encode_utf16().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_twenty_pixels_per_unit() {
        assert_eq!(TileGeometry::compute("alice", 15).width, 100);
        assert_eq!(TileGeometry::compute("a", 15).width, 20);
    }

    #[test]
    fn height_uses_degrees_as_radians() {
        let geometry = TileGeometry::compute("alice", 15);
        assert_eq!(geometry.height, 15f64.sin() * 100.0);
        assert!((geometry.height - 65.028_784_015_711_68).abs() < 1e-9);
    }

    #[test]
    fn height_can_go_negative() {
        let geometry = TileGeometry::compute("bob", 4);
        assert!(geometry.height < 0.0);
    }

    #[test]
    fn rotation_converts_to_radians_with_negative_sign() {
        let geometry = TileGeometry::compute("bob", 90);
        assert!((geometry.rotation + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn anchor_sits_left_of_origin_at_half_height() {
        let geometry = TileGeometry::compute("alice", 15);
        assert_eq!(geometry.anchor_x, -10.0);
        assert_eq!(geometry.anchor_y, (geometry.height / 2.0) as f32);
    }

    #[test]
    fn background_size_is_half_width() {
        assert_eq!(TileGeometry::compute("alice", 15).background_size(), "50px");
        assert_eq!(TileGeometry::compute("bob", 7).background_size(), "30px");
    }

    #[test]
    fn counts_utf16_units() {
        assert_eq!(text_units("héllo"), 5);
        assert_eq!(text_units("水印"), 2);
        // One astral code point is two units
        assert_eq!(text_units("😀"), 2);
        assert_eq!(TileGeometry::compute("😀", 15).width, 40);
    }
}
