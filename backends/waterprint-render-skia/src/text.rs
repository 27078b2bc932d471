//! Text to path: font lookup and glyph outlines
//!
//! Glyphs are laid out left to right by their horizontal advance, one per
//! character, with no shaping. Outlines come from skrifa at the requested
//! pixel size and are collected into a single path in surface space.

use kurbo::{BezPath, PathEl, Shape};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::MetadataProvider;
use waterprint_core::{
    error::{RenderError, Result},
    types::TextBaseline,
};

use crate::font::FontSpec;

/// Best face in `db` for `spec`
///
/// Tries the listed families in order, then generic sans-serif, then any
/// face at all.
pub fn resolve_face(db: &fontdb::Database, spec: &FontSpec) -> Option<fontdb::ID> {
    let mut families = spec.query_families();
    families.push(fontdb::Family::SansSerif);

    let query = fontdb::Query {
        families: &families,
        weight: fontdb::Weight(spec.weight),
        stretch: spec.stretch,
        style: if spec.italic {
            fontdb::Style::Italic
        } else {
            fontdb::Style::Normal
        },
    };

    db.query(&query).or_else(|| db.faces().next().map(|face| face.id))
}

/// Outline of `text` with its `baseline` anchored at `(x, y)`
///
/// Returns `None` when nothing in the text has an outline (spaces only,
/// unmapped characters in a font without a `.notdef` shape).
pub fn text_path(
    font_data: &[u8],
    face_index: u32,
    text: &str,
    spec: &FontSpec,
    baseline: TextBaseline,
    x: f32,
    y: f32,
) -> Result<Option<tiny_skia::Path>> {
    let font =
        skrifa::FontRef::from_index(font_data, face_index).map_err(|_| RenderError::InvalidFont)?;

    let size = Size::new(spec.size_px);
    let location = LocationRef::default();
    let charmap = font.charmap();
    let advances = font.glyph_metrics(size, location);
    let outlines = font.outline_glyphs();
    let metrics = font.metrics(size, location);

    let baseline_y = y + baseline_offset(baseline, metrics.ascent, metrics.descent);

    let mut path = BezPath::new();
    let mut pen_x = x;

    for ch in text.chars() {
        let glyph_id = charmap.map(ch).unwrap_or(skrifa::GlyphId::NOTDEF);

        if let Some(glyph) = outlines.get(glyph_id) {
            let mut pen = PathPen {
                path: &mut path,
                origin_x: pen_x as f64,
                origin_y: baseline_y as f64,
            };
            if let Err(e) = glyph.draw(DrawSettings::unhinted(size, location), &mut pen) {
                log::warn!("skia: failed to draw glyph {:?} for {:?}: {:?}", glyph_id, ch, e);
            }
        }

        pen_x += advances.advance_width(glyph_id).unwrap_or(0.0);
    }

    if path.elements().is_empty() {
        return Ok(None);
    }

    let bbox = path.bounding_box();
    log::debug!(
        "skia: text {:?} at {}px, bbox=({:.1}, {:.1}, {:.1}, {:.1})",
        text,
        spec.size_px,
        bbox.x0,
        bbox.y0,
        bbox.x1,
        bbox.y1
    );

    to_skia_path(&path).map(Some)
}

/// Distance from the anchor down to the alphabetic baseline
///
/// `ascent` is positive above the baseline, `descent` negative below it.
fn baseline_offset(baseline: TextBaseline, ascent: f32, descent: f32) -> f32 {
    match baseline {
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Top => ascent,
        TextBaseline::Hanging => ascent * 0.8,
        TextBaseline::Middle => (ascent + descent) / 2.0,
        TextBaseline::Ideographic | TextBaseline::Bottom => descent,
    }
}

/// Translate kurbo's path format into tiny-skia's native format
fn to_skia_path(path: &BezPath) -> Result<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }

    builder.finish().ok_or_else(|| RenderError::PathBuildingFailed.into())
}

/// Bridge between skrifa's outline commands and kurbo's path format
///
/// Places each glyph at its pen origin and flips y, since fonts are y-up
/// and the surface is y-down.
struct PathPen<'a> {
    path: &'a mut BezPath,
    origin_x: f64,
    origin_y: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (self.origin_x + x as f64, self.origin_y - y as f64)
    }
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.point(cx0, cy0);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.point(cx0, cy0);
        let c1 = self.point(cx1, cy1);
        let p = self.point(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skrifa::outline::OutlinePen;

    #[test]
    fn alphabetic_baseline_sits_on_the_anchor() {
        assert_eq!(baseline_offset(TextBaseline::Alphabetic, 20.0, -5.0), 0.0);
    }

    #[test]
    fn other_baselines_shift_by_font_metrics() {
        assert_eq!(baseline_offset(TextBaseline::Top, 20.0, -5.0), 20.0);
        assert_eq!(baseline_offset(TextBaseline::Hanging, 20.0, -5.0), 16.0);
        assert_eq!(baseline_offset(TextBaseline::Middle, 20.0, -5.0), 7.5);
        assert_eq!(baseline_offset(TextBaseline::Bottom, 20.0, -5.0), -5.0);
        assert_eq!(baseline_offset(TextBaseline::Ideographic, 20.0, -5.0), -5.0);
    }

    #[test]
    fn pen_flips_y_around_origin() {
        let mut path = BezPath::new();
        let mut pen = PathPen {
            path: &mut path,
            origin_x: 10.0,
            origin_y: 50.0,
        };
        pen.move_to(0.0, 0.0);
        pen.line_to(5.0, 20.0);
        pen.close();

        let skia = to_skia_path(&path).unwrap();
        let bounds = skia.bounds();
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 15.0);
        assert_eq!(bounds.top(), 30.0);
        assert_eq!(bounds.bottom(), 50.0);
    }

    #[test]
    fn empty_path_cannot_be_built() {
        assert!(to_skia_path(&BezPath::new()).is_err());
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let result = text_path(
            &[0u8; 64],
            0,
            "abc",
            &FontSpec::default(),
            TextBaseline::Alphabetic,
            0.0,
            0.0,
        );
        assert!(matches!(
            result,
            Err(waterprint_core::WaterprintError::RenderingFailed(RenderError::InvalidFont))
        ));
    }

    #[test]
    fn empty_database_resolves_nothing() {
        let db = fontdb::Database::new();
        assert_eq!(resolve_face(&db, &FontSpec::default()), None);
    }
}
