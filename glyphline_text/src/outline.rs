// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph outline extraction.

use glyphline_core::path::{OutlinePath, OutlinePathBuilder};
use kurbo::{Affine, BezPath, Point, Rect, Shape};
use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};

use crate::error::TextError;
use crate::font::{ResolvedFont, scaled_metrics};
use crate::layout::Line;

/// Ink bounds of one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBounds {
    /// Baseline origin of the line.
    pub origin: Point,
    /// Union of the line's glyph outline bounds, relative to `origin`
    /// (y-up).
    pub bounds: Rect,
}

impl LineBounds {
    /// The bounds in layout space.
    #[must_use]
    pub fn absolute(&self) -> Rect {
        self.bounds + self.origin.to_vec2()
    }
}

/// All glyph geometry of a layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphOutlines {
    /// Every glyph contour, positioned, in layout space (y-up).
    pub glyphs: OutlinePath,
    /// One entry per line with any ink, in line order.
    pub lines: Vec<LineBounds>,
}

impl GlyphOutlines {
    /// Returns whether there is no glyph geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Collects ttf-parser outline callbacks into a [`BezPath`].
#[derive(Default)]
struct BezSink(BezPath);

impl OutlineBuilder for BezSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0
            .quad_to((f64::from(x1), f64::from(y1)), (f64::from(x), f64::from(y)));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.curve_to(
            (f64::from(x1), f64::from(y1)),
            (f64::from(x2), f64::from(y2)),
            (f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// Resolves, scales, and positions the outline of every glyph in `lines`.
///
/// Contours are concatenated, not merged, so each keeps its own winding.
/// Glyphs without an outline add nothing.
///
/// # Errors
///
/// [`TextError::GlyphResolution`] if the font bytes do not parse.
pub fn extract_outlines(
    lines: &[Line],
    font: &ResolvedFont,
    size: f64,
) -> Result<GlyphOutlines, TextError> {
    let face = font.face()?;
    let scale = scaled_metrics(&face, size).scale;

    let mut builder = OutlinePathBuilder::new();
    let mut line_bounds = Vec::new();
    for line in lines {
        let mut ink: Option<Rect> = None;
        for glyph in &line.glyphs {
            let mut sink = BezSink::default();
            if face
                .outline_glyph(GlyphId(glyph.glyph_id), &mut sink)
                .is_none()
            {
                continue;
            }
            let transform = Affine::translate(glyph.position.to_vec2()) * Affine::scale(scale);
            let bbox = transform.transform_rect_bbox(sink.0.bounding_box());
            ink = Some(ink.map_or(bbox, |r| r.union(bbox)));
            builder.append(&sink.0, transform);
        }
        if let Some(ink) = ink {
            line_bounds.push(LineBounds {
                origin: line.origin,
                bounds: ink - line.origin.to_vec2(),
            });
        }
    }

    Ok(GlyphOutlines {
        glyphs: builder.finish(),
        lines: line_bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FIXTURE_FAMILY, fixture_library, truncated_font};
    use crate::layout::{LayoutEngine, TextAlignment};

    const SQUARE: Rect = Rect::new(0.0, 0.0, 200.0, 200.0);

    fn outlines(text: &str) -> GlyphOutlines {
        let font = fixture_library().resolve(FIXTURE_FAMILY, 50.0).unwrap();
        let lines = LayoutEngine::new(TextAlignment::Center)
            .layout(text, &font, 50.0, SQUARE)
            .unwrap();
        extract_outlines(&lines, &font, 50.0).unwrap()
    }

    #[test]
    fn ab_spans_advance_and_cap_height() {
        let out = outlines("AB");
        assert_eq!(out.lines.len(), 1, "one line bound");
        let bbox = out.glyphs.bounding_box();
        let advance = 2.0 * 1233.0 * 50.0 / 2048.0;
        assert!(bbox.width() > 0.8 * advance && bbox.width() <= advance, "{bbox:?}");
        // Cap height of the face is 1493 units.
        let cap = 1493.0 * 50.0 / 2048.0;
        assert!((bbox.height() - cap).abs() < 0.5, "{bbox:?}");
        assert!(out.glyphs.contour_count() >= 4, "both glyphs have counters");
    }

    #[test]
    fn line_bounds_are_relative_to_origin() {
        let out = outlines("AB");
        let line = out.lines[0];
        assert!(line.bounds.y0.abs() < 0.5, "glyphs sit on the baseline");
        let (abs, union) = (line.absolute(), out.glyphs.bounding_box());
        for (a, b) in [(abs.x0, union.x0), (abs.y0, union.y0), (abs.x1, union.x1), (abs.y1, union.y1)] {
            assert!((a - b).abs() < 1e-9, "single line covers the union: {abs:?} {union:?}");
        }
    }

    #[test]
    fn whitespace_has_no_geometry() {
        let out = outlines("   ");
        assert!(out.is_empty());
        assert!(out.lines.is_empty(), "no ink, no line bounds");
        assert_eq!(out.glyphs.bounding_box(), Rect::ZERO);
    }

    #[test]
    fn empty_text_is_empty() {
        let out = outlines("");
        assert!(out.is_empty());
        assert!(out.lines.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let a = outlines("Podlodka");
        let b = outlines("Podlodka");
        assert_eq!(a.glyphs.bounding_box(), b.glyphs.bounding_box());
        assert_eq!(a.lines, b.lines);
        assert_eq!(a.glyphs.as_bez_path(), b.glyphs.as_bez_path());
    }

    #[test]
    fn unparsable_font_is_an_error() {
        let font = fixture_library().resolve(FIXTURE_FAMILY, 50.0).unwrap();
        let lines = LayoutEngine::new(TextAlignment::Center)
            .layout("AB", &font, 50.0, SQUARE)
            .unwrap();
        let err = extract_outlines(&lines, &truncated_font(), 50.0).unwrap_err();
        assert!(
            matches!(err, TextError::GlyphResolution { ref family } if family == FIXTURE_FAMILY),
            "{err:?}"
        );
    }

    #[test]
    fn blank_line_between_lines_is_skipped() {
        let out = outlines("A\n \nB");
        assert_eq!(out.lines.len(), 2, "middle line has no ink");
        assert!(out.lines[0].origin.y > out.lines[1].origin.y, "y-up order");
    }
}
