// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping and line breaking inside a reference rectangle.
//!
//! Coordinates are y-up, the font convention: a line origin sits on its
//! baseline, the first baseline is one ascent below the top of the
//! rectangle, and glyph positions are absolute in the rectangle's space.

use std::ops::Range;

use kurbo::{Point, Rect};
use rustybuzz::{Direction, Face, GlyphBuffer, UnicodeBuffer};
use unicode_linebreak::{BreakOpportunity, linebreaks};

use crate::error::TextError;
use crate::font::{FontMetrics, ResolvedFont, scaled_metrics};

/// Horizontal alignment of lines within the reference rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlignment {
    /// Flush with the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

/// One shaped glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// Glyph index in the face.
    pub glyph_id: u16,
    /// Byte offset of the source cluster in the laid-out text.
    pub cluster: usize,
    /// Position of the glyph origin.
    pub position: Point,
}

/// One laid-out line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Start of the baseline.
    pub origin: Point,
    /// Glyphs in visual order.
    pub glyphs: Vec<GlyphPlacement>,
    /// Ascent of the face at the layout size.
    pub ascent: f64,
    /// Descent of the face at the layout size (positive).
    pub descent: f64,
    /// Line gap of the face at the layout size.
    pub leading: f64,
    /// Advance width, trailing whitespace excluded.
    pub width: f64,
    /// Byte range of the line's text, line terminator excluded.
    pub range: Range<usize>,
}

impl Line {
    /// Typographic bounds of the line: advance width by ascent plus descent.
    #[must_use]
    pub fn typographic_bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y - self.descent,
            self.origin.x + self.width,
            self.origin.y + self.ascent,
        )
    }
}

/// Breaks and shapes text into [`Line`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutEngine {
    alignment: TextAlignment,
}

impl LayoutEngine {
    /// Creates an engine with the given alignment.
    #[must_use]
    pub fn new(alignment: TextAlignment) -> Self {
        Self { alignment }
    }

    /// Returns the line alignment.
    #[must_use]
    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Lays out `text` in `bounds` with `font` at `size`.
    ///
    /// Mandatory breaks always start a new line. Otherwise each line is the
    /// longest run ending at a break opportunity that fits the width; a run
    /// with no opportunity that fits overflows on its own line. Lines that
    /// would extend below the bottom of `bounds` are dropped.
    ///
    /// # Errors
    ///
    /// [`TextError::GlyphResolution`] if the font bytes do not parse.
    pub fn layout(
        &self,
        text: &str,
        font: &ResolvedFont,
        size: f64,
        bounds: Rect,
    ) -> Result<Vec<Line>, TextError> {
        let face = font.face()?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let metrics = scaled_metrics(&face, size);
        let mut lines = Vec::new();
        let mut baseline = bounds.y1 - metrics.ascent;
        for range in break_lines(&face, &metrics, text, bounds.width()) {
            if baseline - metrics.descent < bounds.y0 {
                break;
            }
            lines.push(self.place_line(&face, &metrics, text, range, bounds, baseline));
            baseline -= metrics.ascent + metrics.descent + metrics.leading;
        }
        Ok(lines)
    }

    fn place_line(
        &self,
        face: &Face<'_>,
        metrics: &FontMetrics,
        text: &str,
        range: Range<usize>,
        bounds: Rect,
        baseline: f64,
    ) -> Line {
        let content = &text[range.clone()];
        let shaped = shape(face, content);
        let width = measure(&shaped, content.trim_end().len(), metrics.scale);
        let x = match self.alignment {
            TextAlignment::Left => bounds.x0,
            TextAlignment::Center => bounds.x0 + (bounds.width() - width) / 2.0,
            TextAlignment::Right => bounds.x1 - width,
        };
        let origin = Point::new(x, baseline);

        let mut pen = 0.0;
        let glyphs = shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| {
                let position = Point::new(
                    origin.x + pen + f64::from(pos.x_offset) * metrics.scale,
                    origin.y + f64::from(pos.y_offset) * metrics.scale,
                );
                pen += f64::from(pos.x_advance) * metrics.scale;
                GlyphPlacement {
                    glyph_id: glyph_id(info.glyph_id),
                    cluster: range.start + info.cluster as usize,
                    position,
                }
            })
            .collect();

        Line {
            origin,
            glyphs,
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: metrics.leading,
            width,
            range,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "OpenType glyph ids are 16-bit"
)]
fn glyph_id(id: u32) -> u16 {
    id as u16
}

fn shape(face: &Face<'_>, text: &str) -> GlyphBuffer {
    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();
    buffer.set_direction(Direction::LeftToRight);
    rustybuzz::shape(face, &[], buffer)
}

/// Advance width of the glyphs whose cluster starts before `end`.
fn measure(shaped: &GlyphBuffer, end: usize, scale: f64) -> f64 {
    shaped
        .glyph_infos()
        .iter()
        .zip(shaped.glyph_positions())
        .filter(|(info, _)| (info.cluster as usize) < end)
        .map(|(_, pos)| f64::from(pos.x_advance) * scale)
        .sum()
}

fn is_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits `text` into line byte ranges, line terminators excluded.
fn break_lines(
    face: &Face<'_>,
    metrics: &FontMetrics,
    text: &str,
    width: f64,
) -> Vec<Range<usize>> {
    let fits = |range: Range<usize>| {
        let content = &text[range];
        let trimmed = content.trim_end();
        trimmed.is_empty() || measure(&shape(face, trimmed), trimmed.len(), metrics.scale) <= width
    };

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut allowed: Vec<usize> = Vec::new();
    for (offset, opportunity) in linebreaks(text) {
        allowed.push(offset);
        if opportunity == BreakOpportunity::Allowed {
            continue;
        }
        // `allowed` now holds the break opportunities of one paragraph,
        // ending with its mandatory break.
        let mut candidates = allowed.drain(..).peekable();
        while let Some(&first) = candidates.peek() {
            let mut end = first;
            candidates.next();
            while let Some(&next) = candidates.peek() {
                if !fits(start..next) {
                    break;
                }
                end = next;
                candidates.next();
            }
            let content_end = text[..end].trim_end_matches(is_line_terminator).len();
            ranges.push(start..content_end.max(start));
            start = end;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FIXTURE_FAMILY, fixture_library, truncated_font};

    const ADVANCE: f64 = 1233.0 * 50.0 / 2048.0;

    fn layout(text: &str, alignment: TextAlignment, bounds: Rect) -> Vec<Line> {
        let font = fixture_library().resolve(FIXTURE_FAMILY, 50.0).unwrap();
        LayoutEngine::new(alignment)
            .layout(text, &font, 50.0, bounds)
            .unwrap()
    }

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(layout("", TextAlignment::Center, square()).is_empty());
    }

    #[test]
    fn unparsable_font_is_an_error() {
        let engine = LayoutEngine::new(TextAlignment::Left);
        for text in ["AB", ""] {
            let err = engine
                .layout(text, &truncated_font(), 50.0, square())
                .unwrap_err();
            assert!(
                matches!(err, TextError::GlyphResolution { .. }),
                "{text:?}: {err:?}"
            );
        }
    }

    #[test]
    fn single_line_is_centered_below_top() {
        let lines = layout("AB", TextAlignment::Center, square());
        assert_eq!(lines.len(), 1, "two glyphs fit on one line");
        let line = &lines[0];
        assert!((line.width - 2.0 * ADVANCE).abs() < 1e-9, "{}", line.width);
        assert!((line.origin.x - (200.0 - line.width) / 2.0).abs() < 1e-9);
        assert!((line.origin.y - (200.0 - line.ascent)).abs() < 1e-9);
        assert_eq!(line.glyphs.len(), 2);
        assert_eq!(line.glyphs[0].cluster, 0);
        assert_eq!(line.glyphs[1].cluster, 1);
        assert!(
            (line.glyphs[1].position.x - line.glyphs[0].position.x - ADVANCE).abs() < 1e-9,
            "monospace advance"
        );
        assert_eq!(line.range, 0..2);
    }

    #[test]
    fn alignment_moves_origin() {
        let left = layout("AB", TextAlignment::Left, square());
        let right = layout("AB", TextAlignment::Right, square());
        assert_eq!(left[0].origin.x, 0.0);
        assert!((right[0].origin.x + right[0].width - 200.0).abs() < 1e-9);
    }

    #[test]
    fn mandatory_breaks_start_new_lines() {
        let lines = layout("A\nB", TextAlignment::Left, square());
        assert_eq!(lines.len(), 2, "newline always breaks");
        assert_eq!(lines[0].range, 0..1);
        assert_eq!(lines[1].range, 2..3);
        let step = lines[0].origin.y - lines[1].origin.y;
        assert!(
            (step - (lines[0].ascent + lines[0].descent + lines[0].leading)).abs() < 1e-9,
            "baselines one line height apart"
        );
    }

    #[test]
    fn greedy_wrap_excludes_trailing_space() {
        // Each word is 3 × 30.1 wide; two words plus a space do not fit 200.
        let lines = layout("abc def ghi", TextAlignment::Left, square());
        assert_eq!(lines.len(), 3, "{lines:?}");
        assert_eq!(&"abc def ghi"[lines[0].range.clone()], "abc ");
        assert!((lines[0].width - 3.0 * ADVANCE).abs() < 1e-9, "space not counted");
    }

    #[test]
    fn unbreakable_run_overflows() {
        let lines = layout("ABCDEFGHIJ", TextAlignment::Left, square());
        assert_eq!(lines.len(), 1, "no character-level breaking");
        assert!(lines[0].width > 200.0);
    }

    #[test]
    fn lines_below_bottom_are_dropped() {
        let short = Rect::new(0.0, 0.0, 200.0, 80.0);
        let lines = layout("A\nB\nC", TextAlignment::Left, short);
        assert_eq!(lines.len(), 1, "only one line height fits in 80");
        let none = layout("A", TextAlignment::Left, Rect::new(0.0, 0.0, 200.0, 10.0));
        assert!(none.is_empty(), "not even the first line fits");
    }

    #[test]
    fn bounds_origin_offsets_positions() {
        let moved = layout("AB", TextAlignment::Left, Rect::new(10.0, 20.0, 210.0, 220.0));
        let base = layout("AB", TextAlignment::Left, square());
        let shift = moved[0].origin - base[0].origin;
        assert!((shift.x - 10.0).abs() < 1e-9 && (shift.y - 20.0).abs() < 1e-9, "{shift:?}");
    }

    #[test]
    fn typographic_bounds_span_ascent_and_descent() {
        let line = &layout("AB", TextAlignment::Left, square())[0];
        let rect = line.typographic_bounds();
        assert!((rect.height() - (line.ascent + line.descent)).abs() < 1e-9);
        assert_eq!(rect.width(), line.width);
    }
}
