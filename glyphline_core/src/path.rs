// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline geometry.
//!
//! Outlines are assembled with an append-only [`OutlinePathBuilder`] and then
//! frozen into an [`OutlinePath`]. Appending is plain path concatenation:
//! every appended contour keeps its own winding, and overlapping contours are
//! never merged into a boolean union.
//!
//! An [`OutlinePath`] is immutable and cheap to clone, so one glyph union can
//! back both the stroke and the fill layer.

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::{
    Affine, BezPath, CubicBez, Line, ParamCurve, ParamCurveArclen, PathEl, PathSeg, Point,
    QuadBez, Rect, Shape,
};

/// Accuracy used for arc-length measurement, in path units.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Tolerance used when flattening non-path shapes into path elements.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Append-only builder for an [`OutlinePath`].
#[derive(Clone, Debug, Default)]
pub struct OutlinePathBuilder {
    path: BezPath,
}

impl OutlinePathBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every element of `path`, mapped through `transform`.
    pub fn append(&mut self, path: &BezPath, transform: Affine) {
        self.path
            .extend(path.elements().iter().map(|&el| transform * el));
    }

    /// Appends the outline of `shape`, mapped through `transform`.
    pub fn append_shape(&mut self, shape: &impl Shape, transform: Affine) {
        self.path.extend(
            shape
                .path_elements(SHAPE_TOLERANCE)
                .map(|el| transform * el),
        );
    }

    /// Returns whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Freezes the accumulated geometry.
    #[must_use]
    pub fn finish(self) -> OutlinePath {
        OutlinePath::from_bez_path(self.path)
    }
}

/// An immutable outline made of one or more closed contours.
///
/// The bounding box and total arc length are computed once when the path is
/// frozen.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlinePath {
    path: Arc<BezPath>,
    bounds: Rect,
    length: f64,
}

impl Default for OutlinePath {
    fn default() -> Self {
        Self::empty()
    }
}

impl OutlinePath {
    /// Returns an outline with no geometry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            path: Arc::new(BezPath::new()),
            bounds: Rect::ZERO,
            length: 0.0,
        }
    }

    fn from_bez_path(path: BezPath) -> Self {
        if path.elements().is_empty() {
            return Self::empty();
        }
        let bounds = path.bounding_box();
        let length = contour_segments(&path)
            .iter()
            .map(|(seg, _)| seg.arclen(ARCLEN_ACCURACY))
            .sum();
        Self {
            path: Arc::new(path),
            bounds,
            length,
        }
    }

    /// Returns whether the outline has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// Returns the bounding box, or [`Rect::ZERO`] for an empty outline.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Returns the total arc length of all contours.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the number of contours (sub-paths).
    #[must_use]
    pub fn contour_count(&self) -> usize {
        self.path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    /// Returns the underlying path.
    #[must_use]
    pub fn as_bez_path(&self) -> &BezPath {
        &self.path
    }

    /// Returns whether both outlines share the same storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.path, &other.path)
    }

    /// Returns a new outline mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: Affine) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        let mut builder = OutlinePathBuilder::new();
        builder.append(&self.path, transform);
        builder.finish()
    }

    /// Returns the leading `fraction` of the outline by arc length.
    ///
    /// Contours are revealed in the order they were appended, which is the
    /// geometry a renderer strokes for a stroke-reveal fraction. `fraction` is
    /// clamped to `0.0..=1.0`, and NaN reveals nothing.
    #[must_use]
    pub fn reveal(&self, fraction: f64) -> BezPath {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        if fraction >= 1.0 {
            return (*self.path).clone();
        }
        let mut out = BezPath::new();
        let mut budget = self.length * fraction;
        if budget <= 0.0 {
            return out;
        }
        for (seg, starts_contour) in contour_segments(&self.path) {
            if starts_contour {
                out.move_to(seg.start());
            }
            let len = seg.arclen(ARCLEN_ACCURACY);
            if budget >= len {
                push_segment(&mut out, seg);
                budget -= len;
            } else {
                let t = seg.inv_arclen(budget, ARCLEN_ACCURACY);
                push_segment(&mut out, seg.subsegment(0.0..t));
                break;
            }
        }
        out
    }
}

/// Splits a path into drawable segments, flagging the first segment of each
/// contour. Close commands become an explicit closing line.
fn contour_segments(path: &BezPath) -> Vec<(PathSeg, bool)> {
    let mut segments = Vec::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    let mut fresh = true;
    for &el in path.elements() {
        let seg = match el {
            PathEl::MoveTo(p) => {
                start = p;
                last = p;
                fresh = true;
                continue;
            }
            PathEl::LineTo(p) => PathSeg::Line(Line::new(last, p)),
            PathEl::QuadTo(p1, p2) => PathSeg::Quad(QuadBez::new(last, p1, p2)),
            PathEl::CurveTo(p1, p2, p3) => PathSeg::Cubic(CubicBez::new(last, p1, p2, p3)),
            PathEl::ClosePath => {
                let closing = (last != start).then(|| PathSeg::Line(Line::new(last, start)));
                if let Some(seg) = closing {
                    segments.push((seg, fresh));
                }
                last = start;
                fresh = true;
                continue;
            }
        };
        segments.push((seg, fresh));
        fresh = false;
        last = seg.end();
    }
    segments
}

fn push_segment(out: &mut BezPath, seg: PathSeg) {
    match seg {
        PathSeg::Line(l) => out.line_to(l.p1),
        PathSeg::Quad(q) => out.quad_to(q.p1, q.p2),
        PathSeg::Cubic(c) => out.curve_to(c.p1, c.p2, c.p3),
    }
}
