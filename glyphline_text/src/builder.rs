// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroke, fill, and background paths in surface coordinates.

use glyphline_core::path::{OutlinePath, OutlinePathBuilder};
use kurbo::{Affine, Rect, RoundedRect, Size, Vec2};

use crate::outline::GlyphOutlines;

/// Direction of the y axis on the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceOrientation {
    /// y grows downward (most UI toolkits). Layout space is flipped.
    #[default]
    YDown,
    /// y grows upward, like layout space, which is used unchanged.
    YUp,
}

/// Where the paths land on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Keep the laid-out position.
    AsLaidOut,
    /// Move all paths so the glyph bounding box is centered on the surface.
    #[default]
    Centered,
}

/// Stroke width and background corner radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStyle {
    /// Stroke line width; also how far backgrounds extend past the ink.
    pub stroke_width: f64,
    /// Corner radius of the background rectangles.
    pub corner_radius: f64,
}

impl PathStyle {
    /// Style derived from a font size: stroke 0.4 × size, radius 0.2 × size.
    #[must_use]
    pub fn for_font_size(size: f64) -> Self {
        Self {
            stroke_width: 0.4 * size,
            corner_radius: 0.2 * size,
        }
    }
}

/// Paths for the three render layers.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSet {
    /// Glyph outline to stroke. Shares storage with `fill`.
    pub stroke: OutlinePath,
    /// Glyph outline to fill.
    pub fill: OutlinePath,
    /// Rounded rectangles behind each line.
    pub background: OutlinePath,
    /// The background rectangles before rounding, one per inked line.
    pub line_rects: Vec<Rect>,
    /// The style the set was built with.
    pub style: PathStyle,
}

impl PathSet {
    /// A set with no geometry.
    #[must_use]
    pub fn empty(style: PathStyle) -> Self {
        Self {
            stroke: OutlinePath::empty(),
            fill: OutlinePath::empty(),
            background: OutlinePath::empty(),
            line_rects: Vec::new(),
            style,
        }
    }
}

/// Maps layout-space outlines onto a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathBuilder {
    surface: Size,
    orientation: SurfaceOrientation,
    placement: Placement,
}

impl PathBuilder {
    /// Creates a builder for a y-down surface of the given size, centering
    /// its output.
    #[must_use]
    pub fn new(surface: Size) -> Self {
        Self {
            surface,
            orientation: SurfaceOrientation::YDown,
            placement: Placement::Centered,
        }
    }

    /// Sets the surface orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: SurfaceOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Surface size.
    #[must_use]
    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Layout space to surface space, before placement.
    ///
    /// On a y-down surface a line rectangle lands at
    /// `y = height − origin.y − bounds.y0 − bounds.height`.
    #[must_use]
    pub fn surface_transform(&self) -> Affine {
        match self.orientation {
            SurfaceOrientation::YDown => {
                Affine::translate((0.0, self.surface.height)) * Affine::FLIP_Y
            }
            SurfaceOrientation::YUp => Affine::IDENTITY,
        }
    }

    /// Builds the stroke, fill, and background paths.
    ///
    /// Each line rectangle grows by `style.stroke_width` on every side and is
    /// rounded by `style.corner_radius`, clamped to half its shorter side.
    #[must_use]
    pub fn build(&self, outlines: &GlyphOutlines, style: PathStyle) -> PathSet {
        if outlines.is_empty() {
            return PathSet::empty(style);
        }
        let to_surface = self.surface_transform();
        let glyph_bounds = to_surface.transform_rect_bbox(outlines.glyphs.bounding_box());
        let offset = match self.placement {
            Placement::AsLaidOut => Vec2::ZERO,
            Placement::Centered => self.surface.to_rect().center() - glyph_bounds.center(),
        };
        let transform = Affine::translate(offset) * to_surface;

        let grow = style.stroke_width.max(0.0);
        let mut background = OutlinePathBuilder::new();
        let line_rects: Vec<Rect> = outlines
            .lines
            .iter()
            .map(|line| {
                let rect = transform
                    .transform_rect_bbox(line.absolute())
                    .inflate(grow, grow);
                let radius = style
                    .corner_radius
                    .min(rect.width().min(rect.height()) / 2.0)
                    .max(0.0);
                background.append_shape(&RoundedRect::from_rect(rect, radius), Affine::IDENTITY);
                rect
            })
            .collect();

        let glyphs = outlines.glyphs.transformed(transform);
        PathSet {
            stroke: glyphs.clone(),
            fill: glyphs,
            background: background.finish(),
            line_rects,
            style,
        }
    }
}
