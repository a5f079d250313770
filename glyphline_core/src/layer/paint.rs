// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape paint properties.

use crate::animation::{AnimatedProperty, AnimationValue};
use crate::color::Color;

/// How stroke segments are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Sharp corners.
    #[default]
    Miter,
    /// Rounded corners.
    Round,
    /// Cut-off corners.
    Bevel,
}

/// How a layer's shape content is painted.
///
/// `stroke_end` is the fraction of the outline (by arc length) that is
/// stroked; see [`OutlinePath::reveal`](crate::path::OutlinePath::reveal).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapePaint {
    /// Fill color; transparent disables filling.
    pub fill: Color,
    /// Stroke color; transparent disables stroking.
    pub stroke: Color,
    /// Stroke width in surface units.
    pub line_width: f64,
    /// Stroke join style.
    pub line_join: LineJoin,
    /// Stroked fraction of the outline, in `0.0..=1.0`.
    pub stroke_end: f64,
}

impl Default for ShapePaint {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::TRANSPARENT,
            line_width: 1.0,
            line_join: LineJoin::Miter,
            stroke_end: 1.0,
        }
    }
}

impl ShapePaint {
    /// A solid fill with no stroke.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: color,
            ..Self::default()
        }
    }

    /// A round-joined stroke with no fill.
    #[must_use]
    pub fn stroke(color: Color, line_width: f64) -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: color,
            line_width,
            line_join: LineJoin::Round,
            stroke_end: 1.0,
        }
    }

    /// Reads the current value of an animatable property.
    #[must_use]
    pub fn get(&self, property: AnimatedProperty) -> AnimationValue {
        match property {
            AnimatedProperty::StrokeEnd => AnimationValue::Scalar(self.stroke_end),
            AnimatedProperty::FillColor => AnimationValue::Color(self.fill),
        }
    }

    /// Overwrites an animatable property. Values of the wrong kind are
    /// ignored.
    pub fn set(&mut self, property: AnimatedProperty, value: AnimationValue) {
        match (property, value) {
            (AnimatedProperty::StrokeEnd, AnimationValue::Scalar(v)) => {
                self.stroke_end = v.clamp(0.0, 1.0);
            }
            (AnimatedProperty::FillColor, AnimationValue::Color(c)) => self.fill = c,
            _ => {}
        }
    }
}
