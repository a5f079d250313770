// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property animations.
//!
//! An [`Animation`] drives one [`AnimatedProperty`] of a layer's paint over a
//! fixed duration, either by interpolating between two values
//! ([`Curve::Basic`]) or through a list of keyframes ([`Curve::Keyframes`]).
//! Animations are attached to layers with
//! [`LayerStore::add_animation`](crate::layer::LayerStore::add_animation);
//! the store resolves their begin time and samples them on every evaluate.

use alloc::vec::Vec;
use core::fmt;

use crate::color::Color;

/// A paint property that can be animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    /// Fraction of the outline that is stroked, in `0.0..=1.0`.
    StrokeEnd,
    /// Fill color.
    FillColor,
}

impl AnimatedProperty {
    /// Returns the key an animation of this property is registered under.
    ///
    /// A layer holds at most one animation per key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StrokeEnd => "strokeEnd",
            Self::FillColor => "fillColor",
        }
    }
}

impl fmt::Display for AnimatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value an animation produces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationValue {
    /// A scalar such as the stroke-reveal fraction.
    Scalar(f64),
    /// A color.
    Color(Color),
}

impl AnimationValue {
    /// Interpolates towards `to`. Mismatched kinds step to `to` at `t >= 1`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Color(a), Self::Color(b)) => Self::Color(a.lerp(b, t)),
            _ if t >= 1.0 => to,
            _ => self,
        }
    }

    /// Returns the scalar, if this is a scalar value.
    #[must_use]
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// Returns the color, if this is a color value.
    #[must_use]
    pub fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }
}

/// How an animation moves through its values.
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    /// Linear interpolation from `from` to `to`.
    Basic {
        /// Value at the start.
        from: AnimationValue,
        /// Value at the end.
        to: AnimationValue,
    },
    /// Piecewise-linear interpolation through keyframes.
    Keyframes {
        /// Keyframe values.
        values: Vec<AnimationValue>,
        /// Normalized times (`0.0..=1.0`, non-decreasing), one per value.
        key_times: Vec<f64>,
    },
}

/// A timed animation of one paint property.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    property: AnimatedProperty,
    curve: Curve,
    duration: f64,
}

impl Animation {
    /// Creates a basic animation from `from` to `to` over `duration` seconds.
    #[must_use]
    pub fn basic(
        property: AnimatedProperty,
        from: AnimationValue,
        to: AnimationValue,
        duration: f64,
    ) -> Self {
        Self {
            property,
            curve: Curve::Basic { from, to },
            duration,
        }
    }

    /// Creates a keyframe animation over `duration` seconds.
    ///
    /// Without `key_times` the values are spaced evenly.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty, or if `key_times` is given with a
    /// different length than `values`.
    #[must_use]
    pub fn keyframes(
        property: AnimatedProperty,
        values: Vec<AnimationValue>,
        key_times: Option<Vec<f64>>,
        duration: f64,
    ) -> Self {
        assert!(
            !values.is_empty(),
            "keyframe animation needs at least one value"
        );
        let key_times = match key_times {
            Some(times) => {
                assert_eq!(
                    times.len(),
                    values.len(),
                    "key_times must have one entry per value"
                );
                times
            }
            None => evenly_spaced(values.len()),
        };
        Self {
            property,
            curve: Curve::Keyframes { values, key_times },
            duration,
        }
    }

    /// Returns the animated property.
    #[must_use]
    pub fn property(&self) -> AnimatedProperty {
        self.property
    }

    /// Returns the curve.
    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Samples the animation `elapsed` seconds after it began.
    ///
    /// Elapsed time is clamped to `0.0..=duration`; a non-positive duration
    /// samples the end value.
    #[must_use]
    pub fn sample(&self, elapsed: f64) -> AnimationValue {
        let progress = if self.duration > 0.0 {
            (elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        match &self.curve {
            Curve::Basic { from, to } => from.lerp(*to, progress),
            Curve::Keyframes { values, key_times } => {
                sample_keyframes(values, key_times, progress)
            }
        }
    }
}

fn evenly_spaced(count: usize) -> Vec<f64> {
    if count == 1 {
        return alloc::vec![0.0];
    }
    let last = (count - 1) as f64;
    (0..count).map(|i| i as f64 / last).collect()
}

fn sample_keyframes(values: &[AnimationValue], key_times: &[f64], progress: f64) -> AnimationValue {
    let mut current = values[0];
    if progress <= key_times[0] {
        return current;
    }
    for (pair, times) in values.windows(2).zip(key_times.windows(2)) {
        let (start, end) = (times[0], times[1]);
        if progress <= end {
            let span = end - start;
            let t = if span > 0.0 {
                (progress - start) / span
            } else {
                1.0
            };
            return pair[0].lerp(pair[1], t);
        }
        current = pair[1];
    }
    current
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn basic_scalar_interpolates_linearly() {
        let anim = Animation::basic(
            AnimatedProperty::StrokeEnd,
            AnimationValue::Scalar(0.0),
            AnimationValue::Scalar(1.0),
            4.0,
        );
        assert_eq!(anim.sample(0.0), AnimationValue::Scalar(0.0));
        assert_eq!(anim.sample(1.0), AnimationValue::Scalar(0.25));
        assert_eq!(anim.sample(4.0), AnimationValue::Scalar(1.0));
        assert_eq!(anim.sample(9.0), AnimationValue::Scalar(1.0), "clamped");
        assert_eq!(anim.sample(-1.0), AnimationValue::Scalar(0.0), "clamped");
    }

    #[test]
    fn keyframes_respect_key_times() {
        let target = Color::PURPLE;
        let anim = Animation::keyframes(
            AnimatedProperty::FillColor,
            vec![
                AnimationValue::Color(Color::TRANSPARENT),
                AnimationValue::Color(Color::TRANSPARENT),
                AnimationValue::Color(target),
            ],
            Some(vec![0.0, 4.0 / 6.0, 1.0]),
            6.0,
        );
        assert_eq!(
            anim.sample(3.9).as_color(),
            Some(Color::TRANSPARENT),
            "still transparent while the stroke draws"
        );
        let mid = anim.sample(5.0).as_color().unwrap();
        assert!((mid.a - 0.5).abs() < 1e-6, "halfway through the fade");
        assert_eq!(anim.sample(6.0).as_color(), Some(target));
    }

    #[test]
    fn keyframes_default_to_even_spacing() {
        let anim = Animation::keyframes(
            AnimatedProperty::StrokeEnd,
            vec![
                AnimationValue::Scalar(0.0),
                AnimationValue::Scalar(0.0),
                AnimationValue::Scalar(1.0),
            ],
            None,
            2.0,
        );
        assert_eq!(anim.sample(1.0), AnimationValue::Scalar(0.0));
        assert_eq!(anim.sample(1.5), AnimationValue::Scalar(0.5));
    }

    #[test]
    fn zero_duration_samples_end() {
        let anim = Animation::basic(
            AnimatedProperty::StrokeEnd,
            AnimationValue::Scalar(0.0),
            AnimationValue::Scalar(1.0),
            0.0,
        );
        assert_eq!(anim.sample(0.0), AnimationValue::Scalar(1.0));
    }

    #[test]
    #[should_panic(expected = "at least one value")]
    fn empty_keyframes_panic() {
        let _ = Animation::keyframes(AnimatedProperty::FillColor, Vec::new(), None, 1.0);
    }

    #[test]
    fn property_keys() {
        assert_eq!(AnimatedProperty::StrokeEnd.key(), "strokeEnd");
        assert_eq!(AnimatedProperty::FillColor.key(), "fillColor");
    }
}
