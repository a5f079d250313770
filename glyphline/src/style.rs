// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style and animator configuration.

use glyphline_core::color::Color;
use glyphline_core::time::Timebase;
use glyphline_core::timeline::TimelineConfig;
use glyphline_text::{Placement, SurfaceOrientation, TextAlignment};
use kurbo::Size;

/// What to draw. Every rebuild consumes one snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    /// Text to animate. Empty text is replaced by
    /// [`AnimatorConfig::fallback_text`].
    pub text: String,
    /// Family name, PostScript name, or CSS generic family.
    pub font_family: String,
    /// Font size in points. Must be positive.
    pub font_size: f64,
    /// Whether the stroke layer is shown and its reveal animated.
    pub stroke_enabled: bool,
    /// Whether the background layer is shown and faded in.
    pub background_enabled: bool,
    /// Stroke color.
    pub stroke_color: Color,
    /// Fill color of the glyphs.
    pub fill_color: Color,
    /// Fill color of the line backgrounds.
    pub background_color: Color,
    /// Size of the surface the text is laid out in.
    pub reference_size: Size,
    /// Horizontal alignment of the lines.
    pub alignment: TextAlignment,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: "Podlodka".to_owned(),
            font_family: "sans-serif".to_owned(),
            font_size: 50.0,
            stroke_enabled: true,
            background_enabled: false,
            stroke_color: Color::BLACK,
            fill_color: Color::PURPLE,
            background_color: Color::SYSTEM_BLUE,
            reference_size: Size::new(320.0, 200.0),
            alignment: TextAlignment::Center,
        }
    }
}

/// Fixed behavior of a [`TextAnimator`](crate::TextAnimator).
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatorConfig {
    /// Playback durations.
    pub timeline: TimelineConfig,
    /// Converts host ticks passed to `tick` into seconds.
    pub timebase: Timebase,
    /// Y direction of the host surface.
    pub orientation: SurfaceOrientation,
    /// Where paths land on the surface.
    pub placement: Placement,
    /// Drawn instead of empty text. `None` draws nothing.
    pub fallback_text: Option<String>,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineConfig::default(),
            timebase: Timebase::NANOS,
            orientation: SurfaceOrientation::YDown,
            placement: Placement::Centered,
            fallback_text: Some("Podlodka".to_owned()),
        }
    }
}
