// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback and scrub state machine.
//!
//! ```text
//!            prepare()               scrub(v)
//!   Idle ──────────────► Preparing ───────────► Scrubbing ◄─┐
//!    ▲                                              │  scrub(v)
//!    │          play()                              └───────┘
//!    ├─────────────────► Playing
//!    │   stop() / finish
//!    └────────────────── any
//! ```
//!
//! [`AnimationTimeline`] only tracks the mode and builds the animations each
//! mode needs; the orchestrator installs them on its layers. Scrub positions
//! become the time offset of a paused stroke clock
//! ([`LayerClock::paused_at`](crate::clock::LayerClock::paused_at)).

use alloc::vec;

use crate::animation::{AnimatedProperty, Animation, AnimationValue};
use crate::color::Color;

/// Timeline mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TimelineState {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// The scrub animation is installed on a paused clock; no position yet.
    Preparing,
    /// A play cycle is running on the host clock.
    Playing,
    /// The scrub animation is positioned at `progress`.
    Scrubbing {
        /// Normalized scrub position, `0.0..=1.0`.
        progress: f64,
    },
}

impl TimelineState {
    /// Short lowercase name, for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Playing => "playing",
            Self::Scrubbing { .. } => "scrubbing",
        }
    }

    /// Returns whether scrub positions are accepted in this state.
    #[must_use]
    pub const fn accepts_scrub(self) -> bool {
        matches!(self, Self::Preparing | Self::Scrubbing { .. })
    }
}

/// Durations used by the timeline, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineConfig {
    /// Duration of the stroke reveal during playback.
    pub stroke_duration: f64,
    /// Duration of the fill fade-in after the stroke (or alone, without a
    /// stroke).
    pub color_duration: f64,
    /// Normalized duration of the scrub animation; scrub positions are scaled
    /// by it.
    pub scrub_duration: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            stroke_duration: 4.0,
            color_duration: 2.0,
            scrub_duration: 1.0,
        }
    }
}

/// The animations of one play cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayPlan {
    /// Stroke reveal, when the stroke is enabled.
    pub stroke: Option<Animation>,
    /// Fill color keyframes.
    pub fill: Animation,
    /// Background fade-in, when the background is enabled.
    pub background: Option<Animation>,
    /// The animation whose completion ends the cycle.
    pub lead: AnimatedProperty,
}

/// Mode tracking plus the animation factory for play and scrub.
#[derive(Clone, Debug, Default)]
pub struct AnimationTimeline {
    config: TimelineConfig,
    state: TimelineState,
}

impl AnimationTimeline {
    /// Creates an idle timeline.
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            state: TimelineState::Idle,
        }
    }

    /// Returns the durations in use.
    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    /// Returns the current mode.
    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Enters [`TimelineState::Preparing`] and returns the previous state.
    pub fn prepare(&mut self) -> TimelineState {
        core::mem::replace(&mut self.state, TimelineState::Preparing)
    }

    /// Enters [`TimelineState::Playing`] and returns the previous state.
    pub fn play(&mut self) -> TimelineState {
        core::mem::replace(&mut self.state, TimelineState::Playing)
    }

    /// Enters [`TimelineState::Idle`] and returns the previous state.
    pub fn stop(&mut self) -> TimelineState {
        core::mem::replace(&mut self.state, TimelineState::Idle)
    }

    /// Moves the scrub position.
    ///
    /// Returns the time offset to write into the paused stroke clock, or
    /// `None` if the timeline is not preparing or scrubbing. `value` is
    /// clamped to `0.0..=1.0`; NaN counts as zero.
    pub fn scrub(&mut self, value: f64) -> Option<f64> {
        if !self.state.accepts_scrub() {
            return None;
        }
        let progress = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.state = TimelineState::Scrubbing { progress };
        Some(progress * self.config.scrub_duration)
    }

    /// The stroke reveal installed for scrubbing.
    #[must_use]
    pub fn scrub_animation(&self) -> Animation {
        stroke_reveal(self.config.scrub_duration)
    }

    /// Duration of the fill animation, which the background shares.
    #[must_use]
    pub fn fill_duration(&self, stroke_enabled: bool) -> f64 {
        if stroke_enabled {
            self.config.stroke_duration + self.config.color_duration
        } else {
            self.config.color_duration
        }
    }

    /// Builds the animations of a play cycle.
    ///
    /// With a stroke, the fill stays transparent until the stroke has been
    /// drawn, then fades in to `fill`. Without one, the fill fades linearly
    /// from transparent to `fill` over the color duration.
    #[must_use]
    pub fn play_plan(
        &self,
        stroke_enabled: bool,
        background_enabled: bool,
        fill: Color,
        background: Color,
    ) -> PlayPlan {
        let fill_duration = self.fill_duration(stroke_enabled);
        let fill = if stroke_enabled {
            let split = self.config.stroke_duration / fill_duration;
            Animation::keyframes(
                AnimatedProperty::FillColor,
                vec![
                    AnimationValue::Color(Color::TRANSPARENT),
                    AnimationValue::Color(Color::TRANSPARENT),
                    AnimationValue::Color(fill),
                ],
                Some(vec![0.0, split, 1.0]),
                fill_duration,
            )
        } else {
            Animation::basic(
                AnimatedProperty::FillColor,
                AnimationValue::Color(Color::TRANSPARENT),
                AnimationValue::Color(fill),
                fill_duration,
            )
        };
        let background = background_enabled.then(|| {
            Animation::basic(
                AnimatedProperty::FillColor,
                AnimationValue::Color(Color::TRANSPARENT),
                AnimationValue::Color(background),
                fill_duration,
            )
        });
        PlayPlan {
            stroke: stroke_enabled.then(|| stroke_reveal(self.config.stroke_duration)),
            fill,
            background,
            lead: if stroke_enabled {
                AnimatedProperty::StrokeEnd
            } else {
                AnimatedProperty::FillColor
            },
        }
    }
}

fn stroke_reveal(duration: f64) -> Animation {
    Animation::basic(
        AnimatedProperty::StrokeEnd,
        AnimationValue::Scalar(0.0),
        AnimationValue::Scalar(1.0),
        duration,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Curve;

    #[test]
    fn scrub_ignored_outside_preparing() {
        let mut timeline = AnimationTimeline::default();
        assert_eq!(timeline.scrub(0.5), None, "idle ignores scrub");
        timeline.play();
        assert_eq!(timeline.scrub(0.5), None, "playing ignores scrub");
        assert_eq!(timeline.state(), TimelineState::Playing);
    }

    #[test]
    fn scrub_sets_progress_and_offset() {
        let mut timeline = AnimationTimeline::new(TimelineConfig {
            scrub_duration: 2.0,
            ..TimelineConfig::default()
        });
        assert_eq!(timeline.prepare(), TimelineState::Idle);
        assert_eq!(timeline.scrub(0.25), Some(0.5));
        assert_eq!(
            timeline.state(),
            TimelineState::Scrubbing { progress: 0.25 }
        );
        assert_eq!(timeline.scrub(3.0), Some(2.0), "clamped to 1");
        assert_eq!(timeline.scrub(f64::NAN), Some(0.0));
    }

    #[test]
    fn stop_returns_to_idle_from_any_state() {
        let mut timeline = AnimationTimeline::default();
        timeline.prepare();
        let _ = timeline.scrub(0.3);
        let previous = timeline.stop();
        assert_eq!(previous, TimelineState::Scrubbing { progress: 0.3 });
        assert_eq!(timeline.state(), TimelineState::Idle);
        assert_eq!(timeline.state().name(), "idle");
    }

    #[test]
    fn play_plan_with_stroke_delays_fill() {
        let timeline = AnimationTimeline::default();
        let plan = timeline.play_plan(true, true, Color::PURPLE, Color::SYSTEM_BLUE);
        assert_eq!(plan.lead, AnimatedProperty::StrokeEnd);
        assert_eq!(plan.stroke.as_ref().map(Animation::duration), Some(4.0));
        assert_eq!(plan.fill.duration(), 6.0);
        match plan.fill.curve() {
            Curve::Keyframes { key_times, .. } => {
                assert!((key_times[1] - 4.0 / 6.0).abs() < 1e-12, "{key_times:?}");
            }
            Curve::Basic { .. } => panic!("fill should be keyframed"),
        }
        assert_eq!(plan.background.as_ref().map(Animation::duration), Some(6.0));
    }

    #[test]
    fn play_plan_without_stroke_leads_with_fill() {
        let timeline = AnimationTimeline::default();
        let plan = timeline.play_plan(false, false, Color::PURPLE, Color::SYSTEM_BLUE);
        assert!(plan.stroke.is_none());
        assert!(plan.background.is_none());
        assert_eq!(plan.lead, AnimatedProperty::FillColor);
        assert_eq!(plan.fill.duration(), 2.0);
        assert!(
            matches!(plan.fill.curve(), Curve::Basic { .. }),
            "fill is a plain fade without a stroke"
        );
        let halfway = plan.fill.sample(1.0).as_color().map(|c| c.a);
        assert!(
            halfway.is_some_and(|a| (a - 0.5).abs() < 1e-6),
            "linear fade is half opaque halfway: {halfway:?}"
        );
        assert_eq!(
            plan.fill.sample(2.0).as_color(),
            Some(Color::PURPLE),
            "ends at the target color"
        );
    }

    #[test]
    fn scrub_animation_spans_scrub_duration() {
        let timeline = AnimationTimeline::default();
        let anim = timeline.scrub_animation();
        assert_eq!(anim.property(), AnimatedProperty::StrokeEnd);
        assert_eq!(anim.duration(), 1.0);
    }
}
