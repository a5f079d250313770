// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for rebuilds and playback.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! animator emits. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use kurbo::Rect;

use crate::time::HostTime;
use crate::timeline::TimelineState;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after every rebuild attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RebuildEvent {
    /// Monotonic rebuild counter (failed attempts included).
    pub rebuild_index: u64,
    /// Whether the new layers were attached. On failure the previous tree
    /// stays in place.
    pub succeeded: bool,
    /// Number of laid-out lines.
    pub line_count: u32,
    /// Number of glyph contours in the outline.
    pub contour_count: u32,
    /// Bounds of the glyph outline in surface coordinates.
    pub bounds: Rect,
}

/// Emitted when the timeline changes mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEvent {
    /// State before the transition.
    pub from: TimelineState,
    /// State after the transition.
    pub to: TimelineState,
    /// Driver time of the transition, in seconds.
    pub at: f64,
}

/// Which end of a play cycle an event marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CyclePhase {
    /// The start notification was delivered.
    Started,
    /// The stop notification was delivered.
    Stopped {
        /// `true` on natural completion, `false` on interruption.
        finished: bool,
    },
}

/// Emitted alongside each start / stop notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleEvent {
    /// Play cycle counter.
    pub cycle: u64,
    /// Start or stop.
    pub phase: CyclePhase,
    /// Driver time of the notification, in seconds.
    pub at: f64,
}

/// Emitted for every scrub request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubEvent {
    /// Requested position.
    pub value: f64,
    /// Whether the timeline accepted it (preparing or scrubbing).
    pub accepted: bool,
    /// Time offset written into the stroke clock, `0.0` when ignored.
    pub time_offset: f64,
}

/// Emitted after every driver tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time the frame was evaluated at.
    pub now: HostTime,
    /// The same time in driver seconds.
    pub seconds: f64,
    /// Layers whose presented paint changed.
    pub animated: u32,
    /// Animations that ran to completion.
    pub finished: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the animator.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called after a rebuild attempt.
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        _ = e;
    }

    /// Called on a timeline state transition.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a play cycle starts or stops.
    fn on_cycle(&mut self, e: &CycleEvent) {
        _ = e;
    }

    /// Called for every scrub request.
    fn on_scrub(&mut self, e: &ScrubEvent) {
        _ = e;
    }

    /// Called after every tick.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RebuildEvent`].
    #[inline]
    pub fn rebuild(&mut self, e: &RebuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rebuild(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CycleEvent`].
    #[inline]
    pub fn cycle(&mut self, e: &CycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScrubEvent`].
    #[inline]
    pub fn scrub(&mut self, e: &ScrubEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scrub(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
