// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer clocks.
//!
//! Every layer carries a [`LayerClock`] that maps its parent's time to its own
//! local time:
//!
//! ```text
//! local = (parent - begin_time) * speed + time_offset
//! ```
//!
//! Clocks compose from the root down. A speed of zero freezes the layer (and
//! its subtree) at `time_offset`, which is how scrubbing works: the host
//! writes the scrub position into the offset of a paused clock.

/// Time mapping from a parent timeline to a layer's local timeline, in
/// seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerClock {
    /// Rate multiplier; `0.0` pauses the layer.
    pub speed: f64,
    /// Added to the scaled parent time.
    pub time_offset: f64,
    /// Parent time at which the local timeline starts.
    pub begin_time: f64,
}

impl Default for LayerClock {
    fn default() -> Self {
        Self::RUNNING
    }
}

impl LayerClock {
    /// A clock that follows its parent one-to-one.
    pub const RUNNING: Self = Self {
        speed: 1.0,
        time_offset: 0.0,
        begin_time: 0.0,
    };

    /// A paused clock frozen at `time_offset`.
    #[must_use]
    pub const fn paused_at(time_offset: f64) -> Self {
        Self {
            speed: 0.0,
            time_offset,
            begin_time: 0.0,
        }
    }

    /// Maps a parent time to this clock's local time.
    #[inline]
    #[must_use]
    pub fn local_time(&self, parent_time: f64) -> f64 {
        (parent_time - self.begin_time) * self.speed + self.time_offset
    }

    /// Returns whether this clock is paused.
    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.speed == 0.0
    }
}
