// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, one tag byte followed by the event
//! fields. [`decode`] reads them back as an iterator of [`RecordedEvent`].

use glyphline_core::time::HostTime;
use glyphline_core::timeline::TimelineState;
use glyphline_core::trace::{
    CycleEvent, CyclePhase, FrameEvent, RebuildEvent, ScrubEvent, TraceSink, TransitionEvent,
};
use kurbo::Rect;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REBUILD: u8 = 1;
const TAG_TRANSITION: u8 = 2;
const TAG_CYCLE: u8 = 3;
const TAG_SCRUB: u8 = 4;
const TAG_FRAME: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_state(&mut self, state: TimelineState) {
        let (tag, progress) = match state {
            TimelineState::Idle => (0, 0.0),
            TimelineState::Preparing => (1, 0.0),
            TimelineState::Playing => (2, 0.0),
            TimelineState::Scrubbing { progress } => (3, progress),
        };
        self.write_u8(tag);
        self.write_f64(progress);
    }

    fn write_phase(&mut self, phase: CyclePhase) {
        self.write_u8(match phase {
            CyclePhase::Started => 0,
            CyclePhase::Stopped { finished: false } => 1,
            CyclePhase::Stopped { finished: true } => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        self.write_u8(TAG_REBUILD);
        self.write_u64(e.rebuild_index);
        self.write_bool(e.succeeded);
        self.write_u32(e.line_count);
        self.write_u32(e.contour_count);
        for v in [e.bounds.x0, e.bounds.y0, e.bounds.x1, e.bounds.y1] {
            self.write_f64(v);
        }
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_state(e.from);
        self.write_state(e.to);
        self.write_f64(e.at);
    }

    fn on_cycle(&mut self, e: &CycleEvent) {
        self.write_u8(TAG_CYCLE);
        self.write_u64(e.cycle);
        self.write_phase(e.phase);
        self.write_f64(e.at);
    }

    fn on_scrub(&mut self, e: &ScrubEvent) {
        self.write_u8(TAG_SCRUB);
        self.write_f64(e.value);
        self.write_bool(e.accepted);
        self.write_f64(e.time_offset);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_f64(e.seconds);
        self.write_u32(e.animated);
        self.write_u32(e.finished);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`RebuildEvent`].
    Rebuild(RebuildEvent),
    /// A [`TransitionEvent`].
    Transition(TransitionEvent),
    /// A [`CycleEvent`].
    Cycle(CycleEvent),
    /// A [`ScrubEvent`].
    Scrub(ScrubEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_state(&mut self) -> Option<TimelineState> {
        let tag = self.read_u8()?;
        let progress = self.read_f64()?;
        Some(match tag {
            0 => TimelineState::Idle,
            1 => TimelineState::Preparing,
            2 => TimelineState::Playing,
            _ => TimelineState::Scrubbing { progress },
        })
    }

    fn read_phase(&mut self) -> Option<CyclePhase> {
        Some(match self.read_u8()? {
            0 => CyclePhase::Started,
            1 => CyclePhase::Stopped { finished: false },
            _ => CyclePhase::Stopped { finished: true },
        })
    }

    fn decode_rebuild(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Rebuild(RebuildEvent {
            rebuild_index: self.read_u64()?,
            succeeded: self.read_bool()?,
            line_count: self.read_u32()?,
            contour_count: self.read_u32()?,
            bounds: Rect::new(
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
                self.read_f64()?,
            ),
        }))
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Transition(TransitionEvent {
            from: self.read_state()?,
            to: self.read_state()?,
            at: self.read_f64()?,
        }))
    }

    fn decode_cycle(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Cycle(CycleEvent {
            cycle: self.read_u64()?,
            phase: self.read_phase()?,
            at: self.read_f64()?,
        }))
    }

    fn decode_scrub(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Scrub(ScrubEvent {
            value: self.read_f64()?,
            accepted: self.read_bool()?,
            time_offset: self.read_f64()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            seconds: self.read_f64()?,
            animated: self.read_u32()?,
            finished: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_REBUILD => self.decode_rebuild(),
            TAG_TRANSITION => self.decode_transition(),
            TAG_CYCLE => self.decode_cycle(),
            TAG_SCRUB => self.decode_scrub(),
            TAG_FRAME => self.decode_frame(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
