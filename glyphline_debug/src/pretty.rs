// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host
//! timestamps are converted to microseconds using a [`Timebase`].

use std::io::Write;

use glyphline_core::time::{HostTime, Timebase};
use glyphline_core::timeline::TimelineState;
use glyphline_core::trace::{
    CycleEvent, CyclePhase, FrameEvent, RebuildEvent, ScrubEvent, TraceSink, TransitionEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Returns the destination, consuming the sink.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

fn state_label(state: TimelineState) -> String {
    match state {
        TimelineState::Scrubbing { progress } => format!("scrubbing({progress:.3})"),
        other => other.name().to_owned(),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_rebuild(&mut self, e: &RebuildEvent) {
        if e.succeeded {
            let _ = writeln!(
                self.writer,
                "[rebuild] #{} lines={} contours={} bounds=({:.1}, {:.1})..({:.1}, {:.1})",
                e.rebuild_index,
                e.line_count,
                e.contour_count,
                e.bounds.x0,
                e.bounds.y0,
                e.bounds.x1,
                e.bounds.y1,
            );
        } else {
            let _ = writeln!(self.writer, "[rebuild] #{} FAILED", e.rebuild_index);
        }
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] {} -> {} at {:.3}s",
            state_label(e.from),
            state_label(e.to),
            e.at,
        );
    }

    fn on_cycle(&mut self, e: &CycleEvent) {
        let phase = match e.phase {
            CyclePhase::Started => "start",
            CyclePhase::Stopped { finished: true } => "stop finished",
            CyclePhase::Stopped { finished: false } => "stop interrupted",
        };
        let _ = writeln!(
            self.writer,
            "[cycle] #{} {phase} at {:.3}s",
            e.cycle, e.at,
        );
    }

    fn on_scrub(&mut self, e: &ScrubEvent) {
        if e.accepted {
            let _ = writeln!(
                self.writer,
                "[scrub] value={:.3} offset={:.3}s",
                e.value, e.time_offset,
            );
        } else {
            let _ = writeln!(self.writer, "[scrub] value={:.3} ignored", e.value);
        }
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] #{} now={:.1}µs t={:.3}s animated={} finished={}",
            e.frame_index,
            self.host_us(e.now),
            e.seconds,
            e.animated,
            e.finished,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_frame() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_frame(&FrameEvent {
            frame_index: 1,
            now: HostTime(1_500_000),
            seconds: 0.0015,
            animated: 2,
            finished: 0,
        });
        let output = output(sink);
        assert!(output.starts_with("[frame] #1"), "got: {output}");
        assert!(output.contains("now=1500.0µs"), "got: {output}");
        assert!(output.contains("animated=2"), "got: {output}");
    }

    #[test]
    fn pretty_print_transition_shows_scrub_progress() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_transition(&TransitionEvent {
            from: TimelineState::Preparing,
            to: TimelineState::Scrubbing { progress: 0.5 },
            at: 2.0,
        });
        assert_eq!(
            output(sink),
            "[transition] preparing -> scrubbing(0.500) at 2.000s\n"
        );
    }

    #[test]
    fn pretty_print_failed_rebuild_and_ignored_scrub() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_rebuild(&RebuildEvent {
            rebuild_index: 4,
            succeeded: false,
            line_count: 0,
            contour_count: 0,
            bounds: Rect::ZERO,
        });
        sink.on_scrub(&ScrubEvent {
            value: 0.25,
            accepted: false,
            time_offset: 0.0,
        });
        sink.on_cycle(&CycleEvent {
            cycle: 2,
            phase: CyclePhase::Stopped { finished: false },
            at: 1.0,
        });
        let output = output(sink);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "[rebuild] #4 FAILED",
                "[scrub] value=0.250 ignored",
                "[cycle] #2 stop interrupted at 1.000s",
            ]
        );
    }
}
