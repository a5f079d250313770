// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for glyphline
//! diagnostics.
//!
//! This crate provides [`TraceSink`](glyphline_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//!
//! Install a sink on an animator with `TextAnimator::set_trace_sink`; events
//! only flow when `glyphline` is built with its `trace` feature.

pub mod chrome;
pub mod pretty;
pub mod recorder;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glyphline::glyphline_core::time::{HostTime, Timebase};
    use glyphline::glyphline_core::timeline::TimelineState;
    use glyphline::glyphline_core::trace::{
        CycleEvent, CyclePhase, FrameEvent, RebuildEvent, ScrubEvent, TraceSink,
        TransitionEvent,
    };
    use glyphline::{AnimatorConfig, FontLibrary, StyleConfig, TextAnimator};

    use crate::recorder::{RecordedEvent, RecorderSink, decode};

    /// Forwards to a recorder the test keeps a handle on.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<RecorderSink>>);

    impl TraceSink for Shared {
        fn on_rebuild(&mut self, e: &RebuildEvent) {
            self.0.borrow_mut().on_rebuild(e);
        }
        fn on_transition(&mut self, e: &TransitionEvent) {
            self.0.borrow_mut().on_transition(e);
        }
        fn on_cycle(&mut self, e: &CycleEvent) {
            self.0.borrow_mut().on_cycle(e);
        }
        fn on_scrub(&mut self, e: &ScrubEvent) {
            self.0.borrow_mut().on_scrub(e);
        }
        fn on_frame(&mut self, e: &FrameEvent) {
            self.0.borrow_mut().on_frame(e);
        }
    }

    fn traced_animator() -> (TextAnimator, Shared) {
        let mut fonts = FontLibrary::new();
        fonts.load_font_data(
            include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../fixtures/DejaVuSansMono.ttf"
            ))
            .to_vec(),
        );
        let style = StyleConfig {
            font_family: "DejaVu Sans Mono".to_owned(),
            ..StyleConfig::default()
        };
        let mut animator = TextAnimator::new(fonts, style, AnimatorConfig::default());
        let shared = Shared::default();
        animator.set_trace_sink(Some(Box::new(shared.clone())));
        (animator, shared)
    }

    fn at(seconds: f64) -> HostTime {
        HostTime::from_seconds(seconds, Timebase::NANOS)
    }

    fn recorded(shared: &Shared) -> Vec<RecordedEvent> {
        decode(shared.0.borrow().as_bytes()).collect()
    }

    #[test]
    fn play_cycle_records_start_and_finish() {
        let (mut animator, shared) = traced_animator();
        animator.start_animation().unwrap();
        animator.tick(at(1.0));
        animator.tick(at(5.0));

        let events = recorded(&shared);
        let summary: Vec<_> = events
            .iter()
            .map(|e| match e {
                RecordedEvent::Rebuild(r) => format!("rebuild ok={}", r.succeeded),
                RecordedEvent::Transition(t) => {
                    format!("{} -> {}", t.from.name(), t.to.name())
                }
                RecordedEvent::Cycle(c) => format!("cycle {} {:?}", c.cycle, c.phase),
                RecordedEvent::Scrub(_) => "scrub".to_owned(),
                RecordedEvent::Frame(f) => format!("frame {}", f.frame_index),
            })
            .collect();
        assert_eq!(
            summary,
            [
                "rebuild ok=true",
                "idle -> playing",
                "cycle 1 Started",
                "frame 1",
                "cycle 1 Stopped { finished: true }",
                "playing -> idle",
                "frame 2",
            ]
        );
    }

    #[test]
    fn scrub_session_records_accepted_positions() {
        let (mut animator, shared) = traced_animator();
        assert!(!animator.update_scrub(0.5), "idle ignores scrub");
        animator.prepare_for_animation().unwrap();
        assert!(animator.update_scrub(0.5), "preparing accepts scrub");

        let events = recorded(&shared);
        let scrubs: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::Scrub(s) => Some((s.accepted, s.time_offset)),
                _ => None,
            })
            .collect();
        assert_eq!(scrubs, [(false, 0.0), (true, 0.5)]);
        assert!(
            events.contains(&RecordedEvent::Transition(TransitionEvent {
                from: TimelineState::Preparing,
                to: TimelineState::Scrubbing { progress: 0.5 },
                at: 0.0,
            })),
            "{events:?}"
        );
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, RecordedEvent::Cycle(c) if c.phase == CyclePhase::Started)),
            "scrubbing is not a play cycle"
        );
    }

    #[test]
    fn recorded_session_exports_to_chrome_json() {
        let (mut animator, shared) = traced_animator();
        animator.start_animation().unwrap();
        animator.tick(at(0.5));
        animator.stop_animation();

        let mut out = Vec::new();
        crate::chrome::export(shared.0.borrow().as_bytes(), &mut out).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_slice(&out).unwrap();
        let phases: Vec<_> = parsed
            .iter()
            .filter(|v| v["name"] == "PlayCycle")
            .map(|v| v["ph"].as_str().unwrap_or_default().to_owned())
            .collect();
        assert_eq!(phases, ["B", "E"]);
    }
}
