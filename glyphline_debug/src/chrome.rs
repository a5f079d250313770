// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes Chrome Trace Event Format JSON to the given writer.
//!
//! Play cycles become duration slices, accepted scrubs a counter track, and
//! everything else instant events. Rebuilds carry no time of their own and
//! are stamped with the most recent timestamp seen in the recording.

use std::io::{self, Write};

use serde_json::{Value, json};

use glyphline_core::trace::CyclePhase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or Perfetto.
///
/// Timestamps are driver seconds converted to microseconds.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Rebuild(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": if e.succeeded { "Rebuild" } else { "RebuildFailed" },
                    "cat": "Layout",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "rebuild_index": e.rebuild_index,
                        "lines": e.line_count,
                        "contours": e.contour_count,
                        "bounds": [e.bounds.x0, e.bounds.y0, e.bounds.x1, e.bounds.y1],
                    }
                }));
            }
            RecordedEvent::Transition(e) => {
                last_ts = seconds_to_us(e.at);
                events.push(json!({
                    "ph": "i",
                    "name": "Transition",
                    "cat": "Timeline",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "from": e.from.name(),
                        "to": e.to.name(),
                    }
                }));
            }
            RecordedEvent::Cycle(e) => {
                last_ts = seconds_to_us(e.at);
                let (ph, finished) = match e.phase {
                    CyclePhase::Started => ("B", None),
                    CyclePhase::Stopped { finished } => ("E", Some(finished)),
                };
                events.push(json!({
                    "ph": ph,
                    "name": "PlayCycle",
                    "cat": "Timeline",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "cycle": e.cycle,
                        "finished": finished,
                    }
                }));
            }
            RecordedEvent::Scrub(e) => {
                if e.accepted {
                    events.push(json!({
                        "ph": "C",
                        "name": "Scrub",
                        "cat": "Timeline",
                        "ts": last_ts,
                        "pid": 0,
                        "tid": 0,
                        "args": {
                            "offset": e.time_offset,
                        }
                    }));
                } else {
                    events.push(json!({
                        "ph": "i",
                        "name": "ScrubIgnored",
                        "cat": "Timeline",
                        "ts": last_ts,
                        "pid": 0,
                        "tid": 0,
                        "s": "t",
                        "args": {
                            "value": e.value,
                        }
                    }));
                }
            }
            RecordedEvent::Frame(e) => {
                last_ts = seconds_to_us(e.seconds);
                events.push(json!({
                    "ph": "i",
                    "name": "Frame",
                    "cat": "Driver",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "animated": e.animated,
                        "finished": e.finished,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn seconds_to_us(seconds: f64) -> f64 {
    seconds * 1_000_000.0
}
