// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline paths, render layers, and the animation timeline for glyphline.
//!
//! `glyphline_core` holds everything about animated text outlines that does
//! not need a font: the frozen geometry value the text pipeline produces, the
//! render-layer tree the orchestrator owns, the clock-driven animation driver,
//! and the play/scrub state machine. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   OutlinePathBuilder ──► OutlinePath ──► LayerStore::set_content()
//!                                               │
//!   AnimationTimeline ──► Animation ──► LayerStore::add_animation()
//!                                               │
//!   HostTime ──► LayerStore::evaluate() ──► FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`path`]**: Append-only outline builder and the immutable
//! [`OutlinePath`](path::OutlinePath) it freezes into, including arc-length
//! reveal for partially stroked outlines.
//!
//! **[`layer`]**: Struct-of-arrays render-layer tree with generational
//! handles. Each layer carries shape content, paint, a clock, and attached
//! animations; [`evaluate`](layer::LayerStore::evaluate) is the animation
//! driver.
//!
//! **[`animation`]**: Basic and keyframe animations over the stroke-reveal
//! fraction and fill color.
//!
//! **[`clock`]**: Per-layer speed / time-offset clocks used to pause and
//! scrub.
//!
//! **[`timeline`]**: The idle / preparing / playing / scrubbing state machine
//! and the animations it schedules for a play cycle.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait hosts
//! implement to redraw their native layer tree.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! rebuild and playback instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod backend;
pub mod clock;
pub mod color;
pub mod dirty;
pub mod layer;
pub mod path;
pub mod time;
pub mod timeline;
pub mod trace;
