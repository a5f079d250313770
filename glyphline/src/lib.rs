// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated stroke and fill reveal of text outlines.
//!
//! `glyphline` turns a string into glyph outlines and animates them: the
//! outline is stroked progressively, then the glyphs fade in, optionally over
//! rounded line backgrounds. Playback runs on the host's frame clock and can
//! be replaced by manual scrubbing.
//!
//! ```rust,ignore
//! let mut animator = TextAnimator::new(
//!     FontLibrary::with_system_fonts(),
//!     StyleConfig::default(),
//!     AnimatorConfig::default(),
//! );
//! animator.start_animation()?;
//!
//! // Every frame:
//! animator.present(now, &mut presenter);
//! ```
//!
//! The host implements [`Presenter`](glyphline_core::backend::Presenter) to
//! mirror the three layers into its own drawing tree, and optionally an
//! [`AnimatorDelegate`] to hear when a play cycle starts and stops.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Emits rebuild, transition, cycle, scrub,
//!   and frame events to the sink set with
//!   [`TextAnimator::set_trace_sink`].

mod animator;
mod style;

pub use animator::{AnimatorDelegate, AnimatorLayers, TextAnimator};
pub use style::{AnimatorConfig, StyleConfig};

pub use glyphline_core;
pub use glyphline_text;
pub use glyphline_text::{FontLibrary, TextError};
