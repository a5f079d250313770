// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text to outline paths.
//!
//! `glyphline_text` turns a string, a font family, and a size into the three
//! paths glyphline animates:
//!
//! ```text
//!   FontLibrary::resolve() ──► ResolvedFont
//!                                   │
//!   LayoutEngine::layout() ──► Vec<Line>
//!                                   │
//!   extract_outlines() ──► GlyphOutlines (y-up layout space)
//!                                   │
//!   PathBuilder::build() ──► PathSet { stroke, fill, background }
//! ```
//!
//! **[`font`]**: Family resolution over a `fontdb` database. Unknown
//! families are errors, never substitutions.
//!
//! **[`layout`]**: Shaping with `rustybuzz` and greedy breaking at
//! `unicode-linebreak` opportunities inside a reference rectangle.
//!
//! **[`outline`]**: Glyph contours scaled, positioned, and concatenated into
//! one [`OutlinePath`](glyphline_core::path::OutlinePath), plus ink bounds per
//! line.
//!
//! **[`builder`]**: Surface mapping (y flip, centering) and the rounded
//! background rectangles.

pub mod builder;
pub mod error;
pub mod font;
pub mod layout;
pub mod outline;

pub use builder::{PathBuilder, PathSet, PathStyle, Placement, SurfaceOrientation};
pub use error::TextError;
pub use font::{FontLibrary, FontMetrics, GenericFamily, ResolvedFont};
pub use layout::{GlyphPlacement, LayoutEngine, Line, TextAlignment};
pub use outline::{GlyphOutlines, LineBounds, extract_outlines};
