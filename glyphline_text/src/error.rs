// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while turning text into outlines.

use std::fmt;

/// A failure that aborts a rebuild.
///
/// Missing glyphs and empty text are not errors; they produce empty geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum TextError {
    /// The family is not registered, or the size is not a positive finite
    /// number.
    FontResolution {
        /// The requested family.
        family: String,
        /// The requested size, in points.
        size: f64,
    },
    /// The resolved font bytes could not be parsed as a font face.
    GlyphResolution {
        /// Family of the face that failed to parse.
        family: String,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontResolution { family, size } => {
                write!(f, "font family {family:?} cannot be resolved at size {size}")
            }
            Self::GlyphResolution { family } => {
                write!(f, "font data for {family:?} is not a usable face")
            }
        }
    }
}

impl core::error::Error for TextError {}
