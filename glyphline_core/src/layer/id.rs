// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational layer handles.

use core::fmt;

/// Raw slot value meaning "no layer" in parent and sibling links.
pub const NO_LAYER: u32 = u32::MAX;

/// A handle to a layer in a [`LayerStore`](super::LayerStore).
///
/// The animator replaces its background, stroke, and fill layers on every
/// rebuild, and freed slots are reused. The generation counter makes a
/// handle to a replaced layer stale instead of silently aliasing its
/// successor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl LayerId {
    /// Raw slot index, as reported in [`FrameChanges`](super::FrameChanges)
    /// and accepted by the store's `*_at` accessors.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// How many times the slot had been recycled when this handle was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId(#{} v{})", self.idx, self.generation)
    }
}
