// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host presentation contract.
//!
//! The animator never draws. After each tick it hands the evaluated
//! [`FrameChanges`] to a [`Presenter`], which mirrors them into whatever
//! native tree the host renders with (platform shape layers, a vector
//! renderer's scene, DOM nodes).
//!
//! A presenter reads current values from the store through the raw-index
//! accessors:
//!
//! - [`content_at`](LayerStore::content_at) for the outline of a layer,
//! - [`presentation_at`](LayerStore::presentation_at) for its paint, where
//!   `stroke_end` selects how much of the outline to stroke (see
//!   [`OutlinePath::reveal`](crate::path::OutlinePath::reveal)),
//! - [`effective_hidden_at`](LayerStore::effective_hidden_at) for visibility,
//! - [`traversal_order`](LayerStore::traversal_order) for back-to-front
//!   order.

use crate::layer::{FrameChanges, LayerStore};

/// Applies evaluated frame changes to a host presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(now: HostTime) {
///     // Advance the driver and redraw what changed.
///     animator.present(now, &mut presenter);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the backing presentation tree,
    /// reading current property values from `store` as needed.
    fn apply(&mut self, store: &LayerStore, changes: &FrameChanges);
}
