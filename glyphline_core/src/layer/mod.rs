// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-layer tree and animation driver.
//!
//! A *layer* is a node in the tree the animator hands to a presenter. Each
//! layer has:
//!
//! - An identity ([`LayerId`]), a generational handle that becomes stale when
//!   the layer is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Children are painted back to front in sibling order.
//! - **Model properties** set by the caller:
//!   [`content`](LayerStore::set_content), [`paint`](LayerStore::set_paint),
//!   [`clock`](LayerStore::set_clock), and [`flags`](LayerStore::set_flags),
//!   plus any attached [animations](LayerStore::add_animation).
//! - **Presentation properties**: the model paint with every attached
//!   animation sampled at the layer's local time, and `effective_hidden`
//!   (hidden by itself or any ancestor).
//!
//! Layers are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Mutations mark the matching channel (see [`dirty`](crate::dirty)):
//!
//! - **HIDDEN** propagates to all descendants.
//! - **PAINT** / **CONTENT** are local-only.
//! - **TOPOLOGY** triggers a traversal-order rebuild.

mod evaluate;
mod id;
mod paint;
mod store;
mod traverse;

pub use evaluate::{FinishedAnimation, FrameChanges};
pub use id::{LayerId, NO_LAYER};
pub use paint::{LineJoin, ShapePaint};
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
