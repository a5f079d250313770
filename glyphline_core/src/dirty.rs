// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Layer mutations mark one of these channels (via [`understory_dirty`]) so
//! that [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) only
//! reports what actually changed.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`HIDDEN`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) with child-to-parent
//!   dependency edges, since effective visibility is inherited.
//! - **Local-only**: [`PAINT`] and [`CONTENT`] only report the explicitly
//!   marked layer. Paint covers model paint, clock, and animation changes.
//! - **Structural**: [`TOPOLOGY`] is marked on create / destroy / attach /
//!   detach and triggers a traversal-order rebuild.
//!
//! Callers never query dirty state directly; each evaluate drains all
//! channels into [`FrameChanges`](crate::layer::FrameChanges).

use understory_dirty::Channel;

/// Hidden flag changed; effective visibility must be recomputed for
/// descendants.
pub const HIDDEN: Channel = Channel::new(0);

/// Paint, clock, or attached animations changed.
pub const PAINT: Channel = Channel::new(1);

/// Shape content or frame changed.
pub const CONTENT: Channel = Channel::new(2);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(3);
