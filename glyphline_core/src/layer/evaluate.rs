// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame evaluation: the animation driver.
//!
//! Each [`LayerStore::evaluate`] call runs these steps:
//!
//! 1. **TOPOLOGY**: rebuild the depth-first traversal order if the tree
//!    changed.
//! 2. **HIDDEN**: drain dirty indices and recompute `effective_hidden` as
//!    `parent_effective_hidden || flags.hidden`.
//! 3. **Clocks and animations**: in parent-before-child order, compose each
//!    layer's local time from its parent's, resolve the begin time of newly
//!    attached animations, retire animations that ran to completion on a
//!    running clock, and resample the presentation paint.
//! 4. **PAINT** / **CONTENT**: drain dirty indices (no recomputation;
//!    presenters read current values from the store).
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`LayerId`]
//! handles so that presenters can read the store through the `*_at()`
//! accessors without generation checks.
//!
//! [`LayerId`]: super::LayerId

use alloc::vec::Vec;

use super::id::NO_LAYER;
use super::store::LayerStore;
use crate::animation::AnimatedProperty;
use crate::dirty;

/// An animation that ran to completion during an evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinishedAnimation {
    /// Raw slot index of the layer the animation was attached to.
    pub layer: u32,
    /// The property it animated.
    pub property: AnimatedProperty,
}

/// The set of changes produced by a single [`LayerStore::evaluate`] call.
///
/// Index fields contain raw slot indices of layers that changed in the
/// corresponding category.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers whose model paint, clock, or animation set changed.
    pub paint: Vec<u32>,
    /// Layers whose presented paint changed because an animation advanced or
    /// finished.
    pub animated: Vec<u32>,
    /// Layers whose shape content changed.
    pub content: Vec<u32>,
    /// Layers that transitioned from visible to effectively hidden.
    pub hidden: Vec<u32>,
    /// Layers that transitioned from effectively hidden to visible.
    pub unhidden: Vec<u32>,
    /// Layers added since the last evaluate.
    pub added: Vec<u32>,
    /// Layers removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Animations that completed and were removed.
    pub finished: Vec<FinishedAnimation>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.paint.clear();
        self.animated.clear();
        self.content.clear();
        self.hidden.clear();
        self.unhidden.clear();
        self.added.clear();
        self.removed.clear();
        self.finished.clear();
        self.topology_changed = false;
    }

    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paint.is_empty()
            && self.animated.is_empty()
            && self.content.is_empty()
            && self.hidden.is_empty()
            && self.unhidden.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && self.finished.is_empty()
            && !self.topology_changed
    }
}

impl LayerStore {
    /// Evaluates the layer tree at root time `now` (seconds) and returns the
    /// set of changes.
    pub fn evaluate(&mut self, now: f64) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(now, &mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, now: f64, changes: &mut FrameChanges) {
        changes.clear();
        self.current_time = now;

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let dirty_hidden: Vec<u32> = self
            .dirty
            .drain(dirty::HIDDEN)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_hidden {
            let parent_idx = self.parent[idx as usize];
            let parent_hidden = parent_idx != NO_LAYER && self.effective_hidden[parent_idx as usize];
            let new_hidden = parent_hidden || self.flags[idx as usize].hidden;
            if new_hidden != self.effective_hidden[idx as usize] {
                if new_hidden {
                    changes.hidden.push(idx);
                } else {
                    changes.unhidden.push(idx);
                }
                self.effective_hidden[idx as usize] = new_hidden;
            }
        }

        let order = core::mem::take(&mut self.traversal_order);
        for &idx in &order {
            self.advance_layer(idx, now, changes);
        }
        self.traversal_order = order;

        changes.paint = self
            .dirty
            .drain(dirty::PAINT)
            .deterministic()
            .run()
            .collect();

        changes.content = self
            .dirty
            .drain(dirty::CONTENT)
            .deterministic()
            .run()
            .collect();

        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Composes the clock of `idx` with its parent's and drives its
    /// animations. Parents must be advanced first.
    fn advance_layer(&mut self, idx: u32, now: f64, changes: &mut FrameChanges) {
        let i = idx as usize;
        let parent_idx = self.parent[i];
        let (parent_time, parent_speed) = if parent_idx != NO_LAYER {
            (
                self.local_time[parent_idx as usize],
                self.effective_speed[parent_idx as usize],
            )
        } else {
            (now, 1.0)
        };
        let clock = self.clock[i];
        let t = clock.local_time(parent_time);
        let speed = parent_speed * clock.speed;
        self.local_time[i] = t;
        self.effective_speed[i] = speed;

        if self.animations[i].is_empty() {
            return;
        }

        let running = speed != 0.0;
        self.animations[i].retain_mut(|active| {
            let begin = *active.begin.get_or_insert(t);
            let done = running && t - begin >= active.animation.duration();
            if done {
                changes.finished.push(FinishedAnimation {
                    layer: idx,
                    property: active.animation.property(),
                });
            }
            !done
        });

        let before = self.presentation[i];
        let after = self.sample_paint(idx, t);
        self.presentation[i] = after;
        if after != before {
            changes.animated.push(idx);
        }
    }
}
