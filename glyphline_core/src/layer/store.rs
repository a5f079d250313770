// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property management.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::animation::{AnimatedProperty, Animation};
use crate::clock::LayerClock;
use crate::dirty;
use crate::path::OutlinePath;

use super::id::{LayerId, NO_LAYER};
use super::paint::ShapePaint;
use super::traverse::Children;

/// Per-layer boolean flags.
///
/// Setting [`hidden`](Self::hidden) suppresses the layer and its entire
/// subtree. Properties and animations keep updating while hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer (and its subtree) is hidden.
    pub hidden: bool,
}

/// An animation attached to a layer.
#[derive(Clone, Debug)]
pub(crate) struct ActiveAnimation {
    pub(crate) animation: Animation,
    /// Layer-local time the animation started at; `None` until resolved.
    pub(crate) begin: Option<f64>,
}

/// Struct-of-arrays storage for all layers.
///
/// Layers are addressed by [`LayerId`] handles. Each layer occupies a slot in
/// parallel arrays; destroyed layers are recycled via a free list, and
/// generation counters reject stale handles.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Model properties (set by callers) --
    pub(crate) content: Vec<Option<OutlinePath>>,
    pub(crate) paint: Vec<ShapePaint>,
    pub(crate) clock: Vec<LayerClock>,
    pub(crate) flags: Vec<LayerFlags>,
    pub(crate) animations: Vec<Vec<ActiveAnimation>>,

    // -- Presentation properties (written by the driver) --
    pub(crate) presentation: Vec<ShapePaint>,
    pub(crate) effective_hidden: Vec<bool>,
    pub(crate) local_time: Vec<f64>,
    pub(crate) effective_speed: Vec<f64>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,

    /// Root time of the most recent evaluate, in seconds.
    pub(crate) current_time: f64,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            content: Vec::new(),
            paint: Vec::new(),
            clock: Vec::new(),
            flags: Vec::new(),
            animations: Vec::new(),
            presentation: Vec::new(),
            effective_hidden: Vec::new(),
            local_time: Vec::new(),
            effective_speed: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            current_time: 0.0,
        }
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts with no content, default paint, a running clock, no
    /// animations, and no parent.
    pub fn create_layer(&mut self) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = NO_LAYER;
            self.first_child[i] = NO_LAYER;
            self.next_sibling[i] = NO_LAYER;
            self.prev_sibling[i] = NO_LAYER;
            self.content[i] = None;
            self.paint[i] = ShapePaint::default();
            self.clock[i] = LayerClock::RUNNING;
            self.flags[i] = LayerFlags::default();
            self.animations[i].clear();
            self.presentation[i] = ShapePaint::default();
            self.effective_hidden[i] = false;
            self.local_time[i] = 0.0;
            self.effective_speed[i] = 1.0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(NO_LAYER);
            self.first_child.push(NO_LAYER);
            self.next_sibling.push(NO_LAYER);
            self.prev_sibling.push(NO_LAYER);
            self.content.push(None);
            self.paint.push(ShapePaint::default());
            self.clock.push(LayerClock::RUNNING);
            self.flags.push(LayerFlags::default());
            self.animations.push(Vec::new());
            self.presentation.push(ShapePaint::default());
            self.effective_hidden.push(false);
            self.local_time.push(0.0);
            self.effective_speed.push(1.0);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, releasing its content and animations and freeing its
    /// slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == NO_LAYER,
            "cannot destroy layer with children"
        );

        if self.parent[idx as usize] != NO_LAYER {
            self.unlink_from_parent(idx);
        }

        self.dirty.remove_key(idx);
        self.content[idx as usize] = None;
        self.animations[idx as usize].clear();

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live layers.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last (front-most) child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == NO_LAYER,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = NO_LAYER;
        self.next_sibling[c as usize] = NO_LAYER;

        if self.first_child[p as usize] == NO_LAYER {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != NO_LAYER {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        let _ = self.dirty.add_dependency(c, p, dirty::HIDDEN);

        self.dirty.mark_with(c, dirty::HIDDEN, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.refresh_subtree(c);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != NO_LAYER, "layer has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::HIDDEN);

        self.dirty.mark_with(c, dirty::HIDDEN, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        self.refresh_subtree(c);
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != NO_LAYER).then(|| self.handle_at(p))
    }

    /// Returns an iterator over the direct children of a layer.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the shape content of a layer.
    #[must_use]
    pub fn content(&self, id: LayerId) -> Option<&OutlinePath> {
        self.validate(id);
        self.content[id.idx as usize].as_ref()
    }

    /// Returns the model paint of a layer.
    #[must_use]
    pub fn paint(&self, id: LayerId) -> ShapePaint {
        self.validate(id);
        self.paint[id.idx as usize]
    }

    /// Returns the clock of a layer.
    #[must_use]
    pub fn clock(&self, id: LayerId) -> LayerClock {
        self.validate(id);
        self.clock[id.idx as usize]
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the paint as currently presented: the model paint with all
    /// attached animations sampled at the layer's local time.
    #[must_use]
    pub fn presentation(&self, id: LayerId) -> ShapePaint {
        self.validate(id);
        self.presentation[id.idx as usize]
    }

    /// Returns whether the layer is effectively hidden (including by an
    /// ancestor's hidden flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: LayerId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    /// Returns the layer's local time at the most recent evaluate, composed
    /// through all ancestor clocks.
    #[must_use]
    pub fn local_time(&self, id: LayerId) -> f64 {
        self.validate(id);
        self.resolve_time(id.idx, self.current_time).0
    }

    /// Returns the root time of the most recent evaluate, in seconds.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Returns the animation attached for `property`, if any.
    #[must_use]
    pub fn animation(&self, id: LayerId, property: AnimatedProperty) -> Option<&Animation> {
        self.validate(id);
        self.animations[id.idx as usize]
            .iter()
            .find(|a| a.animation.property() == property)
            .map(|a| &a.animation)
    }

    /// Returns the number of animations attached to a layer.
    #[must_use]
    pub fn animation_count(&self, id: LayerId) -> usize {
        self.validate(id);
        self.animations[id.idx as usize].len()
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the shape content of a layer.
    pub fn set_content(&mut self, id: LayerId, content: Option<OutlinePath>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
        self.dirty.mark(id.idx, dirty::CONTENT);
    }

    /// Sets the model paint of a layer.
    pub fn set_paint(&mut self, id: LayerId, paint: ShapePaint) {
        self.validate(id);
        self.paint[id.idx as usize] = paint;
        self.dirty.mark(id.idx, dirty::PAINT);
        self.refresh_presentation(id.idx);
    }

    /// Sets the clock of a layer.
    ///
    /// The presentation of the layer and its subtree is resampled at the
    /// current time right away, so writing the time offset of a paused clock
    /// scrubs without waiting for the next evaluate.
    pub fn set_clock(&mut self, id: LayerId, clock: LayerClock) {
        self.validate(id);
        self.clock[id.idx as usize] = clock;
        self.dirty.mark(id.idx, dirty::PAINT);
        self.refresh_subtree(id.idx);
    }

    /// Sets only the speed of a layer's clock.
    pub fn set_speed(&mut self, id: LayerId, speed: f64) {
        let clock = LayerClock {
            speed,
            ..self.clock(id)
        };
        self.set_clock(id, clock);
    }

    /// Sets only the time offset of a layer's clock.
    pub fn set_time_offset(&mut self, id: LayerId, time_offset: f64) {
        let clock = LayerClock {
            time_offset,
            ..self.clock(id)
        };
        self.set_clock(id, clock);
    }

    /// Sets the flags of a layer.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.dirty.mark_with(id.idx, dirty::HIDDEN, &EagerPolicy);
    }

    // -- Animation API --

    /// Attaches an animation, replacing any animation of the same property.
    ///
    /// If the layer's clock chain is paused, the animation begins at local
    /// time zero, so the paused clock's time offset reads directly as elapsed
    /// time. Otherwise it begins on the next [`evaluate`](Self::evaluate).
    pub fn add_animation(&mut self, id: LayerId, animation: Animation) {
        self.validate(id);
        let idx = id.idx;
        let property = animation.property();
        let (_, speed) = self.resolve_time(idx, self.current_time);
        let begin = (speed == 0.0).then_some(0.0);

        let list = &mut self.animations[idx as usize];
        list.retain(|a| a.animation.property() != property);
        list.push(ActiveAnimation { animation, begin });

        self.dirty.mark(idx, dirty::PAINT);
        self.refresh_presentation(idx);
    }

    /// Removes the animation of `property`, returning whether one was
    /// attached.
    pub fn remove_animation(&mut self, id: LayerId, property: AnimatedProperty) -> bool {
        self.validate(id);
        let list = &mut self.animations[id.idx as usize];
        let before = list.len();
        list.retain(|a| a.animation.property() != property);
        let removed = list.len() != before;
        if removed {
            self.dirty.mark(id.idx, dirty::PAINT);
            self.refresh_presentation(id.idx);
        }
        removed
    }

    /// Removes every animation from a layer. The layer snaps back to its model
    /// paint.
    pub fn remove_all_animations(&mut self, id: LayerId) {
        self.validate(id);
        if self.animations[id.idx as usize].is_empty() {
            return;
        }
        self.animations[id.idx as usize].clear();
        self.dirty.mark(id.idx, dirty::PAINT);
        self.refresh_presentation(id.idx);
    }

    /// Removes every animation from a layer, first committing the currently
    /// presented values into the model paint so nothing visibly changes.
    pub fn freeze_animations(&mut self, id: LayerId) {
        self.validate(id);
        let i = id.idx as usize;
        if self.animations[i].is_empty() {
            return;
        }
        self.paint[i] = self.presentation[i];
        self.animations[i].clear();
        self.dirty.mark(id.idx, dirty::PAINT);
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `LayerId` handles, skipping generation validation.

    /// Returns the shape content at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn content_at(&self, idx: u32) -> Option<&OutlinePath> {
        self.check_slot(idx);
        self.content[idx as usize].as_ref()
    }

    /// Returns the presented paint at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn presentation_at(&self, idx: u32) -> ShapePaint {
        self.check_slot(idx);
        self.presentation[idx as usize]
    }

    /// Returns whether the layer at raw slot `idx` is effectively hidden.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        self.check_slot(idx);
        self.effective_hidden[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != NO_LAYER {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != NO_LAYER {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = NO_LAYER;
        self.prev_sibling[idx as usize] = NO_LAYER;
        self.next_sibling[idx as usize] = NO_LAYER;
    }

    /// Composes clocks from the root down to `idx`, returning the local time
    /// and effective speed at root time `now`.
    pub(crate) fn resolve_time(&self, idx: u32, now: f64) -> (f64, f64) {
        let chain: Vec<u32> = self.clock_chain(idx).collect();
        let mut time = now;
        let mut speed = 1.0;
        for &i in chain.iter().rev() {
            let clock = self.clock[i as usize];
            time = clock.local_time(time);
            speed *= clock.speed;
        }
        (time, speed)
    }

    /// Model paint of `idx` with every attached animation sampled at local
    /// time `t`. Unresolved animations sample their start.
    pub(crate) fn sample_paint(&self, idx: u32, t: f64) -> ShapePaint {
        let mut paint = self.paint[idx as usize];
        for active in &self.animations[idx as usize] {
            let elapsed = active.begin.map_or(0.0, |begin| t - begin);
            paint.set(
                active.animation.property(),
                active.animation.sample(elapsed),
            );
        }
        paint
    }

    fn refresh_presentation(&mut self, idx: u32) {
        let (t, _) = self.resolve_time(idx, self.current_time);
        self.presentation[idx as usize] = self.sample_paint(idx, t);
    }

    fn refresh_subtree(&mut self, idx: u32) {
        let mut subtree = Vec::new();
        self.collect_subtree(idx, &mut subtree);
        for i in subtree {
            self.refresh_presentation(i);
        }
    }
}
