// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree walks: sibling iteration, clock chains, and paint order.
//!
//! Paint order is depth-first pre-order over every root, children in sibling
//! order. Clock composition walks the other way, from a layer up to its root.

use alloc::vec::Vec;

use super::id::{LayerId, NO_LAYER};
use super::store::LayerStore;

/// An iterator over the direct children of a layer, back to front.
///
/// Created by [`LayerStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a LayerStore,
    next: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a LayerStore, first: u32) -> Self {
        Self { store, next: first }
    }
}

impl Iterator for Children<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        let idx = self.next;
        if idx == NO_LAYER {
            return None;
        }
        self.next = self.store.next_sibling[idx as usize];
        Some(self.store.handle_at(idx))
    }
}

/// Raw slot indices from a layer up to its root, the layer itself first.
#[derive(Debug)]
pub(crate) struct ClockChain<'a> {
    store: &'a LayerStore,
    next: u32,
}

impl Iterator for ClockChain<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let idx = self.next;
        if idx == NO_LAYER {
            return None;
        }
        self.next = self.store.parent[idx as usize];
        Some(idx)
    }
}

impl LayerStore {
    /// Returns the current paint order of all live layers (depth-first
    /// pre-order, back to front).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    pub(crate) fn handle_at(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    pub(crate) fn clock_chain(&self, idx: u32) -> ClockChain<'_> {
        ClockChain { store: self, next: idx }
    }

    /// Appends `idx` and its descendants in paint order.
    pub(crate) fn collect_subtree(&self, idx: u32, out: &mut Vec<u32>) {
        let mut pending = alloc::vec![idx];
        while let Some(i) = pending.pop() {
            out.push(i);
            let mark = pending.len();
            let mut child = self.first_child[i as usize];
            while child != NO_LAYER {
                pending.push(child);
                child = self.next_sibling[child as usize];
            }
            // First child must pop first.
            pending[mark..].reverse();
        }
    }

    /// Rebuilds the paint order of every root's subtree.
    pub(crate) fn rebuild_traversal_order(&mut self) {
        let mut order = core::mem::take(&mut self.traversal_order);
        order.clear();
        for idx in 0..self.len {
            if self.parent[idx as usize] == NO_LAYER && !self.free_list.contains(&idx) {
                self.collect_subtree(idx, &mut order);
            }
        }
        self.traversal_order = order;
    }
}
