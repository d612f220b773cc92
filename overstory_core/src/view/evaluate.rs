// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern for each dirty channel:
//!
//! 1. **GEOMETRY** — Drain dirty indices in parent-before-child order. For
//!    each view: re-derive pinned bounds from the parent's current size,
//!    recompute `world_origin` as
//!    `parent_world + local_origin - parent_scroll_offset`, and
//!    `effective_hidden` as `parent_effective_hidden || flags.hidden`.
//! 2. **OPACITY** — Drain dirty indices, recompute each view's
//!    `effective_opacity` as `parent_effective * local_opacity`.
//! 3. **STYLE** / **SCROLL** — Drain dirty indices (no recomputation;
//!    presenters read the current values directly from the store).
//! 4. **TOPOLOGY** — Drain and discard (the traversal order was already
//!    rebuilt at the start of evaluation if needed).
//!
//! Queued fade requests are moved into [`ViewChanges::fades`] in request
//! order.
//!
//! [`ViewChanges`] uses raw slot indices (`u32`) rather than [`ViewId`]
//! handles so that presenters can index directly into the store's SoA arrays
//! via the `*_at()` accessors (e.g.
//! [`world_origin_at`](super::ViewStore::world_origin_at)) without paying for
//! generation checks on every access.
//!
//! [`ViewId`]: super::ViewId

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use super::fade::Fade;
use super::id::INVALID;
use super::pin::pinned_bounds;
use super::store::ViewStore;
use crate::dirty;

/// The set of changes produced by a single [`ViewStore::evaluate`] call.
///
/// Each index field contains the raw slot indices of views that changed in
/// the corresponding category. Presenters use these to apply incremental
/// updates.
#[derive(Clone, Debug, Default)]
pub struct ViewChanges {
    /// Views whose bounds, world origin, or pin placement was recomputed.
    pub geometry: Vec<u32>,
    /// Views whose effective opacity was recomputed.
    pub opacities: Vec<u32>,
    /// Views whose background, corner radius, clipping, or shadow changed.
    pub styles: Vec<u32>,
    /// Views whose scroll state changed.
    pub scrolls: Vec<u32>,
    /// Views that transitioned from visible to effectively hidden.
    pub hidden: Vec<u32>,
    /// Views that transitioned from effectively hidden to visible.
    pub unhidden: Vec<u32>,
    /// Views added since the last evaluate.
    pub added: Vec<u32>,
    /// Views removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Fade animations requested since the last evaluate, in request order.
    pub fades: Vec<Fade>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl ViewChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.opacities.clear();
        self.styles.clear();
        self.scrolls.clear();
        self.hidden.clear();
        self.unhidden.clear();
        self.added.clear();
        self.removed.clear();
        self.fades.clear();
        self.topology_changed = false;
    }
}

impl ViewStore {
    /// Evaluates the view tree, recomputing dirty properties and returning
    /// the set of changes.
    ///
    /// This rebuilds the traversal order if topology changed, then drains
    /// each dirty channel: pinned bounds and world origins are re-derived in
    /// parent-before-child order, effective opacities are recomputed, and
    /// queued fade requests are surfaced.
    pub fn evaluate(&mut self) -> ViewChanges {
        let mut changes = ViewChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut ViewChanges) {
        changes.clear();

        // Rebuild traversal order if needed.
        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        // Drain GEOMETRY channel — collect dirty indices, then recompute.
        let dirty_geometry: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_geometry {
            let parent_idx = self.parent[idx as usize];

            // Re-derive pinned bounds from the parent's current size. The
            // parent-before-child drain order guarantees the parent's own
            // bounds are final by the time a pinned child is processed.
            if parent_idx != INVALID
                && let Some(pin) = self.pin[idx as usize]
            {
                self.bounds[idx as usize] =
                    pinned_bounds(self.bounds[parent_idx as usize].size(), pin);
            }

            // World origin: parent world + local origin, shifted by the
            // parent's scroll offset. A container's own origin is unaffected
            // by its own offset.
            let (parent_world, parent_scroll) = if parent_idx != INVALID {
                (
                    self.world_origin[parent_idx as usize],
                    self.scroll[parent_idx as usize].map_or(Vec2::ZERO, |s| s.offset),
                )
            } else {
                (Point::ORIGIN, Vec2::ZERO)
            };
            self.world_origin[idx as usize] =
                parent_world + self.bounds[idx as usize].origin().to_vec2() - parent_scroll;

            // Compute effective hidden: parent_effective_hidden || self.flags.hidden
            let parent_hidden = if parent_idx != INVALID {
                self.effective_hidden[parent_idx as usize]
            } else {
                false
            };
            let new_hidden = parent_hidden || self.flags[idx as usize].hidden;
            let old_hidden = self.effective_hidden[idx as usize];
            if new_hidden != old_hidden {
                if new_hidden {
                    changes.hidden.push(idx);
                } else {
                    changes.unhidden.push(idx);
                }
                self.effective_hidden[idx as usize] = new_hidden;
            }
        }
        changes.geometry = dirty_geometry;

        // Drain OPACITY channel.
        let dirty_opacities: Vec<u32> = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_opacities {
            let parent_opacity = if self.parent[idx as usize] != INVALID {
                self.effective_opacity[self.parent[idx as usize] as usize]
            } else {
                1.0
            };
            self.effective_opacity[idx as usize] =
                parent_opacity * self.local_opacity[idx as usize];
        }
        changes.opacities = dirty_opacities;

        // Drain STYLE channel — no recomputation, just collect.
        changes.styles = self
            .dirty
            .drain(dirty::STYLE)
            .deterministic()
            .run()
            .collect();

        // Drain SCROLL channel.
        changes.scrolls = self
            .dirty
            .drain(dirty::SCROLL)
            .deterministic()
            .run()
            .collect();

        // Drain TOPOLOGY channel (just consume, changes are structural).
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists and queued fades.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        core::mem::swap(&mut self.pending_fades, &mut changes.fades);
    }

    /// Returns the current traversal order (depth-first pre-order).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once (or if the traversal has been manually rebuilt).
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    /// Rebuilds the depth-first pre-order traversal of all live views.
    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        // Start from roots.
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
    }

    /// Depth-first pre-order collection starting from `idx`.
    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
