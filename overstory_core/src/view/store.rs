// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays view storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::fade::Fade;
use super::id::{INVALID, ViewId};
use super::pin::EdgePin;
use super::scroll::ScrollState;
use super::style::{Color, DEFAULT_CORNER_RADIUS, Shadow};
use super::traverse::Children;
use crate::dirty;

/// Per-view boolean flags.
///
/// Setting [`hidden`](Self::hidden) suppresses all visual contribution of the
/// view and its entire subtree. Properties can still be mutated while hidden;
/// unhiding restores state immediately without re-evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewFlags {
    /// Whether the view (and its subtree) is hidden.
    pub hidden: bool,
}

/// Struct-of-arrays storage for all views.
///
/// Views are addressed by [`ViewId`] handles. Internally, each view occupies
/// a slot in parallel arrays. Destroyed views are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct ViewStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) bounds: Vec<Rect>,
    pub(crate) local_opacity: Vec<f32>,
    pub(crate) background: Vec<Option<Color>>,
    pub(crate) corner_radius: Vec<f64>,
    pub(crate) clips_bounds: Vec<bool>,
    pub(crate) shadow: Vec<Option<Shadow>>,
    pub(crate) pin: Vec<Option<EdgePin>>,
    pub(crate) scroll: Vec<Option<ScrollState>>,
    pub(crate) flags: Vec<ViewFlags>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_origin: Vec<Point>,
    pub(crate) effective_opacity: Vec<f32>,
    pub(crate) effective_hidden: Vec<bool>,

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

    // -- Animation requests --
    pub(crate) pending_fades: Vec<Fade>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    /// Creates an empty view store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            bounds: Vec::new(),
            local_opacity: Vec::new(),
            background: Vec::new(),
            corner_radius: Vec::new(),
            clips_bounds: Vec::new(),
            shadow: Vec::new(),
            pin: Vec::new(),
            scroll: Vec::new(),
            flags: Vec::new(),
            world_origin: Vec::new(),
            effective_opacity: Vec::new(),
            effective_hidden: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_fades: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new view and returns its handle.
    ///
    /// The view starts with zero bounds, full opacity, no background, square
    /// corners, no clipping, no shadow, no pin, no scroll state, and no
    /// parent.
    pub fn create_view(&mut self) -> ViewId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.bounds[idx as usize] = Rect::ZERO;
            self.local_opacity[idx as usize] = 1.0;
            self.background[idx as usize] = None;
            self.corner_radius[idx as usize] = 0.0;
            self.clips_bounds[idx as usize] = false;
            self.shadow[idx as usize] = None;
            self.pin[idx as usize] = None;
            self.scroll[idx as usize] = None;
            self.flags[idx as usize] = ViewFlags::default();
            self.world_origin[idx as usize] = Point::ORIGIN;
            self.effective_opacity[idx as usize] = 1.0;
            self.effective_hidden[idx as usize] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.bounds.push(Rect::ZERO);
            self.local_opacity.push(1.0);
            self.background.push(None);
            self.corner_radius.push(0.0);
            self.clips_bounds.push(false);
            self.shadow.push(None);
            self.pin.push(None);
            self.scroll.push(None);
            self.flags.push(ViewFlags::default());
            self.world_origin.push(Point::ORIGIN);
            self.effective_opacity.push(1.0);
            self.effective_hidden.push(false);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);

        ViewId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a view, freeing its slot for reuse.
    ///
    /// Pending fade requests for the view are discarded.
    ///
    /// # Panics
    ///
    /// Panics if the view has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy view with children"
        );

        // Remove from parent's child list if attached.
        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Remove dirty tracking dependencies.
        self.dirty.remove_key(idx);

        // A queued fade must not reach presenters for a dead slot.
        self.pending_fades.retain(|fade| fade.view != idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_alive(&self, id: ViewId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// Marks inherited channels for `child`'s subtree so world origins,
    /// effective opacities, and effective hidden state are recomputed under
    /// the new ancestry.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Add dirty dependency edges: child depends on parent for GEOMETRY and OPACITY.
        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `child` from its current parent.
    ///
    /// Marks inherited channels for `child`'s subtree so world origins,
    /// effective opacities, and effective hidden state are recomputed after
    /// detaching from the old ancestry.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view has no parent.
    pub fn remove_from_parent(&mut self, child: ViewId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "view has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);

        // Remove dirty dependency edges.
        self.dirty.remove_dependency(c, p, dirty::GEOMETRY);
        self.dirty.remove_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Moves `child` to be a child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    /// Marks inherited channels for `child`'s subtree so world origins,
    /// effective opacities, and effective hidden state are recomputed under
    /// the new ancestry.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn reparent(&mut self, child: ViewId, new_parent: ViewId) {
        self.validate(child);
        self.validate(new_parent);

        if self.parent[child.idx as usize] != INVALID {
            let old_p = self.parent[child.idx as usize];
            self.unlink_from_parent(child.idx);
            self.dirty
                .remove_dependency(child.idx, old_p, dirty::GEOMETRY);
            self.dirty
                .remove_dependency(child.idx, old_p, dirty::OPACITY);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }

        // Now add as child of new parent (inline the logic to avoid double-validate).
        let p = new_parent.idx;
        let c = child.idx;
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.mark_subtree_inherited_dirty(c);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or
    /// `sibling` has no parent.
    pub fn insert_before(&mut self, child: ViewId, sibling: ViewId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a view, if any.
    #[must_use]
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(ViewId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct children of a view.
    #[must_use]
    pub fn children(&self, id: ViewId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the handles of root views (those with no parent).
    ///
    /// Roots are views whose parent is [`INVALID`] and that are not in the
    /// free list.
    #[must_use]
    pub fn roots(&self) -> Vec<ViewId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(ViewId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        roots
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local bounds of a view (origin relative to its parent).
    #[must_use]
    pub fn bounds(&self, id: ViewId) -> Rect {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the local opacity of a view.
    #[must_use]
    pub fn local_opacity(&self, id: ViewId) -> f32 {
        self.validate(id);
        self.local_opacity[id.idx as usize]
    }

    /// Returns the background color of a view.
    #[must_use]
    pub fn background(&self, id: ViewId) -> Option<Color> {
        self.validate(id);
        self.background[id.idx as usize]
    }

    /// Returns the corner radius of a view.
    #[must_use]
    pub fn corner_radius(&self, id: ViewId) -> f64 {
        self.validate(id);
        self.corner_radius[id.idx as usize]
    }

    /// Returns whether the view clips its content and descendants to its
    /// bounds.
    #[must_use]
    pub fn clips_bounds(&self, id: ViewId) -> bool {
        self.validate(id);
        self.clips_bounds[id.idx as usize]
    }

    /// Returns the shadow of a view, if any.
    #[must_use]
    pub fn shadow(&self, id: ViewId) -> Option<Shadow> {
        self.validate(id);
        self.shadow[id.idx as usize]
    }

    /// Returns the edge pin of a view, if any.
    #[must_use]
    pub fn pin(&self, id: ViewId) -> Option<EdgePin> {
        self.validate(id);
        self.pin[id.idx as usize]
    }

    /// Returns the flags of a view.
    #[must_use]
    pub fn flags(&self, id: ViewId) -> ViewFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether the view is presented (the inverse of its hidden
    /// flag).
    ///
    /// This reads the view's own flag; an ancestor may still hide it. See
    /// [`effective_hidden`](Self::effective_hidden) for the evaluated state.
    #[must_use]
    pub fn is_presented(&self, id: ViewId) -> bool {
        !self.flags(id).hidden
    }

    /// Returns the computed world origin of a view.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_origin(&self, id: ViewId) -> Point {
        self.validate(id);
        self.world_origin[id.idx as usize]
    }

    /// Returns the computed world-space bounds of a view: its world origin
    /// with its local size.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_bounds(&self, id: ViewId) -> Rect {
        self.validate(id);
        let idx = id.idx as usize;
        Rect::from_origin_size(self.world_origin[idx], self.bounds[idx].size())
    }

    /// Returns the computed effective opacity of a view.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_opacity(&self, id: ViewId) -> f32 {
        self.validate(id);
        self.effective_opacity[id.idx as usize]
    }

    /// Returns whether the view is effectively hidden (including by an
    /// ancestor's hidden flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: ViewId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local bounds of a view.
    ///
    /// Marks the GEOMETRY channel dirty with eager propagation to
    /// descendants, which also re-derives any pinned children.
    pub fn set_bounds(&mut self, id: ViewId, bounds: Rect) {
        self.validate(id);
        self.bounds[id.idx as usize] = bounds;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the local opacity of a view, clamped to `[0, 1]`.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to descendants.
    pub fn set_opacity(&mut self, id: ViewId, opacity: f32) {
        self.validate(id);
        self.local_opacity[id.idx as usize] = opacity.clamp(0.0, 1.0);
        self.dirty.mark_with(id.idx, dirty::OPACITY, &EagerPolicy);
    }

    /// Sets the background color of a view.
    pub fn set_background(&mut self, id: ViewId, background: Option<Color>) {
        self.validate(id);
        self.background[id.idx as usize] = background;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    /// Sets the corner radius of a view.
    ///
    /// Rounding only affects drawing when the view also clips to its bounds
    /// or a presenter chooses to honor it on fills; see
    /// [`round_corners`](Self::round_corners) for the conventional pairing.
    pub fn set_corner_radius(&mut self, id: ViewId, radius: f64) {
        self.validate(id);
        self.corner_radius[id.idx as usize] = radius;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    /// Sets whether the view clips its content and descendants to its bounds.
    pub fn set_clips_bounds(&mut self, id: ViewId, clips: bool) {
        self.validate(id);
        self.clips_bounds[id.idx as usize] = clips;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    /// Rounds the view's corners with [`DEFAULT_CORNER_RADIUS`] and enables
    /// clipping to bounds.
    pub fn round_corners(&mut self, id: ViewId) {
        self.set_corner_radius(id, DEFAULT_CORNER_RADIUS);
        self.set_clips_bounds(id, true);
    }

    /// Sets the shadow of a view.
    pub fn set_shadow(&mut self, id: ViewId, shadow: Option<Shadow>) {
        self.validate(id);
        self.shadow[id.idx as usize] = shadow;
        self.dirty.mark(id.idx, dirty::STYLE);
    }

    /// Applies a tight shadow in the given color:
    /// [`Shadow::with_color`] defaults (zero offset, blur radius 2, full
    /// opacity).
    pub fn add_shadow(&mut self, id: ViewId, color: Color) {
        self.set_shadow(id, Some(Shadow::with_color(color)));
    }

    /// Sets or clears the edge pin of a view.
    ///
    /// Marks the GEOMETRY channel dirty with eager propagation so the pinned
    /// bounds are re-derived on the next evaluate.
    pub fn set_pin(&mut self, id: ViewId, pin: Option<EdgePin>) {
        self.validate(id);
        self.pin[id.idx as usize] = pin;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the flags of a view.
    ///
    /// Marks the GEOMETRY channel dirty with eager propagation, since the
    /// hidden flag feeds the effective-hidden recompute for the subtree.
    pub fn set_flags(&mut self, id: ViewId, flags: ViewFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets whether the view is presented (the inverse of its hidden flag).
    pub fn set_presented(&mut self, id: ViewId, presented: bool) {
        self.set_flags(id, ViewFlags { hidden: !presented });
    }

    // -- Raw-index accessors for backends --
    //
    // These accept raw slot indices (as found in `ViewChanges`) rather than
    // `ViewId` handles, skipping generation validation. Only use with indices
    // that came from `ViewChanges` or `traversal_order()`.

    /// Returns the local bounds at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn bounds_at(&self, idx: u32) -> Rect {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.bounds[idx as usize]
    }

    /// Returns the computed world origin at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn world_origin_at(&self, idx: u32) -> Point {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.world_origin[idx as usize]
    }

    /// Returns the computed effective opacity at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_opacity_at(&self, idx: u32) -> f32 {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.effective_opacity[idx as usize]
    }

    /// Returns whether the view at raw slot `idx` is effectively hidden.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.effective_hidden[idx as usize]
    }

    /// Returns the background color at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn background_at(&self, idx: u32) -> Option<Color> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.background[idx as usize]
    }

    /// Returns the corner radius at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn corner_radius_at(&self, idx: u32) -> f64 {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.corner_radius[idx as usize]
    }

    /// Returns whether the view at raw slot `idx` clips to its bounds.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn clips_bounds_at(&self, idx: u32) -> bool {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.clips_bounds[idx as usize]
    }

    /// Returns the shadow at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn shadow_at(&self, idx: u32) -> Option<Shadow> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.shadow[idx as usize]
    }

    /// Returns the flags at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn flags_at(&self, idx: u32) -> ViewFlags {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.flags[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ViewId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    /// Marks the subtree rooted at `idx` dirty for inherited channels.
    ///
    /// `GEOMETRY` also carries effective hidden propagation.
    fn mark_subtree_inherited_dirty(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::GEOMETRY, &EagerPolicy);
        self.dirty.mark_with(idx, dirty::OPACITY, &EagerPolicy);
    }
}
