// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-container state.
//!
//! A view becomes a scrollable container via
//! [`make_scrollable`](ViewStore::make_scrollable), after which it carries a
//! [`ScrollState`]: a content offset plus the two independent interaction
//! flags the host's gesture handling drives. Overstory records this state and
//! surfaces changes; it performs no gesture recognition and no momentum
//! physics — `dragging`, `decelerating`, and `offset` are inputs, written by
//! the host as the interaction progresses.
//!
//! The content offset shifts the world origins of the container's descendants
//! (not the container itself), so scrolled-away children land where a native
//! scroll view would put them.

use kurbo::{Point, Vec2};

use super::id::ViewId;
use super::store::ViewStore;
use crate::dirty;
use understory_dirty::EagerPolicy;

/// Interaction state of a scrollable container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Content offset applied to descendants.
    pub offset: Vec2,
    /// Whether a drag gesture is currently tracking.
    pub dragging: bool,
    /// Whether the content is still moving under momentum after a drag.
    pub decelerating: bool,
}

impl ScrollState {
    /// Returns whether the container is actively scrolling: either tracking a
    /// drag or decelerating under momentum.
    #[inline]
    #[must_use]
    pub const fn active(self) -> bool {
        self.dragging || self.decelerating
    }
}

impl ViewStore {
    /// Marks a view as a scrollable container with default (inactive) state.
    ///
    /// Has no effect if the view is already scrollable; existing state is
    /// preserved.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn make_scrollable(&mut self, id: ViewId) {
        self.validate(id);
        if self.scroll[id.idx as usize].is_none() {
            self.scroll[id.idx as usize] = Some(ScrollState::default());
            self.dirty.mark(id.idx, dirty::SCROLL);
        }
    }

    /// Returns the scroll state of a view, or `None` if it is not a
    /// scrollable container.
    #[must_use]
    pub fn scroll_state(&self, id: ViewId) -> Option<ScrollState> {
        self.validate(id);
        self.scroll[id.idx as usize]
    }

    /// Returns whether the view is a scrollable container.
    #[must_use]
    pub fn is_scrollable(&self, id: ViewId) -> bool {
        self.validate(id);
        self.scroll[id.idx as usize].is_some()
    }

    /// Records whether a drag gesture is tracking on a scrollable container.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view is not a scrollable
    /// container.
    pub fn set_dragging(&mut self, id: ViewId, dragging: bool) {
        self.validate(id);
        let state = self.scroll[id.idx as usize]
            .as_mut()
            .expect("view is not a scrollable container");
        state.dragging = dragging;
        self.dirty.mark(id.idx, dirty::SCROLL);
    }

    /// Records whether a scrollable container is decelerating under momentum.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view is not a scrollable
    /// container.
    pub fn set_decelerating(&mut self, id: ViewId, decelerating: bool) {
        self.validate(id);
        let state = self.scroll[id.idx as usize]
            .as_mut()
            .expect("view is not a scrollable container");
        state.decelerating = decelerating;
        self.dirty.mark(id.idx, dirty::SCROLL);
    }

    /// Sets the content offset of a scrollable container.
    ///
    /// Marks the SCROLL channel for the container itself and the GEOMETRY
    /// channel with eager propagation, since descendant world origins shift
    /// with the offset.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the view is not a scrollable
    /// container.
    pub fn set_scroll_offset(&mut self, id: ViewId, offset: Vec2) {
        self.validate(id);
        let state = self.scroll[id.idx as usize]
            .as_mut()
            .expect("view is not a scrollable container");
        state.offset = offset;
        self.dirty.mark(id.idx, dirty::SCROLL);
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Returns the content offset that positions a scrolling ancestor one
    /// view-height above this view's local origin: `(0, origin.y − height)`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn scroll_offset_above(&self, id: ViewId) -> Point {
        self.validate(id);
        let bounds = self.bounds[id.idx as usize];
        Point::new(0.0, bounds.origin().y - bounds.height())
    }

    /// Returns the scroll state at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn scroll_state_at(&self, idx: u32) -> Option<ScrollState> {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.scroll[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    #[test]
    fn active_is_drag_or_momentum() {
        let mut state = ScrollState::default();
        assert!(!state.active());
        state.dragging = true;
        assert!(state.active());
        state.dragging = false;
        state.decelerating = true;
        assert!(state.active());
    }

    #[test]
    fn make_scrollable_is_idempotent() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        store.make_scrollable(id);
        store.set_scroll_offset(id, Vec2::new(0.0, 40.0));

        store.make_scrollable(id);
        assert_eq!(
            store.scroll_state(id).unwrap().offset,
            Vec2::new(0.0, 40.0),
            "existing state must survive a repeated make_scrollable"
        );
    }

    #[test]
    fn flag_changes_surface_on_scroll_channel() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        store.make_scrollable(id);
        let _ = store.evaluate();

        store.set_dragging(id, true);
        let changes = store.evaluate();
        assert!(
            changes.scrolls.contains(&id.index()),
            "scroll channel should contain the container"
        );
        assert!(store.scroll_state(id).unwrap().dragging);
    }

    #[test]
    #[should_panic(expected = "view is not a scrollable container")]
    fn set_dragging_on_plain_view_panics() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        store.set_dragging(id, true);
    }

    #[test]
    fn scroll_offset_above_uses_local_origin_and_height() {
        let mut store = ViewStore::new();
        let id = store.create_view();
        store.set_bounds(id, Rect::new(10.0, 300.0, 110.0, 380.0));
        let p = store.scroll_offset_above(id);
        assert_eq!(p, Point::new(0.0, 220.0));
    }
}
