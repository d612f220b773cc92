// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal: child iteration and subtree predicate scans.

use super::id::{INVALID, ViewId};
use super::scroll::ScrollState;
use super::store::ViewStore;

/// Iterator over the direct children of a view, in sibling order.
///
/// Created by [`ViewStore::children`].
pub struct Children<'a> {
    store: &'a ViewStore,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a ViewStore, first: u32) -> Self {
        Self {
            store,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ViewId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.next_sibling[idx as usize];
        Some(ViewId {
            idx,
            generation: self.store.generation[idx as usize],
        })
    }
}

impl ViewStore {
    /// Returns whether `predicate` holds for any view in the subtree rooted
    /// at `root`, including `root` itself.
    ///
    /// The subtree is visited depth-first in pre-order: a view is tested
    /// before its children, and siblings are visited in insertion order. The
    /// scan stops at the first view for which `predicate` returns `true`;
    /// views after that point are not visited and `predicate` is not called
    /// for them.
    ///
    /// The scan is structural: hidden views and views outside their parent's
    /// clip are visited like any other.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn any_in_subtree<F>(&self, root: ViewId, mut predicate: F) -> bool
    where
        F: FnMut(ViewId) -> bool,
    {
        self.validate(root);
        self.scan_from(root.idx, &mut predicate)
    }

    /// Recursive pre-order scan over raw slot indices.
    fn scan_from<F>(&self, idx: u32, predicate: &mut F) -> bool
    where
        F: FnMut(ViewId) -> bool,
    {
        let id = ViewId {
            idx,
            generation: self.generation[idx as usize],
        };
        if predicate(id) {
            return true;
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.scan_from(child, predicate) {
                return true;
            }
            child = self.next_sibling[child as usize];
        }
        false
    }

    /// Returns whether any scrollable container in the subtree rooted at
    /// `root` is actively scrolling, i.e. being dragged or decelerating.
    ///
    /// Views that are not scrollable containers never match, but their
    /// children are still scanned. A scrollable container at rest (nonzero
    /// offset, no drag, no deceleration) does not match either.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    #[must_use]
    pub fn is_scrolling(&self, root: ViewId) -> bool {
        self.any_in_subtree(root, |id| {
            self.scroll_state(id).is_some_and(ScrollState::active)
        })
    }
}
