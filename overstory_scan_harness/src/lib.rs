// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable scan probes and tree fixtures for overstory tests and demos.
//!
//! [`ScanProbe`] wraps [`ViewStore::any_in_subtree`] and records which views
//! the predicate was evaluated for, in order. Tests use it to pin down the
//! traversal contract (pre-order, short-circuit on first match); demos use it
//! to report scan statistics through the trace pipeline via
//! [`ScanProbe::event`].
//!
//! [`ScrollScenario`] is the canonical fixture tree: a root with a header
//! subtree, a scrollable feed, and a footer, with realistic bounds and
//! backgrounds so the same fixture also serves snapshot and presenter tests.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use overstory_core::trace::ScanEvent;
use overstory_core::view::{Color, INVALID, ScrollState, ViewId, ViewStore};

/// Records predicate evaluations made during a subtree scan.
///
/// A probe is reusable; each [`run`](Self::run) clears the previous recording.
#[derive(Debug)]
pub struct ScanProbe {
    visits: Vec<ViewId>,
    root: u32,
    matched: bool,
}

impl ScanProbe {
    /// Creates an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self {
            visits: Vec::new(),
            root: INVALID,
            matched: false,
        }
    }

    /// Scans the subtree rooted at `root`, recording every view the
    /// predicate is evaluated for. Returns the scan result.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn run<F>(&mut self, store: &ViewStore, root: ViewId, mut predicate: F) -> bool
    where
        F: FnMut(ViewId) -> bool,
    {
        self.visits.clear();
        let visits = &mut self.visits;
        let matched = store.any_in_subtree(root, |id| {
            visits.push(id);
            predicate(id)
        });
        self.root = root.index();
        self.matched = matched;
        matched
    }

    /// Runs the active-scroll predicate, recording visits.
    ///
    /// Equivalent to [`ViewStore::is_scrolling`] with recording.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    pub fn run_is_scrolling(&mut self, store: &ViewStore, root: ViewId) -> bool {
        self.run(store, root, |id| {
            store.scroll_state(id).is_some_and(ScrollState::active)
        })
    }

    /// The views the predicate was evaluated for, in evaluation order.
    #[must_use]
    pub fn visits(&self) -> &[ViewId] {
        &self.visits
    }

    /// How many predicate evaluations the last run performed.
    #[must_use]
    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// How many times the last run evaluated the predicate for `id`.
    #[must_use]
    pub fn count_for(&self, id: ViewId) -> usize {
        self.visits.iter().filter(|v| **v == id).count()
    }

    /// Whether the last run matched.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Describes the most recent run as a trace event.
    #[must_use]
    pub fn event(&self) -> ScanEvent {
        ScanEvent {
            root: self.root,
            visited: self.visits.len() as u64,
            matched: self.matched,
        }
    }
}

impl Default for ScanProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical fixture tree.
///
/// ```text
/// root (320x480)
/// ├── header (320x64)
/// │   └── title (200x24)
/// ├── feed (320x416, scrollable, idle)
/// └── footer (320x44)
/// ```
///
/// The feed is scrollable but starts idle; activate it with
/// `store.set_dragging(feed, true)` or similar. Sibling order is header,
/// feed, footer, so a scan that matches the feed must never reach the
/// footer.
#[derive(Debug)]
pub struct ScrollScenario {
    /// The store holding the fixture tree.
    pub store: ViewStore,
    /// Tree root.
    pub root: ViewId,
    /// First child of the root.
    pub header: ViewId,
    /// Sole child of the header.
    pub title: ViewId,
    /// Second child of the root; the scrollable container.
    pub feed: ViewId,
    /// Third child of the root.
    pub footer: ViewId,
}

impl ScrollScenario {
    /// Builds the fixture.
    #[must_use]
    pub fn new() -> Self {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let header = store.create_view();
        let title = store.create_view();
        let feed = store.create_view();
        let footer = store.create_view();

        store.add_child(root, header);
        store.add_child(header, title);
        store.add_child(root, feed);
        store.add_child(root, footer);

        store.set_bounds(root, Rect::new(0.0, 0.0, 320.0, 480.0));
        store.set_bounds(header, Rect::new(0.0, 0.0, 320.0, 64.0));
        store.set_bounds(title, Rect::new(16.0, 20.0, 216.0, 44.0));
        store.set_bounds(feed, Rect::new(0.0, 64.0, 320.0, 480.0));
        store.set_bounds(footer, Rect::new(0.0, 436.0, 320.0, 480.0));

        store.set_background(root, Some(Color::WHITE));
        store.set_background(header, Some(Color::LIGHT_GRAY));
        store.set_background(footer, Some(Color::LIGHT_GRAY));

        store.make_scrollable(feed);

        Self {
            store,
            root,
            header,
            title,
            feed,
            footer,
        }
    }
}

impl Default for ScrollScenario {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a linear chain of `depth` views, each the sole child of the
/// previous. Returns the store and the views from root to leaf.
///
/// Every view gets a 100x100 frame offset by (10, 10) from its parent, so
/// evaluated world origins are distinct.
///
/// # Panics
///
/// Panics if `depth` is zero.
#[must_use]
pub fn chain(depth: usize) -> (ViewStore, Vec<ViewId>) {
    assert!(depth > 0, "a chain needs at least one view");
    let mut store = ViewStore::new();
    let mut views = Vec::with_capacity(depth);
    for i in 0..depth {
        let view = store.create_view();
        let origin = if i == 0 { 0.0 } else { 10.0 };
        store.set_bounds(view, Rect::new(origin, origin, origin + 100.0, origin + 100.0));
        if let Some(&parent) = views.last() {
            store.add_child(parent, view);
        }
        views.push(view);
    }
    (store, views)
}
