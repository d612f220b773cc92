// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot plan: an ordered sequence of draw items for one capture.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use overstory_core::view::{Color, ViewId, ViewStore};

/// A single draw command in a snapshot plan.
///
/// Items are produced in back-to-front order, matching the view tree's
/// depth-first pre-order.
#[derive(Clone, Debug)]
pub struct SnapshotItem {
    /// The view this item originates from.
    pub view: ViewId,
    /// Placement in the snapshot root's coordinate space.
    pub rect: Rect,
    /// Background fill, if any.
    pub background: Option<Color>,
    /// Corner radius for the fill and clip.
    pub corner_radius: f64,
    /// Whether descendants are clipped to this item's rect.
    pub clips_bounds: bool,
    /// Opacity accumulated from the snapshot root down to this view.
    pub opacity: f32,
}

/// An ordered list of draw commands for a single subtree capture.
///
/// Rasterizers translate this into pixels; richer backends could translate
/// it into native drawing commands instead.
#[derive(Clone, Debug)]
pub struct SnapshotPlan {
    /// The view the capture is rooted at.
    pub root: ViewId,
    /// Logical size of the capture (the root's bounds size).
    pub size: Size,
    /// Draw items in back-to-front order.
    pub items: Vec<SnapshotItem>,
}

impl SnapshotPlan {
    /// Builds the plan for the subtree rooted at `root`.
    ///
    /// The plan reads local properties only, so it does not require a prior
    /// [`evaluate`](ViewStore::evaluate) call. A hidden view excludes its
    /// whole subtree; a scrollable container shifts its children by its
    /// current offset. Item opacity is accumulated from the root down, with
    /// the root's own opacity included.
    ///
    /// # Panics
    ///
    /// Panics if `root` is stale.
    #[must_use]
    pub fn for_subtree(store: &ViewStore, root: ViewId) -> Self {
        let size = store.bounds(root).size();
        let mut items = Vec::new();
        collect(store, root, Vec2::ZERO, 1.0, &mut items);
        Self { root, size, items }
    }
}

/// Appends the item for `view` (placed at root-local `origin`) and recurses
/// into its children.
fn collect(
    store: &ViewStore,
    view: ViewId,
    origin: Vec2,
    inherited_opacity: f32,
    items: &mut Vec<SnapshotItem>,
) {
    if store.flags(view).hidden {
        return;
    }
    let bounds = store.bounds(view);
    let opacity = inherited_opacity * store.local_opacity(view);
    items.push(SnapshotItem {
        view,
        rect: Rect::from_origin_size(Point::ORIGIN + origin, bounds.size()),
        background: store.background(view),
        corner_radius: store.corner_radius(view),
        clips_bounds: store.clips_bounds(view),
        opacity,
    });

    let scroll = store
        .scroll_state(view)
        .map_or(Vec2::ZERO, |state| state.offset);
    for child in store.children(view) {
        let child_origin = origin + store.bounds(child).origin().to_vec2() - scroll;
        collect(store, child, child_origin, opacity, items);
    }
}
