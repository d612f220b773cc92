// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge pinning and border insertion.
//!
//! A *pin* derives a view's bounds from its parent: the pinned view hugs one
//! edge of the parent at a fixed thickness. Pins exist for one purpose —
//! border filler views created by [`ViewStore::add_borders`] — and are
//! resolved during [`evaluate`](ViewStore::evaluate), before world origins
//! are computed. This is not a general constraint system.

use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use kurbo::{Rect, Size};

use super::id::ViewId;
use super::store::ViewStore;
use super::style::Color;

/// Border thickness applied when callers have no opinion.
pub const DEFAULT_BORDER_THICKNESS: f64 = 1.0;

/// One edge of a view's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The top edge.
    Top,
    /// The left edge.
    Left,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
}

/// A set of edges, used to request border fillers.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edges(u8);

impl Edges {
    /// The empty set.
    pub const NONE: Self = Self(0);
    /// The top edge.
    pub const TOP: Self = Self(1 << 0);
    /// The left edge.
    pub const LEFT: Self = Self(1 << 1);
    /// The right edge.
    pub const RIGHT: Self = Self(1 << 2);
    /// The bottom edge.
    pub const BOTTOM: Self = Self(1 << 3);
    /// All four edges.
    pub const ALL: Self = Self(0b1111);

    /// Returns whether every edge in `other` is also in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Edges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<Edge> for Edges {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => Self::TOP,
            Edge::Left => Self::LEFT,
            Edge::Right => Self::RIGHT,
            Edge::Bottom => Self::BOTTOM,
        }
    }
}

impl fmt::Debug for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edges(")?;
        let mut first = true;
        for (flag, name) in [
            (Self::TOP, "TOP"),
            (Self::LEFT, "LEFT"),
            (Self::RIGHT, "RIGHT"),
            (Self::BOTTOM, "BOTTOM"),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        write!(f, ")")
    }
}

/// Derived-bounds rule attaching a view to one edge of its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePin {
    /// Which parent edge the view hugs.
    pub edge: Edge,
    /// Extent of the view perpendicular to the edge.
    pub thickness: f64,
}

/// Computes the local bounds of a pinned view from its parent's size.
///
/// Horizontal edges span the parent's width; vertical edges span its height.
pub(crate) fn pinned_bounds(parent_size: Size, pin: EdgePin) -> Rect {
    let (w, h) = (parent_size.width, parent_size.height);
    let t = pin.thickness;
    match pin.edge {
        Edge::Top => Rect::new(0.0, 0.0, w, t),
        Edge::Left => Rect::new(0.0, 0.0, t, h),
        Edge::Right => Rect::new(w - t, 0.0, w, h),
        Edge::Bottom => Rect::new(0.0, h - t, w, h),
    }
}

impl ViewStore {
    /// Creates border filler children pinned to the requested edges of `view`.
    ///
    /// One filler is created per edge present in `edges`, in top, left,
    /// right, bottom order, each with `color` as its background and a pin of
    /// the given `thickness`. Filler bounds are derived on the next
    /// [`evaluate`](Self::evaluate) and re-derived whenever the parent's
    /// bounds change.
    ///
    /// The created handles are returned so callers can restyle the fillers or
    /// remove them later ([`remove_from_parent`](Self::remove_from_parent) +
    /// [`destroy_view`](Self::destroy_view)).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn add_borders(
        &mut self,
        view: ViewId,
        edges: Edges,
        color: Color,
        thickness: f64,
    ) -> Vec<ViewId> {
        self.validate(view);
        let mut fillers = Vec::new();
        for (flag, edge) in [
            (Edges::TOP, Edge::Top),
            (Edges::LEFT, Edge::Left),
            (Edges::RIGHT, Edge::Right),
            (Edges::BOTTOM, Edge::Bottom),
        ] {
            if edges.contains(flag) {
                let filler = self.create_view();
                self.set_background(filler, Some(color));
                self.set_pin(filler, Some(EdgePin { edge, thickness }));
                self.add_child(view, filler);
                fillers.push(filler);
            }
        }
        fillers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_union_and_contains() {
        let e = Edges::TOP | Edges::BOTTOM;
        assert!(e.contains(Edges::TOP));
        assert!(e.contains(Edges::BOTTOM));
        assert!(!e.contains(Edges::LEFT));
        assert!(Edges::ALL.contains(e));
        assert!(Edges::NONE.is_empty());
    }

    #[test]
    fn pinned_bounds_per_edge() {
        let size = Size::new(100.0, 50.0);
        let rect = |edge| pinned_bounds(size, EdgePin { edge, thickness: 2.0 });
        assert_eq!(rect(Edge::Top), Rect::new(0.0, 0.0, 100.0, 2.0));
        assert_eq!(rect(Edge::Left), Rect::new(0.0, 0.0, 2.0, 50.0));
        assert_eq!(rect(Edge::Right), Rect::new(98.0, 0.0, 100.0, 50.0));
        assert_eq!(rect(Edge::Bottom), Rect::new(0.0, 48.0, 100.0, 50.0));
    }

    #[test]
    fn add_borders_creates_fillers_in_order() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        store.set_bounds(view, Rect::new(0.0, 0.0, 100.0, 50.0));

        let fillers = store.add_borders(
            view,
            Edges::ALL,
            Color::LIGHT_GRAY,
            DEFAULT_BORDER_THICKNESS,
        );
        assert_eq!(fillers.len(), 4, "ALL requests four fillers");

        let expected = [Edge::Top, Edge::Left, Edge::Right, Edge::Bottom];
        for (filler, edge) in fillers.iter().zip(expected) {
            let pin = store.pin(*filler).unwrap();
            assert_eq!(pin.edge, edge, "fillers are created top/left/right/bottom");
            assert_eq!(pin.thickness, DEFAULT_BORDER_THICKNESS);
            assert_eq!(store.background(*filler), Some(Color::LIGHT_GRAY));
            assert_eq!(store.parent(*filler), Some(view));
        }

        let kids: Vec<_> = store.children(view).collect();
        assert_eq!(kids, fillers, "fillers appear in sibling order");
    }

    #[test]
    fn add_borders_subset() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        let fillers = store.add_borders(view, Edges::LEFT | Edges::RIGHT, Color::BLACK, 3.0);
        assert_eq!(fillers.len(), 2);
        assert_eq!(store.pin(fillers[0]).unwrap().edge, Edge::Left);
        assert_eq!(store.pin(fillers[1]).unwrap().edge, Edge::Right);
    }

    #[test]
    fn add_borders_none_creates_nothing() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        let fillers = store.add_borders(view, Edges::NONE, Color::BLACK, 1.0);
        assert!(fillers.is_empty());
        assert!(store.children(view).next().is_none());
    }

    #[test]
    fn border_bounds_derive_on_evaluate() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        store.set_bounds(view, Rect::new(0.0, 0.0, 100.0, 50.0));
        let fillers = store.add_borders(view, Edges::TOP | Edges::BOTTOM, Color::BLACK, 2.0);
        let _ = store.evaluate();

        assert_eq!(store.bounds(fillers[0]), Rect::new(0.0, 0.0, 100.0, 2.0));
        assert_eq!(store.bounds(fillers[1]), Rect::new(0.0, 48.0, 100.0, 50.0));
    }

    #[test]
    fn border_bounds_rederive_after_parent_resize() {
        let mut store = ViewStore::new();
        let view = store.create_view();
        store.set_bounds(view, Rect::new(0.0, 0.0, 100.0, 50.0));
        let fillers = store.add_borders(view, Edges::RIGHT, Color::BLACK, 1.0);
        let _ = store.evaluate();
        assert_eq!(store.bounds(fillers[0]), Rect::new(99.0, 0.0, 100.0, 50.0));

        store.set_bounds(view, Rect::new(0.0, 0.0, 200.0, 50.0));
        let changes = store.evaluate();
        assert!(
            changes.geometry.contains(&fillers[0].index()),
            "pinned filler must be re-derived when the parent resizes"
        );
        assert_eq!(store.bounds(fillers[0]), Rect::new(199.0, 0.0, 200.0, 50.0));
    }
}
