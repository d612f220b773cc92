// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory node management.
//!
//! Translates [`ViewStore`] state into a set of plain mirror nodes by
//! applying incremental updates from [`ViewChanges`].
//!
//! [`ViewStore`]: overstory_core::view::ViewStore
//! [`ViewChanges`]: overstory_core::view::ViewChanges

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use overstory_core::backend::Presenter;
use overstory_core::view::{Color, Fade, Shadow, ViewChanges, ViewStore};

/// The mirrored state of one view, as a presenter sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftNode {
    /// World-space origin.
    pub origin: Point,
    /// Size in logical units.
    pub size: Size,
    /// Effective opacity.
    pub opacity: f32,
    /// Whether the node is shown (false once effectively hidden).
    pub visible: bool,
    /// Background fill.
    pub background: Option<Color>,
    /// Corner radius.
    pub corner_radius: f64,
    /// Whether content is clipped to bounds.
    pub clips_bounds: bool,
    /// Drop shadow.
    pub shadow: Option<Shadow>,
    /// Current scroll offset (zero for non-scrollable views).
    pub scroll_offset: Vec2,
    /// Whether the view is being dragged or decelerating.
    pub scrolling: bool,
}

impl Default for SoftNode {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            size: Size::ZERO,
            opacity: 1.0,
            visible: true,
            background: None,
            corner_radius: 0.0,
            clips_bounds: false,
            shadow: None,
            scroll_offset: Vec2::ZERO,
            scrolling: false,
        }
    }
}

/// Maps a [`ViewStore`] to in-memory [`SoftNode`]s, applying incremental
/// updates from [`ViewChanges`].
///
/// This is the reference presenter: it has no platform dependencies, so it
/// doubles as the test mirror for update-cycle plumbing. Call
/// [`apply`](Self::apply) after each evaluate with the latest `ViewChanges`
/// to synchronize the nodes with the store.
///
/// Fade requests are recorded in an ordered log (the soft backend has no
/// animation clock); read it with [`fades`](Self::fades) and drain it with
/// [`clear_fades`](Self::clear_fades).
#[derive(Debug, Default)]
pub struct SoftPresenter {
    nodes: Vec<Option<SoftNode>>,
    order: Vec<u32>,
    fades: Vec<Fade>,
}

impl SoftPresenter {
    /// Creates an empty presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mirror node for the given slot index, if it exists.
    #[must_use]
    pub fn node(&self, idx: u32) -> Option<&SoftNode> {
        self.nodes.get(idx as usize).and_then(|slot| slot.as_ref())
    }

    /// Returns the current paint order (slot indices, back to front).
    #[must_use]
    pub fn paint_order(&self) -> &[u32] {
        &self.order
    }

    /// Returns the fade requests received so far, in request order.
    #[must_use]
    pub fn fades(&self) -> &[Fade] {
        &self.fades
    }

    /// Empties the fade log.
    pub fn clear_fades(&mut self) {
        self.fades.clear();
    }

    /// Takes a node out of the slot, leaving `None`.
    fn take_node(&mut self, idx: u32) -> Option<SoftNode> {
        self.nodes.get_mut(idx as usize)?.take()
    }

    /// Stores a node at the given slot index, growing the vec if needed.
    fn put_node(&mut self, idx: u32, node: SoftNode) {
        let slot = idx as usize;
        if self.nodes.len() <= slot {
            self.nodes.resize_with(slot + 1, || None);
        }
        self.nodes[slot] = Some(node);
    }

    /// Mutable access to a live node.
    fn node_mut(&mut self, idx: u32) -> Option<&mut SoftNode> {
        self.nodes.get_mut(idx as usize)?.as_mut()
    }
}

impl Presenter for SoftPresenter {
    /// Applies incremental changes from a [`ViewChanges`] to the mirror.
    fn apply(&mut self, store: &ViewStore, changes: &ViewChanges) {
        // 1. Removals
        for &idx in &changes.removed {
            let _ = self.take_node(idx);
        }

        // 2. Additions
        for &idx in &changes.added {
            let node = SoftNode {
                visible: !store.effective_hidden_at(idx),
                ..SoftNode::default()
            };
            self.put_node(idx, node);
        }

        // 3. Geometry
        for &idx in &changes.geometry {
            let origin = store.world_origin_at(idx);
            let size = store.bounds_at(idx).size();
            if let Some(node) = self.node_mut(idx) {
                node.origin = origin;
                node.size = size;
            }
        }

        // 4. Opacities
        for &idx in &changes.opacities {
            let opacity = store.effective_opacity_at(idx);
            if let Some(node) = self.node_mut(idx) {
                node.opacity = opacity;
            }
        }

        // 5. Hidden/unhidden
        for &idx in &changes.hidden {
            if let Some(node) = self.node_mut(idx) {
                node.visible = false;
            }
        }
        for &idx in &changes.unhidden {
            if let Some(node) = self.node_mut(idx) {
                node.visible = true;
            }
        }

        // 6. Styles
        for &idx in &changes.styles {
            let background = store.background_at(idx);
            let corner_radius = store.corner_radius_at(idx);
            let clips_bounds = store.clips_bounds_at(idx);
            let shadow = store.shadow_at(idx);
            if let Some(node) = self.node_mut(idx) {
                node.background = background;
                node.corner_radius = corner_radius;
                node.clips_bounds = clips_bounds;
                node.shadow = shadow;
            }
        }

        // 7. Scrolls
        for &idx in &changes.scrolls {
            let state = store.scroll_state_at(idx);
            if let Some(node) = self.node_mut(idx) {
                match state {
                    Some(state) => {
                        node.scroll_offset = state.offset;
                        node.scrolling = state.active();
                    }
                    None => {
                        node.scroll_offset = Vec2::ZERO;
                        node.scrolling = false;
                    }
                }
            }
        }

        // 8. Fades
        self.fades.extend(changes.fades.iter().copied());

        // 9. Topology reorder
        if changes.topology_changed {
            self.order.clear();
            self.order.extend_from_slice(store.traversal_order());
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    fn present(store: &mut ViewStore, presenter: &mut SoftPresenter) {
        let changes = store.evaluate();
        presenter.apply(store, &changes);
    }

    #[test]
    fn apply_mirrors_tree_creation() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let parent = store.create_view();
        let child = store.create_view();
        store.add_child(parent, child);
        store.set_bounds(parent, Rect::new(10.0, 20.0, 110.0, 220.0));
        store.set_bounds(child, Rect::new(5.0, 5.0, 45.0, 25.0));
        present(&mut store, &mut presenter);

        let parent_node = presenter.node(parent.index()).unwrap();
        assert_eq!(parent_node.origin, Point::new(10.0, 20.0));
        assert_eq!(parent_node.size, Size::new(100.0, 200.0));

        let child_node = presenter.node(child.index()).unwrap();
        assert_eq!(child_node.origin, Point::new(15.0, 25.0));
        assert_eq!(child_node.size, Size::new(40.0, 20.0));
    }

    #[test]
    fn apply_removes_destroyed_nodes() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let id = store.create_view();
        present(&mut store, &mut presenter);
        assert!(presenter.node(id.index()).is_some());

        store.destroy_view(id);
        present(&mut store, &mut presenter);
        assert!(presenter.node(id.index()).is_none());
    }

    #[test]
    fn hidden_transition_flips_visibility() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let parent = store.create_view();
        let child = store.create_view();
        store.add_child(parent, child);
        present(&mut store, &mut presenter);
        assert!(presenter.node(child.index()).unwrap().visible);

        store.set_presented(parent, false);
        present(&mut store, &mut presenter);
        assert!(!presenter.node(parent.index()).unwrap().visible);
        assert!(!presenter.node(child.index()).unwrap().visible);

        store.set_presented(parent, true);
        present(&mut store, &mut presenter);
        assert!(presenter.node(child.index()).unwrap().visible);
    }

    #[test]
    fn style_changes_are_mirrored() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let id = store.create_view();
        present(&mut store, &mut presenter);

        store.set_background(id, Some(Color::LIGHT_GRAY));
        store.round_corners(id);
        store.add_shadow(id, Color::BLACK);
        present(&mut store, &mut presenter);

        let node = presenter.node(id.index()).unwrap();
        assert_eq!(node.background, Some(Color::LIGHT_GRAY));
        assert_eq!(node.corner_radius, 5.0);
        assert!(node.clips_bounds);
        assert_eq!(node.shadow, Some(Shadow::with_color(Color::BLACK)));
    }

    #[test]
    fn fade_requests_are_logged() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let id = store.create_view();
        present(&mut store, &mut presenter);

        store.fade_out(id);
        present(&mut store, &mut presenter);

        let fades = presenter.fades();
        assert_eq!(fades.len(), 1);
        assert_eq!(fades[0].view, id.index());
        assert_eq!(fades[0].to, 0.0);
        // The model already holds the end state.
        assert_eq!(presenter.node(id.index()).unwrap().opacity, 0.0);

        presenter.clear_fades();
        assert!(presenter.fades().is_empty());
    }

    #[test]
    fn scroll_state_is_mirrored() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let id = store.create_view();
        store.make_scrollable(id);
        present(&mut store, &mut presenter);

        store.set_dragging(id, true);
        store.set_scroll_offset(id, Vec2::new(0.0, 12.0));
        present(&mut store, &mut presenter);

        let node = presenter.node(id.index()).unwrap();
        assert!(node.scrolling);
        assert_eq!(node.scroll_offset, Vec2::new(0.0, 12.0));

        store.set_dragging(id, false);
        present(&mut store, &mut presenter);
        assert!(!presenter.node(id.index()).unwrap().scrolling);
    }

    #[test]
    fn paint_order_follows_traversal() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let a = store.create_view();
        let b = store.create_view();
        let c = store.create_view();
        store.add_child(a, b);
        store.add_child(a, c);
        present(&mut store, &mut presenter);
        assert_eq!(presenter.paint_order(), &[a.index(), b.index(), c.index()]);

        // Moving `b` after `c` reorders the mirror.
        store.remove_from_parent(b);
        store.add_child(a, b);
        present(&mut store, &mut presenter);
        assert_eq!(presenter.paint_order(), &[a.index(), c.index(), b.index()]);
    }

    #[test]
    fn incremental_update_leaves_siblings_untouched() {
        let mut store = ViewStore::new();
        let mut presenter = SoftPresenter::new();

        let root = store.create_view();
        let a = store.create_view();
        let b = store.create_view();
        store.add_child(root, a);
        store.add_child(root, b);
        store.set_bounds(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        store.set_bounds(b, Rect::new(20.0, 0.0, 30.0, 10.0));
        present(&mut store, &mut presenter);

        store.set_bounds(a, Rect::new(5.0, 0.0, 15.0, 10.0));
        let changes = store.evaluate();
        assert!(!changes.geometry.contains(&b.index()));
        presenter.apply(&store, &changes);

        assert_eq!(presenter.node(a.index()).unwrap().origin, Point::new(5.0, 0.0));
        assert_eq!(presenter.node(b.index()).unwrap().origin, Point::new(20.0, 0.0));
    }
}
