// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software rasterization of snapshot plans.

use kurbo::{Point, Rect, RoundedRect, Shape as _};
use overstory_core::view::Color;
use overstory_raster::{Bitmap, Rasterizer, SnapshotPlan};

/// CPU rasterizer for [`SnapshotPlan`]s.
///
/// Draws item backgrounds back to front with source-over blending, honoring
/// per-item corner radii via pixel-center containment tests. Descendant
/// clipping and shadows are not drawn; this rasterizer exists for tests,
/// debugging, and headless capture, not visual fidelity.
#[derive(Clone, Copy, Debug)]
pub struct SoftRasterizer {
    scale: f64,
}

impl SoftRasterizer {
    /// Creates a rasterizer producing `scale` pixels per logical unit.
    ///
    /// # Panics
    ///
    /// Panics if `scale` is not strictly positive.
    #[must_use]
    pub fn new(scale: f64) -> Self {
        assert!(scale > 0.0, "scale must be positive, got {scale}");
        Self { scale }
    }

    /// Returns the logical-to-pixel scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Rasterizer for SoftRasterizer {
    fn rasterize(&mut self, plan: &SnapshotPlan) -> Bitmap {
        let mut bitmap = Bitmap::with_logical_size(plan.size, self.scale);
        for item in &plan.items {
            let Some(color) = item.background else {
                continue;
            };
            if item.opacity <= 0.0 {
                continue;
            }
            fill(
                &mut bitmap,
                item.rect,
                item.corner_radius,
                color.with_alpha_scaled(item.opacity),
                self.scale,
            );
        }
        bitmap
    }
}

/// Fills `rect` (logical units) with `color`, rounding corners when
/// `corner_radius` is positive.
fn fill(bitmap: &mut Bitmap, rect: Rect, corner_radius: f64, color: Color, scale: f64) {
    let x0 = (rect.x0 * scale).floor().max(0.0);
    let y0 = (rect.y0 * scale).floor().max(0.0);
    let x1 = (rect.x1 * scale).ceil().min(f64::from(bitmap.width));
    let y1 = (rect.y1 * scale).ceil().min(f64::from(bitmap.height));
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to the pixel grid before the cast"
    )]
    let (px0, py0, px1, py1) = (x0 as u32, y0 as u32, x1 as u32, y1 as u32);

    let rounded = (corner_radius > 0.0).then(|| RoundedRect::from_rect(rect, corner_radius));
    for py in py0..py1 {
        for px in px0..px1 {
            let center = Point::new(
                (f64::from(px) + 0.5) / scale,
                (f64::from(py) + 0.5) / scale,
            );
            let inside = match &rounded {
                Some(shape) => shape.contains(center),
                None => rect.contains(center),
            };
            if inside {
                blend_pixel(bitmap, px, py, color);
            }
        }
    }
}

/// Source-over blend of a straight-alpha color onto one pixel.
fn blend_pixel(bitmap: &mut Bitmap, x: u32, y: u32, src: Color) {
    let dst = bitmap.pixel(x, y);
    let da = f32::from(dst[3]) / 255.0;
    let sa = src.a.clamp(0.0, 1.0);
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        bitmap.set_pixel(x, y, [0, 0, 0, 0]);
        return;
    }

    let channel = |s: f32, d: u8| -> u8 {
        let d = f32::from(d) / 255.0;
        let out = (s * sa + d * da * (1.0 - sa)) / out_a;
        byte(out)
    };
    bitmap.set_pixel(
        x,
        y,
        [
            channel(src.r, dst[0]),
            channel(src.g, dst[1]),
            channel(src.b, dst[2]),
            byte(out_a),
        ],
    );
}

fn byte(v: f32) -> u8 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to [0, 255.5) before the cast"
    )]
    let b = (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    b
}

#[cfg(test)]
mod tests {
    use overstory_core::trace::Tracer;
    use overstory_core::view::{ViewId, ViewStore};
    use overstory_raster::snapshot;

    use super::*;

    fn colored_root(store: &mut ViewStore, width: f64, height: f64, color: Color) -> ViewId {
        let root = store.create_view();
        store.set_bounds(root, Rect::new(0.0, 0.0, width, height));
        store.set_background(root, Some(color));
        root
    }

    #[test]
    fn rasterize_fills_background() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 4.0, 4.0, Color::WHITE);

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        assert_eq!(bitmap.width, 4);
        assert_eq!(bitmap.height, 4);
        assert_eq!(bitmap.pixel(2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn child_draws_over_parent() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 8.0, 8.0, Color::WHITE);
        let child = store.create_view();
        store.add_child(root, child);
        store.set_bounds(child, Rect::new(2.0, 2.0, 6.0, 6.0));
        store.set_background(child, Some(Color::BLACK));

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        assert_eq!(bitmap.pixel(4, 4), [0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn rounded_corners_leave_pixel_corners_unfilled() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 10.0, 10.0, Color::BLACK);
        store.round_corners(root);

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        // (0.5, 0.5) lies outside a radius-5 corner arc centered at (5, 5).
        assert_eq!(bitmap.pixel(0, 0)[3], 0);
        // Edge midpoints and the center are inside.
        assert_eq!(bitmap.pixel(5, 0)[3], 255);
        assert_eq!(bitmap.pixel(0, 5)[3], 255);
        assert_eq!(bitmap.pixel(5, 5)[3], 255);
    }

    #[test]
    fn item_opacity_scales_alpha() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 2.0, 2.0, Color::BLACK);
        store.set_opacity(root, 0.5);

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        assert_eq!(bitmap.pixel(1, 1), [0, 0, 0, 128]);
    }

    #[test]
    fn translucent_white_over_black_blends() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 2.0, 2.0, Color::BLACK);
        let veil = store.create_view();
        store.add_child(root, veil);
        store.set_bounds(veil, Rect::new(0.0, 0.0, 2.0, 2.0));
        store.set_background(veil, Some(Color::WHITE));
        store.set_opacity(veil, 0.5);

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        assert_eq!(bitmap.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn scale_multiplies_pixel_density() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 3.0, 3.0, Color::WHITE);

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(2.0).rasterize(&plan);
        assert_eq!(bitmap.width, 6);
        assert_eq!(bitmap.height, 6);
        assert_eq!(bitmap.scale, 2.0);
        assert_eq!(bitmap.pixel(5, 5), [255, 255, 255, 255]);
    }

    #[test]
    fn views_without_background_draw_nothing() {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_bounds(root, Rect::new(0.0, 0.0, 4.0, 4.0));

        let plan = SnapshotPlan::for_subtree(&store, root);
        let bitmap = SoftRasterizer::new(1.0).rasterize(&plan);
        assert_eq!(bitmap.pixel(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn snapshot_end_to_end_with_crop() {
        let mut store = ViewStore::new();
        let root = colored_root(&mut store, 8.0, 8.0, Color::WHITE);
        let child = store.create_view();
        store.add_child(root, child);
        store.set_bounds(child, Rect::new(2.0, 2.0, 6.0, 6.0));
        store.set_background(child, Some(Color::BLACK));

        let mut rasterizer = SoftRasterizer::new(1.0);
        let bitmap = snapshot(
            &store,
            root,
            Some(Rect::new(2.0, 2.0, 6.0, 6.0)),
            &mut rasterizer,
            &mut Tracer::none(),
        )
        .unwrap();

        assert_eq!(bitmap.width, 4);
        assert_eq!(bitmap.height, 4);
        // The crop contains only the child's fill.
        assert_eq!(bitmap.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(3, 3), [0, 0, 0, 255]);
    }
}
