// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subtree capture: plan, rasterize, crop.

use kurbo::Rect;
use overstory_core::trace::{SnapshotEvent, SnapshotOutcome, Tracer};
use overstory_core::view::{ViewId, ViewStore};

use crate::bitmap::Bitmap;
use crate::plan::SnapshotPlan;

/// Turns a snapshot plan into pixels.
///
/// The rasterizer owns the logical-to-pixel scale of its output; the
/// returned bitmap records it so crop regions can be mapped back onto the
/// pixel grid.
pub trait Rasterizer {
    /// Draws the plan into a new bitmap.
    fn rasterize(&mut self, plan: &SnapshotPlan) -> Bitmap;
}

/// Captures the subtree rooted at `root` as a bitmap.
///
/// The capture sequence is: guard against a zero-extent root, build a
/// [`SnapshotPlan`] for the subtree, hand it to `rasterizer` for pixels,
/// then apply the optional crop `region` (in logical units, scaled by the
/// bitmap's scale factor).
///
/// Returns `None` when the root has zero width or height, or when `region`
/// does not intersect the captured image. Both cases emit a
/// [`SnapshotEvent`] describing the outcome.
///
/// # Panics
///
/// Panics if `root` is stale.
pub fn snapshot(
    store: &ViewStore,
    root: ViewId,
    region: Option<Rect>,
    rasterizer: &mut dyn Rasterizer,
    tracer: &mut Tracer<'_>,
) -> Option<Bitmap> {
    let bounds = store.bounds(root);
    if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
        tracer.snapshot(&SnapshotEvent {
            root: root.index(),
            outcome: SnapshotOutcome::ZeroExtent,
        });
        return None;
    }

    let plan = SnapshotPlan::for_subtree(store, root);
    let bitmap = rasterizer.rasterize(&plan);

    let result = match region {
        Some(region) => bitmap.crop(region),
        None => Some(bitmap),
    };
    match &result {
        Some(bitmap) => tracer.snapshot(&SnapshotEvent {
            root: root.index(),
            outcome: SnapshotOutcome::Captured {
                width: bitmap.width,
                height: bitmap.height,
            },
        }),
        None => tracer.snapshot(&SnapshotEvent {
            root: root.index(),
            outcome: SnapshotOutcome::EmptyCrop,
        }),
    }
    result
}

#[cfg(test)]
mod tests {
    use overstory_core::view::Color;

    use super::*;

    /// Test rasterizer: floods the whole bitmap with the root item's
    /// background, ignoring nested items and rounding.
    struct SolidRasterizer {
        scale: f64,
        calls: usize,
    }

    impl SolidRasterizer {
        fn new(scale: f64) -> Self {
            Self { scale, calls: 0 }
        }
    }

    impl Rasterizer for SolidRasterizer {
        fn rasterize(&mut self, plan: &SnapshotPlan) -> Bitmap {
            self.calls += 1;
            let mut bitmap = Bitmap::with_logical_size(plan.size, self.scale);
            if let Some(color) = plan.items[0].background {
                let rgba = color.to_rgba8();
                for chunk in bitmap.pixels.chunks_exact_mut(4) {
                    chunk.copy_from_slice(&rgba);
                }
            }
            bitmap
        }
    }

    fn store_with_root(width: f64, height: f64) -> (ViewStore, ViewId) {
        let mut store = ViewStore::new();
        let root = store.create_view();
        store.set_bounds(root, Rect::new(0.0, 0.0, width, height));
        store.set_background(root, Some(Color::WHITE));
        (store, root)
    }

    #[test]
    fn snapshot_returns_bitmap_at_scale() {
        let (store, root) = store_with_root(10.0, 8.0);
        let mut rasterizer = SolidRasterizer::new(2.0);

        let bitmap = snapshot(&store, root, None, &mut rasterizer, &mut Tracer::none()).unwrap();
        assert_eq!(bitmap.width, 20);
        assert_eq!(bitmap.height, 16);
        assert_eq!(bitmap.scale, 2.0);
        assert_eq!(bitmap.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn snapshot_zero_extent_returns_none() {
        let (store, root) = store_with_root(0.0, 8.0);
        let mut rasterizer = SolidRasterizer::new(1.0);

        let result = snapshot(&store, root, None, &mut rasterizer, &mut Tracer::none());
        assert!(result.is_none());
        assert_eq!(rasterizer.calls, 0, "nothing to draw, rasterizer not run");
    }

    #[test]
    fn snapshot_crop_returns_cropped() {
        let (store, root) = store_with_root(10.0, 10.0);
        let mut rasterizer = SolidRasterizer::new(1.0);

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
    }

    #[test]
    fn snapshot_empty_crop_returns_none() {
        let (store, root) = store_with_root(10.0, 10.0);
        let mut rasterizer = SolidRasterizer::new(1.0);

        let result = snapshot(
            &store,
            root,
            Some(Rect::new(50.0, 50.0, 60.0, 60.0)),
            &mut rasterizer,
            &mut Tracer::none(),
        );
        assert!(result.is_none());
        assert_eq!(rasterizer.calls, 1, "capture ran; only the crop failed");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn snapshot_emits_outcome_events() {
        use alloc::vec::Vec;

        use overstory_core::trace::TraceSink;

        #[derive(Default)]
        struct RecordingSink {
            outcomes: Vec<SnapshotOutcome>,
        }
        impl TraceSink for RecordingSink {
            fn on_snapshot(&mut self, e: &SnapshotEvent) {
                self.outcomes.push(e.outcome);
            }
        }

        let mut sink = RecordingSink::default();
        let mut rasterizer = SolidRasterizer::new(1.0);

        let (store, root) = store_with_root(10.0, 10.0);
        let _ = snapshot(
            &store,
            root,
            None,
            &mut rasterizer,
            &mut Tracer::new(&mut sink),
        );
        let _ = snapshot(
            &store,
            root,
            Some(Rect::new(50.0, 50.0, 60.0, 60.0)),
            &mut rasterizer,
            &mut Tracer::new(&mut sink),
        );
        let (store, root) = store_with_root(0.0, 0.0);
        let _ = snapshot(
            &store,
            root,
            None,
            &mut rasterizer,
            &mut Tracer::new(&mut sink),
        );

        assert_eq!(
            sink.outcomes,
            [
                SnapshotOutcome::Captured {
                    width: 10,
                    height: 10
                },
                SnapshotOutcome::EmptyCrop,
                SnapshotOutcome::ZeroExtent,
            ]
        );
    }
}
