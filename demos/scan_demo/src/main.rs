// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted interaction that exercises the scan, fade, and snapshot paths.
//!
//! Drives the canonical fixture tree through a drag-and-release on its
//! scrollable feed, probing for active scrolling at each step, then fades the
//! footer, captures whole and cropped snapshots with the software rasterizer,
//! and dumps the final tree. Every stage reports through a
//! [`PrettyPrintSink`](overstory_debug::pretty::PrettyPrintSink).

use kurbo::{Rect, Vec2};

use overstory_backend_soft::{SoftPresenter, SoftRasterizer};
use overstory_core::backend::Presenter;
use overstory_core::trace::{EvaluateEvent, FadeEvent, TraceSink, Tracer};
use overstory_core::view::{Color, DEFAULT_BORDER_THICKNESS, Edges, ViewStore};
use overstory_debug::dump;
use overstory_debug::pretty::PrettyPrintSink;
use overstory_raster::snapshot;
use overstory_scan_harness::{ScanProbe, ScrollScenario};

fn main() {
    let ScrollScenario {
        mut store,
        root,
        header,
        title,
        feed,
        footer,
    } = ScrollScenario::new();

    let mut sink = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut presenter = SoftPresenter::new();
    let mut probe = ScanProbe::new();
    let mut update_index: u64 = 0;

    // -- settle the initial tree -------------------------------------------
    present(&mut store, &mut presenter, &mut sink, &mut update_index);

    // At rest nothing scrolls.
    let _ = probe.run_is_scrolling(&store, root);
    sink.on_scan(&probe.event());

    // -- drag begins ---------------------------------------------------------
    store.set_dragging(feed, true);
    store.set_scroll_offset(feed, Vec2::new(0.0, 120.0));
    present(&mut store, &mut presenter, &mut sink, &mut update_index);

    let _ = probe.run_is_scrolling(&store, root);
    sink.on_scan(&probe.event());

    // -- fingers lift, momentum continues ------------------------------------
    store.set_dragging(feed, false);
    store.set_decelerating(feed, true);
    store.set_scroll_offset(feed, Vec2::new(0.0, 180.0));
    present(&mut store, &mut presenter, &mut sink, &mut update_index);

    let _ = probe.run_is_scrolling(&store, root);
    sink.on_scan(&probe.event());

    // -- content settles; jump the feed so the title sits below the fold -----
    store.set_decelerating(feed, false);
    let above = store.scroll_offset_above(title);
    store.set_scroll_offset(feed, above.to_vec2());
    present(&mut store, &mut presenter, &mut sink, &mut update_index);

    let _ = probe.run_is_scrolling(&store, root);
    sink.on_scan(&probe.event());

    // -- decorate and fade ----------------------------------------------------
    let _fillers = store.add_borders(
        header,
        Edges::ALL,
        Color::LIGHT_GRAY,
        DEFAULT_BORDER_THICKNESS,
    );
    store.round_corners(header);
    store.add_shadow(header, Color::BLACK);
    store.fade_out(footer);
    present(&mut store, &mut presenter, &mut sink, &mut update_index);

    store.fade_in(footer);
    present(&mut store, &mut presenter, &mut sink, &mut update_index);
    println!("presenter recorded {} fades", presenter.fades().len());
    presenter.clear_fades();

    // -- snapshots ------------------------------------------------------------
    let mut rasterizer = SoftRasterizer::new(2.0);

    let whole = {
        let mut tracer = Tracer::new(&mut sink);
        snapshot(&store, root, None, &mut rasterizer, &mut tracer)
    };
    let cropped = {
        let mut tracer = Tracer::new(&mut sink);
        let region = Rect::new(0.0, 0.0, 160.0, 64.0);
        snapshot(&store, root, Some(region), &mut rasterizer, &mut tracer)
    };
    // A freshly created view has zero extent; capture is refused.
    let empty = store.create_view();
    {
        let mut tracer = Tracer::new(&mut sink);
        let _ = snapshot(&store, empty, None, &mut rasterizer, &mut tracer);
    }

    // -- dump the final tree --------------------------------------------------
    let mut stdout = std::io::stdout();
    dump::dump_text(&store, root, &mut stdout).expect("failed to write tree dump");
    dump::dump_json(&store, root, &mut stdout).expect("failed to write JSON dump");
    println!();

    let whole_px = whole.map_or((0, 0), |b| (b.width, b.height));
    let cropped_px = cropped.map_or((0, 0), |b| (b.width, b.height));
    println!(
        "captured {}x{} whole, {}x{} cropped; paint order {:?}",
        whole_px.0,
        whole_px.1,
        cropped_px.0,
        cropped_px.1,
        presenter.paint_order(),
    );
}

/// Evaluates the store, reports the change set, and mirrors it into the
/// presenter.
fn present(
    store: &mut ViewStore,
    presenter: &mut SoftPresenter,
    sink: &mut PrettyPrintSink,
    update_index: &mut u64,
) {
    let changes = store.evaluate();
    sink.on_evaluate(&EvaluateEvent::new(*update_index, &changes));
    for fade in &changes.fades {
        sink.on_fade(&FadeEvent::from(fade));
    }
    presenter.apply(store, &changes);
    *update_index += 1;
}
