// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View-tree dumps.
//!
//! [`dump_text`] writes an indented one-line-per-view rendering of a
//! [`ViewStore`] subtree, for eyeballing tree structure in a terminal.
//! [`dump_json`] writes the same structure as JSON for machine consumption
//! (diffing snapshots of the tree, loading into inspection tooling).

use std::io::{self, Write};

use serde_json::{Value, json};

use overstory_core::view::{Color, ViewId, ViewStore};

/// Writes an indented text rendering of the subtree rooted at `root`.
///
/// One line per view: slot index, origin and size, local opacity, and any
/// noteworthy state (hidden flag, scroll state, background, rounding).
///
/// # Panics
///
/// Panics if `root` is stale.
pub fn dump_text(store: &ViewStore, root: ViewId, writer: &mut dyn Write) -> io::Result<()> {
    dump_text_at(store, root, 0, writer)
}

fn dump_text_at(
    store: &ViewStore,
    view: ViewId,
    depth: usize,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let bounds = store.bounds(view);

    let mut notes = String::new();
    if store.flags(view).hidden {
        notes.push_str(" hidden");
    }
    if let Some(state) = store.scroll_state(view) {
        if state.dragging {
            notes.push_str(" dragging");
        } else if state.decelerating {
            notes.push_str(" decelerating");
        } else {
            notes.push_str(" scrollable");
        }
    }
    if let Some(color) = store.background(view) {
        notes.push_str(" bg=");
        notes.push_str(&color_hex(color));
    }
    if store.corner_radius(view) > 0.0 {
        notes.push_str(&format!(" r={}", store.corner_radius(view)));
    }
    if store.clips_bounds(view) {
        notes.push_str(" clips");
    }

    writeln!(
        writer,
        "{indent}[{}] ({}, {}) {}x{} opacity={:.2}{notes}",
        view.index(),
        bounds.x0,
        bounds.y0,
        bounds.width(),
        bounds.height(),
        store.local_opacity(view),
    )?;
    for child in store.children(view) {
        dump_text_at(store, child, depth + 1, writer)?;
    }
    Ok(())
}

/// Writes the subtree rooted at `root` as pretty-printed JSON.
///
/// Each view object carries its index, bounds, opacity, flags, style, scroll
/// state (or `null`), and a `children` array in sibling order.
///
/// # Panics
///
/// Panics if `root` is stale.
pub fn dump_json(store: &ViewStore, root: ViewId, writer: &mut dyn Write) -> io::Result<()> {
    let value = view_value(store, root);
    serde_json::to_writer_pretty(writer, &value)?;
    Ok(())
}

fn view_value(store: &ViewStore, view: ViewId) -> Value {
    let bounds = store.bounds(view);
    let children: Vec<Value> = store
        .children(view)
        .map(|child| view_value(store, child))
        .collect();
    json!({
        "index": view.index(),
        "bounds": [bounds.x0, bounds.y0, bounds.x1, bounds.y1],
        "opacity": store.local_opacity(view),
        "hidden": store.flags(view).hidden,
        "background": store.background(view).map(color_hex),
        "corner_radius": store.corner_radius(view),
        "clips_bounds": store.clips_bounds(view),
        "scroll": store.scroll_state(view).map(|state| json!({
            "offset": [state.offset.x, state.offset.y],
            "dragging": state.dragging,
            "decelerating": state.decelerating,
        })),
        "children": children,
    })
}

fn color_hex(color: Color) -> String {
    let [r, g, b, a] = color.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    fn sample_store() -> (ViewStore, ViewId, ViewId) {
        let mut store = ViewStore::new();
        let root = store.create_view();
        let child = store.create_view();
        store.add_child(root, child);
        store.set_bounds(root, Rect::new(0.0, 0.0, 100.0, 80.0));
        store.set_bounds(child, Rect::new(10.0, 10.0, 50.0, 30.0));
        store.set_background(child, Some(Color::LIGHT_GRAY));
        (store, root, child)
    }

    #[test]
    fn dump_text_indents_children() {
        let (store, root, _child) = sample_store();
        let mut out = Vec::new();
        dump_text(&store, root, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[0]"), "got: {}", lines[0]);
        assert!(lines[1].starts_with("  [1]"), "got: {}", lines[1]);
        assert!(lines[1].contains("bg=#aaaaaaff"), "got: {}", lines[1]);
    }

    #[test]
    fn dump_text_notes_scroll_state() {
        let (mut store, root, child) = sample_store();
        store.make_scrollable(child);
        store.set_dragging(child, true);

        let mut out = Vec::new();
        dump_text(&store, root, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("dragging"), "got: {text}");
    }

    #[test]
    fn dump_json_round_trips() {
        let (store, root, _child) = sample_store();
        let mut out = Vec::new();
        dump_json(&store, root, &mut out).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["index"], 0);
        assert_eq!(parsed["children"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["children"][0]["background"], "#aaaaaaff");
        assert_eq!(parsed["children"][0]["bounds"][2], 50.0);
        assert!(parsed["scroll"].is_null());
    }
}
