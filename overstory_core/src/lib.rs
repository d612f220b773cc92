// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and view tree for incremental UI presentation.
//!
//! `overstory_core` provides the foundational data structures for managing
//! trees of presentation views: positioning, visibility, scrolling state,
//! decoration, and fade requests. It is `no_std` compatible (with `alloc`)
//! and uses array-based struct-of-arrays storage with index handles for
//! cache-friendly traversal.
//!
//! # Architecture
//!
//! The crate is organized around an update cycle that turns property
//! mutations into incremental presentation updates:
//!
//! ```text
//!   Caller mutations (set_bounds, fade_in, set_scroll_offset, ...)
//!       │
//!       ▼
//!   ViewStore::evaluate() ──► ViewChanges ──► Presenter::apply()
//!       │
//!       ▼
//!   Queries (any_in_subtree, is_scrolling) read the settled tree
//! ```
//!
//! **[`view`]** — Struct-of-arrays view tree with generational handles.
//! Properties (bounds, opacity, background, corner radius, clipping, shadow,
//! pin, scroll state) are set by the caller; world origins, effective
//! opacities, effective hidden state, and pinned bounds are computed by
//! evaluation. Subtree queries
//! ([`any_in_subtree`](view::ViewStore::any_in_subtree),
//! [`is_scrolling`](view::ViewStore::is_scrolling)) scan depth-first with
//! short-circuiting.
//!
//! **[`dirty`]** — Multi-channel dirty tracking via `understory_dirty`.
//! Property mutations automatically mark the appropriate channel. GEOMETRY
//! and OPACITY propagate to descendants; STYLE and SCROLL are local-only;
//! TOPOLOGY triggers a traversal rebuild.
//!
//! **[`backend`]** — The [`Presenter`](backend::Presenter) trait that
//! presentation backends implement to apply view changes to backing trees.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! update-cycle instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-view
//!   change records.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod dirty;
pub mod trace;
pub mod view;
