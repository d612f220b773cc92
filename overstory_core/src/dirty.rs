// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Overstory uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! efficiently propagate invalidation through the view tree. Each channel
//! represents an independent category of change.
//!
//! # Propagation semantics
//!
//! Channels differ in whether dirtiness propagates to descendants:
//!
//! - **Propagating** — [`GEOMETRY`] and [`OPACITY`] use
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and have dependency
//!   edges from child to parent. Marking a parent dirty automatically marks
//!   all descendants, because world origins, pinned bounds, effective
//!   opacities, and effective hidden state are inherited properties.
//!   (Hidden-flag and scroll-offset changes are routed through [`GEOMETRY`]
//!   so that the same drain pass recomputes world origins and
//!   `effective_hidden`.)
//!
//! - **Local-only** — [`STYLE`] and [`SCROLL`] are marked with the default
//!   policy. Only the explicitly marked view appears in the drain output,
//!   since backgrounds, corner radii, clipping, shadows, and scroll state are
//!   per-view properties.
//!
//! - **Structural** — [`TOPOLOGY`] is marked on topology mutations
//!   (add/remove child, create/destroy view). It triggers a traversal-order
//!   rebuild during evaluation but does not propagate to descendants.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`ViewStore::evaluate`](crate::view::ViewStore::evaluate) call drains
//! all channels and surfaces the results as
//! [`ViewChanges`](crate::view::ViewChanges), which presenters
//! [consume](crate::backend::Presenter::apply) to apply incremental updates.

use understory_dirty::Channel;

/// Bounds, pin, hidden flag, or an ancestor's scroll offset changed —
/// requires world origin, pinned bounds, and effective hidden recomputation
/// for descendants.
pub const GEOMETRY: Channel = Channel::new(0);

/// Opacity changed — requires effective opacity recomputation for descendants.
pub const OPACITY: Channel = Channel::new(1);

/// Background, corner radius, clipping, or shadow changed — no propagation
/// needed.
pub const STYLE: Channel = Channel::new(2);

/// Scroll state changed — no propagation needed.
pub const SCROLL: Channel = Channel::new(3);

/// Tree topology changed — triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(4);
