// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for presentation integrations.
//!
//! Overstory splits presentation-specific work into *backend* crates. Each
//! backend provides the following pieces:
//!
//! - **Presenter** — Implements the [`Presenter`] trait to apply evaluated
//!   changes to a presentation tree (platform-native views, DOM elements, or
//!   an in-memory mirror for tests).
//!
//! - **Fade playback** — The store records fade end states immediately and
//!   surfaces the requests as [`ViewChanges::fades`]; actually animating
//!   opacity over the requested duration is the presenter's job, using
//!   whatever animation facility its platform has.
//!
//! - **Rasterization** — Backends that can draw implement the rasterizer
//!   contract from the companion `overstory_raster` crate, which snapshot
//!   capture delegates pixel work to.
//!
//! # Crate boundaries
//!
//! `overstory_core` owns the data model, evaluation, and this contract
//! module. Backend crates depend on `overstory_core` and provide
//! presentation glue. Application code depends on both and wires them
//! together in an update cycle.
//!
//! [`ViewChanges::fades`]: crate::view::ViewChanges::fades

use crate::view::{ViewChanges, ViewStore};

/// Applies evaluated view changes to a backing presentation tree.
///
/// Platform presenters and in-memory test doubles implement this trait,
/// enabling generic update cycles.
///
/// # Update cycle pseudocode
///
/// A typical update wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_update() {
///     // Mutate: update view properties
///     store.set_bounds(panel, dragged_bounds(pointer));
///     store.fade_in(toast);
///
///     // Evaluate: drain dirty channels, recompute world properties
///     let changes = store.evaluate();
///
///     // Present: apply incremental changes to the backing tree
///     presenter.apply(&store, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`ViewChanges`] to the backing presentation tree,
    /// reading current property values from `store` as needed.
    fn apply(&mut self, store: &ViewStore, changes: &ViewChanges);
}
