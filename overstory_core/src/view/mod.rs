// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree data model.
//!
//! A *view* is a node in a presentation tree. Each view has:
//!
//! - An identity ([`ViewId`]) — a generational handle that becomes stale when
//!   the view is destroyed, preventing use-after-free bugs at the API level.
//! - Topology — parent, first-child, and sibling links forming an ordered tree.
//! - **Local properties** set by the caller: [`bounds`](ViewStore::set_bounds),
//!   [`opacity`](ViewStore::set_opacity), [`background`](ViewStore::set_background),
//!   [`corner radius`](ViewStore::set_corner_radius),
//!   [`clipping`](ViewStore::set_clips_bounds), [`shadow`](ViewStore::set_shadow),
//!   [`pin`](ViewStore::set_pin), scroll state, and [`flags`](ViewStore::set_flags).
//! - **Computed properties** produced by [`evaluate`](ViewStore::evaluate):
//!   `world_origin` (sum of ancestor origins, shifted by ancestor scroll
//!   offsets), `effective_opacity` (product of ancestor local opacities), and
//!   `effective_hidden` (or of ancestor hidden flags).
//!
//! Views are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal.
//!
//! # Queries
//!
//! [`any_in_subtree`](ViewStore::any_in_subtree) scans a subtree depth-first
//! in pre-order, short-circuiting on the first view a predicate accepts.
//! [`is_scrolling`](ViewStore::is_scrolling) builds on it to answer whether
//! any scrollable container below a view is being dragged or decelerating.
//!
//! # Dirty tracking
//!
//! Property mutations automatically mark the corresponding dirty channel
//! (see [`dirty`](crate::dirty)). The channels map to property categories:
//!
//! - **GEOMETRY** / **OPACITY** — propagate to all descendants, since
//!   world origins, pinned bounds, and effective opacities are inherited.
//! - **STYLE** / **SCROLL** — local-only; only the modified view is marked.
//! - **TOPOLOGY** — structural changes (add/remove child, create/destroy
//!   view) that trigger a traversal-order rebuild.

mod evaluate;
mod fade;
mod id;
mod pin;
mod scroll;
mod store;
mod style;
mod traverse;

pub use evaluate::ViewChanges;
pub use fade::{DEFAULT_FADE_DURATION, Fade};
pub use id::{INVALID, ViewId};
pub use pin::{DEFAULT_BORDER_THICKNESS, Edge, EdgePin, Edges};
pub use scroll::ScrollState;
pub use store::{ViewFlags, ViewStore};
pub use style::{Color, DEFAULT_CORNER_RADIUS, Shadow};
pub use traverse::Children;
