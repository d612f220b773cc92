// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fade animation requests.
//!
//! Overstory does not schedule animations. A fade updates the model opacity
//! immediately (the store always holds the end state) and queues a [`Fade`]
//! request that the next [`evaluate`](ViewStore::evaluate) surfaces through
//! [`ViewChanges::fades`](super::ViewChanges::fades). Presenters hand the
//! request to the host's animation machinery — or apply the end value
//! directly, which is what the software backend does. Fire-and-forget: no
//! completion signal comes back.

use core::time::Duration;

use understory_dirty::EagerPolicy;

use super::id::ViewId;
use super::store::ViewStore;
use crate::dirty;

/// Duration used by [`fade_in`](ViewStore::fade_in) and
/// [`fade_out`](ViewStore::fade_out).
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(300);

/// A single fade request surfaced through
/// [`ViewChanges`](super::ViewChanges).
///
/// Carries the raw slot index of the view, like the other change lists, so
/// presenters can pair it with their mirrored node directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    /// Raw slot index of the faded view.
    pub view: u32,
    /// Opacity at the moment the fade was requested.
    pub from: f32,
    /// Target opacity.
    pub to: f32,
    /// Requested animation duration.
    pub duration: Duration,
}

impl ViewStore {
    /// Fades a view's opacity to `target` over `duration`.
    ///
    /// The local opacity is set to `target` immediately (clamped to
    /// `[0, 1]`); the transition itself is the presenter's job. Multiple
    /// fades requested for one view before the next evaluate are surfaced in
    /// request order, so presenters applying them in order get last-wins
    /// behavior. Fading a hidden view is allowed — opacity and visibility
    /// are independent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn fade_to(&mut self, id: ViewId, target: f32, duration: Duration) {
        self.validate(id);
        let idx = id.idx;
        let from = self.local_opacity[idx as usize];
        let to = target.clamp(0.0, 1.0);
        self.local_opacity[idx as usize] = to;
        self.dirty.mark_with(idx, dirty::OPACITY, &EagerPolicy);
        self.pending_fades.push(Fade {
            view: idx,
            from,
            to,
            duration,
        });
    }

    /// Fades a view in to full opacity over [`DEFAULT_FADE_DURATION`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn fade_in(&mut self, id: ViewId) {
        self.fade_to(id, 1.0, DEFAULT_FADE_DURATION);
    }

    /// Fades a view out to zero opacity over [`DEFAULT_FADE_DURATION`].
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn fade_out(&mut self, id: ViewId) {
        self.fade_to(id, 0.0, DEFAULT_FADE_DURATION);
    }
}
