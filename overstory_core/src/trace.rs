// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the update cycle.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! update-cycle instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`ViewChange`] records plus the
//!   corresponding `TraceSink` method.

use core::time::Duration;

use crate::view::{Fade, ViewChanges};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which property of a view changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewField {
    /// Bounds, pin placement, or world origin.
    Geometry,
    /// Opacity value.
    Opacity,
    /// Background, corner radius, clipping, or shadow.
    Style,
    /// Scroll state.
    Scroll,
    /// View flags.
    Flags,
    /// Topology (parent/child relationships).
    Topology,
}

/// How a snapshot attempt concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotOutcome {
    /// A bitmap was produced at the given pixel dimensions.
    Captured {
        /// Bitmap width in pixels.
        width: u32,
        /// Bitmap height in pixels.
        height: u32,
    },
    /// The target view had zero width or height; nothing to draw.
    ZeroExtent,
    /// The requested crop did not intersect the captured image.
    EmptyCrop,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Summary of a single [`evaluate`](crate::view::ViewStore::evaluate) call.
#[derive(Clone, Copy, Debug)]
pub struct EvaluateEvent {
    /// Monotonic update counter, maintained by the caller.
    pub update_index: u64,
    /// Number of views whose geometry was recomputed.
    pub geometry: usize,
    /// Number of views whose effective opacity was recomputed.
    pub opacities: usize,
    /// Number of views whose style changed.
    pub styles: usize,
    /// Number of views whose scroll state changed.
    pub scrolls: usize,
    /// Number of views that became effectively hidden.
    pub hidden: usize,
    /// Number of views that became visible again.
    pub unhidden: usize,
    /// Number of views added.
    pub added: usize,
    /// Number of views removed.
    pub removed: usize,
    /// Number of fade requests surfaced.
    pub fades: usize,
    /// Whether the traversal order was rebuilt.
    pub topology_changed: bool,
}

impl EvaluateEvent {
    /// Creates an `EvaluateEvent` from an evaluated change set plus the
    /// caller's update counter (which the change set itself does not carry).
    #[must_use]
    pub fn new(update_index: u64, changes: &ViewChanges) -> Self {
        Self {
            update_index,
            geometry: changes.geometry.len(),
            opacities: changes.opacities.len(),
            styles: changes.styles.len(),
            scrolls: changes.scrolls.len(),
            hidden: changes.hidden.len(),
            unhidden: changes.unhidden.len(),
            added: changes.added.len(),
            removed: changes.removed.len(),
            fades: changes.fades.len(),
            topology_changed: changes.topology_changed,
        }
    }
}

/// Emitted after a subtree predicate scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanEvent {
    /// Slot index of the scan root.
    pub root: u32,
    /// How many views the predicate was invoked for.
    pub visited: u64,
    /// Whether the predicate matched (the scan short-circuited).
    pub matched: bool,
}

/// Emitted when a fade request is handed to a presenter.
#[derive(Clone, Copy, Debug)]
pub struct FadeEvent {
    /// Slot index of the fading view.
    pub view: u32,
    /// Opacity at the start of the fade.
    pub from: f32,
    /// Opacity at the end of the fade.
    pub to: f32,
    /// Requested duration.
    pub duration: Duration,
}

impl From<&Fade> for FadeEvent {
    fn from(fade: &Fade) -> Self {
        Self {
            view: fade.view,
            from: fade.from,
            to: fade.to,
            duration: fade.duration,
        }
    }
}

/// Emitted after a snapshot attempt.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotEvent {
    /// Slot index of the snapshot root.
    pub root: u32,
    /// How the attempt concluded.
    pub outcome: SnapshotOutcome,
}

/// A per-update view change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct ViewChange {
    /// Index of the view that changed.
    pub view_index: u32,
    /// Which field changed.
    pub field: ViewField,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the update cycle.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after an evaluate pass completes.
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        _ = e;
    }

    /// Called after a subtree predicate scan.
    fn on_scan(&mut self, e: &ScanEvent) {
        _ = e;
    }

    /// Called when a fade request is handed to a presenter.
    fn on_fade(&mut self, e: &FadeEvent) {
        _ = e;
    }

    /// Called after a snapshot attempt.
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        _ = e;
    }

    /// Called with per-update view changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_view_changes(&mut self, update_index: u64, changes: &[ViewChange]) {
        _ = (update_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`EvaluateEvent`].
    #[inline]
    pub fn evaluate(&mut self, e: &EvaluateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_evaluate(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScanEvent`].
    #[inline]
    pub fn scan(&mut self, e: &ScanEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_scan(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FadeEvent`].
    #[inline]
    pub fn fade(&mut self, e: &FadeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fade(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SnapshotEvent`].
    #[inline]
    pub fn snapshot(&mut self, e: &SnapshotEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snapshot(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits view changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn view_changes(&mut self, update_index: u64, changes: &[ViewChange]) {
        if let Some(s) = &mut self.sink {
            s.on_view_changes(update_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
