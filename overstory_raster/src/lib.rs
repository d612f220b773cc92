// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot planning and capture for overstory.
//!
//! This crate provides the intermediate representation between
//! [`overstory_core`]'s view tree and backend-specific drawing. It defines:
//!
//! - [`SnapshotItem`] — a single draw command in a snapshot plan
//! - [`SnapshotPlan`] — an ordered list of draw commands for one capture
//! - [`Bitmap`] — an RGBA image with a logical-to-pixel scale factor
//! - [`Rasterizer`] — the trait backends implement to turn plans into pixels
//! - [`snapshot`] — the capture entry point: plan, rasterize, optional crop

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod bitmap;
mod plan;
mod snapshot;

pub use bitmap::{Bitmap, pixel_extent};
pub use plan::{SnapshotItem, SnapshotPlan};
pub use snapshot::{Rasterizer, snapshot};
