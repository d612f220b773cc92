// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Software backend for overstory.
//!
//! This crate provides platform-free reference implementations of the
//! backend contracts:
//!
//! - [`SoftPresenter`]: in-memory mirror of the view tree
//! - [`SoftRasterizer`]: CPU rasterization of snapshot plans

#![no_std]

extern crate alloc;

mod presenter;
mod raster;

pub use overstory_core::backend::Presenter;
pub use overstory_raster::Rasterizer;
pub use presenter::{SoftNode, SoftPresenter};
pub use raster::SoftRasterizer;
