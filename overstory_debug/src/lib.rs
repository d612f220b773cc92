// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and tree dumps for overstory diagnostics.
//!
//! This crate provides development-time views into a running view tree:
//!
//! - [`pretty::PrettyPrintSink`] — a
//!   [`TraceSink`](overstory_core::trace::TraceSink) with human-readable
//!   one-line-per-event output.
//! - [`dump::dump_text`] and [`dump::dump_json`] — indented and JSON
//!   renderings of a [`ViewStore`](overstory_core::view::ViewStore) subtree.

pub mod dump;
pub mod pretty;
