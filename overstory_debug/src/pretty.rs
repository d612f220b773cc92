// Copyright 2026 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use overstory_core::trace::{
    EvaluateEvent, FadeEvent, ScanEvent, SnapshotEvent, SnapshotOutcome, TraceSink, ViewChange,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_evaluate(&mut self, e: &EvaluateEvent) {
        let topology = if e.topology_changed { " topology" } else { "" };
        let _ = writeln!(
            self.writer,
            "[evaluate] update={} geometry={} opacities={} styles={} scrolls={} \
             hidden={} unhidden={} added={} removed={} fades={}{topology}",
            e.update_index,
            e.geometry,
            e.opacities,
            e.styles,
            e.scrolls,
            e.hidden,
            e.unhidden,
            e.added,
            e.removed,
            e.fades,
        );
    }

    fn on_scan(&mut self, e: &ScanEvent) {
        let _ = writeln!(
            self.writer,
            "[scan] root={} visited={} matched={}",
            e.root, e.visited, e.matched,
        );
    }

    fn on_fade(&mut self, e: &FadeEvent) {
        let _ = writeln!(
            self.writer,
            "[fade] view={} {:.2}->{:.2} over {}ms",
            e.view,
            e.from,
            e.to,
            e.duration.as_millis(),
        );
    }

    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        match e.outcome {
            SnapshotOutcome::Captured { width, height } => {
                let _ = writeln!(
                    self.writer,
                    "[snapshot] root={} captured {width}x{height}",
                    e.root,
                );
            }
            SnapshotOutcome::ZeroExtent => {
                let _ = writeln!(self.writer, "[snapshot] root={} zero-extent", e.root);
            }
            SnapshotOutcome::EmptyCrop => {
                let _ = writeln!(self.writer, "[snapshot] root={} empty-crop", e.root);
            }
        }
    }

    fn on_view_changes(&mut self, update_index: u64, changes: &[ViewChange]) {
        let _ = writeln!(
            self.writer,
            "[views] update={update_index} changes={}",
            changes.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_scan() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_scan(&ScanEvent {
            root: 1,
            visited: 4,
            matched: true,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("[scan]"), "got: {output}");
        assert!(output.contains("root=1"), "got: {output}");
        assert!(output.contains("matched=true"), "got: {output}");
    }

    #[test]
    fn pretty_print_snapshot_outcomes() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_snapshot(&SnapshotEvent {
            root: 0,
            outcome: SnapshotOutcome::Captured {
                width: 40,
                height: 30,
            },
        });
        sink.on_snapshot(&SnapshotEvent {
            root: 2,
            outcome: SnapshotOutcome::ZeroExtent,
        });
        let output = String::from_utf8(sink.writer).unwrap();
        assert!(output.contains("captured 40x30"), "got: {output}");
        assert!(output.contains("zero-extent"), "got: {output}");
    }
}
