// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Durations
//! are converted to milliseconds using a [`Timebase`].

use std::io::Write;

use strata_core::time::Timebase;
use strata_core::trace::{
    ChangeEvent, ChangeKind, CommandEvent, CommandPhase, MatchEvent, MatchKind,
    ReconcileBeginEvent, ReconcileSummary, TraceSink, TransitionEvent, TransitionKind,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    per_element: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("per_element", &self.per_element)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            per_element: true,
        }
    }

    /// Suppresses the per-id match and change lines, keeping one line per
    /// reconciliation stage.
    #[must_use]
    pub fn summaries_only(mut self) -> Self {
        self.per_element = false;
        self
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ticks_to_ms(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1_000_000.0
    }
}

fn match_name(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Persisted => "persisted",
        MatchKind::Added => "added",
        MatchKind::Removed => "removed",
        MatchKind::Skipped => "skipped",
    }
}

fn change_name(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::FadeIn => "fade-in",
        ChangeKind::FadeOut => "fade-out",
        ChangeKind::Move => "move",
        ChangeKind::Resize => "resize",
        ChangeKind::EdgeMorph => "edge-morph",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[reconcile] {} -> {} animate={} patched={}",
            e.old_root, e.new_root, e.animate, e.patched,
        );
    }

    fn on_match(&mut self, e: &MatchEvent<'_>) {
        if self.per_element {
            let _ = writeln!(self.writer, "[match] {} {}", e.id, match_name(e.kind));
        }
    }

    fn on_change(&mut self, e: &ChangeEvent<'_>) {
        if self.per_element {
            let _ = writeln!(self.writer, "[change] {} {}", e.id, change_name(e.kind));
        }
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] persisted={} added={} removed={} fades={} moves={} \
             resizes={} edges={}",
            s.persisted, s.added, s.removed, s.fades, s.moves, s.resizes, s.edge_morphs,
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        match e.kind {
            TransitionKind::Instant => {
                let _ = writeln!(self.writer, "[transition] instant");
            }
            TransitionKind::Animated => {
                let _ = writeln!(
                    self.writer,
                    "[transition] animated parts={} duration={:.1}ms",
                    e.animations,
                    self.ticks_to_ms(e.duration.ticks()),
                );
            }
        }
    }

    fn on_command(&mut self, e: &CommandEvent<'_>) {
        let phase = match e.phase {
            CommandPhase::Execute => "execute",
            CommandPhase::Undo => "undo",
            CommandPhase::Redo => "redo",
        };
        let _ = match e.cause {
            Some(cause) => writeln!(self.writer, "[command] {phase} cause={cause}"),
            None => writeln!(self.writer, "[command] {phase}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use strata_core::time::Duration;

    use super::*;

    #[test]
    fn pretty_print_transition() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_transition(&TransitionEvent {
            kind: TransitionKind::Animated,
            animations: 3,
            duration: Duration(250_000_000),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(output.contains("[transition] animated"), "got: {output}");
        assert!(output.contains("parts=3"), "got: {output}");
        assert!(output.contains("duration=250.0ms"), "got: {output}");
    }

    #[test]
    fn summaries_only_skips_per_id_lines() {
        let mut sink =
            PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS).summaries_only();
        sink.on_match(&MatchEvent {
            id: "n1",
            kind: MatchKind::Added,
        });
        sink.on_change(&ChangeEvent {
            id: "n1",
            kind: ChangeKind::FadeIn,
        });
        sink.on_command(&CommandEvent {
            phase: CommandPhase::Redo,
            cause: Some("shortcut"),
        });
        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert_eq!(output, "[command] redo cause=shortcut\n");
    }
}
