// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding trace events to the [`tracing`] ecosystem.
//!
//! [`TracingSink`] turns every event into a structured `tracing` event under
//! the `strata` target. Stage events (reconcile start, summary, transition,
//! command) are logged at `DEBUG`, per-id match and change events at
//! `TRACE`, so that a subscriber filter like `strata=debug` keeps the output
//! to a few lines per update.

use strata_core::trace::{
    ChangeEvent, CommandEvent, MatchEvent, ReconcileBeginEvent, ReconcileSummary, TraceSink,
    TransitionEvent,
};

/// A [`TraceSink`] that emits `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingSink {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent<'_>) {
        tracing::debug!(
            target: "strata",
            old_root = e.old_root,
            new_root = e.new_root,
            animate = e.animate,
            patched = e.patched,
            "reconcile"
        );
    }

    fn on_match(&mut self, e: &MatchEvent<'_>) {
        tracing::trace!(target: "strata", id = e.id, kind = ?e.kind, "match");
    }

    fn on_change(&mut self, e: &ChangeEvent<'_>) {
        tracing::trace!(target: "strata", id = e.id, kind = ?e.kind, "change");
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        tracing::debug!(
            target: "strata",
            persisted = s.persisted,
            added = s.added,
            removed = s.removed,
            fades = s.fades,
            moves = s.moves,
            resizes = s.resizes,
            edge_morphs = s.edge_morphs,
            "classified"
        );
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        tracing::debug!(
            target: "strata",
            kind = ?e.kind,
            animations = e.animations,
            duration_ticks = e.duration.ticks(),
            "transition"
        );
    }

    fn on_command(&mut self, e: &CommandEvent<'_>) {
        tracing::debug!(target: "strata", phase = ?e.phase, cause = e.cause, "command");
    }
}
