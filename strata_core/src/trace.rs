// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for model updates.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Reconciler`](crate::reconcile::Reconciler) and the
//! [`UpdateModelCommand`](crate::command::UpdateModelCommand) call at each
//! stage. All method bodies default to no-ops, so implementing only the events
//! you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Events borrow ids from the graphs being reconciled; sinks that keep them
//! must copy.

use crate::time::Duration;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How the matcher classified one id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Present in both graphs.
    Persisted,
    /// Only present in the new graph.
    Added,
    /// Only present in the old graph, faded out as a ghost.
    Removed,
    /// Only present in the old graph but not eligible for a fade-out.
    Skipped,
}

/// Which kind of change record was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Opacity 0 → 1.
    FadeIn,
    /// Opacity 1 → 0 on a ghost.
    FadeOut,
    /// Position interpolation.
    Move,
    /// Size interpolation.
    Resize,
    /// Routing-point interpolation.
    EdgeMorph,
}

/// How an update was delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// The new graph was shown immediately.
    Instant,
    /// The new graph is shown through an animation.
    Animated,
}

/// Which command entry point ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandPhase {
    /// First application of an update.
    Execute,
    /// Return to the previous graph.
    Undo,
    /// Re-application after an undo.
    Redo,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a reconciliation starts.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileBeginEvent<'a> {
    /// Root id of the graph being replaced.
    pub old_root: &'a str,
    /// Root id of the incoming graph.
    pub new_root: &'a str,
    /// Whether the update requested animation.
    pub animate: bool,
    /// Whether a caller-supplied patch provides the matches.
    pub patched: bool,
}

/// Emitted once per id during classification.
#[derive(Clone, Copy, Debug)]
pub struct MatchEvent<'a> {
    /// Logical id of the element.
    pub id: &'a str,
    /// How it was classified.
    pub kind: MatchKind,
}

/// Emitted once per change record.
#[derive(Clone, Copy, Debug)]
pub struct ChangeEvent<'a> {
    /// Logical id of the affected element.
    pub id: &'a str,
    /// Kind of record.
    pub kind: ChangeKind,
}

/// Emitted when the composer decides how to deliver the update.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEvent {
    /// Instant or animated.
    pub kind: TransitionKind,
    /// Number of sub-animations (zero when instant).
    pub animations: usize,
    /// Configured duration (zero when instant).
    pub duration: Duration,
}

/// Emitted when a command entry point runs.
#[derive(Clone, Copy, Debug)]
pub struct CommandEvent<'a> {
    /// Which entry point.
    pub phase: CommandPhase,
    /// Free-form cause carried by the action, if any.
    pub cause: Option<&'a str>,
}

/// Per-reconciliation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Ids present in both graphs.
    pub persisted: usize,
    /// Ids only present in the new graph.
    pub added: usize,
    /// Ids only present in the old graph.
    pub removed: usize,
    /// Fade records (both directions).
    pub fades: usize,
    /// Move records.
    pub moves: usize,
    /// Resize records.
    pub resizes: usize,
    /// Edge mementos.
    pub edge_morphs: usize,
}

impl ReconcileSummary {
    /// Counts a classified match.
    pub fn record_match(&mut self, kind: MatchKind) {
        match kind {
            MatchKind::Persisted => self.persisted += 1,
            MatchKind::Added => self.added += 1,
            MatchKind::Removed | MatchKind::Skipped => self.removed += 1,
        }
    }

    /// Counts a change record.
    pub fn record_change(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::FadeIn | ChangeKind::FadeOut => self.fades += 1,
            ChangeKind::Move => self.moves += 1,
            ChangeKind::Resize => self.resizes += 1,
            ChangeKind::EdgeMorph => self.edge_morphs += 1,
        }
    }

    /// Returns the total number of change records.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.fades + self.moves + self.resizes + self.edge_morphs
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from reconciliation.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a reconciliation starts.
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent<'_>) {
        _ = e;
    }

    /// Called for every classified id.
    fn on_match(&mut self, e: &MatchEvent<'_>) {
        _ = e;
    }

    /// Called for every change record.
    fn on_change(&mut self, e: &ChangeEvent<'_>) {
        _ = e;
    }

    /// Called once classification has finished.
    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        _ = s;
    }

    /// Called when the update's delivery is decided.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a command entry point runs.
    fn on_command(&mut self, e: &CommandEvent<'_>) {
        _ = e;
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

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
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

    /// Emits a [`ReconcileBeginEvent`].
    #[inline]
    pub fn reconcile_begin(&mut self, e: &ReconcileBeginEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reconcile_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MatchEvent`].
    #[inline]
    pub fn matched(&mut self, e: &MatchEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_match(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ChangeEvent`].
    #[inline]
    pub fn change(&mut self, e: &ChangeEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReconcileSummary`].
    #[inline]
    pub fn reconcile_summary(&mut self, s: &ReconcileSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_reconcile_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommandEvent`].
    #[inline]
    pub fn command(&mut self, e: &CommandEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_command(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_reconcile_begin(&ReconcileBeginEvent {
            old_root: "a",
            new_root: "a",
            animate: true,
            patched: false,
        });
        sink.on_match(&MatchEvent {
            id: "n",
            kind: MatchKind::Added,
        });
        sink.on_reconcile_summary(&ReconcileSummary::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.change(&ChangeEvent {
            id: "n",
            kind: ChangeKind::Move,
        });
        tracer.transition(&TransitionEvent {
            kind: TransitionKind::Instant,
            animations: 0,
            duration: Duration::ZERO,
        });
    }

    #[test]
    fn summary_counts_by_kind() {
        let mut s = ReconcileSummary::default();
        s.record_match(MatchKind::Persisted);
        s.record_match(MatchKind::Skipped);
        s.record_match(MatchKind::Removed);
        s.record_change(ChangeKind::FadeIn);
        s.record_change(ChangeKind::FadeOut);
        s.record_change(ChangeKind::Resize);
        assert_eq!(s.persisted, 1);
        assert_eq!(s.removed, 2);
        assert_eq!(s.fades, 2);
        assert_eq!(s.resizes, 1);
        assert_eq!(s.changes(), 3);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::string::{String, ToString};
        use alloc::vec::Vec;

        struct RecordingSink {
            ids: Vec<String>,
        }
        impl TraceSink for RecordingSink {
            fn on_match(&mut self, e: &MatchEvent<'_>) {
                self.ids.push(e.id.to_string());
            }
        }

        let mut sink = RecordingSink { ids: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.matched(&MatchEvent {
            id: "n1",
            kind: MatchKind::Persisted,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.ids, ["n1"]);
    }
}
