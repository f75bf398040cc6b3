// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records; ids and causes are stored as
//! length-prefixed UTF-8. [`decode`] reads them back as an iterator of owned
//! [`RecordedEvent`]s.

use strata_core::time::Duration;
use strata_core::trace::{
    ChangeEvent, ChangeKind, CommandEvent, CommandPhase, MatchEvent, MatchKind,
    ReconcileBeginEvent, ReconcileSummary, TraceSink, TransitionEvent, TransitionKind,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RECONCILE_BEGIN: u8 = 1;
const TAG_MATCH: u8 = 2;
const TAG_CHANGE: u8 = 3;
const TAG_RECONCILE_SUMMARY: u8 = 4;
const TAG_TRANSITION: u8 = 5;
const TAG_COMMAND: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Decodes everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        decode(&self.buf).collect()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_str(&mut self, s: &str) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "string length capped at u32::MAX for recording"
        )]
        let len = s.len().min(u32::MAX as usize) as u32;
        self.write_u32(len);
        self.buf.extend_from_slice(&s.as_bytes()[..len as usize]);
    }

    fn write_option_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
            None => self.write_u8(0),
        }
    }

    fn write_match_kind(&mut self, k: MatchKind) {
        self.write_u8(match k {
            MatchKind::Persisted => 0,
            MatchKind::Added => 1,
            MatchKind::Removed => 2,
            MatchKind::Skipped => 3,
        });
    }

    fn write_change_kind(&mut self, k: ChangeKind) {
        self.write_u8(match k {
            ChangeKind::FadeIn => 0,
            ChangeKind::FadeOut => 1,
            ChangeKind::Move => 2,
            ChangeKind::Resize => 3,
            ChangeKind::EdgeMorph => 4,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_reconcile_begin(&mut self, e: &ReconcileBeginEvent<'_>) {
        self.write_u8(TAG_RECONCILE_BEGIN);
        self.write_str(e.old_root);
        self.write_str(e.new_root);
        self.write_bool(e.animate);
        self.write_bool(e.patched);
    }

    fn on_match(&mut self, e: &MatchEvent<'_>) {
        self.write_u8(TAG_MATCH);
        self.write_str(e.id);
        self.write_match_kind(e.kind);
    }

    fn on_change(&mut self, e: &ChangeEvent<'_>) {
        self.write_u8(TAG_CHANGE);
        self.write_str(e.id);
        self.write_change_kind(e.kind);
    }

    fn on_reconcile_summary(&mut self, s: &ReconcileSummary) {
        self.write_u8(TAG_RECONCILE_SUMMARY);
        self.write_count(s.persisted);
        self.write_count(s.added);
        self.write_count(s.removed);
        self.write_count(s.fades);
        self.write_count(s.moves);
        self.write_count(s.resizes);
        self.write_count(s.edge_morphs);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.write_u8(TAG_TRANSITION);
        self.write_bool(e.kind == TransitionKind::Animated);
        self.write_count(e.animations);
        self.write_u64(e.duration.ticks());
    }

    fn on_command(&mut self, e: &CommandEvent<'_>) {
        self.write_u8(TAG_COMMAND);
        self.write_u8(match e.phase {
            CommandPhase::Execute => 0,
            CommandPhase::Undo => 1,
            CommandPhase::Redo => 2,
        });
        self.write_option_str(e.cause);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
///
/// Borrowed ids of the live events are owned here.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`ReconcileBeginEvent`].
    ReconcileBegin {
        /// Root id of the graph being replaced.
        old_root: String,
        /// Root id of the incoming graph.
        new_root: String,
        /// Whether the update requested animation.
        animate: bool,
        /// Whether a patch provided the matches.
        patched: bool,
    },
    /// A [`MatchEvent`].
    Match {
        /// Logical element id.
        id: String,
        /// Classification.
        kind: MatchKind,
    },
    /// A [`ChangeEvent`].
    Change {
        /// Logical element id.
        id: String,
        /// Kind of record.
        kind: ChangeKind,
    },
    /// A [`ReconcileSummary`].
    ReconcileSummary(ReconcileSummary),
    /// A [`TransitionEvent`].
    Transition {
        /// Instant or animated.
        kind: TransitionKind,
        /// Number of sub-animations.
        animations: usize,
        /// Configured duration.
        duration: Duration,
    },
    /// A [`CommandEvent`].
    Command {
        /// Entry point.
        phase: CommandPhase,
        /// Cause carried by the action.
        cause: Option<String>,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first truncated or malformed record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, n: usize) -> Option<&[u8]> {
        if self.remaining() < n {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.read_bytes(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.read_bytes(8)?.try_into().ok()?))
    }

    fn read_count(&mut self) -> Option<usize> {
        Some(usize::try_from(self.read_u64()?).unwrap_or(usize::MAX))
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_string(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).ok()
    }

    fn read_option_string(&mut self) -> Option<Option<String>> {
        match self.read_u8()? {
            0 => Some(None),
            _ => Some(Some(self.read_string()?)),
        }
    }

    fn read_match_kind(&mut self) -> Option<MatchKind> {
        Some(match self.read_u8()? {
            0 => MatchKind::Persisted,
            1 => MatchKind::Added,
            2 => MatchKind::Removed,
            3 => MatchKind::Skipped,
            _ => return None,
        })
    }

    fn read_change_kind(&mut self) -> Option<ChangeKind> {
        Some(match self.read_u8()? {
            0 => ChangeKind::FadeIn,
            1 => ChangeKind::FadeOut,
            2 => ChangeKind::Move,
            3 => ChangeKind::Resize,
            4 => ChangeKind::EdgeMorph,
            _ => return None,
        })
    }

    fn decode_reconcile_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ReconcileBegin {
            old_root: self.read_string()?,
            new_root: self.read_string()?,
            animate: self.read_bool()?,
            patched: self.read_bool()?,
        })
    }

    fn decode_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ReconcileSummary(ReconcileSummary {
            persisted: self.read_count()?,
            added: self.read_count()?,
            removed: self.read_count()?,
            fades: self.read_count()?,
            moves: self.read_count()?,
            resizes: self.read_count()?,
            edge_morphs: self.read_count()?,
        }))
    }

    fn decode_transition(&mut self) -> Option<RecordedEvent> {
        let kind = if self.read_bool()? {
            TransitionKind::Animated
        } else {
            TransitionKind::Instant
        };
        Some(RecordedEvent::Transition {
            kind,
            animations: self.read_count()?,
            duration: Duration(self.read_u64()?),
        })
    }

    fn decode_command(&mut self) -> Option<RecordedEvent> {
        let phase = match self.read_u8()? {
            0 => CommandPhase::Execute,
            1 => CommandPhase::Undo,
            2 => CommandPhase::Redo,
            _ => return None,
        };
        Some(RecordedEvent::Command {
            phase,
            cause: self.read_option_string()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_RECONCILE_BEGIN => self.decode_reconcile_begin(),
            TAG_MATCH => Some(RecordedEvent::Match {
                id: self.read_string()?,
                kind: self.read_match_kind()?,
            }),
            TAG_CHANGE => Some(RecordedEvent::Change {
                id: self.read_string()?,
                kind: self.read_change_kind()?,
            }),
            TAG_RECONCILE_SUMMARY => self.decode_summary(),
            TAG_TRANSITION => self.decode_transition(),
            TAG_COMMAND => self.decode_command(),
            _ => None,
        }
    }
}
