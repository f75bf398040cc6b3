// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded events.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes a JSON array
//! with one object per event. Every object has an `"event"` key naming the
//! event type; the remaining keys mirror the event's fields. Durations are
//! converted to milliseconds using the provided [`Timebase`].

use std::io::{self, Write};

use serde_json::{Value, json};

use strata_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Converts recorded events into JSON values.
pub fn to_values(bytes: &[u8], timebase: Timebase) -> Vec<Value> {
    decode(bytes)
        .map(|recorded| match recorded {
            RecordedEvent::ReconcileBegin {
                old_root,
                new_root,
                animate,
                patched,
            } => json!({
                "event": "ReconcileBegin",
                "old_root": old_root,
                "new_root": new_root,
                "animate": animate,
                "patched": patched,
            }),
            RecordedEvent::Match { id, kind } => json!({
                "event": "Match",
                "id": id,
                "kind": format!("{kind:?}"),
            }),
            RecordedEvent::Change { id, kind } => json!({
                "event": "Change",
                "id": id,
                "kind": format!("{kind:?}"),
            }),
            RecordedEvent::ReconcileSummary(s) => json!({
                "event": "ReconcileSummary",
                "persisted": s.persisted,
                "added": s.added,
                "removed": s.removed,
                "fades": s.fades,
                "moves": s.moves,
                "resizes": s.resizes,
                "edge_morphs": s.edge_morphs,
            }),
            RecordedEvent::Transition {
                kind,
                animations,
                duration,
            } => json!({
                "event": "Transition",
                "kind": format!("{kind:?}"),
                "animations": animations,
                "duration_ms": ticks_to_ms(duration.ticks(), timebase),
            }),
            RecordedEvent::Command { phase, cause } => json!({
                "event": "Command",
                "phase": format!("{phase:?}"),
                "cause": cause,
            }),
        })
        .collect()
}

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, &Value::Array(to_values(bytes, timebase)))?;
    writer.flush()
}

fn ticks_to_ms(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use strata_core::time::Duration;
    use strata_core::trace::{
        CommandEvent, CommandPhase, MatchEvent, MatchKind, TraceSink, TransitionEvent,
        TransitionKind,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_command(&CommandEvent {
            phase: CommandPhase::Execute,
            cause: Some("server push"),
        });
        rec.on_match(&MatchEvent {
            id: "n7",
            kind: MatchKind::Removed,
        });
        rec.on_transition(&TransitionEvent {
            kind: TransitionKind::Animated,
            animations: 2,
            duration: Duration(250_000_000),
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "Command");
        assert_eq!(parsed[0]["phase"], "Execute");
        assert_eq!(parsed[0]["cause"], "server push");

        assert_eq!(parsed[1]["event"], "Match");
        assert_eq!(parsed[1]["id"], "n7");
        assert_eq!(parsed[1]["kind"], "Removed");

        assert_eq!(parsed[2]["event"], "Transition");
        assert_eq!(parsed[2]["animations"], 2);
        assert_eq!(parsed[2]["duration_ms"], 250.0);
    }

    #[test]
    fn missing_cause_is_null() {
        let mut rec = RecorderSink::new();
        rec.on_command(&CommandEvent {
            phase: CommandPhase::Undo,
            cause: None,
        });
        let values = to_values(rec.as_bytes(), Timebase::NANOS);
        assert!(values[0]["cause"].is_null());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
