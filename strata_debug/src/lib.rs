// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, JSON export and `tracing` forwarding for
//! strata diagnostics.
//!
//! This crate provides [`TraceSink`](strata_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes recorded bytes as a JSON array.
//! - [`log::TracingSink`]: forwards events to the `tracing` crate.

pub mod json;
pub mod log;
pub mod pretty;
pub mod recorder;
