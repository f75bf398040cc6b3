// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-graph reconciliation and animated model updates for diagrams.
//!
//! `strata_core` replaces a displayed diagram with a new version of itself
//! and turns the difference into an animation: elements that moved glide to
//! their new place, resized elements grow or shrink, new elements fade in,
//! removed elements fade out, and edges morph between their old and new
//! routes. It is `no_std` compatible (with `alloc`) and stores graphs in
//! struct-of-arrays form with generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   UpdateModel (RootSchema | patch)
//!       │
//!       ▼
//!   UpdateModelCommand::execute() ──► ModelFactory ──► next SceneGraph
//!                                                           │
//!                 ┌─────────────────────────────────────────┘
//!                 ▼
//!   Reconciler::perform_update(current, next)
//!       │  ModelMatcher / patch ──► MatchResult ──► classify ──► ChangeSet
//!       ▼
//!   Transition ──► AnimatedTransition::frame(now) ──► SceneGraph::evaluate()
//!                                                           │
//!                                                           ▼
//!                                                  ModelChanges ──► renderer
//! ```
//!
//! **[`model`]**: Struct-of-arrays element tree with capability-gated
//! properties, the serializable schema types, and the [`ModelFactory`]
//! that materializes them.
//!
//! **[`dirty`]**: Multi-channel dirty tracking via `understory_dirty`.
//! Geometry, viewport and opacity changes propagate to descendants; selection
//! and route changes are local.
//!
//! **[`matcher`]**: Pairs elements of two graphs by id.
//!
//! **[`reconcile`]**: Classifies matches into [change records](changes) and
//! composes them into a [`Transition`](transition::Transition).
//!
//! **[`animation`]**: Fade, move, resize, edge-morph and compound
//! animations.
//!
//! **[`router`]**: The [`EdgeRouter`](router::EdgeRouter) seam used to
//! snapshot and restore edge routes.
//!
//! **[`command`]**: The update command with execute, undo and redo.
//!
//! **[`time`]**: Host-time instants and durations driving playback.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! reconciliation instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `serde` (disabled by default): Derives `Serialize` and `Deserialize`
//!   for schemas, update actions and configuration.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`ModelFactory`]: model::ModelFactory

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod changes;
pub mod command;
pub mod dirty;
pub mod geometry;
pub mod matcher;
pub mod model;
pub mod reconcile;
pub mod router;
pub mod time;
pub mod trace;
pub mod transition;
