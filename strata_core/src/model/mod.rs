// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagram scene-graph data model.
//!
//! An *element* is a node in a diagram tree. Each element has:
//!
//! - An identity: an [`ElementId`] generational handle that becomes stale when
//!   the element is removed, plus a logical string id that is stable across
//!   snapshots and used for matching.
//! - A type tag and a set of [`Capabilities`] that gate which properties it
//!   carries.
//! - Topology: parent, first-child and sibling links forming an ordered tree.
//! - **Local properties**: [`position`](SceneGraph::set_position),
//!   [`size`](SceneGraph::set_size), [`opacity`](SceneGraph::set_opacity),
//!   [`selection`](SceneGraph::set_selected),
//!   [`viewport`](SceneGraph::set_viewport) and
//!   [`route`](SceneGraph::set_route).
//! - **Computed properties** produced by [`evaluate`](SceneGraph::evaluate):
//!   `world_origin` and `effective_opacity`.
//!
//! Graphs are built from [`RootSchema`]s by a [`ModelFactory`] and exported
//! back with [`SceneGraph::to_schema`].

mod capability;
mod evaluate;
mod factory;
mod id;
mod schema;
mod store;
mod traverse;

pub use capability::{Capabilities, EdgeRoute, Viewport};
pub use evaluate::ModelChanges;
pub use factory::{DefaultModelFactory, ModelFactory, SchemaError};
pub use id::{ElementId, INVALID};
pub use schema::{ElementSchema, MatchSchema, RootSchema};
pub use store::SceneGraph;
pub use traverse::{Children, Descendants};
