// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge routers and route snapshots.
//!
//! A router turns an edge's user-defined routing points into the path that
//! is actually drawn. Reconciliation does not route anything itself: it only
//! asks the router to [snapshot](EdgeRouter::take_snapshot) an edge in the
//! old and in the new graph, and the edge morph animation later
//! [applies](EdgeRouter::apply_snapshot) interpolated snapshots.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::geometry::is_valid_size;
use crate::model::{Capabilities, ElementId, SceneGraph};

/// Router kind used when an edge does not name one.
pub const DEFAULT_ROUTER_KIND: &str = PolylineRouter::KIND;

/// The routing state of one edge at one point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteSnapshot {
    /// Router that produced the snapshot.
    pub router_kind: String,
    /// User-defined bend points.
    pub routing_points: Vec<Point>,
    /// The full drawn path, including endpoints, in root coordinates.
    pub routed_points: Vec<Point>,
}

/// Computes and restores edge routes.
pub trait EdgeRouter: fmt::Debug {
    /// Captures the current route of `edge`.
    fn take_snapshot(&self, graph: &SceneGraph, edge: ElementId) -> RouteSnapshot;

    /// Restores a previously captured (or interpolated) route on `edge`.
    fn apply_snapshot(&self, graph: &mut SceneGraph, edge: ElementId, snapshot: &RouteSnapshot);
}

/// Straight segments from the source center through every routing point to
/// the target center.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolylineRouter;

impl PolylineRouter {
    /// Registry key of this router.
    pub const KIND: &'static str = "polyline";
}

impl EdgeRouter for PolylineRouter {
    fn take_snapshot(&self, graph: &SceneGraph, edge: ElementId) -> RouteSnapshot {
        let Some(route) = graph.route(edge) else {
            return RouteSnapshot {
                router_kind: Self::KIND.to_string(),
                ..RouteSnapshot::default()
            };
        };
        let endpoint = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| graph.get_by_id(id))
                .map(|e| center_in_root(graph, e))
        };

        let mut routed = Vec::with_capacity(route.routing_points.len() + 2);
        routed.extend(endpoint(&route.source_id));
        routed.extend(route.routing_points.iter().copied());
        routed.extend(endpoint(&route.target_id));

        RouteSnapshot {
            router_kind: Self::KIND.to_string(),
            routing_points: route.routing_points.clone(),
            routed_points: routed,
        }
    }

    fn apply_snapshot(&self, graph: &mut SceneGraph, edge: ElementId, snapshot: &RouteSnapshot) {
        graph.set_routing_points(edge, snapshot.routing_points.clone());
    }
}

/// Sums local positions up to the root.
///
/// Unlike [`SceneGraph::world_origin`] this does not depend on a prior
/// evaluate, which freshly materialized graphs have not had.
fn center_in_root(graph: &SceneGraph, element: ElementId) -> Point {
    let mut origin = Vec2::ZERO;
    let mut current = Some(element);
    while let Some(e) = current {
        if graph.has(e, Capabilities::LOCATABLE) {
            origin += graph.position(e).to_vec2();
        }
        current = graph.parent(e);
    }
    let size = graph.size(element);
    let half = if is_valid_size(size) {
        Vec2::new(size.width / 2.0, size.height / 2.0)
    } else {
        Vec2::ZERO
    };
    (origin + half).to_point()
}

/// Routers keyed by kind.
///
/// Routers are shared with the edge morph animations composed from this
/// registry, which may outlive it.
#[derive(Clone, Debug)]
pub struct EdgeRouterRegistry {
    routers: BTreeMap<String, Arc<dyn EdgeRouter>>,
}

impl Default for EdgeRouterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl EdgeRouterRegistry {
    /// Creates a registry with no routers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            routers: BTreeMap::new(),
        }
    }

    /// Creates a registry with [`PolylineRouter`] registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(PolylineRouter::KIND, PolylineRouter);
        registry
    }

    /// Registers or replaces the router for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, router: impl EdgeRouter + 'static) {
        self.routers.insert(kind.into(), Arc::new(router));
    }

    /// Returns the router registered for `kind`.
    ///
    /// An empty kind selects [`DEFAULT_ROUTER_KIND`].
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&Arc<dyn EdgeRouter>> {
        let kind = if kind.is_empty() {
            DEFAULT_ROUTER_KIND
        } else {
            kind
        };
        self.routers.get(kind)
    }

    /// Returns the router for the kind named by `edge`'s route.
    #[must_use]
    pub fn router_for(&self, graph: &SceneGraph, edge: ElementId) -> Option<&Arc<dyn EdgeRouter>> {
        self.get(graph.route(edge).map_or("", |r| r.router_kind.as_str()))
    }
}
