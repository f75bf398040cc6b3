// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Point;

use crate::changes::EdgeMemento;
use crate::model::{Capabilities, SceneGraph};
use crate::router::{EdgeRouter, RouteSnapshot};

/// Interpolates edge routing points between two snapshots.
///
/// Point lists of different lengths are aligned by repeating the last point
/// of the shorter one. The final frame applies the `after` snapshot as is.
#[derive(Debug, Default)]
pub struct MorphEdgesAnimation {
    edges: Vec<(EdgeMemento, Arc<dyn EdgeRouter>)>,
}

impl MorphEdgesAnimation {
    /// Creates an empty animation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge, restored through `router`.
    pub fn push(&mut self, memento: EdgeMemento, router: Arc<dyn EdgeRouter>) {
        self.edges.push((memento, router));
    }

    /// Returns the number of morphing edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no edge morphs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates over the mementos.
    pub fn mementos(&self) -> impl Iterator<Item = &EdgeMemento> + '_ {
        self.edges.iter().map(|(m, _)| m)
    }

    pub(crate) fn tween(&self, graph: &mut SceneGraph, t: f64) {
        for (memento, router) in &self.edges {
            if !graph.is_alive(memento.edge) || !graph.has(memento.edge, Capabilities::ROUTABLE) {
                continue;
            }
            let snapshot = RouteSnapshot {
                router_kind: memento.after.router_kind.clone(),
                routing_points: interpolate_points(&memento.before, &memento.after, t),
                routed_points: Vec::new(),
            };
            router.apply_snapshot(graph, memento.edge, &snapshot);
        }
    }

    pub(crate) fn finish(&self, graph: &mut SceneGraph) {
        for (memento, router) in &self.edges {
            if graph.is_alive(memento.edge) && graph.has(memento.edge, Capabilities::ROUTABLE) {
                router.apply_snapshot(graph, memento.edge, &memento.after);
            }
        }
    }
}

/// Point-wise lerp of the routing points, padding the shorter list.
///
/// An empty list is padded with the midpoint of its drawn path, or with the
/// other list's points when there is no drawn path either.
fn interpolate_points(before: &RouteSnapshot, after: &RouteSnapshot, t: f64) -> Vec<Point> {
    let from = &before.routing_points;
    let to = &after.routing_points;
    let n = from.len().max(to.len());
    (0..n)
        .map(|i| {
            let a = point_or_pad(from, &before.routed_points, i, to);
            let b = point_or_pad(to, &after.routed_points, i, from);
            a.lerp(b, t)
        })
        .collect()
}

fn point_or_pad(points: &[Point], routed: &[Point], i: usize, other: &[Point]) -> Point {
    if let Some(&p) = points.get(i).or_else(|| points.last()) {
        return p;
    }
    match (routed.first(), routed.last()) {
        (Some(&first), Some(&last)) => first.midpoint(last),
        _ => other[i],
    }
}
