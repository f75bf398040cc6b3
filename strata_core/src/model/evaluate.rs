// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame evaluation and change reporting.
//!
//! Evaluation drains each dirty channel in turn:
//!
//! 1. **BOUNDS**: recompute `world_origin` as the parent's world origin plus
//!    the element's local position (non-locatable elements inherit the
//!    parent's origin unchanged).
//! 2. **OPACITY**: recompute `effective_opacity` as the product of the
//!    parent's effective opacity and the local opacity.
//! 3. **ROUTE** / **SELECTION**: collect only; renderers read the current
//!    values from the graph.
//! 4. **TOPOLOGY**: drain and discard; the traversal order was already
//!    rebuilt if needed.
//!
//! [`ModelChanges`] carries raw slot indices so that renderers can index the
//! graph without building handles for every entry.

use alloc::vec::Vec;

use kurbo::Point;

use super::capability::Capabilities;
use super::id::INVALID;
use super::store::SceneGraph;
use crate::dirty;

/// The set of changes produced by a single [`SceneGraph::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct ModelChanges {
    /// Elements whose position, size, or world origin changed.
    pub bounds: Vec<u32>,
    /// Elements whose effective opacity was recomputed.
    pub opacities: Vec<u32>,
    /// Edges whose routing changed.
    pub routes: Vec<u32>,
    /// Elements whose selection flag changed.
    pub selections: Vec<u32>,
    /// Elements added since the last evaluate.
    pub added: Vec<u32>,
    /// Elements removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the tree topology changed (traversal order was rebuilt).
    pub topology_changed: bool,
}

impl ModelChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.bounds.clear();
        self.opacities.clear();
        self.routes.clear();
        self.selections.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
            && self.opacities.is_empty()
            && self.routes.is_empty()
            && self.selections.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }
}

impl SceneGraph {
    /// Evaluates the graph, recomputing inherited properties and returning
    /// the set of changes since the previous call.
    pub fn evaluate(&mut self) -> ModelChanges {
        let mut changes = ModelChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut ModelChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let dirty_bounds: Vec<u32> = self
            .dirty
            .drain(dirty::BOUNDS)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_bounds {
            let i = idx as usize;
            let parent_idx = self.parent[i];
            let parent_origin = if parent_idx != INVALID {
                self.world_origin[parent_idx as usize]
            } else {
                Point::ZERO
            };
            let local = if parent_idx != INVALID
                && self.capabilities[i].contains(Capabilities::LOCATABLE)
            {
                self.position[i].to_vec2()
            } else {
                kurbo::Vec2::ZERO
            };
            self.world_origin[i] = parent_origin + local;
        }
        changes.bounds = dirty_bounds;

        let dirty_opacities: Vec<u32> = self
            .dirty
            .drain(dirty::OPACITY)
            .affected()
            .deterministic()
            .run()
            .collect();
        for &idx in &dirty_opacities {
            let parent_idx = self.parent[idx as usize];
            let parent_opacity = if parent_idx != INVALID {
                self.effective_opacity[parent_idx as usize]
            } else {
                1.0
            };
            self.effective_opacity[idx as usize] = parent_opacity * self.opacity[idx as usize];
        }
        changes.opacities = dirty_opacities;

        changes.routes = self
            .dirty
            .drain(dirty::ROUTE)
            .deterministic()
            .run()
            .collect();

        changes.selections = self
            .dirty
            .drain(dirty::SELECTION)
            .deterministic()
            .run()
            .collect();

        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current traversal order (depth-first pre-order from the
    /// root).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        let mut stack = alloc::vec![self.root];
        while let Some(idx) = stack.pop() {
            self.traversal_order.push(idx);
            let mut child = self.first_child[idx as usize];
            let start = stack.len();
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
            stack[start..].reverse();
        }
    }
}
