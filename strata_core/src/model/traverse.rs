// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec;
use alloc::vec::Vec;

use super::id::{ElementId, INVALID};
use super::store::SceneGraph;

/// An iterator over the direct children of an element, in order.
///
/// Created by [`SceneGraph::children`].
#[derive(Debug)]
pub struct Children<'a> {
    graph: &'a SceneGraph,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(graph: &'a SceneGraph, first: u32) -> Self {
        Self {
            graph,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.graph.next_sibling[idx as usize];
        Some(self.graph.handle(idx))
    }
}

/// A depth-first pre-order iterator over an element and all of its
/// descendants.
///
/// Created by [`SceneGraph::descendants`]. The starting element is yielded
/// first.
#[derive(Debug)]
pub struct Descendants<'a> {
    graph: &'a SceneGraph,
    stack: Vec<u32>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(graph: &'a SceneGraph, start: u32) -> Self {
        Self {
            graph,
            stack: vec![start],
        }
    }
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let idx = self.stack.pop()?;
        // Push children in reverse so the first child is visited next.
        let mut last = self.graph.first_child[idx as usize];
        if last != INVALID {
            while self.graph.next_sibling[last as usize] != INVALID {
                last = self.graph.next_sibling[last as usize];
            }
            let mut child = last;
            while child != INVALID {
                self.stack.push(child);
                child = self.graph.prev_sibling[child as usize];
            }
        }
        Some(self.graph.handle(idx))
    }
}
