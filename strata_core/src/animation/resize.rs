// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::changes::Resize;
use crate::geometry::lerp_size;
use crate::model::{Capabilities, SceneGraph};

/// Resizes elements, keeping their origin fixed.
#[derive(Clone, Debug, Default)]
pub struct ResizeAnimation {
    resizes: BTreeMap<String, Resize>,
}

impl ResizeAnimation {
    /// Creates an animation for the given records, keyed by element id.
    #[must_use]
    pub fn new(resizes: Vec<Resize>) -> Self {
        Self {
            resizes: resizes.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    /// Returns the record for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Resize> {
        self.resizes.get(id)
    }

    /// Returns the number of resizing elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resizes.len()
    }

    /// Returns `true` if nothing resizes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resizes.is_empty()
    }

    pub(crate) fn tween(&self, graph: &mut SceneGraph, t: f64) {
        for r in self.resizes.values() {
            if graph.is_alive(r.element) && graph.has(r.element, Capabilities::SIZEABLE) {
                graph.set_size(r.element, lerp_size(r.from, r.to, t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kurbo::{Point, Size};

    use super::*;

    #[test]
    fn tween_interpolates_size_and_keeps_origin() {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let root = g.root();
        let n = g.create_element(root, "n", "node", Capabilities::NODE);
        g.set_position(n, Point::new(7.0, 7.0));
        let anim = ResizeAnimation::new(vec![Resize {
            element: n,
            id: "n".to_string(),
            from: Size::new(10.0, 10.0),
            to: Size::new(30.0, 20.0),
        }]);

        anim.tween(&mut g, 0.5);
        assert_eq!(g.size(n), Size::new(20.0, 15.0));
        assert_eq!(g.position(n), Point::new(7.0, 7.0));
    }
}
