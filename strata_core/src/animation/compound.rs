// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::Animation;
use crate::model::SceneGraph;

/// Plays several animations over the same duration, in order.
#[derive(Debug, Default)]
pub struct CompoundAnimation {
    parts: Vec<Animation>,
}

impl CompoundAnimation {
    /// Creates a compound from its parts.
    #[must_use]
    pub fn new(parts: Vec<Animation>) -> Self {
        Self { parts }
    }

    /// Returns the parts in play order.
    #[must_use]
    pub fn parts(&self) -> &[Animation] {
        &self.parts
    }

    pub(crate) fn tween(&self, graph: &mut SceneGraph, t: f64) {
        for part in &self.parts {
            part.tween(graph, t);
        }
    }

    pub(crate) fn finish(&self, graph: &mut SceneGraph) {
        for part in &self.parts {
            part.finish(graph);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kurbo::{Point, Size};

    use super::*;
    use crate::animation::{MoveAnimation, ResizeAnimation};
    use crate::changes::{Move, Resize};
    use crate::model::Capabilities;

    #[test]
    fn parts_play_in_lockstep() {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let root = g.root();
        let n = g.create_element(root, "n", "node", Capabilities::NODE);
        let compound = Animation::Compound(CompoundAnimation::new(vec![
            Animation::Move(MoveAnimation::new(vec![Move {
                element: n,
                id: "n".to_string(),
                from: Point::ZERO,
                to: Point::new(10.0, 0.0),
            }])),
            Animation::Resize(ResizeAnimation::new(vec![Resize {
                element: n,
                id: "n".to_string(),
                from: Size::new(0.0, 0.0),
                to: Size::new(10.0, 10.0),
            }])),
        ]));

        assert_eq!(compound.leaf_count(), 2);
        compound.tween(&mut g, 0.5);
        assert_eq!(g.position(n), Point::new(5.0, 0.0));
        assert_eq!(g.size(n), Size::new(5.0, 5.0));
        compound.finish(&mut g);
        assert_eq!(g.position(n), Point::new(10.0, 0.0));
        assert_eq!(g.size(n), Size::new(10.0, 10.0));
    }
}
