// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::changes::Move;
use crate::model::{Capabilities, SceneGraph};

/// Moves elements along straight lines.
#[derive(Clone, Debug, Default)]
pub struct MoveAnimation {
    moves: BTreeMap<String, Move>,
}

impl MoveAnimation {
    /// Creates an animation for the given records, keyed by element id.
    ///
    /// A later record for the same id replaces an earlier one.
    #[must_use]
    pub fn new(moves: Vec<Move>) -> Self {
        Self {
            moves: moves.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    /// Returns the record for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Move> {
        self.moves.get(id)
    }

    /// Returns the number of moving elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if nothing moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub(crate) fn tween(&self, graph: &mut SceneGraph, t: f64) {
        for m in self.moves.values() {
            if graph.is_alive(m.element) && graph.has(m.element, Capabilities::LOCATABLE) {
                graph.set_position(m.element, m.from.lerp(m.to, t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kurbo::Point;

    use super::*;

    #[test]
    fn tween_interpolates_positions() {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let root = g.root();
        let n = g.create_element(root, "n", "node", Capabilities::NODE);
        let anim = MoveAnimation::new(vec![Move {
            element: n,
            id: "n".to_string(),
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 40.0),
        }]);

        anim.tween(&mut g, 0.5);
        assert_eq!(g.position(n), Point::new(50.0, 20.0));
        anim.tween(&mut g, 1.0);
        assert_eq!(g.position(n), Point::new(100.0, 40.0));
        assert_eq!(anim.len(), 1);
        assert!(anim.get("n").is_some());
    }
}
