// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::changes::{Fade, FadeDirection};
use crate::model::{Capabilities, SceneGraph};

/// Fades elements in (opacity `t`) or out (opacity `1 − t`).
///
/// Elements that fade out are ghosts inserted by reconciliation; they are
/// removed from the graph when the animation finishes.
#[derive(Clone, Debug, Default)]
pub struct FadeAnimation {
    fades: Vec<Fade>,
}

impl FadeAnimation {
    /// Creates an animation for the given records.
    #[must_use]
    pub fn new(fades: Vec<Fade>) -> Self {
        Self { fades }
    }

    /// Returns the records being played.
    #[must_use]
    pub fn fades(&self) -> &[Fade] {
        &self.fades
    }

    pub(crate) fn tween(&self, graph: &mut SceneGraph, t: f64) {
        for fade in &self.fades {
            if !graph.is_alive(fade.element) || !graph.has(fade.element, Capabilities::FADEABLE) {
                continue;
            }
            let opacity = match fade.direction {
                FadeDirection::In => t,
                FadeDirection::Out => 1.0 - t,
            };
            graph.set_opacity(fade.element, opacity);
        }
    }

    pub(crate) fn finish(&self, graph: &mut SceneGraph) {
        self.tween(graph, 1.0);
        for fade in &self.fades {
            if fade.direction == FadeDirection::Out
                && graph.is_alive(fade.element)
                && !graph.is_root(fade.element)
            {
                graph.remove_subtree(fade.element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::model::ElementId;

    fn setup() -> (SceneGraph, ElementId, ElementId) {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let root = g.root();
        let a = g.create_element(root, "in", "node", Capabilities::NODE);
        let b = g.create_element(root, "out", "node", Capabilities::NODE);
        (g, a, b)
    }

    fn animation(a: ElementId, b: ElementId) -> FadeAnimation {
        FadeAnimation::new(vec![
            Fade {
                element: a,
                id: "in".to_string(),
                direction: FadeDirection::In,
            },
            Fade {
                element: b,
                id: "out".to_string(),
                direction: FadeDirection::Out,
            },
        ])
    }

    #[test]
    fn tween_sets_opacity_per_direction() {
        let (mut g, a, b) = setup();
        animation(a, b).tween(&mut g, 0.25);
        assert_eq!(g.opacity(a), 0.25);
        assert_eq!(g.opacity(b), 0.75);
    }

    #[test]
    fn finish_removes_faded_out_elements() {
        let (mut g, a, b) = setup();
        let anim = animation(a, b);
        anim.finish(&mut g);
        assert_eq!(g.opacity(a), 1.0);
        assert!(!g.is_alive(b));
        assert!(!g.contains_id("out"));
        // A second finish is harmless.
        anim.finish(&mut g);
        assert_eq!(g.len(), 2);
    }
}
