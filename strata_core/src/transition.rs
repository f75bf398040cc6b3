// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outcome of a reconciliation and its playback.
//!
//! A [`Transition`] either hands over the new graph directly or wraps it in
//! an [`AnimatedTransition`] that the caller drives from its frame clock:
//!
//! ```text
//!   start(now) ──► frame(now) ──► frame(now) ──► … ──► Playback::Finished
//!                      │
//!                      ▼
//!           graph_mut().evaluate() ──► ModelChanges ──► renderer
//! ```
//!
//! Nothing here owns a clock or a timer; a transition only advances when
//! [`frame`](AnimatedTransition::frame) is called.

use crate::animation::{Animation, AnimationContext};
use crate::model::SceneGraph;
use crate::time::HostTime;

/// Playback state reported by [`AnimatedTransition::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Playback {
    /// Still running, with the eased progress that was applied.
    Running(f64),
    /// The end state has been applied.
    Finished,
}

/// A graph together with the animation that leads into it.
#[derive(Debug)]
pub struct AnimatedTransition {
    graph: SceneGraph,
    animation: Animation,
    context: AnimationContext,
    started: Option<HostTime>,
    finished: bool,
}

impl AnimatedTransition {
    pub(crate) fn new(graph: SceneGraph, animation: Animation, context: AnimationContext) -> Self {
        Self {
            graph,
            animation,
            context,
            started: None,
            finished: false,
        }
    }

    /// Returns the animated graph in its current state.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Returns the animated graph mutably, e.g. to [`evaluate`](SceneGraph::evaluate) it.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Returns the animation being played.
    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Returns the timing parameters.
    #[must_use]
    pub fn context(&self) -> AnimationContext {
        self.context
    }

    /// Returns whether the end state has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Starts (or restarts) playback at `now` and applies progress 0.
    pub fn start(&mut self, now: HostTime) {
        self.started = Some(now);
        if !self.finished {
            self.animation.tween(&mut self.graph, self.context.easing.apply(0.0));
        }
    }

    /// Applies the state for `now`.
    ///
    /// The first call starts playback if [`start`](Self::start) was not
    /// called. Once the duration has elapsed the end state is applied and
    /// faded-out elements are removed; later calls do nothing.
    pub fn frame(&mut self, now: HostTime) -> Playback {
        if self.finished {
            return Playback::Finished;
        }
        let start = *self.started.get_or_insert(now);
        let progress = self
            .context
            .duration
            .fraction(now.saturating_duration_since(start));
        if progress >= 1.0 {
            self.finish();
            return Playback::Finished;
        }
        let eased = self.context.easing.apply(progress);
        self.animation.tween(&mut self.graph, eased);
        Playback::Running(eased)
    }

    /// Jumps to the end state.
    pub fn finish(&mut self) {
        if !self.finished {
            self.animation.finish(&mut self.graph);
            self.finished = true;
        }
    }

    /// Jumps to the end state and returns the graph.
    #[must_use]
    pub fn into_graph(mut self) -> SceneGraph {
        self.finish();
        self.graph
    }
}

/// How an update is delivered.
#[derive(Debug)]
pub enum Transition {
    /// Show the graph as is.
    Instant(SceneGraph),
    /// Play an animation into the graph.
    Animated(AnimatedTransition),
}

impl Transition {
    /// Returns the graph that is (or will become) current.
    #[must_use]
    pub fn root(&self) -> &SceneGraph {
        match self {
            Self::Instant(graph) => graph,
            Self::Animated(animated) => animated.graph(),
        }
    }

    /// Returns `true` for [`Transition::Animated`].
    #[must_use]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }

    /// Returns the animated transition, if any.
    pub fn as_animated_mut(&mut self) -> Option<&mut AnimatedTransition> {
        match self {
            Self::Instant(_) => None,
            Self::Animated(animated) => Some(animated),
        }
    }

    /// Returns the final graph, finishing any animation first.
    #[must_use]
    pub fn into_root(self) -> SceneGraph {
        match self {
            Self::Instant(graph) => graph,
            Self::Animated(animated) => animated.into_graph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::animation::{CompoundAnimation, Easing, FadeAnimation, MoveAnimation};
    use crate::changes::{Fade, FadeDirection, Move};
    use crate::model::{Capabilities, ElementId};
    use crate::time::Duration;

    fn setup() -> (AnimatedTransition, ElementId, ElementId) {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let root = g.root();
        let n = g.create_element(root, "n", "node", Capabilities::NODE);
        let ghost = g.create_element(root, "ghost", "node", Capabilities::NODE);
        let animation = Animation::Compound(CompoundAnimation::new(vec![
            Animation::Fade(FadeAnimation::new(vec![Fade {
                element: ghost,
                id: "ghost".to_string(),
                direction: FadeDirection::Out,
            }])),
            Animation::Move(MoveAnimation::new(vec![Move {
                element: n,
                id: "n".to_string(),
                from: Point::ZERO,
                to: Point::new(100.0, 0.0),
            }])),
        ]));
        let ctx = AnimationContext {
            duration: Duration(1000),
            easing: Easing::Linear,
        };
        (AnimatedTransition::new(g, animation, ctx), n, ghost)
    }

    #[test]
    fn frames_follow_elapsed_time() {
        let (mut t, n, ghost) = setup();
        t.start(HostTime(5000));
        assert_eq!(t.graph().position(n), Point::ZERO);
        assert_eq!(t.frame(HostTime(5250)), Playback::Running(0.25));
        assert_eq!(t.graph().position(n), Point::new(25.0, 0.0));
        assert_eq!(t.graph().opacity(ghost), 0.75);
    }

    #[test]
    fn finishing_removes_ghosts() {
        let (mut t, n, ghost) = setup();
        assert_eq!(t.frame(HostTime(0)), Playback::Running(0.0));
        assert_eq!(t.frame(HostTime(2000)), Playback::Finished);
        assert!(t.is_finished());
        assert!(!t.graph().is_alive(ghost));
        assert_eq!(t.graph().position(n), Point::new(100.0, 0.0));
        assert_eq!(t.frame(HostTime(3000)), Playback::Finished);
    }

    #[test]
    fn into_root_jumps_to_end() {
        let (t, n, _) = setup();
        let g = Transition::Animated(t).into_root();
        assert_eq!(g.position(n), Point::new(100.0, 0.0));
        assert!(!g.contains_id("ghost"));
    }

    #[test]
    fn instant_transition_accessors() {
        let g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        let mut t = Transition::Instant(g);
        assert!(!t.is_animated());
        assert!(t.as_animated_mut().is_none());
        assert_eq!(t.root().len(), 1);
    }
}
