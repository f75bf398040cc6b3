// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciling an old graph with its replacement.
//!
//! [`Reconciler::perform_update`] decides whether an update is animated,
//! classifies every matched id into change records and composes those into a
//! [`Transition`]:
//!
//! ```text
//!   old, new ──► animate && same root id? ──no──► carry over canvas/viewport
//!                          │                          └──► Transition::Instant
//!                         yes
//!                          ▼
//!        MatchResult (patch or ModelMatcher) ──► classify ──► ChangeSet
//!                                                                 │
//!                                                  compose ◄──────┘
//!                                                     │
//!                          Transition::Instant | Transition::Animated
//! ```
//!
//! Classification writes into the new graph: moved elements are put back at
//! their old position, added elements start transparent, and removed
//! elements are cloned back in as ghosts that fade out.

use alloc::vec::Vec;

use crate::animation::{
    Animation, AnimationContext, CompoundAnimation, FadeAnimation, MorphEdgesAnimation,
    MoveAnimation, ResizeAnimation,
};
use crate::changes::{ChangeSet, EdgeMemento, Fade, FadeDirection, Move, Resize};
use crate::geometry::{
    DEFAULT_EPSILON, is_valid_rect, is_valid_size, points_almost_equal, sizes_almost_equal,
};
use crate::matcher::{Match, MatchResult, ModelMatcher};
use crate::model::{Capabilities, ElementId, ElementSchema, MatchSchema, ModelFactory, SceneGraph};
use crate::router::EdgeRouterRegistry;
use crate::time::Duration;
use crate::trace::{
    ChangeEvent, ChangeKind, MatchEvent, MatchKind, ReconcileBeginEvent, ReconcileSummary,
    Tracer, TransitionEvent, TransitionKind,
};
use crate::transition::{AnimatedTransition, Transition};

/// Tolerances used during classification.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileConfig {
    /// Coordinates and dimensions that differ by at most this much are
    /// considered unchanged.
    pub epsilon: f64,
}

impl ReconcileConfig {
    /// `epsilon` of `1e-3`.
    pub const DEFAULT: Self = Self {
        epsilon: DEFAULT_EPSILON,
    };

    /// Returns a copy with a different tolerance.
    #[must_use]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Turns graph replacements into transitions.
///
/// The reconciler borrows its collaborators and holds no state between
/// calls, so one instance can serve any number of updates.
pub struct Reconciler<'a> {
    factory: &'a dyn ModelFactory,
    routers: Option<&'a EdgeRouterRegistry>,
    config: ReconcileConfig,
    context: AnimationContext,
    tracer: Tracer<'a>,
}

impl core::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reconciler")
            .field("routers", &self.routers)
            .field("config", &self.config)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler with default tolerances and timing, without edge
    /// routers and without tracing.
    #[must_use]
    pub fn new(factory: &'a dyn ModelFactory) -> Self {
        Self {
            factory,
            routers: None,
            config: ReconcileConfig::DEFAULT,
            context: AnimationContext::DEFAULT,
            tracer: Tracer::none(),
        }
    }

    /// Enables edge morphing through the given routers.
    #[must_use]
    pub fn with_routers(mut self, routers: &'a EdgeRouterRegistry) -> Self {
        self.routers = Some(routers);
        self
    }

    /// Sets the tolerances.
    #[must_use]
    pub fn with_config(mut self, config: ReconcileConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the timing of composed animations.
    #[must_use]
    pub fn with_context(mut self, context: AnimationContext) -> Self {
        self.context = context;
        self
    }

    /// Sends trace events to `tracer`.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer<'a>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Returns the factory used to materialize schemas and ghosts.
    #[must_use]
    pub fn factory(&self) -> &'a dyn ModelFactory {
        self.factory
    }

    /// Returns the edge routers, if any.
    #[must_use]
    pub fn routers(&self) -> Option<&'a EdgeRouterRegistry> {
        self.routers
    }

    /// Returns the tolerances.
    #[must_use]
    pub fn config(&self) -> ReconcileConfig {
        self.config
    }

    /// Returns the animation timing.
    #[must_use]
    pub fn context(&self) -> AnimationContext {
        self.context
    }

    pub(crate) fn tracer(&mut self) -> &mut Tracer<'a> {
        &mut self.tracer
    }

    /// Replaces `old` with `new`.
    ///
    /// The update is animated only if `animate` is set and both roots carry
    /// the same id. Otherwise the canvas bounds (same root type, valid old
    /// bounds) and the viewport (both roots viewport-capable) are carried
    /// over and `new` is shown as is. A `patch` replaces the full match of
    /// both graphs with the listed correspondences.
    pub fn perform_update(
        &mut self,
        old: &SceneGraph,
        mut new: SceneGraph,
        patch: Option<&[MatchSchema]>,
        animate: bool,
    ) -> Transition {
        let old_root = old.root();
        let new_root = new.root();
        self.tracer.reconcile_begin(&ReconcileBeginEvent {
            old_root: old.id(old_root),
            new_root: new.id(new_root),
            animate,
            patched: patch.is_some(),
        });

        if animate && old.id(old_root) == new.id(new_root) {
            let matches = match patch {
                Some(patch) => MatchResult::from_patch(patch, old, &new),
                None => ModelMatcher::match_graphs(old, &new),
            };
            let changes = self.classify(old, &mut new, &matches);
            self.compose(new, changes)
        } else {
            carry_over(old, &mut new);
            self.instant(new)
        }
    }

    /// Classifies every entry of `matches` and prepares `new` for the start
    /// of the animation.
    ///
    /// - Persisted ids yield moves, resizes and edge mementos; selection,
    ///   canvas bounds and viewport are copied from the old element.
    /// - Added fadeable elements are made transparent and fade in.
    /// - Removed fadeable elements that are absent from `new` are cloned
    ///   under their old parent (or the root) and fade out.
    pub fn classify(
        &mut self,
        old: &SceneGraph,
        new: &mut SceneGraph,
        matches: &MatchResult,
    ) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let mut summary = ReconcileSummary::default();

        for (id, m) in matches.iter() {
            let kind = match (m.left, m.right) {
                (Some(left), Some(right)) => {
                    self.update_element(old, left, new, right, &mut changes);
                    MatchKind::Persisted
                }
                (None, Some(right)) => {
                    if new.has(right, Capabilities::FADEABLE) {
                        new.set_opacity(right, 0.0);
                        changes.fades.push(Fade {
                            element: right,
                            id: id.into(),
                            direction: FadeDirection::In,
                        });
                    }
                    MatchKind::Added
                }
                (Some(left), None) => self.insert_ghost(old, left, m, new, &mut changes),
                (None, None) => continue,
            };
            self.tracer.matched(&MatchEvent { id, kind });
            summary.record_match(kind);
        }

        self.trace_changes(&changes);
        changes.count_into(&mut summary);
        self.tracer.reconcile_summary(&summary);
        changes
    }

    /// Bundles change records into a transition into `new`.
    ///
    /// Fades, moves, resizes and edge morphs each become one animation; two
    /// or more are played as a compound. Without any records `new` is shown
    /// instantly.
    pub fn compose(&mut self, new: SceneGraph, changes: ChangeSet) -> Transition {
        let ChangeSet {
            fades,
            moves,
            resizes,
            edges,
        } = changes;

        let mut parts = Vec::with_capacity(4);
        if !fades.is_empty() {
            parts.push(Animation::Fade(FadeAnimation::new(fades)));
        }
        if !moves.is_empty() {
            parts.push(Animation::Move(MoveAnimation::new(moves)));
        }
        if !resizes.is_empty() {
            parts.push(Animation::Resize(ResizeAnimation::new(resizes)));
        }
        if let Some(routers) = self.routers {
            let mut morph = MorphEdgesAnimation::new();
            for memento in edges {
                if let Some(router) = routers.get(&memento.after.router_kind) {
                    morph.push(memento, router.clone());
                }
            }
            if !morph.is_empty() {
                parts.push(Animation::MorphEdges(morph));
            }
        }

        let animation = match parts.len() {
            0 => return self.instant(new),
            1 => parts.swap_remove(0),
            _ => Animation::Compound(CompoundAnimation::new(parts)),
        };
        self.tracer.transition(&TransitionEvent {
            kind: TransitionKind::Animated,
            animations: animation.leaf_count(),
            duration: self.context.duration,
        });
        Transition::Animated(AnimatedTransition::new(new, animation, self.context))
    }

    fn instant(&mut self, new: SceneGraph) -> Transition {
        self.tracer.transition(&TransitionEvent {
            kind: TransitionKind::Instant,
            animations: 0,
            duration: Duration::ZERO,
        });
        Transition::Instant(new)
    }

    fn update_element(
        &self,
        old: &SceneGraph,
        left: ElementId,
        new: &mut SceneGraph,
        right: ElementId,
        changes: &mut ChangeSet,
    ) {
        let shared = old.capabilities(left) & new.capabilities(right);
        let both = |caps: Capabilities| shared.contains(caps);
        let epsilon = self.config.epsilon;

        if both(Capabilities::LOCATABLE) {
            let from = old.position(left);
            let to = new.position(right);
            if !points_almost_equal(from, to, epsilon) {
                changes.moves.push(Move {
                    element: right,
                    id: new.id(right).into(),
                    from,
                    to,
                });
                new.set_position(right, from);
            }
        }

        if both(Capabilities::SIZEABLE) {
            let from = old.size(left);
            let to = new.size(right);
            if !is_valid_size(to) {
                new.set_size(right, from);
            } else if !sizes_almost_equal(from, to, epsilon) {
                changes.resizes.push(Resize {
                    element: right,
                    id: new.id(right).into(),
                    from,
                    to,
                });
            }
        }

        if both(Capabilities::ROUTABLE)
            && let Some(routers) = self.routers
            && let Some(before_router) = routers.router_for(old, left)
            && let Some(after_router) = routers.router_for(new, right)
        {
            changes.edges.push(EdgeMemento {
                edge: right,
                id: new.id(right).into(),
                before: before_router.take_snapshot(old, left),
                after: after_router.take_snapshot(new, right),
            });
        }

        if both(Capabilities::SELECTABLE) {
            new.set_selected(right, old.is_selected(left));
        }

        if old.is_root(left) && new.is_root(right) {
            new.set_canvas_bounds(old.canvas_bounds());
        }

        if both(Capabilities::VIEWPORT)
            && let Some(viewport) = old.viewport(left)
        {
            new.set_viewport(right, viewport);
        }
    }

    /// Clones a removed element back into `new` so that it can fade out.
    fn insert_ghost(
        &self,
        old: &SceneGraph,
        left: ElementId,
        m: &Match,
        new: &mut SceneGraph,
        changes: &mut ChangeSet,
    ) -> MatchKind {
        let id = old.id(left);
        if old.is_root(left)
            || !old.has(left, Capabilities::FADEABLE)
            || m.left_parent_id.is_none()
            || new.contains_id(id)
        {
            return MatchKind::Skipped;
        }

        let parent = new.resolve_container(m.left_parent_id.as_deref());
        let mut schema = old.to_schema(left);
        prune_existing(&mut schema.children, new);
        match self.factory.create_element(new, parent, &schema) {
            Ok(ghost) => {
                changes.fades.push(Fade {
                    element: ghost,
                    id: id.into(),
                    direction: FadeDirection::Out,
                });
                MatchKind::Removed
            }
            Err(_) => MatchKind::Skipped,
        }
    }

    fn trace_changes(&mut self, changes: &ChangeSet) {
        for fade in &changes.fades {
            let kind = match fade.direction {
                FadeDirection::In => ChangeKind::FadeIn,
                FadeDirection::Out => ChangeKind::FadeOut,
            };
            self.tracer.change(&ChangeEvent { id: &fade.id, kind });
        }
        for m in &changes.moves {
            self.tracer.change(&ChangeEvent {
                id: &m.id,
                kind: ChangeKind::Move,
            });
        }
        for r in &changes.resizes {
            self.tracer.change(&ChangeEvent {
                id: &r.id,
                kind: ChangeKind::Resize,
            });
        }
        for e in &changes.edges {
            self.tracer.change(&ChangeEvent {
                id: &e.id,
                kind: ChangeKind::EdgeMorph,
            });
        }
    }
}

/// Carries root state over for updates that are not animated.
fn carry_over(old: &SceneGraph, new: &mut SceneGraph) {
    let old_root = old.root();
    let new_root = new.root();
    if old.kind(old_root) == new.kind(new_root) && is_valid_rect(old.canvas_bounds()) {
        new.set_canvas_bounds(old.canvas_bounds());
    }
    if old.has(old_root, Capabilities::VIEWPORT)
        && new.has(new_root, Capabilities::VIEWPORT)
        && let Some(viewport) = old.viewport(old_root)
    {
        new.set_viewport(new_root, viewport);
    }
}

/// Drops descendants whose ids already exist in `graph`, with their subtrees.
fn prune_existing(children: &mut Vec<ElementSchema>, graph: &SceneGraph) {
    children.retain(|child| !graph.contains_id(&child.id));
    for child in children {
        prune_existing(&mut child.children, graph);
    }
}
