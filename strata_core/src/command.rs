// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The update-model command: execute, undo and redo.
//!
//! An [`UpdateModel`] action carries either a complete new diagram or a patch
//! against the current one. [`UpdateModelCommand::execute`] builds the next
//! graph and reconciles the current graph into it. The returned
//! [`UpdateRecord`] keeps untouched copies of both graphs, so
//! [`undo`](UpdateModelCommand::undo) and [`redo`](UpdateModelCommand::redo)
//! can reconcile between them again in either direction.

use alloc::string::String;
use alloc::vec::Vec;

use crate::model::{MatchSchema, ModelFactory, RootSchema, SceneGraph, SchemaError};
use crate::reconcile::Reconciler;
use crate::trace::{CommandEvent, CommandPhase};
use crate::transition::Transition;

/// What an update replaces the current diagram with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpdatePayload {
    /// A complete new diagram.
    Root(RootSchema),
    /// Incremental changes to the current diagram.
    Patch(Vec<MatchSchema>),
}

/// A request to replace the current diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateModel {
    /// The new content.
    pub payload: UpdatePayload,
    /// Whether the update may be animated.
    #[cfg_attr(feature = "serde", serde(default = "animate_by_default"))]
    pub animate: bool,
    /// Free-form origin of the update, for tracing only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub cause: Option<String>,
}

#[cfg(feature = "serde")]
fn animate_by_default() -> bool {
    true
}

impl UpdateModel {
    /// An animated replacement by a complete diagram.
    #[must_use]
    pub fn new(root: RootSchema) -> Self {
        Self {
            payload: UpdatePayload::Root(root),
            animate: true,
            cause: None,
        }
    }

    /// An animated patch.
    #[must_use]
    pub fn patch(matches: Vec<MatchSchema>) -> Self {
        Self {
            payload: UpdatePayload::Patch(matches),
            animate: true,
            cause: None,
        }
    }

    /// Sets whether the update may be animated.
    #[must_use]
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Sets the cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// Both sides of an executed update.
///
/// The graphs are kept exactly as they were before reconciliation touched
/// them: no ghosts, no start-of-animation state.
#[derive(Clone, Debug)]
pub struct UpdateRecord {
    previous: SceneGraph,
    next: SceneGraph,
}

impl UpdateRecord {
    /// The graph that was current before the update.
    #[must_use]
    pub fn previous(&self) -> &SceneGraph {
        &self.previous
    }

    /// The graph the update produced.
    #[must_use]
    pub fn next(&self) -> &SceneGraph {
        &self.next
    }
}

/// The result of [`UpdateModelCommand::execute`].
#[derive(Debug)]
pub struct Executed {
    /// How to get from the current graph to the next one.
    pub transition: Transition,
    /// What undo and redo need.
    pub record: UpdateRecord,
}

/// Applies an [`UpdateModel`] action.
///
/// The command holds only the action; every call re-derives matches and
/// animations from the graphs it is given.
#[derive(Clone, Debug)]
pub struct UpdateModelCommand {
    action: UpdateModel,
}

impl UpdateModelCommand {
    /// Wraps an action.
    #[must_use]
    pub fn new(action: UpdateModel) -> Self {
        Self { action }
    }

    /// Returns the action.
    #[must_use]
    pub fn action(&self) -> &UpdateModel {
        &self.action
    }

    /// Builds the next graph and reconciles `current` into it.
    ///
    /// A patch is applied to a copy of `current` in two passes: every
    /// element named by a left side is removed first, then every right side
    /// is materialized under its parent (or the root when that parent does
    /// not exist or cannot own children).
    pub fn execute(
        &self,
        reconciler: &mut Reconciler<'_>,
        current: &SceneGraph,
    ) -> Result<Executed, SchemaError> {
        reconciler.tracer().command(&CommandEvent {
            phase: CommandPhase::Execute,
            cause: self.action.cause.as_deref(),
        });

        let next = match &self.action.payload {
            UpdatePayload::Root(root) => reconciler.factory().create_root(root)?,
            UpdatePayload::Patch(patch) => apply_patch(reconciler.factory(), current, patch)?,
        };
        let transition = reconciler.perform_update(
            current,
            next.clone(),
            self.patch(),
            self.action.animate,
        );
        Ok(Executed {
            transition,
            record: UpdateRecord {
                previous: current.clone(),
                next,
            },
        })
    }

    /// Reconciles the next graph back into the previous one.
    ///
    /// A patch is mirrored so that its additions become removals and vice
    /// versa.
    pub fn undo(&self, reconciler: &mut Reconciler<'_>, record: &UpdateRecord) -> Transition {
        reconciler.tracer().command(&CommandEvent {
            phase: CommandPhase::Undo,
            cause: self.action.cause.as_deref(),
        });
        let mirrored: Option<Vec<MatchSchema>> = self
            .patch()
            .map(|patch| patch.iter().map(MatchSchema::mirrored).collect());
        reconciler.perform_update(
            &record.next,
            record.previous.clone(),
            mirrored.as_deref(),
            self.action.animate,
        )
    }

    /// Reconciles the previous graph into the next one again.
    pub fn redo(&self, reconciler: &mut Reconciler<'_>, record: &UpdateRecord) -> Transition {
        reconciler.tracer().command(&CommandEvent {
            phase: CommandPhase::Redo,
            cause: self.action.cause.as_deref(),
        });
        reconciler.perform_update(
            &record.previous,
            record.next.clone(),
            self.patch(),
            self.action.animate,
        )
    }

    fn patch(&self) -> Option<&[MatchSchema]> {
        match &self.action.payload {
            UpdatePayload::Root(_) => None,
            UpdatePayload::Patch(patch) => Some(patch),
        }
    }
}

fn apply_patch(
    factory: &dyn ModelFactory,
    current: &SceneGraph,
    patch: &[MatchSchema],
) -> Result<SceneGraph, SchemaError> {
    let mut graph = current.clone();
    for left in patch.iter().filter_map(|m| m.left.as_ref()) {
        if let Some(element) = graph.get_by_id(&left.id)
            && !graph.is_root(element)
        {
            graph.remove_subtree(element);
        }
    }
    for m in patch {
        if let Some(right) = &m.right {
            let parent = graph.resolve_container(m.right_parent_id.as_deref());
            factory.create_element(&mut graph, parent, right)?;
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;
    use crate::model::{DefaultModelFactory, ElementSchema};

    fn current(factory: &DefaultModelFactory) -> SceneGraph {
        factory
            .create_root(
                &RootSchema::new("g", "graph")
                    .with_child(ElementSchema::new("a", "node").at(0.0, 0.0))
                    .with_child(ElementSchema::new("b", "node").at(10.0, 0.0)),
            )
            .unwrap()
    }

    #[test]
    fn patch_removes_before_adding() {
        let factory = DefaultModelFactory::new();
        let g = current(&factory);
        let patch = vec![
            MatchSchema::add(ElementSchema::new("a", "node").at(99.0, 0.0), "g"),
            MatchSchema::remove(ElementSchema::new("a", "node"), "g"),
        ];
        let next = apply_patch(&factory, &g, &patch).unwrap();
        let a = next.get_by_id("a").unwrap();
        assert_eq!(next.position(a), Point::new(99.0, 0.0));
        // The original graph is untouched.
        assert_eq!(g.position(g.get_by_id("a").unwrap()), Point::ZERO);
    }

    #[test]
    fn patch_falls_back_to_root_parent() {
        let factory = DefaultModelFactory::new();
        let g = current(&factory);
        let patch = vec![MatchSchema::add(ElementSchema::new("c", "node"), "nowhere")];
        let next = apply_patch(&factory, &g, &patch).unwrap();
        let c = next.get_by_id("c").unwrap();
        assert_eq!(next.parent(c), Some(next.root()));
    }

    #[test]
    fn patch_never_removes_the_root() {
        let factory = DefaultModelFactory::new();
        let g = current(&factory);
        let patch = vec![MatchSchema::remove(ElementSchema::new("g", "graph"), "g")];
        let next = apply_patch(&factory, &g, &patch).unwrap();
        assert_eq!(next.len(), g.len());
    }

    #[test]
    fn execute_reports_schema_errors() {
        let factory = DefaultModelFactory::new();
        let g = current(&factory);
        let mut reconciler = Reconciler::new(&factory);
        let command = UpdateModelCommand::new(UpdateModel::patch(vec![MatchSchema::add(
            ElementSchema::new("b", "node"),
            "g",
        )]));
        assert_eq!(
            command.execute(&mut reconciler, &g).unwrap_err(),
            SchemaError::DuplicateId("b".into())
        );
    }

    #[test]
    fn record_keeps_pristine_graphs() {
        let factory = DefaultModelFactory::new();
        let g = current(&factory);
        let mut reconciler = Reconciler::new(&factory);
        let command = UpdateModelCommand::new(
            UpdateModel::new(
                RootSchema::new("g", "graph").with_child(ElementSchema::new("a", "node").at(50.0, 0.0)),
            )
            .with_cause("test"),
        );
        let executed = command.execute(&mut reconciler, &g).unwrap();
        assert!(executed.transition.is_animated());

        let next = executed.record.next();
        assert_eq!(next.position(next.get_by_id("a").unwrap()), Point::new(50.0, 0.0));
        assert!(!next.contains_id("b"));
        assert!(executed.record.previous().contains_id("b"));
        // The transition's graph carries the ghost of "b" until it finishes.
        assert!(executed.transition.root().contains_id("b"));
    }
}
