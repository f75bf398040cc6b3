// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change records produced by classification and consumed by the composer.
//!
//! Every record refers to an element of the *new* graph and carries both the
//! start and the end state of the property it animates, so that an animation
//! can be replayed from any progress value without consulting the old graph.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};

use crate::model::ElementId;
use crate::router::RouteSnapshot;
use crate::trace::{ChangeKind, ReconcileSummary};

/// Direction of a fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FadeDirection {
    /// Opacity goes from 0 to 1.
    In,
    /// Opacity goes from 1 to 0 and the element is removed at the end.
    Out,
}

/// An element that appears or disappears.
#[derive(Clone, Debug, PartialEq)]
pub struct Fade {
    /// The element in the new graph (a ghost for [`FadeDirection::Out`]).
    pub element: ElementId,
    /// Its logical id.
    pub id: String,
    /// Whether it fades in or out.
    pub direction: FadeDirection,
}

/// An element whose position changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    /// The element in the new graph.
    pub element: ElementId,
    /// Its logical id.
    pub id: String,
    /// Position in the old graph.
    pub from: Point,
    /// Position in the new graph.
    pub to: Point,
}

/// An element whose size changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Resize {
    /// The element in the new graph.
    pub element: ElementId,
    /// Its logical id.
    pub id: String,
    /// Size in the old graph.
    pub from: Size,
    /// Size in the new graph.
    pub to: Size,
}

/// Routing snapshots of an edge before and after an update.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMemento {
    /// The edge in the new graph.
    pub edge: ElementId,
    /// Its logical id.
    pub id: String,
    /// Route taken from the old graph.
    pub before: RouteSnapshot,
    /// Route taken from the new graph.
    pub after: RouteSnapshot,
}

/// All change records of one reconciliation, grouped by kind.
///
/// Within each group records keep classification order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    /// Fade-ins and fade-outs.
    pub fades: Vec<Fade>,
    /// Position changes.
    pub moves: Vec<Move>,
    /// Size changes.
    pub resizes: Vec<Resize>,
    /// Edge route snapshots.
    pub edges: Vec<EdgeMemento>,
}

impl ChangeSet {
    /// Returns `true` if nothing needs animating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fades.is_empty()
            && self.moves.is_empty()
            && self.resizes.is_empty()
            && self.edges.is_empty()
    }

    /// Returns the total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fades.len() + self.moves.len() + self.resizes.len() + self.edges.len()
    }

    /// Returns the fade record for `id`, if any.
    #[must_use]
    pub fn fade(&self, id: &str) -> Option<&Fade> {
        self.fades.iter().find(|f| f.id == id)
    }

    /// Returns the move record for `id`, if any.
    #[must_use]
    pub fn move_of(&self, id: &str) -> Option<&Move> {
        self.moves.iter().find(|m| m.id == id)
    }

    /// Returns the resize record for `id`, if any.
    #[must_use]
    pub fn resize_of(&self, id: &str) -> Option<&Resize> {
        self.resizes.iter().find(|r| r.id == id)
    }

    /// Returns the edge memento for `id`, if any.
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&EdgeMemento> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Adds the record counts to a summary.
    pub fn count_into(&self, summary: &mut ReconcileSummary) {
        for fade in &self.fades {
            summary.record_change(match fade.direction {
                FadeDirection::In => ChangeKind::FadeIn,
                FadeDirection::Out => ChangeKind::FadeOut,
            });
        }
        summary.moves += self.moves.len();
        summary.resizes += self.resizes.len();
        summary.edge_morphs += self.edges.len();
    }
}
