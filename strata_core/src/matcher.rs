// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-by-id matching between two graph snapshots.
//!
//! Two graphs describe "the same" element when they contain an element with
//! the same logical id. [`ModelMatcher::match_graphs`] pairs every id of the
//! old graph with its counterpart in the new one; ids present on one side only
//! become removals or additions.
//!
//! A [`MatchResult`] keeps first-insertion order: all ids of the old graph in
//! pre-order, followed by ids that only exist in the new graph, again in
//! pre-order. Consumers that walk it therefore see a removed parent before
//! its removed children.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::model::{ElementId, MatchSchema, SceneGraph};

/// The correspondence of one logical id between an old and a new graph.
///
/// `left` is a handle into the old graph, `right` into the new graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Match {
    /// The element in the old graph.
    pub left: Option<ElementId>,
    /// The element in the new graph.
    pub right: Option<ElementId>,
    /// Id of `left`'s parent, if it has one.
    pub left_parent_id: Option<String>,
    /// Id of `right`'s parent, if it has one.
    pub right_parent_id: Option<String>,
}

impl Match {
    /// Present on both sides.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Only present in the new graph.
    #[must_use]
    pub fn is_added(&self) -> bool {
        self.left.is_none() && self.right.is_some()
    }

    /// Only present in the old graph.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.left.is_some() && self.right.is_none()
    }
}

/// An insertion-ordered map from logical id to [`Match`].
#[derive(Clone, Debug, Default)]
pub struct MatchResult {
    entries: Vec<(String, Match)>,
    index: BTreeMap<String, usize>,
}

impl MatchResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no id was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the match for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Match> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Iterates over `(id, match)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Match)> + '_ {
        self.entries.iter().map(|(id, m)| (id.as_str(), m))
    }

    /// Returns the match for `id`, inserting an empty one at the end if the
    /// id is new.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    pub fn entry(&mut self, id: &str) -> &mut Match {
        assert!(!id.is_empty(), "match ids must not be empty");
        let i = match self.index.get(id) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push((id.to_string(), Match::default()));
                self.index.insert(id.to_string(), i);
                i
            }
        };
        &mut self.entries[i].1
    }

    /// Converts a caller-supplied patch into a result.
    ///
    /// Left ids are resolved in `old`, right ids in `new`; ids that do not
    /// resolve leave that side empty. Each entry is keyed by its right id,
    /// or by its left id when it has no right side. Entries without any
    /// side, or with empty ids, are skipped. A later entry for the same key
    /// replaces an earlier one but keeps its position.
    #[must_use]
    pub fn from_patch(patch: &[MatchSchema], old: &SceneGraph, new: &SceneGraph) -> Self {
        let mut result = Self::new();
        for m in patch {
            let left_id = m.left.as_ref().map(|s| s.id.as_str());
            let right_id = m.right.as_ref().map(|s| s.id.as_str());
            let Some(key) = right_id.or(left_id).filter(|id| !id.is_empty()) else {
                continue;
            };
            *result.entry(key) = Match {
                left: left_id.and_then(|id| old.get_by_id(id)),
                right: right_id.and_then(|id| new.get_by_id(id)),
                left_parent_id: m.left_parent_id.clone(),
                right_parent_id: m.right_parent_id.clone(),
            };
        }
        result
    }
}

/// Computes full matches between two graphs by logical id.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModelMatcher;

impl ModelMatcher {
    /// Matches every element of `old` and `new` by id.
    ///
    /// Runs in O(n log n) for n elements across both graphs.
    #[must_use]
    pub fn match_graphs(old: &SceneGraph, new: &SceneGraph) -> MatchResult {
        let mut result = MatchResult::new();
        for element in old.descendants(old.root()) {
            let entry = result.entry(old.id(element));
            entry.left = Some(element);
            entry.left_parent_id = parent_id(old, element);
        }
        for element in new.descendants(new.root()) {
            let entry = result.entry(new.id(element));
            entry.right = Some(element);
            entry.right_parent_id = parent_id(new, element);
        }
        result
    }
}

fn parent_id(graph: &SceneGraph, element: ElementId) -> Option<String> {
    graph.parent(element).map(|p| graph.id(p).to_string())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::model::{Capabilities, ElementSchema};

    fn graph(ids: &[(&str, Option<&str>)]) -> SceneGraph {
        let mut g = SceneGraph::new("root", "graph", Capabilities::ROOT);
        for &(id, parent) in ids {
            let p = g.resolve_container(parent);
            g.create_element(p, id, "node", Capabilities::NODE);
        }
        g
    }

    #[test]
    fn classifies_persisted_added_removed() {
        let old = graph(&[("a", None), ("b", None)]);
        let new = graph(&[("b", None), ("c", None)]);
        let result = ModelMatcher::match_graphs(&old, &new);

        assert!(result.get("root").unwrap().is_persisted());
        assert!(result.get("a").unwrap().is_removed());
        assert!(result.get("b").unwrap().is_persisted());
        assert!(result.get("c").unwrap().is_added());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn order_is_old_pre_order_then_new_only() {
        let old = graph(&[("p", None), ("p.c", Some("p")), ("q", None)]);
        let new = graph(&[("z", None), ("q", None)]);
        let result = ModelMatcher::match_graphs(&old, &new);
        let ids: Vec<&str> = result.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["root", "p", "p.c", "q", "z"]);
    }

    #[test]
    fn parent_ids_are_recorded_per_side() {
        let old = graph(&[("p", None), ("c", Some("p"))]);
        let new = graph(&[("p", None), ("c", None)]);
        let result = ModelMatcher::match_graphs(&old, &new);
        let c = result.get("c").unwrap();
        assert_eq!(c.left_parent_id.as_deref(), Some("p"));
        assert_eq!(c.right_parent_id.as_deref(), Some("root"));
        assert_eq!(result.get("root").unwrap().left_parent_id, None);
    }

    #[test]
    fn handles_point_into_their_own_graph() {
        let old = graph(&[("x", None), ("a", None)]);
        let new = graph(&[("a", None)]);
        let result = ModelMatcher::match_graphs(&old, &new);
        let a = result.get("a").unwrap();
        assert_eq!(old.id(a.left.unwrap()), "a");
        assert_eq!(new.id(a.right.unwrap()), "a");
    }

    #[test]
    fn patch_is_keyed_by_right_then_left() {
        let old = graph(&[("gone", None), ("old", None)]);
        let new = graph(&[("old", None), ("fresh", None)]);
        let patch = [
            MatchSchema::remove(ElementSchema::new("gone", "node"), "root"),
            MatchSchema::add(ElementSchema::new("fresh", "node"), "root"),
            MatchSchema::default(),
        ];
        let result = MatchResult::from_patch(&patch, &old, &new);
        assert_eq!(result.len(), 2);
        assert!(result.get("gone").unwrap().is_removed());
        assert!(result.get("fresh").unwrap().is_added());
        assert!(result.get("old").is_none());
    }

    #[test]
    fn patch_side_missing_from_graph_stays_empty() {
        let old = graph(&[]);
        let new = graph(&[]);
        let patch = [MatchSchema::remove(ElementSchema::new("ghost", "node"), "root")];
        let result = MatchResult::from_patch(&patch, &old, &new);
        let m = result.get("ghost").unwrap();
        assert!(m.left.is_none() && m.right.is_none());
        assert_eq!(m.left_parent_id.as_deref(), Some("root"));
    }

    #[test]
    #[should_panic(expected = "match ids must not be empty")]
    fn empty_entry_id_panics() {
        let mut result = MatchResult::new();
        let _ = result.entry("");
    }
}
