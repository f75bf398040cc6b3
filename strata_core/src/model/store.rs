// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays scene graph storage with an id index, topology, and
//! capability-gated properties.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::capability::{Capabilities, EdgeRoute, Viewport};
use super::id::{ElementId, INVALID};
use super::traverse::{Children, Descendants};
use crate::dirty;
use crate::geometry::{EMPTY_CANVAS, EMPTY_SIZE};

/// One snapshot of a diagram: a single-rooted tree of elements.
///
/// Elements are addressed by [`ElementId`] handles and, for matching across
/// snapshots, by their logical string id through
/// [`get_by_id`](Self::get_by_id). Each element occupies a slot in parallel
/// arrays; removed slots are recycled via a free list and generation
/// counters reject stale handles.
///
/// The root is created together with the graph and can never be removed.
/// It additionally owns the [canvas bounds](Self::canvas_bounds) of the
/// rendered viewport.
#[derive(Debug)]
pub struct SceneGraph {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Identity --
    pub(crate) ids: Vec<String>,
    pub(crate) kinds: Vec<String>,
    pub(crate) capabilities: Vec<Capabilities>,

    // -- Properties (set by factory, reconciliation and animations) --
    pub(crate) position: Vec<Point>,
    pub(crate) size: Vec<Size>,
    pub(crate) opacity: Vec<f64>,
    pub(crate) selected: Vec<bool>,
    pub(crate) viewport: Vec<Option<Viewport>>,
    pub(crate) route: Vec<Option<EdgeRoute>>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_origin: Vec<Point>,
    pub(crate) effective_opacity: Vec<f64>,

    // -- Root state --
    pub(crate) root: u32,
    pub(crate) canvas_bounds: Rect,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Id index --
    pub(crate) index: BTreeMap<String, u32>,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl SceneGraph {
    /// Creates a graph containing only a root element.
    ///
    /// The root always owns children: [`CONTAINER`](Capabilities::CONTAINER)
    /// is added to `capabilities`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: impl Into<String>, capabilities: Capabilities) -> Self {
        let mut graph = Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            ids: Vec::new(),
            kinds: Vec::new(),
            capabilities: Vec::new(),
            position: Vec::new(),
            size: Vec::new(),
            opacity: Vec::new(),
            selected: Vec::new(),
            viewport: Vec::new(),
            route: Vec::new(),
            world_origin: Vec::new(),
            effective_opacity: Vec::new(),
            root: INVALID,
            canvas_bounds: EMPTY_CANVAS,
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            index: BTreeMap::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        };
        graph.root = graph.allocate(
            id.into(),
            kind.into(),
            capabilities | Capabilities::CONTAINER,
        );
        graph
    }

    // -- Allocation API --

    /// Creates a new element as the last child of `parent`.
    ///
    /// The element starts at the origin with [`EMPTY_SIZE`], full opacity,
    /// unselected, and with a default viewport if it has the
    /// [`VIEWPORT`](Capabilities::VIEWPORT) capability.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or not a [`CONTAINER`](Capabilities::CONTAINER),
    /// if `id` is empty, or if an element with the same id already exists.
    pub fn create_element(
        &mut self,
        parent: ElementId,
        id: impl Into<String>,
        kind: impl Into<String>,
        capabilities: Capabilities,
    ) -> ElementId {
        self.validate(parent);
        assert!(
            self.capabilities[parent.idx as usize].contains(Capabilities::CONTAINER),
            "parent {:?} is not a container",
            self.ids[parent.idx as usize]
        );
        let idx = self.allocate(id.into(), kind.into(), capabilities);
        self.link_last_child(parent.idx, idx);
        self.handle(idx)
    }

    /// Removes an element and its entire subtree, freeing their slots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or refers to the root.
    pub fn remove_subtree(&mut self, element: ElementId) {
        self.validate(element);
        let top = element.idx;
        assert!(top != self.root, "cannot remove the root element");

        let subtree: Vec<u32> = Descendants::new(self, top).map(|e| e.idx).collect();

        let p = self.parent[top as usize];
        self.unlink_from_parent(top);
        self.dirty.remove_dependency(top, p, dirty::BOUNDS);
        self.dirty.remove_dependency(top, p, dirty::OPACITY);
        self.dirty.mark(p, dirty::TOPOLOGY);

        for idx in subtree {
            let i = idx as usize;
            let id = core::mem::take(&mut self.ids[i]);
            self.index.remove(&id);
            self.kinds[i].clear();
            self.route[i] = None;
            self.viewport[i] = None;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.dirty.remove_key(idx);
            // Bump generation so old handles immediately fail validation.
            self.generation[i] += 1;
            self.free_list.push(idx);
            self.pending_removed.push(idx);
        }
        self.traversal_dirty = true;
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, element: ElementId) -> bool {
        (element.idx < self.len) && self.generation[element.idx as usize] == element.generation
    }

    /// Returns the number of live elements, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the graph only contains its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    // -- Identity API --

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.handle(self.root)
    }

    /// Returns whether `element` is the root.
    #[must_use]
    pub fn is_root(&self, element: ElementId) -> bool {
        self.validate(element);
        element.idx == self.root
    }

    /// Looks up an element by logical id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<ElementId> {
        self.index.get(id).map(|&idx| self.handle(idx))
    }

    /// Returns whether an element with the given logical id exists.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolves an optional parent id to a container element, falling back
    /// to the root when the id is absent, unknown, or names an element that
    /// cannot own children.
    #[must_use]
    pub fn resolve_container(&self, id: Option<&str>) -> ElementId {
        id.and_then(|id| self.get_by_id(id))
            .filter(|&e| self.has(e, Capabilities::CONTAINER))
            .unwrap_or_else(|| self.root())
    }

    /// Returns the logical id of an element.
    #[must_use]
    pub fn id(&self, element: ElementId) -> &str {
        self.validate(element);
        &self.ids[element.idx as usize]
    }

    /// Returns the type tag of an element.
    #[must_use]
    pub fn kind(&self, element: ElementId) -> &str {
        self.validate(element);
        &self.kinds[element.idx as usize]
    }

    /// Returns the capabilities of an element.
    #[must_use]
    pub fn capabilities(&self, element: ElementId) -> Capabilities {
        self.validate(element);
        self.capabilities[element.idx as usize]
    }

    /// Returns whether an element has all of the given capabilities.
    #[must_use]
    pub fn has(&self, element: ElementId, capabilities: Capabilities) -> bool {
        self.capabilities(element).contains(capabilities)
    }

    // -- Topology API --

    /// Returns the parent of an element, or `None` for the root.
    #[must_use]
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.validate(element);
        let p = self.parent[element.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of an element.
    #[must_use]
    pub fn children(&self, element: ElementId) -> Children<'_> {
        self.validate(element);
        Children::new(self, self.first_child[element.idx as usize])
    }

    /// Returns a pre-order iterator over `element` and its descendants.
    #[must_use]
    pub fn descendants(&self, element: ElementId) -> Descendants<'_> {
        self.validate(element);
        Descendants::new(self, element.idx)
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the position of an element relative to its parent.
    ///
    /// Elements without [`LOCATABLE`](Capabilities::LOCATABLE) report the
    /// origin.
    #[must_use]
    pub fn position(&self, element: ElementId) -> Point {
        self.validate(element);
        self.position[element.idx as usize]
    }

    /// Returns the size of an element, possibly [`EMPTY_SIZE`].
    #[must_use]
    pub fn size(&self, element: ElementId) -> Size {
        self.validate(element);
        self.size[element.idx as usize]
    }

    /// Returns the bounding box of an element in its parent's coordinates.
    #[must_use]
    pub fn bounds(&self, element: ElementId) -> Rect {
        Rect::from_origin_size(self.position(element), self.size(element))
    }

    /// Returns the local opacity of an element.
    #[must_use]
    pub fn opacity(&self, element: ElementId) -> f64 {
        self.validate(element);
        self.opacity[element.idx as usize]
    }

    /// Returns whether an element is selected.
    #[must_use]
    pub fn is_selected(&self, element: ElementId) -> bool {
        self.validate(element);
        self.selected[element.idx as usize]
    }

    /// Returns the viewport state of a viewport-capable element.
    #[must_use]
    pub fn viewport(&self, element: ElementId) -> Option<Viewport> {
        self.validate(element);
        self.viewport[element.idx as usize]
    }

    /// Returns the routing state of a routable edge.
    #[must_use]
    pub fn route(&self, element: ElementId) -> Option<&EdgeRoute> {
        self.validate(element);
        self.route[element.idx as usize].as_ref()
    }

    /// Returns the canvas bounds owned by the root.
    #[must_use]
    pub fn canvas_bounds(&self) -> Rect {
        self.canvas_bounds
    }

    /// Returns the computed origin of an element in root coordinates.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_origin(&self, element: ElementId) -> Point {
        self.validate(element);
        self.world_origin[element.idx as usize]
    }

    /// Returns the computed effective opacity of an element.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_opacity(&self, element: ElementId) -> f64 {
        self.validate(element);
        self.effective_opacity[element.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the position of a locatable element.
    ///
    /// Marks the BOUNDS channel dirty with eager propagation to descendants.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`LOCATABLE`](Capabilities::LOCATABLE).
    pub fn set_position(&mut self, element: ElementId, position: Point) {
        self.require(element, Capabilities::LOCATABLE, "LOCATABLE");
        self.position[element.idx as usize] = position;
        self.dirty.mark_with(element.idx, dirty::BOUNDS, &EagerPolicy);
    }

    /// Sets the size of a sizeable element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`SIZEABLE`](Capabilities::SIZEABLE).
    pub fn set_size(&mut self, element: ElementId, size: Size) {
        self.require(element, Capabilities::SIZEABLE, "SIZEABLE");
        self.size[element.idx as usize] = size;
        self.dirty.mark_with(element.idx, dirty::BOUNDS, &EagerPolicy);
    }

    /// Sets the opacity of a fadeable element.
    ///
    /// Marks the OPACITY channel dirty with eager propagation to descendants.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`FADEABLE`](Capabilities::FADEABLE).
    pub fn set_opacity(&mut self, element: ElementId, opacity: f64) {
        self.require(element, Capabilities::FADEABLE, "FADEABLE");
        self.opacity[element.idx as usize] = opacity;
        self.dirty.mark_with(element.idx, dirty::OPACITY, &EagerPolicy);
    }

    /// Sets the selection flag of a selectable element.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`SELECTABLE`](Capabilities::SELECTABLE).
    pub fn set_selected(&mut self, element: ElementId, selected: bool) {
        self.require(element, Capabilities::SELECTABLE, "SELECTABLE");
        self.selected[element.idx as usize] = selected;
        self.dirty.mark(element.idx, dirty::SELECTION);
    }

    /// Sets scroll and zoom of a viewport-capable element.
    ///
    /// Scrolling or zooming moves everything on screen, so this marks BOUNDS
    /// with eager propagation.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`VIEWPORT`](Capabilities::VIEWPORT).
    pub fn set_viewport(&mut self, element: ElementId, viewport: Viewport) {
        self.require(element, Capabilities::VIEWPORT, "VIEWPORT");
        self.viewport[element.idx as usize] = Some(viewport);
        self.dirty.mark_with(element.idx, dirty::BOUNDS, &EagerPolicy);
    }

    /// Replaces the routing state of a routable edge.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`ROUTABLE`](Capabilities::ROUTABLE).
    pub fn set_route(&mut self, element: ElementId, route: EdgeRoute) {
        self.require(element, Capabilities::ROUTABLE, "ROUTABLE");
        self.route[element.idx as usize] = Some(route);
        self.dirty.mark(element.idx, dirty::ROUTE);
    }

    /// Replaces only the routing points of a routable edge, creating an empty
    /// route first if the edge has none.
    ///
    /// # Panics
    ///
    /// Panics if the element is not [`ROUTABLE`](Capabilities::ROUTABLE).
    pub fn set_routing_points(&mut self, element: ElementId, points: Vec<Point>) {
        self.require(element, Capabilities::ROUTABLE, "ROUTABLE");
        self.route[element.idx as usize]
            .get_or_insert_with(EdgeRoute::default)
            .routing_points = points;
        self.dirty.mark(element.idx, dirty::ROUTE);
    }

    /// Sets the canvas bounds owned by the root.
    pub fn set_canvas_bounds(&mut self, bounds: Rect) {
        self.canvas_bounds = bounds;
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> ElementId {
        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, element: ElementId) {
        assert!(
            element.idx < self.len && self.generation[element.idx as usize] == element.generation,
            "stale ElementId: {element:?} (current gen: {})",
            if element.idx < self.len {
                self.generation[element.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the element lacks a capability.
    fn require(&self, element: ElementId, capability: Capabilities, name: &str) {
        self.validate(element);
        assert!(
            self.capabilities[element.idx as usize].contains(capability),
            "element {:?} is not {name}",
            self.ids[element.idx as usize]
        );
    }

    /// Allocates a detached slot and registers it in the id index.
    fn allocate(&mut self, id: String, kind: String, capabilities: Capabilities) -> u32 {
        assert!(!id.is_empty(), "element id must not be empty");
        assert!(!self.index.contains_key(&id), "duplicate element id {id:?}");

        let viewport = capabilities
            .contains(Capabilities::VIEWPORT)
            .then(Viewport::default);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on removal.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.ids[i] = id.clone();
            self.kinds[i] = kind;
            self.capabilities[i] = capabilities;
            self.position[i] = Point::ZERO;
            self.size[i] = EMPTY_SIZE;
            self.opacity[i] = 1.0;
            self.selected[i] = false;
            self.viewport[i] = viewport;
            self.route[i] = None;
            self.world_origin[i] = Point::ZERO;
            self.effective_opacity[i] = 1.0;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.ids.push(id.clone());
            self.kinds.push(kind);
            self.capabilities.push(capabilities);
            self.position.push(Point::ZERO);
            self.size.push(EMPTY_SIZE);
            self.opacity.push(1.0);
            self.selected.push(false);
            self.viewport.push(viewport);
            self.route.push(None);
            self.world_origin.push(Point::ZERO);
            self.effective_opacity.push(1.0);
            self.generation.push(0);
            idx
        };

        self.index.insert(id, idx);
        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        idx
    }

    /// Appends `c` to the child list of `p` and wires dirty dependencies.
    fn link_last_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Child depends on parent for inherited channels.
        let _ = self.dirty.add_dependency(c, p, dirty::BOUNDS);
        let _ = self.dirty.add_dependency(c, p, dirty::OPACITY);

        self.dirty.mark_with(c, dirty::BOUNDS, &EagerPolicy);
        self.dirty.mark_with(c, dirty::OPACITY, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

impl Clone for SceneGraph {
    /// Produces an independent tree instance with the same slots, ids and
    /// properties.
    ///
    /// Dirty state is not copied: the clone reports every live element as
    /// added on its first [`evaluate`](Self::evaluate), like a freshly
    /// materialized graph.
    fn clone(&self) -> Self {
        let mut tracker = DirtyTracker::with_cycle_handling(CycleHandling::Error);
        let mut pending_added = Vec::with_capacity(self.index.len());
        for idx in Descendants::new(self, self.root).map(|e| e.idx) {
            let p = self.parent[idx as usize];
            if p != INVALID {
                let _ = tracker.add_dependency(idx, p, dirty::BOUNDS);
                let _ = tracker.add_dependency(idx, p, dirty::OPACITY);
            }
            tracker.mark(idx, dirty::BOUNDS);
            tracker.mark(idx, dirty::OPACITY);
            pending_added.push(idx);
        }

        Self {
            parent: self.parent.clone(),
            first_child: self.first_child.clone(),
            next_sibling: self.next_sibling.clone(),
            prev_sibling: self.prev_sibling.clone(),
            ids: self.ids.clone(),
            kinds: self.kinds.clone(),
            capabilities: self.capabilities.clone(),
            position: self.position.clone(),
            size: self.size.clone(),
            opacity: self.opacity.clone(),
            selected: self.selected.clone(),
            viewport: self.viewport.clone(),
            route: self.route.clone(),
            world_origin: self.world_origin.clone(),
            effective_opacity: self.effective_opacity.clone(),
            root: self.root,
            canvas_bounds: self.canvas_bounds,
            generation: self.generation.clone(),
            free_list: self.free_list.clone(),
            len: self.len,
            index: self.index.clone(),
            dirty: tracker,
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added,
            pending_removed: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn graph() -> SceneGraph {
        SceneGraph::new("root", "graph", Capabilities::ROOT)
    }

    #[test]
    fn new_graph_has_only_root() {
        let g = graph();
        assert_eq!(g.len(), 1);
        assert!(g.is_empty());
        assert_eq!(g.id(g.root()), "root");
        assert_eq!(g.kind(g.root()), "graph");
        assert!(g.parent(g.root()).is_none());
        assert!(g.viewport(g.root()).is_some());
    }

    #[test]
    fn create_and_lookup_by_id() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        assert_eq!(g.get_by_id("a"), Some(a));
        assert!(g.contains_id("a"));
        assert_eq!(g.parent(a), Some(root));
        assert_eq!(g.size(a), EMPTY_SIZE);
        assert_eq!(g.opacity(a), 1.0);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        let b = g.create_element(root, "b", "node", Capabilities::NODE);
        let c = g.create_element(root, "c", "node", Capabilities::NODE);
        let kids: Vec<_> = g.children(root).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        let a1 = g.create_element(a, "a1", "label", Capabilities::LABEL);
        let b = g.create_element(root, "b", "node", Capabilities::NODE);
        let order: Vec<_> = g.descendants(root).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn remove_subtree_frees_ids() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        let a1 = g.create_element(a, "a1", "label", Capabilities::LABEL);
        let b = g.create_element(root, "b", "node", Capabilities::NODE);

        g.remove_subtree(a);
        assert!(!g.is_alive(a));
        assert!(!g.is_alive(a1));
        assert!(!g.contains_id("a"));
        assert!(!g.contains_id("a1"));
        assert_eq!(g.children(root).collect::<Vec<_>>(), vec![b]);
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        g.remove_subtree(a);
        let b = g.create_element(root, "b", "node", Capabilities::NODE);
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(g.is_alive(b));
        assert_eq!(g.id(b), "b");
    }

    #[test]
    fn resolve_container_falls_back_to_root() {
        let mut g = graph();
        let root = g.root();
        let n = g.create_element(root, "n", "node", Capabilities::NODE);
        g.create_element(n, "l", "label", Capabilities::LABEL);
        assert_eq!(g.resolve_container(Some("n")), n);
        assert_eq!(g.resolve_container(Some("missing")), root);
        assert_eq!(g.resolve_container(Some("l")), root);
        assert_eq!(g.resolve_container(None), root);
    }

    #[test]
    fn root_always_owns_children() {
        let mut g = SceneGraph::new("root", "graph", Capabilities::VIEWPORT);
        let root = g.root();
        assert!(g.has(root, Capabilities::CONTAINER));
        assert_eq!(g.resolve_container(Some("missing")), root);
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        assert_eq!(g.parent(a), Some(root));
    }

    #[test]
    fn clone_is_independent() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        g.set_position(a, Point::new(5.0, 5.0));

        let mut copy = g.clone();
        let a2 = copy.get_by_id("a").unwrap();
        copy.set_position(a2, Point::new(9.0, 9.0));

        assert_eq!(g.position(a), Point::new(5.0, 5.0));
        assert_eq!(copy.position(a2), Point::new(9.0, 9.0));
    }

    #[test]
    fn set_routing_points_creates_route() {
        let mut g = graph();
        let root = g.root();
        let e = g.create_element(root, "e", "edge", Capabilities::EDGE);
        assert!(g.route(e).is_none());
        g.set_routing_points(e, vec![Point::new(1.0, 2.0)]);
        assert_eq!(g.route(e).unwrap().routing_points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    #[should_panic(expected = "duplicate element id")]
    fn duplicate_id_panics() {
        let mut g = graph();
        let root = g.root();
        g.create_element(root, "a", "node", Capabilities::NODE);
        g.create_element(root, "a", "node", Capabilities::NODE);
    }

    #[test]
    #[should_panic(expected = "is not a container")]
    fn adding_under_leaf_panics() {
        let mut g = graph();
        let root = g.root();
        let l = g.create_element(root, "l", "label", Capabilities::LABEL);
        g.create_element(l, "x", "label", Capabilities::LABEL);
    }

    #[test]
    #[should_panic(expected = "cannot remove the root element")]
    fn removing_root_panics() {
        let mut g = graph();
        let root = g.root();
        g.remove_subtree(root);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn removed_handle_panics_on_position() {
        let mut g = graph();
        let root = g.root();
        let a = g.create_element(root, "a", "node", Capabilities::NODE);
        g.remove_subtree(a);
        let _ = g.position(a);
    }

    #[test]
    #[should_panic(expected = "is not LOCATABLE")]
    fn set_position_requires_capability() {
        let mut g = graph();
        let root = g.root();
        let e = g.create_element(root, "e", "edge", Capabilities::EDGE);
        g.set_position(e, Point::new(1.0, 1.0));
    }
}
