// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Materializing schemas into live graphs, and exporting them back.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use super::capability::Capabilities;
use super::id::ElementId;
use super::schema::{ElementSchema, RootSchema};
use super::store::SceneGraph;

/// Errors produced while materializing a schema.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// An element in the schema has an empty id.
    #[error("element id must not be empty")]
    EmptyId,
    /// An id occurs twice in the schema, or already exists in the target
    /// graph.
    #[error("duplicate element id {0:?}")]
    DuplicateId(String),
}

/// Builds live graphs from schemas.
///
/// Implementors only need to provide the type → capability registry; the
/// provided materialization methods validate the whole schema before
/// touching the graph, so a failed call leaves the graph unchanged.
pub trait ModelFactory {
    /// Returns the capabilities elements of type `kind` receive when their
    /// schema does not list any explicitly.
    fn capabilities_for(&self, kind: &str) -> Capabilities;

    /// Materializes a complete graph.
    fn create_root(&self, schema: &RootSchema) -> Result<SceneGraph, SchemaError> {
        let mut seen = BTreeSet::new();
        check_id(&schema.id, &mut seen)?;
        for child in &schema.children {
            check_subtree(child, &mut seen, None)?;
        }

        let capabilities = schema
            .capabilities
            .unwrap_or_else(|| self.capabilities_for(&schema.kind));
        let mut graph = SceneGraph::new(schema.id.as_str(), schema.kind.as_str(), capabilities);
        let root = graph.root();
        if let Some(bounds) = schema.canvas_bounds {
            graph.set_canvas_bounds(bounds);
        }
        if let Some(viewport) = schema.viewport
            && capabilities.contains(Capabilities::VIEWPORT)
        {
            graph.set_viewport(root, viewport);
        }
        for child in &schema.children {
            materialize(self, &mut graph, root, child);
        }
        Ok(graph)
    }

    /// Materializes `schema` and its children as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale or not a
    /// [`CONTAINER`](Capabilities::CONTAINER).
    fn create_element(
        &self,
        graph: &mut SceneGraph,
        parent: ElementId,
        schema: &ElementSchema,
    ) -> Result<ElementId, SchemaError> {
        check_subtree(schema, &mut BTreeSet::new(), Some(&*graph))?;
        Ok(materialize(self, graph, parent, schema))
    }
}

/// Creates the subtree without validation.
///
/// Children listed under an element that cannot own children are dropped.
fn materialize<F: ModelFactory + ?Sized>(
    factory: &F,
    graph: &mut SceneGraph,
    parent: ElementId,
    schema: &ElementSchema,
) -> ElementId {
    let capabilities = schema
        .capabilities
        .unwrap_or_else(|| factory.capabilities_for(&schema.kind));
    let element =
        graph.create_element(parent, schema.id.as_str(), schema.kind.as_str(), capabilities);

    if let Some(position) = schema.position
        && capabilities.contains(Capabilities::LOCATABLE)
    {
        graph.set_position(element, position);
    }
    if let Some(size) = schema.size
        && capabilities.contains(Capabilities::SIZEABLE)
    {
        graph.set_size(element, size);
    }
    if let Some(opacity) = schema.opacity
        && capabilities.contains(Capabilities::FADEABLE)
    {
        graph.set_opacity(element, opacity);
    }
    if schema.selected && capabilities.contains(Capabilities::SELECTABLE) {
        graph.set_selected(element, true);
    }
    if let Some(route) = &schema.route
        && capabilities.contains(Capabilities::ROUTABLE)
    {
        graph.set_route(element, route.clone());
    }

    if capabilities.contains(Capabilities::CONTAINER) {
        for child in &schema.children {
            materialize(factory, graph, element, child);
        }
    }
    element
}

fn check_id(id: &str, seen: &mut BTreeSet<String>) -> Result<(), SchemaError> {
    if id.is_empty() {
        return Err(SchemaError::EmptyId);
    }
    if !seen.insert(String::from(id)) {
        return Err(SchemaError::DuplicateId(String::from(id)));
    }
    Ok(())
}

fn check_subtree(
    schema: &ElementSchema,
    seen: &mut BTreeSet<String>,
    existing: Option<&SceneGraph>,
) -> Result<(), SchemaError> {
    check_id(&schema.id, seen)?;
    if existing.is_some_and(|g| g.contains_id(&schema.id)) {
        return Err(SchemaError::DuplicateId(schema.id.clone()));
    }
    schema
        .children
        .iter()
        .try_for_each(|child| check_subtree(child, seen, existing))
}

/// A [`ModelFactory`] backed by a type registry.
///
/// Lookup tries the exact type first, then the part before the first `:`
/// (so `node:circle` resolves like `node`), and finally falls back to
/// [`Capabilities::default_element`].
#[derive(Clone, Debug)]
pub struct DefaultModelFactory {
    registry: BTreeMap<String, Capabilities>,
}

impl Default for DefaultModelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultModelFactory {
    /// Creates a factory with the built-in registrations: `graph`, `node`,
    /// `edge`, `label`, `port` and `compartment`.
    #[must_use]
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory
            .register("graph", Capabilities::ROOT)
            .register("node", Capabilities::NODE)
            .register("edge", Capabilities::EDGE)
            .register("label", Capabilities::LABEL)
            .register("port", Capabilities::LABEL)
            .register(
                "compartment",
                Capabilities::LOCATABLE
                    | Capabilities::SIZEABLE
                    | Capabilities::FADEABLE
                    | Capabilities::CONTAINER,
            );
        factory
    }

    /// Creates a factory with no registrations.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            registry: BTreeMap::new(),
        }
    }

    /// Registers or replaces the capabilities for a type.
    pub fn register(&mut self, kind: impl Into<String>, capabilities: Capabilities) -> &mut Self {
        self.registry.insert(kind.into(), capabilities);
        self
    }
}

impl ModelFactory for DefaultModelFactory {
    fn capabilities_for(&self, kind: &str) -> Capabilities {
        if let Some(&caps) = self.registry.get(kind) {
            return caps;
        }
        kind.split_once(':')
            .and_then(|(prefix, _)| self.registry.get(prefix).copied())
            .unwrap_or_else(Capabilities::default_element)
    }
}

impl SceneGraph {
    /// Exports `element` and its subtree as a schema.
    ///
    /// The export lists capabilities explicitly, so materializing it with any
    /// factory reproduces the same flags.
    #[must_use]
    pub fn to_schema(&self, element: ElementId) -> ElementSchema {
        let caps = self.capabilities(element);
        ElementSchema {
            id: String::from(self.id(element)),
            kind: String::from(self.kind(element)),
            capabilities: Some(caps),
            position: caps
                .contains(Capabilities::LOCATABLE)
                .then(|| self.position(element)),
            size: caps
                .contains(Capabilities::SIZEABLE)
                .then(|| self.size(element)),
            opacity: caps
                .contains(Capabilities::FADEABLE)
                .then(|| self.opacity(element)),
            selected: self.is_selected(element),
            route: self.route(element).cloned(),
            children: self
                .children(element)
                .map(|child| self.to_schema(child))
                .collect::<Vec<_>>(),
        }
    }

    /// Exports the whole graph as a root schema.
    #[must_use]
    pub fn to_root_schema(&self) -> RootSchema {
        let root = self.root();
        RootSchema {
            id: String::from(self.id(root)),
            kind: String::from(self.kind(root)),
            capabilities: Some(self.capabilities(root)),
            canvas_bounds: Some(self.canvas_bounds()),
            viewport: self.viewport(root),
            children: self.children(root).map(|c| self.to_schema(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Point, Rect, Size};

    use super::*;
    use crate::model::capability::{EdgeRoute, Viewport};

    fn sample() -> RootSchema {
        RootSchema::new("g", "graph")
            .with_canvas_bounds(Rect::new(0.0, 0.0, 800.0, 600.0))
            .with_viewport(Viewport {
                scroll: Point::new(10.0, 20.0),
                zoom: 2.0,
            })
            .with_child(
                ElementSchema::new("n1", "node")
                    .at(10.0, 20.0)
                    .sized(30.0, 40.0)
                    .selected(true)
                    .with_child(ElementSchema::new("n1.label", "label").at(1.0, 1.0)),
            )
            .with_child(ElementSchema::new("n2", "node:circle").at(100.0, 20.0))
            .with_child(
                ElementSchema::new("e", "edge").with_route(
                    EdgeRoute::new("polyline")
                        .between("n1", "n2")
                        .with_points(vec![Point::new(50.0, 50.0)]),
                ),
            )
    }

    #[test]
    fn create_root_materializes_properties() {
        let factory = DefaultModelFactory::new();
        let g = factory.create_root(&sample()).unwrap();

        assert_eq!(g.len(), 5);
        assert_eq!(g.canvas_bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(g.viewport(g.root()).unwrap().zoom, 2.0);

        let n1 = g.get_by_id("n1").unwrap();
        assert_eq!(g.position(n1), Point::new(10.0, 20.0));
        assert_eq!(g.size(n1), Size::new(30.0, 40.0));
        assert!(g.is_selected(n1));
        let label = g.get_by_id("n1.label").unwrap();
        assert_eq!(g.parent(label), Some(n1));

        let e = g.get_by_id("e").unwrap();
        assert_eq!(g.route(e).unwrap().router_kind, "polyline");
    }

    #[test]
    fn registry_falls_back_to_prefix_then_default() {
        let factory = DefaultModelFactory::new();
        assert_eq!(factory.capabilities_for("node:circle"), Capabilities::NODE);
        assert_eq!(factory.capabilities_for("edge"), Capabilities::EDGE);
        assert_eq!(
            factory.capabilities_for("mystery"),
            Capabilities::default_element()
        );
    }

    #[test]
    fn explicit_capabilities_win() {
        let factory = DefaultModelFactory::new();
        let root = RootSchema::new("g", "graph").with_child(
            ElementSchema::new("n", "node").with_capabilities(Capabilities::LABEL),
        );
        let g = factory.create_root(&root).unwrap();
        let n = g.get_by_id("n").unwrap();
        assert_eq!(g.capabilities(n), Capabilities::LABEL);
    }

    #[test]
    fn root_without_container_capability_still_gets_children() {
        let factory = DefaultModelFactory::new();
        let root = RootSchema::new("r", "graph")
            .with_capabilities(Capabilities::VIEWPORT)
            .with_child(ElementSchema::new("a", "node"));
        let g = factory.create_root(&root).unwrap();
        let a = g.get_by_id("a").unwrap();
        assert_eq!(g.parent(a), Some(g.root()));
        assert!(g.has(g.root(), Capabilities::VIEWPORT | Capabilities::CONTAINER));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let factory = DefaultModelFactory::new();
        let root = RootSchema::new("g", "graph")
            .with_child(ElementSchema::new("n", "node"))
            .with_child(ElementSchema::new("n", "node"));
        assert_eq!(
            factory.create_root(&root).unwrap_err(),
            SchemaError::DuplicateId("n".into())
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let factory = DefaultModelFactory::new();
        let root = RootSchema::new("g", "graph").with_child(ElementSchema::new("", "node"));
        assert_eq!(factory.create_root(&root).unwrap_err(), SchemaError::EmptyId);
    }

    #[test]
    fn failed_create_element_leaves_graph_unchanged() {
        let factory = DefaultModelFactory::new();
        let mut g = factory.create_root(&sample()).unwrap();
        let root = g.root();
        let before = g.len();
        let clash = ElementSchema::new("fresh", "node").with_child(ElementSchema::new("n2", "node"));
        assert_eq!(
            factory.create_element(&mut g, root, &clash).unwrap_err(),
            SchemaError::DuplicateId("n2".into())
        );
        assert_eq!(g.len(), before);
        assert!(!g.contains_id("fresh"));
    }

    #[test]
    fn to_schema_round_trips_a_subtree() {
        let factory = DefaultModelFactory::new();
        let g = factory.create_root(&sample()).unwrap();
        let n1 = g.get_by_id("n1").unwrap();
        let exported = g.to_schema(n1);
        assert_eq!(exported.children.len(), 1);
        assert_eq!(exported.capabilities, Some(Capabilities::NODE));

        let mut other = factory
            .create_root(&RootSchema::new("h", "graph"))
            .unwrap();
        let root = other.root();
        let copy = factory.create_element(&mut other, root, &exported).unwrap();
        assert_eq!(other.position(copy), Point::new(10.0, 20.0));
        assert!(other.contains_id("n1.label"));
    }

    #[test]
    fn to_root_schema_rebuilds_equal_graph() {
        let factory = DefaultModelFactory::new();
        let g = factory.create_root(&sample()).unwrap();
        let again = factory.create_root(&g.to_root_schema()).unwrap();
        assert_eq!(again.to_root_schema(), g.to_root_schema());
    }
}
