// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding model updates from JSON.

use kurbo::{Point, Rect, Size};
use strata_core::command::{UpdateModel, UpdateModelCommand, UpdatePayload};
use strata_core::model::{
    Capabilities, DefaultModelFactory, ElementSchema, MatchSchema, ModelFactory, RootSchema,
};
use strata_core::reconcile::{ReconcileConfig, Reconciler};

const DIAGRAM: &str = r#"{
    "id": "graph",
    "type": "graph",
    "canvas_bounds": { "x0": 0.0, "y0": 0.0, "x1": 800.0, "y1": 600.0 },
    "viewport": { "scroll": { "x": 10.0, "y": 20.0 }, "zoom": 1.5 },
    "children": [
        {
            "id": "n1",
            "type": "node:rect",
            "position": { "x": 10.0, "y": 10.0 },
            "size": { "width": 40.0, "height": 20.0 },
            "children": [{ "id": "n1/label", "type": "label", "position": { "x": 2.0, "y": 2.0 } }]
        },
        { "id": "n2", "type": "node", "position": { "x": 100.0, "y": 10.0 }, "selected": true },
        {
            "id": "e1",
            "type": "edge",
            "route": {
                "router_kind": "polyline",
                "source_id": "n1",
                "target_id": "n2",
                "routing_points": [{ "x": 60.0, "y": 60.0 }]
            }
        },
        { "id": "deco", "type": "decoration", "capabilities": "LOCATABLE | FADEABLE" }
    ]
}"#;

#[test]
fn diagram_decodes_and_materializes() {
    let schema: RootSchema = serde_json::from_str(DIAGRAM).unwrap();
    assert_eq!(schema.kind, "graph");
    assert_eq!(schema.children.len(), 4);

    let graph = DefaultModelFactory::new().create_root(&schema).unwrap();
    assert_eq!(graph.canvas_bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(graph.viewport(graph.root()).unwrap().zoom, 1.5);

    let n1 = graph.get_by_id("n1").unwrap();
    assert_eq!(graph.capabilities(n1), Capabilities::NODE);
    assert_eq!(graph.kind(n1), "node:rect");
    assert_eq!(graph.size(n1), Size::new(40.0, 20.0));
    let label = graph.get_by_id("n1/label").unwrap();
    assert_eq!(graph.parent(label), Some(n1));

    assert!(graph.is_selected(graph.get_by_id("n2").unwrap()));

    let e1 = graph.get_by_id("e1").unwrap();
    let route = graph.route(e1).unwrap();
    assert_eq!(route.source_id.as_deref(), Some("n1"));
    assert_eq!(route.routing_points, vec![Point::new(60.0, 60.0)]);

    let deco = graph.get_by_id("deco").unwrap();
    assert_eq!(
        graph.capabilities(deco),
        Capabilities::LOCATABLE | Capabilities::FADEABLE
    );
}

#[test]
fn exported_schema_decodes_to_the_same_graph() {
    let schema: RootSchema = serde_json::from_str(DIAGRAM).unwrap();
    let factory = DefaultModelFactory::new();
    let graph = factory.create_root(&schema).unwrap();

    let json = serde_json::to_string(&graph.to_root_schema()).unwrap();
    let decoded: RootSchema = serde_json::from_str(&json).unwrap();
    let again = factory.create_root(&decoded).unwrap();
    assert_eq!(again.to_root_schema(), graph.to_root_schema());
}

#[test]
fn update_actions_decode() {
    let action: UpdateModel = serde_json::from_str(
        r#"{
            "payload": {
                "patch": [
                    { "right": { "id": "n3", "type": "node" }, "right_parent_id": "graph" },
                    { "left": { "id": "n2", "type": "node" }, "left_parent_id": "graph" }
                ]
            },
            "cause": "server"
        }"#,
    )
    .unwrap();
    assert!(action.animate);
    assert_eq!(action.cause.as_deref(), Some("server"));
    assert_eq!(
        action.payload,
        UpdatePayload::Patch(vec![
            MatchSchema::add(ElementSchema::new("n3", "node"), "graph"),
            MatchSchema::remove(ElementSchema::new("n2", "node"), "graph"),
        ])
    );

    let factory = DefaultModelFactory::new();
    let current = factory
        .create_root(&serde_json::from_str(DIAGRAM).unwrap())
        .unwrap();
    let mut reconciler = Reconciler::new(&factory);
    let executed = UpdateModelCommand::new(action)
        .execute(&mut reconciler, &current)
        .unwrap();
    assert!(executed.transition.is_animated());
    let next = executed.record.next();
    assert!(next.contains_id("n3"));
    assert!(!next.contains_id("n2"));
}

#[test]
fn root_payload_and_animate_flag_decode() {
    let action: UpdateModel = serde_json::from_str(
        r#"{ "payload": { "root": { "id": "g", "type": "graph" } }, "animate": false }"#,
    )
    .unwrap();
    assert!(!action.animate);
    assert_eq!(action.payload, UpdatePayload::Root(RootSchema::new("g", "graph")));
}

#[test]
fn config_decodes() {
    let config: ReconcileConfig = serde_json::from_str(r#"{ "epsilon": 0.5 }"#).unwrap();
    assert_eq!(config, ReconcileConfig::DEFAULT.with_epsilon(0.5));
}
