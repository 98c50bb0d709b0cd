//! Common test utilities for building detector output.
use flowscribe::prelude::*;

/// `Start -> Fill form -> End`, without geometry.
#[allow(dead_code)]
pub fn create_linear_diagram() -> DiagramDefinition {
    DiagramDefinition {
        nodes: vec![
            NodeRecord::new("n0", "ellipse", "Start").with_semantic("start"),
            NodeRecord::new("n1", "rectangle", "Fill form"),
            NodeRecord::new("n2", "ellipse", "End").with_semantic("end"),
        ],
        edges: vec![EdgeRecord::new("n0", "n1"), EdgeRecord::new("n1", "n2")],
    }
}

/// `Receive order -> Is paid? -> (Ship order | Send reminder) -> Close order`.
#[allow(dead_code)]
pub fn create_decision_diagram() -> DiagramDefinition {
    DiagramDefinition {
        nodes: vec![
            NodeRecord::new("start", "ellipse", "Start")
                .with_semantic("start")
                .with_bbox([100.0, 0.0, 200.0, 40.0]),
            NodeRecord::new("receive", "rectangle", "Receive order")
                .with_bbox([100.0, 100.0, 200.0, 140.0]),
            NodeRecord::new("paid", "diamond", "Is paid?").with_bbox([100.0, 200.0, 200.0, 240.0]),
            NodeRecord::new("ship", "rectangle", "Ship order")
                .with_bbox([0.0, 300.0, 90.0, 340.0]),
            NodeRecord::new("remind", "rectangle", "Send reminder")
                .with_bbox([210.0, 300.0, 300.0, 340.0]),
            NodeRecord::new("close", "rectangle", "Close order")
                .with_bbox([100.0, 400.0, 200.0, 440.0]),
        ],
        edges: vec![
            EdgeRecord::new("start", "receive"),
            EdgeRecord::new("receive", "paid"),
            EdgeRecord::new("paid", "ship"),
            EdgeRecord::new("paid", "remind"),
            EdgeRecord::new("ship", "close"),
            EdgeRecord::new("remind", "close"),
        ],
    }
}

/// `Register request -> Validate data -> Correct data -> Validate data` (a loop).
#[allow(dead_code)]
pub fn create_cyclic_diagram() -> DiagramDefinition {
    DiagramDefinition {
        nodes: vec![
            NodeRecord::new("a", "rectangle", "Register request"),
            NodeRecord::new("b", "rectangle", "Validate data"),
            NodeRecord::new("c", "rectangle", "Correct data"),
        ],
        edges: vec![
            EdgeRecord::new("a", "b"),
            EdgeRecord::new("b", "c"),
            EdgeRecord::new("c", "b"),
            EdgeRecord::new("c", "a"),
        ],
    }
}

/// Labelled nodes laid out on a page, with no arrows detected.
#[allow(dead_code)]
pub fn create_edgeless_diagram() -> DiagramDefinition {
    DiagramDefinition {
        nodes: vec![
            NodeRecord::new("x", "rectangle", "Archive document").with_center([300.0, 210.0]),
            NodeRecord::new("y", "rectangle", "Review application").with_center([400.0, 20.0]),
            NodeRecord::new("z", "rectangle", "Prepare invoice").with_center([50.0, 30.0]),
            NodeRecord::new("w", "rectangle", "Send notification").with_center([100.0, 220.0]),
        ],
        edges: vec![],
    }
}

#[allow(dead_code)]
pub fn build_graph(definition: &DiagramDefinition) -> Graph {
    GraphBuilder::new(definition).build()
}

#[allow(dead_code)]
pub const SIMPLE_DIAGRAM_JSON: &str = r#"{
    "nodes": [
        {"id": "n0", "kind": "ellipse", "semantic": "start", "label": "Start"},
        {"id": "n1", "kind": "rectangle", "label": "Fill form"},
        {"id": "n2", "kind": "ellipse", "semantic": "end", "label": "End"}
    ],
    "edges": [
        {"source": "n0", "target": "n1"},
        {"source": "n1", "target": "n2"}
    ]
}"#;

#[allow(dead_code)]
pub const GROUND_TRUTH_TEXT: &str = "### a.png
1. Approve | Manager
2. Reject | Manager
";
