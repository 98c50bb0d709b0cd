use super::{BBox, EdgeKind, Graph, Node, NodeKind, Point, Semantic};
use crate::diagram::{DiagramDefinition, NodeRecord};
use ahash::AHashMap;
use tracing::{debug, warn};

/// Shape classes of BPMN object detectors and what they become in the canonical graph.
const BPMN_KINDS: [(&str, NodeKind, Semantic); 11] = [
    ("Task", NodeKind::Rectangle, Semantic::None),
    ("Activity", NodeKind::Rectangle, Semantic::None),
    ("StartEvent", NodeKind::Ellipse, Semantic::Start),
    ("EndEvent", NodeKind::Ellipse, Semantic::End),
    ("Gateway", NodeKind::Diamond, Semantic::None),
    ("ExclusiveGateway", NodeKind::Diamond, Semantic::None),
    ("ParallelGateway", NodeKind::Diamond, Semantic::None),
    ("Swimline", NodeKind::Rectangle, Semantic::None),
    ("Swimlane", NodeKind::Rectangle, Semantic::None),
    ("Pool", NodeKind::Rectangle, Semantic::None),
    ("Lane", NodeKind::Rectangle, Semantic::None),
];

/// Builds the canonical `Graph` from raw detector records.
///
/// Never fails: nodes get defaulted attributes, edges whose endpoints are
/// unknown are dropped, and duplicate `(source, target)` pairs collapse.
pub struct GraphBuilder<'a> {
    definition: &'a DiagramDefinition,
    kind_registry: AHashMap<String, NodeKind>,
    semantic_registry: AHashMap<String, Semantic>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(definition: &'a DiagramDefinition) -> Self {
        Self {
            definition,
            kind_registry: AHashMap::new(),
            semantic_registry: AHashMap::new(),
        }
    }

    /// Maps a detector-specific shape name (e.g. `"exclusiveGateway"`) onto a node kind.
    pub fn with_kind_mapping(mut self, detector_kind: &str, kind: NodeKind) -> Self {
        self.kind_registry.insert(detector_kind.to_string(), kind);
        self
    }

    /// Marks nodes of a detector-specific shape as start or end when the record has no semantic.
    pub fn with_semantic_mapping(mut self, detector_kind: &str, semantic: Semantic) -> Self {
        self.semantic_registry
            .insert(detector_kind.to_string(), semantic);
        self
    }

    /// Registers the BPMN shape classes (`Task`, `StartEvent`, `ExclusiveGateway`, ...).
    pub fn with_bpmn_kinds(self) -> Self {
        BPMN_KINDS
            .iter()
            .fold(self, |builder, &(name, kind, semantic)| {
                let builder = builder.with_kind_mapping(name, kind);
                if semantic == Semantic::None {
                    builder
                } else {
                    builder.with_semantic_mapping(name, semantic)
                }
            })
    }

    pub fn build(self) -> Graph {
        let mut graph = Graph::default();

        for record in &self.definition.nodes {
            match graph.index.get(&record.id).copied() {
                Some(existing) => {
                    warn!("Duplicate node id '{}', merging attributes", record.id);
                    self.merge_into(&mut graph.nodes[existing], record);
                }
                None => {
                    graph.index.insert(record.id.clone(), graph.nodes.len());
                    graph.nodes.push(self.to_node(record));
                    graph.successors.push(Vec::new());
                    graph.in_degree.push(0);
                }
            }
        }

        let mut dropped = 0usize;
        for edge in &self.definition.edges {
            let (Some(u), Some(v)) = (graph.index_of(&edge.source), graph.index_of(&edge.target))
            else {
                dropped += 1;
                continue;
            };
            let kind = edge
                .kind
                .as_deref()
                .map(Self::edge_kind)
                .unwrap_or_default();
            if graph.edge_kinds.insert((u, v), kind).is_none() {
                graph.successors[u].push(v);
                graph.in_degree[v] += 1;
            }
        }

        if dropped > 0 {
            warn!("Dropped {} edge(s) referencing unknown nodes", dropped);
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built canonical graph"
        );
        graph
    }

    fn to_node(&self, record: &NodeRecord) -> Node {
        let bbox = record.bbox.map(BBox::from_corners);
        if bbox.is_some_and(|b| b.is_degenerate()) {
            debug!("Node '{}' has a degenerate bounding box", record.id);
        }
        let center = record
            .center
            .map(Point::from)
            .or_else(|| bbox.map(|b| b.center()));
        Node {
            id: record.id.clone(),
            kind: record
                .kind
                .as_deref()
                .map(|k| self.resolve_kind(&record.id, k))
                .unwrap_or_default(),
            semantic: self.resolve_semantic(record).unwrap_or_default(),
            label: record.label.clone().unwrap_or_default(),
            bbox,
            center,
        }
    }

    /// Later records overwrite only the attributes they actually carry.
    fn merge_into(&self, node: &mut Node, record: &NodeRecord) {
        if let Some(kind) = record.kind.as_deref() {
            node.kind = self.resolve_kind(&record.id, kind);
        }
        if let Some(semantic) = self.resolve_semantic(record) {
            node.semantic = semantic;
        }
        if let Some(label) = &record.label {
            node.label = label.clone();
        }
        if let Some(bbox) = record.bbox {
            node.bbox = Some(BBox::from_corners(bbox));
        }
        if let Some(center) = record.center {
            node.center = Some(Point::from(center));
        } else if record.bbox.is_some() {
            node.center = node.bbox.map(|b| b.center());
        }
    }

    /// The record's own semantic, else the one registered for its shape name.
    fn resolve_semantic(&self, record: &NodeRecord) -> Option<Semantic> {
        record.semantic.as_deref().map(Semantic::parse).or_else(|| {
            record
                .kind
                .as_deref()
                .and_then(|k| self.semantic_registry.get(k).copied())
        })
    }

    fn resolve_kind(&self, node_id: &str, name: &str) -> NodeKind {
        match self
            .kind_registry
            .get(name)
            .copied()
            .or_else(|| NodeKind::parse(name))
        {
            Some(kind) => kind,
            None => {
                warn!(
                    "Node '{}' has unknown kind '{}', treating it as a rectangle",
                    node_id, name
                );
                NodeKind::default()
            }
        }
    }

    fn edge_kind(name: &str) -> EdgeKind {
        if name != "sequence" {
            debug!("Unknown edge kind '{}', treating it as sequence flow", name);
        }
        EdgeKind::Sequence
    }
}
