use ahash::AHashMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};

mod builder;
mod node;

pub use builder::GraphBuilder;
pub use node::*;

/// The canonical directed graph built from detector output.
///
/// Nodes keep the order in which they were first seen. Each node owns an ordered
/// successor list, so traversal order is reproducible. The graph is immutable once
/// built and may be cyclic or disconnected.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: AHashMap<String, usize>,
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    edge_kinds: AHashMap<(usize, usize), EdgeKind>,
}

impl Graph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_kinds.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub(crate) fn node_at(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn successor_indices(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }

    pub(crate) fn in_degree_at(&self, index: usize) -> usize {
        self.in_degree[index]
    }

    /// Ids of the direct successors of `id`, in edge insertion order.
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.index_of(id)
            .map(|i| {
                self.successors[i]
                    .iter()
                    .map(|&s| self.nodes[s].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn in_degree(&self, id: &str) -> Option<usize> {
        self.index_of(id).map(|i| self.in_degree[i])
    }

    /// All edges, grouped by source in node order.
    pub fn edges(&self) -> Vec<Edge> {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(u, outs)| {
                outs.iter().map(move |&v| Edge {
                    source: self.nodes[u].id.clone(),
                    target: self.nodes[v].id.clone(),
                    kind: self.edge_kinds.get(&(u, v)).copied().unwrap_or_default(),
                })
            })
            .collect()
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Graph", 2)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("edges", &self.edges())?;
        state.end()
    }
}
