use super::step::{AlgorithmResult, Step};
use crate::graph::{Graph, Semantic};
use ahash::AHashSet;
use tracing::debug;

enum Work {
    Visit { node: usize, indent: usize },
    Line { text: &'static str, indent: usize },
}

/// Depth-first walk over a canonical graph.
///
/// Decision nodes render as `IF` / `ELSE` / `END_IF` blocks covering their first two
/// successors only; further successors are still listed in the step's `next` and are
/// reached only if another path leads to them. Every other node renders as `- text`
/// and fans out to all of its successors at the same indentation. A visited set
/// guarantees termination on cycles and self-loops.
pub struct AlgorithmExtractor<'a> {
    graph: &'a Graph,
    visited: AHashSet<usize>,
    steps: Vec<Step>,
    lines: Vec<String>,
}

impl<'a> AlgorithmExtractor<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            visited: AHashSet::new(),
            steps: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn extract(mut self) -> AlgorithmResult {
        let Some(start) = self.find_start() else {
            return AlgorithmResult::default();
        };
        debug!("Starting traversal at node '{}'", self.graph.node_at(start).id);

        self.walk(start);

        let unvisited = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.visited.contains(i))
            .map(|(_, n)| n.id.clone())
            .collect::<Vec<_>>();
        if !unvisited.is_empty() {
            debug!("{} node(s) unreachable from the start node", unvisited.len());
        }

        AlgorithmResult {
            steps: self.steps,
            pseudocode: self.lines.join("\n"),
            start: Some(self.graph.node_at(start).id.clone()),
            unvisited,
        }
    }

    /// First `start`-marked node, else the first node with no incoming edges, else the first node.
    fn find_start(&self) -> Option<usize> {
        let nodes = self.graph.nodes();
        nodes
            .iter()
            .position(|n| n.semantic == Semantic::Start)
            .or_else(|| (0..nodes.len()).find(|&i| self.graph.in_degree_at(i) == 0))
            .or_else(|| (!nodes.is_empty()).then_some(0))
    }

    fn walk(&mut self, start: usize) {
        let mut stack = vec![Work::Visit {
            node: start,
            indent: 0,
        }];

        while let Some(work) = stack.pop() {
            match work {
                Work::Line { text, indent } => self.emit_line(indent, text),
                Work::Visit { node, indent } => {
                    if !self.visited.insert(node) {
                        continue;
                    }
                    let graph = self.graph;
                    let current = graph.node_at(node);
                    let text = current.display_text().to_string();
                    let outs = graph.successor_indices(node);

                    if current.kind.is_decision() {
                        self.steps.push(Step::Decision {
                            id: current.id.clone(),
                            text: text.clone(),
                            next: outs.iter().map(|&s| graph.node_at(s).id.clone()).collect(),
                        });
                        self.emit_line(indent, &format!("IF {}:", text));

                        // Pushed in reverse so they pop in source order.
                        stack.push(Work::Line {
                            text: "END_IF",
                            indent,
                        });
                        if let Some(&otherwise) = outs.get(1) {
                            stack.push(Work::Visit {
                                node: otherwise,
                                indent: indent + 2,
                            });
                            stack.push(Work::Line {
                                text: "ELSE:",
                                indent,
                            });
                        }
                        if let Some(&then) = outs.first() {
                            stack.push(Work::Visit {
                                node: then,
                                indent: indent + 2,
                            });
                        }
                    } else {
                        self.steps.push(Step::Step {
                            id: current.id.clone(),
                            text: text.clone(),
                        });
                        self.emit_line(indent, &format!("- {}", text));
                        for &next in outs.iter().rev() {
                            stack.push(Work::Visit { node: next, indent });
                        }
                    }
                }
            }
        }
    }

    fn emit_line(&mut self, indent: usize, text: &str) {
        self.lines.push(format!("{}{}", " ".repeat(indent), text));
    }
}
