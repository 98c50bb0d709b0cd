mod extractor;
mod step;

pub use extractor::AlgorithmExtractor;
pub use step::{AlgorithmResult, Step};

use crate::graph::Graph;

/// Walks `graph` from its inferred start node and returns the ordered steps and pseudocode.
pub fn extract(graph: &Graph) -> AlgorithmResult {
    AlgorithmExtractor::new(graph).extract()
}
