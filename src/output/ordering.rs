use crate::algorithm::AlgorithmResult;
use crate::config::{OrderingConfig, PipelineConfig};
use crate::graph::{Graph, Node, Semantic};
use crate::text::{QualityFilter, dedupe_with_threshold, normalize};
use tracing::debug;

/// Texts that are only a shape name, emitted for nodes without a label.
const PLACEHOLDERS: [&str; 4] = ["rectangle", "ellipse", "diamond", "node"];

/// Chooses between traversal order and spatial reading order.
///
/// Arrow detection is unreliable, so a graph without edges, or a traversal that
/// came out much shorter than the number of readable labels, falls back to the
/// reading order of the labels on the page.
///
/// Labels of start/end markers (`semantic` set) bypass the quality filter in both orders.
pub struct StepOrderer<'a> {
    filter: QualityFilter,
    dedupe_threshold: u32,
    ordering: &'a OrderingConfig,
}

impl<'a> StepOrderer<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self {
            filter: QualityFilter::new(config.quality.clone()),
            dedupe_threshold: config.dedupe_threshold,
            ordering: &config.ordering,
        }
    }

    pub fn order(&self, graph: &Graph, algorithm: &AlgorithmResult) -> Vec<String> {
        let traversal = self.traversal_order(graph, algorithm);
        let spatial = self.spatial_order(graph);

        let graph_weak = graph.edge_count() == 0;
        let threshold = self.short_traversal_threshold(spatial.len());
        let traversal_too_short = traversal.len() < threshold;

        debug!(
            traversal = traversal.len(),
            spatial = spatial.len(),
            threshold,
            graph_weak,
            "Choosing step order"
        );

        if graph_weak || traversal_too_short {
            if spatial.is_empty() { traversal } else { spatial }
        } else if traversal.is_empty() {
            spatial
        } else {
            traversal
        }
    }

    /// Extracted step texts in emission order, without placeholders and noise.
    pub fn traversal_order(&self, graph: &Graph, algorithm: &AlgorithmResult) -> Vec<String> {
        let texts: Vec<String> = algorithm
            .steps
            .iter()
            .filter_map(|step| {
                let text = normalize(step.text());
                if text.is_empty() || PLACEHOLDERS.contains(&text.to_lowercase().as_str()) {
                    return None;
                }
                let marker = graph.node(step.id()).is_some_and(is_marker);
                (marker || self.filter.is_good(&text)).then_some(text)
            })
            .collect();
        dedupe_with_threshold(&texts, self.dedupe_threshold)
    }

    /// Readable node labels sorted into row bands top to bottom, then left to right.
    pub fn spatial_order(&self, graph: &Graph) -> Vec<String> {
        let band = self.ordering.row_band_height;
        let mut labeled: Vec<(i64, f64, String)> = graph
            .nodes()
            .iter()
            .filter_map(|n| {
                let text = normalize(&n.label);
                if text.is_empty() || !(is_marker(n) || self.filter.is_good(&text)) {
                    return None;
                }
                let pos = n.position();
                Some(((pos.y / band).floor() as i64, pos.x, text))
            })
            .collect();

        labeled.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        let texts: Vec<String> = labeled.into_iter().map(|(_, _, t)| t).collect();
        dedupe_with_threshold(&texts, self.dedupe_threshold)
    }

    fn short_traversal_threshold(&self, spatial_len: usize) -> usize {
        let wanted = if spatial_len > 0 {
            spatial_len / 2
        } else {
            self.ordering.min_traversal_len
        };
        wanted
            .min(self.ordering.max_traversal_len)
            .max(self.ordering.min_traversal_len)
    }
}

fn is_marker(node: &Node) -> bool {
    node.semantic != Semantic::None
}
