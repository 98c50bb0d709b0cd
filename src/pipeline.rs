use crate::algorithm::{self, AlgorithmResult};
use crate::config::PipelineConfig;
use crate::diagram::{DiagramDefinition, IntoDiagram};
use crate::error::DiagramError;
use crate::evaluation::{PredictedStep, Predictions};
use crate::graph::{Graph, GraphBuilder, NodeKind};
use crate::output::{self, StepTables, TextTableOptions, render_step_table};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct ParseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub latency_ms: u64,
}

/// Everything derived from one diagram.
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub graph: Graph,
    pub algorithm: AlgorithmResult,
    pub output: StepTables,
    pub algorithm_text: String,
    pub meta: ParseMeta,
}

/// One entry of a batch run: a report, or the reason the file could not be processed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Parsed(Box<ParseReport>),
    Failed { file: String, error: String },
}

impl BatchItem {
    pub fn file(&self) -> Option<&str> {
        match self {
            BatchItem::Parsed(report) => report.meta.file.as_deref(),
            BatchItem::Failed { file, .. } => Some(file),
        }
    }
}

/// Runs graph building, extraction, ordering and rendering with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    kind_mappings: Vec<(String, NodeKind)>,
    bpmn_kinds: bool,
    table_options: TextTableOptions,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// See [`GraphBuilder::with_kind_mapping`].
    pub fn with_kind_mapping(mut self, detector_kind: &str, kind: NodeKind) -> Self {
        self.kind_mappings.push((detector_kind.to_string(), kind));
        self
    }

    /// See [`GraphBuilder::with_bpmn_kinds`].
    pub fn with_bpmn_kinds(mut self) -> Self {
        self.bpmn_kinds = true;
        self
    }

    pub fn with_table_options(mut self, options: TextTableOptions) -> Self {
        self.table_options = options;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn process(&self, definition: &DiagramDefinition) -> ParseReport {
        self.run(None, definition)
    }

    pub fn process_named(&self, file: &str, definition: &DiagramDefinition) -> ParseReport {
        self.run(Some(file.to_string()), definition)
    }

    /// Converts a custom detector format and processes it.
    pub fn process_diagram<D: IntoDiagram>(&self, diagram: D) -> Result<ParseReport, DiagramError> {
        let definition = diagram.into_diagram()?;
        Ok(self.process(&definition))
    }

    /// Processes named detector JSON documents in parallel. A document that fails to
    /// parse becomes a `Failed` entry; the rest of the batch is unaffected.
    pub fn process_many(&self, inputs: &[(String, String)]) -> Vec<BatchItem> {
        let started = Instant::now();
        let items: Vec<BatchItem> = inputs
            .par_iter()
            .map(|(file, json)| match DiagramDefinition::from_json(json) {
                Ok(definition) => BatchItem::Parsed(Box::new(self.process_named(file, &definition))),
                Err(e) => {
                    warn!("Skipping '{}': {}", file, e);
                    BatchItem::Failed {
                        file: file.clone(),
                        error: e.to_string(),
                    }
                }
            })
            .collect();
        info!(
            files = items.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Processed batch"
        );
        items
    }

    fn run(&self, file: Option<String>, definition: &DiagramDefinition) -> ParseReport {
        let started = Instant::now();

        let mut builder = GraphBuilder::new(definition);
        if self.bpmn_kinds {
            builder = builder.with_bpmn_kinds();
        }
        let graph = self
            .kind_mappings
            .iter()
            .fold(builder, |builder, (name, kind)| {
                builder.with_kind_mapping(name, *kind)
            })
            .build();
        let algorithm = algorithm::extract(&graph);
        let output = output::build_output(&graph, &algorithm, &self.config);
        let algorithm_text = render_step_table(&output.bpmn.steps, &self.table_options);

        let meta = ParseMeta {
            file,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            latency_ms: started.elapsed().as_millis() as u64,
        };
        ParseReport {
            graph,
            algorithm,
            output,
            algorithm_text,
            meta,
        }
    }
}

/// Collects the bpmn steps of every parsed report into evaluator input, keyed by file name.
/// Failed and unnamed entries are skipped.
pub fn predictions_from_reports(items: &[BatchItem]) -> Predictions {
    items
        .iter()
        .filter_map(|item| match item {
            BatchItem::Parsed(report) => report.meta.file.clone().map(|file| {
                let steps = report
                    .output
                    .bpmn
                    .steps
                    .iter()
                    .map(PredictedStep::from)
                    .collect();
                (file, steps)
            }),
            BatchItem::Failed { .. } => None,
        })
        .collect()
}
