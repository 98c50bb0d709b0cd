mod mermaid;
mod ordering;
mod table;
mod text_table;

pub use mermaid::text_to_mermaid;
pub use ordering::StepOrderer;
pub use table::{
    BPMN_SCHEMA, BpmnStep, BpmnTable, MINIMAL_SCHEMA, MinimalStep, MinimalTable, StepTables,
};
pub use text_table::{TableRow, TextTableOptions, render_step_table};

use crate::algorithm::AlgorithmResult;
use crate::config::PipelineConfig;
use crate::graph::Graph;

/// Orders the steps of `algorithm` and emits both step-table schemas.
pub fn build_output(graph: &Graph, algorithm: &AlgorithmResult, config: &PipelineConfig) -> StepTables {
    let ordered = StepOrderer::new(config).order(graph, algorithm);
    StepTables::from_texts(&ordered)
}
