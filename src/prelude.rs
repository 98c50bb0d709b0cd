//! Prelude module for convenient imports
//!
//! Re-exports the types needed to run the pipeline and the evaluator.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowscribe::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let definition = DiagramDefinition::from_file("path/to/detections.json")?;
//! let report = Pipeline::new(PipelineConfig::default()).process(&definition);
//! for step in &report.output.bpmn.steps {
//!     println!("{}. {}", step.step, step.action);
//! }
//! # Ok(())
//! # }
//! ```

// Pipeline
pub use crate::config::PipelineConfig;
pub use crate::pipeline::{BatchItem, ParseReport, Pipeline, predictions_from_reports};

// Detector input and the canonical graph
pub use crate::diagram::{DiagramDefinition, EdgeRecord, IntoDiagram, NodeRecord};
pub use crate::graph::{Graph, GraphBuilder, Node, NodeKind, Semantic};

// Extraction and output
pub use crate::algorithm::{AlgorithmExtractor, AlgorithmResult, Step};
pub use crate::output::{StepOrderer, StepTables, build_output};

// Evaluation
pub use crate::evaluation::{
    EvaluationReport, Evaluator, GroundTruth, GroundTruthEntry, PredictedStep, Predictions,
    evaluate_predictions,
};

// Error types
pub use crate::error::{ConfigError, DiagramError, EvaluationInputError, GroundTruthError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
