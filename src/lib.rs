//! # Flowscribe - Diagram to Algorithm Engine
//!
//! **Flowscribe** is the symbolic reasoning layer that turns a detected flowchart or BPMN
//! diagram into an ordered list of algorithm steps. Shape/arrow detection and OCR happen
//! upstream; Flowscribe consumes their node/edge records and does everything after that.
//!
//! ## Core Workflow
//!
//! 1.  **Load Detector Output**: Parse the detector's JSON into a `DiagramDefinition`, or
//!     implement `IntoDiagram` for your detector's own format.
//! 2.  **Build the Graph**: `GraphBuilder` normalizes the records into a canonical directed
//!     graph, dropping dangling edges and collapsing duplicates.
//! 3.  **Extract**: The `AlgorithmExtractor` walks the graph depth-first from its start node,
//!     emitting steps, decisions and `IF`/`ELSE`/`END_IF` pseudocode.
//! 4.  **Order**: The `StepOrderer` decides whether the traversal can be trusted or whether the
//!     spatial reading order of the labels is the better guess, and emits the step tables.
//! 5.  **Evaluate** (optional): The `Evaluator` aligns predicted steps with a hand-written
//!     ground truth and reports precision, recall, order and role accuracy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowscribe::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let definition = DiagramDefinition {
//!         nodes: vec![
//!             NodeRecord::new("n0", "ellipse", "Start").with_semantic("start"),
//!             NodeRecord::new("n1", "rectangle", "Fill form"),
//!             NodeRecord::new("n2", "ellipse", "End").with_semantic("end"),
//!         ],
//!         edges: vec![EdgeRecord::new("n0", "n1"), EdgeRecord::new("n1", "n2")],
//!     };
//!
//!     let pipeline = Pipeline::new(PipelineConfig::default());
//!     let report = pipeline.process_named("form.png", &definition);
//!     println!("{}", report.algorithm.pseudocode);
//!     print!("{}", report.algorithm_text);
//!
//!     let ground_truth = GroundTruth::parse("### form.png\n1. Start\n2. Fill form | Clerk\n3. End\n");
//!     let predictions = predictions_from_reports(&[BatchItem::Parsed(Box::new(report))]);
//!     let evaluation = Evaluator::default().evaluate(&predictions, &ground_truth);
//!     println!("{}", serde_json::to_string_pretty(&evaluation)?);
//!     Ok(())
//! }
//! ```

pub mod algorithm;
pub mod config;
pub mod diagram;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod prelude;
pub mod text;
