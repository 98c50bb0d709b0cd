//! Scoring predicted step sequences against hand-authored ground truth.

mod ground_truth;
mod prediction;
mod report;
mod scoring;

pub use ground_truth::{GLOBAL_SECTION, GroundTruth, GroundTruthEntry};
pub use prediction::{
    PredictedStep, Predictions, load_predictions, parse_predictions, predictions_from_value,
};
pub use report::{EvaluationReport, ReportMeta, Summary};
pub use scoring::{FileReport, Match, align, score_file};

use crate::config::EvaluationConfig;
use rayon::prelude::*;
use report::Aggregate;
use tracing::debug;

/// Scores predictions for many files and pools the results.
///
/// Files are scored independently in parallel. The per-file reports keep the
/// order of `predictions`, and the pooled sums are accumulated in that order.
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluationConfig::default())
    }
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, predictions: &Predictions, ground_truth: &GroundTruth) -> EvaluationReport {
        let files: Vec<(&String, &Vec<PredictedStep>)> = predictions.iter().collect();

        let per_file: Vec<FileReport> = files
            .par_iter()
            .map(|(file, steps)| {
                let expected = ground_truth.entries_for(file);
                let report = score_file(file, steps, expected, &self.config);
                debug!(
                    file = file.as_str(),
                    tp = report.tp,
                    fp = report.fp,
                    fn_ = report.fn_,
                    "Scored file"
                );
                report
            })
            .collect();

        let aggregate = per_file
            .iter()
            .map(Aggregate::from_file)
            .fold(Aggregate::default(), Aggregate::merge);

        EvaluationReport {
            meta: ReportMeta {
                threshold: self.config.match_threshold,
            },
            summary: aggregate.summary(),
            per_file,
        }
    }
}

/// Evaluates with the default thresholds.
pub fn evaluate_predictions(predictions: &Predictions, ground_truth: &GroundTruth) -> EvaluationReport {
    Evaluator::default().evaluate(predictions, ground_truth)
}
