use super::scoring::{FileReport, round_to};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub threshold: u32,
}

/// Pooled metrics over every evaluated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub step_precision: f64,
    pub step_recall: f64,
    #[serde(rename = "step_f1@70")]
    pub step_f1: f64,
    pub avg_match_score: f64,
    pub order_accuracy: f64,
    #[serde(rename = "role_accuracy@70")]
    pub role_accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub meta: ReportMeta,
    pub summary: Summary,
    pub per_file: Vec<FileReport>,
}

/// Running sums across files. Partial aggregates merge associatively.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Aggregate {
    tp: usize,
    fp: usize,
    fn_: usize,
    sum_score: f64,
    sum_matched: usize,
    sum_order_ok: usize,
    sum_order_total: usize,
    sum_role_ok: usize,
    sum_role_total: usize,
}

impl Aggregate {
    pub(crate) fn from_file(report: &FileReport) -> Self {
        Self {
            tp: report.tp,
            fp: report.fp,
            fn_: report.fn_,
            // The per-file average is already rounded, and pooling uses that rounded value.
            sum_score: report.avg_match_score * report.matched as f64,
            sum_matched: report.matched,
            sum_order_ok: report.order_ok,
            sum_order_total: report.order_total,
            sum_role_ok: report.role_ok,
            sum_role_total: report.role_total,
        }
    }

    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            tp: self.tp + other.tp,
            fp: self.fp + other.fp,
            fn_: self.fn_ + other.fn_,
            sum_score: self.sum_score + other.sum_score,
            sum_matched: self.sum_matched + other.sum_matched,
            sum_order_ok: self.sum_order_ok + other.sum_order_ok,
            sum_order_total: self.sum_order_total + other.sum_order_total,
            sum_role_ok: self.sum_role_ok + other.sum_role_ok,
            sum_role_total: self.sum_role_total + other.sum_role_total,
        }
    }

    pub(crate) fn summary(&self) -> Summary {
        let precision = ratio(self.tp as f64, (self.tp + self.fp) as f64);
        let recall = ratio(self.tp as f64, (self.tp + self.fn_) as f64);
        let f1 = ratio(2.0 * precision * recall, precision + recall);

        Summary {
            step_precision: round_to(precision, 4),
            step_recall: round_to(recall, 4),
            step_f1: round_to(f1, 4),
            avg_match_score: round_to(ratio(self.sum_score, self.sum_matched as f64), 2),
            order_accuracy: round_to(
                ratio(self.sum_order_ok as f64, self.sum_order_total as f64),
                4,
            ),
            role_accuracy: round_to(
                ratio(self.sum_role_ok as f64, self.sum_role_total as f64),
                4,
            ),
        }
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
