use super::ground_truth::GroundTruthEntry;
use super::prediction::PredictedStep;
use crate::config::EvaluationConfig;
use crate::text::fuzzy::token_sort_ratio;
use ahash::AHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A predicted step paired with the ground-truth step it was aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub predicted: usize,
    pub expected: usize,
    /// Similarity on the 0-100 scale, truncated to an integer.
    pub score: u32,
}

/// Scores for a single file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub matched: usize,
    pub avg_match_score: f64,
    pub order_ok: usize,
    pub order_total: usize,
    pub role_ok: usize,
    pub role_total: usize,
    pub pred_len: usize,
    pub gt_len: usize,
    #[serde(skip)]
    pub matches: Vec<Match>,
}

/// Lowercases and collapses whitespace.
pub(crate) fn normalize_for_match(text: &str) -> String {
    text.to_lowercase().split_whitespace().join(" ")
}

/// Rounds to `places` decimals; exact ties go to the even digit.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Greedy alignment: each prediction, in order, takes the best-scoring ground-truth step
/// that no earlier prediction has taken, provided the score reaches `threshold`.
///
/// Not a globally optimal assignment. Ties go to the earliest ground-truth step.
pub fn align(predicted: &[String], expected: &[String], threshold: u32) -> Vec<Match> {
    let mut used: AHashSet<usize> = AHashSet::new();
    let mut matches = Vec::new();

    for (pi, p) in predicted.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (gi, g) in expected.iter().enumerate() {
            if used.contains(&gi) {
                continue;
            }
            let score = token_sort_ratio(p, g);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((gi, score));
            }
        }
        if let Some((gi, score)) = best {
            if score >= threshold as f64 {
                used.insert(gi);
                matches.push(Match {
                    predicted: pi,
                    expected: gi,
                    score: score as u32,
                });
            }
        }
    }
    matches
}

/// Scores one file's predictions against its ground truth.
pub fn score_file(
    file: &str,
    predicted: &[PredictedStep],
    expected: &[GroundTruthEntry],
    config: &EvaluationConfig,
) -> FileReport {
    let pred_desc: Vec<String> = predicted
        .iter()
        .map(|p| normalize_for_match(p.text()))
        .collect();
    let gt_desc: Vec<String> = expected
        .iter()
        .map(|g| normalize_for_match(&g.description))
        .collect();

    let matches = align(&pred_desc, &gt_desc, config.match_threshold);
    let tp = matches.len();
    let avg_match_score = if tp > 0 {
        round_to(
            matches.iter().map(|m| m.score as f64).sum::<f64>() / tp as f64,
            2,
        )
    } else {
        0.0
    };

    // Strict position-wise check, independent of the alignment above.
    let order_total = pred_desc.len().min(gt_desc.len());
    let order_ok = pred_desc
        .iter()
        .zip(&gt_desc)
        .filter(|(p, g)| p == g)
        .count();

    let mut role_ok = 0;
    let mut role_total = 0;
    for m in &matches {
        let gt_role = expected[m.expected].role.trim();
        if gt_role.is_empty() {
            continue;
        }
        role_total += 1;
        let pred_role = predicted[m.predicted].role_text();
        let score = token_sort_ratio(
            &normalize_for_match(pred_role),
            &normalize_for_match(gt_role),
        );
        if score >= config.role_threshold as f64 {
            role_ok += 1;
        }
    }

    FileReport {
        file: file.to_string(),
        tp,
        fp: pred_desc.len().saturating_sub(tp),
        fn_: gt_desc.len().saturating_sub(tp),
        matched: tp,
        avg_match_score,
        order_ok,
        order_total,
        role_ok,
        role_total,
        pred_len: pred_desc.len(),
        gt_len: gt_desc.len(),
        matches,
    }
}
