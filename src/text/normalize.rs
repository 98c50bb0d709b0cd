use super::fuzzy::token_sort_ratio;
use crate::config::DEDUPE_THRESHOLD;
use itertools::Itertools;

/// Collapses every whitespace run (tabs and newlines included) into one space and trims the ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Removes near-duplicate texts using the default similarity threshold of 92.
pub fn dedupe<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    dedupe_with_threshold(texts, DEDUPE_THRESHOLD)
}

/// Keeps each normalized text only if it is less than `threshold` similar to every
/// text kept so far. The comparison ignores case and token order; first occurrences win.
pub fn dedupe_with_threshold<S: AsRef<str>>(texts: &[S], threshold: u32) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut kept_lower: Vec<String> = Vec::new();

    for text in texts {
        let text = normalize(text.as_ref());
        if text.is_empty() {
            continue;
        }
        let lower = text.to_lowercase();
        if kept_lower
            .iter()
            .any(|other| token_sort_ratio(&lower, other) >= threshold as f64)
        {
            continue;
        }
        kept_lower.push(lower);
        kept.push(text);
    }
    kept
}
