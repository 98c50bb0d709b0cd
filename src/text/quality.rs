use super::normalize;
use crate::config::QualityThresholds;

/// Rejects OCR fragments that are too short or too noisy to be a real step.
#[derive(Debug, Clone, Default)]
pub struct QualityFilter {
    thresholds: QualityThresholds,
}

impl QualityFilter {
    pub fn new(thresholds: QualityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn is_good(&self, text: &str) -> bool {
        let text = normalize(text);
        let t = &self.thresholds;

        let len = text.chars().count();
        if len < t.min_len {
            return false;
        }

        let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
        // Only punctuation and symbols.
        if alnum == 0 || alnum < t.min_alnum {
            return false;
        }
        if (alnum as f64) / (len as f64) < t.min_alnum_ratio {
            return false;
        }

        let weird = text
            .chars()
            .filter(|c| !c.is_alphanumeric() && !t.allowed_punctuation.contains(*c))
            .count();
        (weird as f64) / (len as f64) <= t.max_weird_ratio
    }
}

/// Checks `text` against the default quality thresholds.
pub fn is_good(text: &str) -> bool {
    QualityFilter::default().is_good(text)
}
