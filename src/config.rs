use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Minimum length of a step text after normalization.
pub const MIN_TEXT_LEN: usize = 4;
/// Minimum number of alphanumeric characters in a step text.
pub const MIN_ALNUM_COUNT: usize = 3;
/// Minimum share of alphanumeric characters in a step text.
pub const MIN_ALNUM_RATIO: f64 = 0.35;
/// Maximum share of characters that are neither alphanumeric nor allowed punctuation.
pub const MAX_WEIRD_RATIO: f64 = 0.15;
/// Punctuation (and space) that does not count against a step text.
pub const ALLOWED_PUNCTUATION: &str = " -.,:;()/%+&";
/// Similarity (0-100) at or above which two step texts are considered duplicates.
pub const DEDUPE_THRESHOLD: u32 = 92;
/// Similarity (0-100) at or above which a prediction matches a ground-truth step.
pub const MATCH_THRESHOLD: u32 = 70;
/// Height in pixels of the horizontal bands used for reading order.
pub const ROW_BAND_HEIGHT: f64 = 70.0;

const ENV_PREFIX: &str = "FLOWSCRIBE_";

/// Thresholds used to reject OCR garbage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub min_len: usize,
    pub min_alnum: usize,
    pub min_alnum_ratio: f64,
    pub max_weird_ratio: f64,
    pub allowed_punctuation: String,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_len: MIN_TEXT_LEN,
            min_alnum: MIN_ALNUM_COUNT,
            min_alnum_ratio: MIN_ALNUM_RATIO,
            max_weird_ratio: MAX_WEIRD_RATIO,
            allowed_punctuation: ALLOWED_PUNCTUATION.to_string(),
        }
    }
}

/// Controls the choice between traversal order and spatial order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    pub row_band_height: f64,
    /// Lower bound of the "traversal too short" threshold.
    pub min_traversal_len: usize,
    /// Upper bound of the "traversal too short" threshold.
    pub max_traversal_len: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            row_band_height: ROW_BAND_HEIGHT,
            min_traversal_len: 3,
            max_traversal_len: 8,
        }
    }
}

/// Similarity thresholds used when scoring predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub match_threshold: u32,
    pub role_threshold: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            match_threshold: MATCH_THRESHOLD,
            role_threshold: MATCH_THRESHOLD,
        }
    }
}

/// Every tunable of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub quality: QualityThresholds,
    pub dedupe_threshold: u32,
    pub ordering: OrderingConfig,
    pub evaluation: EvaluationConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            quality: QualityThresholds::default(),
            dedupe_threshold: DEDUPE_THRESHOLD,
            ordering: OrderingConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }

    /// Applies `FLOWSCRIBE_*` environment variables on top of the current values.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(env::vars().filter(|(k, _)| k.starts_with(ENV_PREFIX)))
    }

    fn with_overrides(
        mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, ConfigError> {
        for (key, value) in vars {
            let field = key.strip_prefix(ENV_PREFIX).unwrap_or(&key).to_lowercase();
            match field.as_str() {
                "dedupe_threshold" => self.dedupe_threshold = parse_var(&key, &value)?,
                "match_threshold" => self.evaluation.match_threshold = parse_var(&key, &value)?,
                "role_threshold" => self.evaluation.role_threshold = parse_var(&key, &value)?,
                "row_band_height" => self.ordering.row_band_height = parse_var(&key, &value)?,
                _ => tracing::warn!("Ignoring unknown configuration variable {}", key),
            }
        }
        Ok(self)
    }

    /// Checks that every value lies in its meaningful range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("dedupe_threshold", self.dedupe_threshold as f64, 0.0, 100.0)?;
        check_range(
            "evaluation.match_threshold",
            self.evaluation.match_threshold as f64,
            0.0,
            100.0,
        )?;
        check_range(
            "evaluation.role_threshold",
            self.evaluation.role_threshold as f64,
            0.0,
            100.0,
        )?;
        check_range("quality.min_alnum_ratio", self.quality.min_alnum_ratio, 0.0, 1.0)?;
        check_range("quality.max_weird_ratio", self.quality.max_weird_ratio, 0.0, 1.0)?;
        if !(self.ordering.row_band_height > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "ordering.row_band_height".to_string(),
                value: self.ordering.row_band_height,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        check_range(
            "ordering.min_traversal_len",
            self.ordering.min_traversal_len as f64,
            0.0,
            self.ordering.max_traversal_len as f64,
        )
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvVarError {
        var: var.to_string(),
        message: e.to_string(),
    })
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value < min || value > max || value.is_nan() {
        return Err(ConfigError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
