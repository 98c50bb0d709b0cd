use crate::error::EvaluationInputError;
use crate::output::{BpmnStep, TableRow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A predicted step as handed to the evaluator.
///
/// `action` takes precedence over `description`; empty strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedStep {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl PredictedStep {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: Some(action.into()),
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn text(&self) -> &str {
        [&self.action, &self.description]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn role_text(&self) -> &str {
        self.role.as_deref().unwrap_or("").trim()
    }
}

impl From<&BpmnStep> for PredictedStep {
    fn from(step: &BpmnStep) -> Self {
        Self {
            action: Some(step.action.clone()),
            description: None,
            role: Some(step.role.clone()),
        }
    }
}

impl TableRow for PredictedStep {
    fn action(&self) -> &str {
        self.text()
    }
    fn role(&self) -> &str {
        self.role_text()
    }
}

/// Predicted steps keyed by file name, in insertion order.
pub type Predictions = IndexMap<String, Vec<PredictedStep>>;

/// Parses a predictions document: an object mapping file names to step lists.
///
/// Each step is either an object with `action` / `description` / `role` or a bare
/// string, which is taken as the description.
pub fn parse_predictions(json: &str) -> Result<Predictions, EvaluationInputError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| EvaluationInputError::JsonParseError(e.to_string()))?;
    predictions_from_value(value)
}

pub fn load_predictions(path: impl AsRef<Path>) -> Result<Predictions, EvaluationInputError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| EvaluationInputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_predictions(&content)
}

pub fn predictions_from_value(value: Value) -> Result<Predictions, EvaluationInputError> {
    let Value::Object(files) = value else {
        return Err(EvaluationInputError::NotAnObject);
    };

    let mut predictions = Predictions::with_capacity(files.len());
    for (file, steps) in files {
        let Value::Array(items) = steps else {
            return Err(EvaluationInputError::StepsNotAList { file });
        };
        let mut parsed = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let step = match item {
                Value::String(text) => PredictedStep {
                    description: Some(text),
                    ..Default::default()
                },
                Value::Object(_) => serde_json::from_value(item).map_err(|_| {
                    EvaluationInputError::InvalidStep {
                        file: file.clone(),
                        index,
                    }
                })?,
                _ => {
                    return Err(EvaluationInputError::InvalidStep {
                        file: file.clone(),
                        index,
                    });
                }
            };
            parsed.push(step);
        }
        predictions.insert(file, parsed);
    }
    Ok(predictions)
}
