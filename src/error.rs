use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading raw detector output.
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Could not read detector file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse detector JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid detector data: {0}")]
    ValidationError(String),
}

/// Errors raised when the predictions handed to the evaluation engine have the wrong shape.
#[derive(Error, Debug)]
pub enum EvaluationInputError {
    #[error("Could not read predictions file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse predictions JSON: {0}")]
    JsonParseError(String),

    #[error("Predictions must be an object mapping file names to step lists")]
    NotAnObject,

    #[error("Steps for file '{file}' must be a list")]
    StepsNotAList { file: String },

    #[error("Step {index} for file '{file}' must be a string or an object")]
    InvalidStep { file: String, index: usize },
}

/// Errors that can occur while reading a ground-truth document.
#[derive(Error, Debug)]
pub enum GroundTruthError {
    #[error("Could not read ground truth file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading or validating a `PipelineConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration JSON: {0}")]
    JsonParseError(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Failed to parse environment variable {var}: {message}")]
    EnvVarError { var: String, message: String },
}
