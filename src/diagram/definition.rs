use crate::error::DiagramError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The raw output of a shape/arrow detector: loosely-typed node and edge records.
///
/// Every field except the ids is optional here; defaults are applied when the
/// canonical graph is built, so malformed detector output never aborts a parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagramDefinition {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A single detected shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub semantic: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// `[x1, y1, x2, y2]` in source-image pixels.
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
    /// `[cx, cy]` in source-image pixels.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
}

/// A single detected arrow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl DiagramDefinition {
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(json).map_err(|e| DiagramError::JsonParseError(e.to_string()))
    }

    /// Load detector output from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DiagramError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

impl NodeRecord {
    /// Shorthand for a labelled node without geometry.
    pub fn new(id: impl Into<String>, kind: &str, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind.to_string()),
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_semantic(mut self, semantic: &str) -> Self {
        self.semantic = Some(semantic.to_string());
        self
    }

    pub fn with_bbox(mut self, bbox: [f64; 4]) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_center(mut self, center: [f64; 2]) -> Self {
        self.center = Some(center);
        self
    }
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: None,
        }
    }
}
