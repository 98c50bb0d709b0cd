use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of a detected node, which decides how the extractor treats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// An activity.
    #[default]
    Rectangle,
    /// A decision; its outgoing edges are mutually exclusive branches.
    Diamond,
    /// A start or end marker.
    Ellipse,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Rectangle => "rectangle",
            NodeKind::Diamond => "diamond",
            NodeKind::Ellipse => "ellipse",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "rectangle" => Some(NodeKind::Rectangle),
            "diamond" => Some(NodeKind::Diamond),
            "ellipse" => Some(NodeKind::Ellipse),
            _ => None,
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, NodeKind::Diamond)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a node marks the start or the end of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Semantic {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "end")]
    End,
}

impl Semantic {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "start" => Semantic::Start,
            "end" => Semantic::End,
            _ => Semantic::None,
        }
    }
}

/// A point in source-image pixel coordinates, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An axis-aligned box in source-image pixel coordinates, serialized as `[x1, y1, x2, y2]`.
///
/// Constructed through [`BBox::from_corners`], which guarantees non-negative
/// coordinates with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BBox {
    pub fn from_corners([ax, ay, bx, by]: [f64; 4]) -> Self {
        Self {
            x1: ax.min(bx).max(0.0),
            y1: ay.min(by).max(0.0),
            x2: ax.max(bx).max(0.0),
            y2: ay.max(by).max(0.0),
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.x1 + self.x2) / 2.0,
            y: (self.y1 + self.y2) / 2.0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }
}

impl From<[f64; 4]> for BBox {
    fn from(corners: [f64; 4]) -> Self {
        Self::from_corners(corners)
    }
}

impl From<BBox> for [f64; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A node of the canonical graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub semantic: Semantic,
    pub label: String,
    pub bbox: Option<BBox>,
    pub center: Option<Point>,
}

impl Node {
    /// The text shown for this node: its trimmed label, or its kind when the label is blank.
    pub fn display_text(&self) -> &str {
        let trimmed = self.label.trim();
        if trimmed.is_empty() {
            self.kind.as_str()
        } else {
            trimmed
        }
    }

    /// The node's position, falling back to the origin when the detector gave none.
    pub fn position(&self) -> Point {
        self.center.unwrap_or_default()
    }
}

/// The relationship an edge expresses. Detectors currently only produce sequence flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    #[default]
    Sequence,
}

/// A directed edge of the canonical graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}
