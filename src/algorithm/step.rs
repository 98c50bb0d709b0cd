use serde::{Deserialize, Serialize};

/// One emitted step of the extracted algorithm, tied to the node it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Step {
        id: String,
        text: String,
    },
    /// A branch point. `next` lists every successor, even those the pseudocode does not expand.
    Decision {
        id: String,
        text: String,
        next: Vec<String>,
    },
}

impl Step {
    pub fn id(&self) -> &str {
        match self {
            Step::Step { id, .. } | Step::Decision { id, .. } => id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Step::Step { text, .. } | Step::Decision { text, .. } => text,
        }
    }

    pub fn is_decision(&self) -> bool {
        matches!(self, Step::Decision { .. })
    }
}

/// The outcome of walking a canonical graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub steps: Vec<Step>,
    pub pseudocode: String,
    pub start: Option<String>,
    /// Nodes the walk never reached, in graph order.
    pub unvisited: Vec<String>,
}

impl AlgorithmResult {
    pub fn step_texts(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(Step::text)
    }
}
