use serde::{Deserialize, Serialize};

pub const MINIMAL_SCHEMA: &str = "step_table_v1";
pub const BPMN_SCHEMA: &str = "bpmn_table_v1";

/// A 1-indexed `{step, description}` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalStep {
    pub step: usize,
    pub description: String,
}

/// A 1-indexed `{step, action, role}` row. `role` is empty until something assigns lanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmnStep {
    pub step: usize,
    pub action: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalTable {
    pub schema: String,
    pub steps: Vec<MinimalStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmnTable {
    pub schema: String,
    pub steps: Vec<BpmnStep>,
}

/// The two parallel step tables produced for every parsed diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTables {
    pub minimal: MinimalTable,
    pub bpmn: BpmnTable,
}

impl StepTables {
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let minimal = texts
            .iter()
            .enumerate()
            .map(|(i, t)| MinimalStep {
                step: i + 1,
                description: t.as_ref().to_string(),
            })
            .collect();
        let bpmn = texts
            .iter()
            .enumerate()
            .map(|(i, t)| BpmnStep {
                step: i + 1,
                action: t.as_ref().to_string(),
                role: String::new(),
            })
            .collect();

        Self {
            minimal: MinimalTable {
                schema: MINIMAL_SCHEMA.to_string(),
                steps: minimal,
            },
            bpmn: BpmnTable {
                schema: BPMN_SCHEMA.to_string(),
                steps: bpmn,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.bpmn.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bpmn.steps.is_empty()
    }
}
