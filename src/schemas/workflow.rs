//! Workflow schema - The draft under construction and the store's records

use serde::{Deserialize, Serialize};

use super::stage::null_as_empty;
use super::{Stage, StageId, WorkflowId};

/// Whether a workflow may be launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStatus::Active => write!(f, "active"),
            WorkflowStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(WorkflowStatus::Active),
            "inactive" => Ok(WorkflowStatus::Inactive),
            _ => Err(format!("Unknown workflow status: {}", s)),
        }
    }
}

/// Workflow-level metadata, written separately from stages
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowMeta {
    #[serde(rename = "wfdName")]
    pub name: String,

    #[serde(rename = "wfdDesc", default)]
    pub description: String,

    #[serde(rename = "wfdStatus", default)]
    pub status: WorkflowStatus,
}

impl WorkflowMeta {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        WorkflowMeta {
            name: name.into(),
            description: description.into(),
            status: WorkflowStatus::Active,
        }
    }
}

/// The store's answer to a workflow create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    #[serde(rename = "workflowMasterId", default)]
    pub id: Option<WorkflowId>,

    #[serde(flatten)]
    pub meta: WorkflowMeta,
}

/// A persisted workflow as listed by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    #[serde(rename = "workflowMasterId")]
    pub id: WorkflowId,

    #[serde(flatten)]
    pub meta: WorkflowMeta,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub stages: Vec<Stage>,
}

impl WorkflowSummary {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// A workflow under construction (or hydrated for editing)
///
/// The draft never assigns identifiers itself; `id` stays None until the
/// store has created the workflow record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDraft {
    #[serde(rename = "workflowMasterId", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WorkflowId>,

    #[serde(flatten)]
    pub meta: WorkflowMeta,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub stages: Vec<Stage>,
}

impl WorkflowDraft {
    /// Create an empty, unsaved draft
    pub fn new(meta: WorkflowMeta) -> Self {
        WorkflowDraft {
            id: None,
            meta,
            stages: Vec::new(),
        }
    }

    /// Renumber `seq_no` to 1..=N in list order
    pub fn renumber(&mut self) {
        for (i, stage) in self.stages.iter_mut().enumerate() {
            stage.seq_no = (i + 1) as u32;
        }
    }

    /// Find a committed stage by its store id
    pub fn stage_by_id(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == Some(id))
    }

    /// Whether any action anywhere completes the workflow
    pub fn has_completion_path(&self) -> bool {
        self.stages.iter().any(Stage::has_complete_action)
    }

    /// Total number of actions across every stage
    pub fn action_count(&self) -> usize {
        self.stages.iter().map(|s| s.actions.len()).sum()
    }
}

impl From<WorkflowSummary> for WorkflowDraft {
    fn from(summary: WorkflowSummary) -> Self {
        WorkflowDraft {
            id: Some(summary.id),
            meta: summary.meta,
            stages: summary.stages,
        }
    }
}
