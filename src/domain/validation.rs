//! Validation rules for workflow drafts and stage buffers
//!
//! Every rule is an independent predicate. The validators run them in a fixed
//! order and return the first failure, which is what the user sees.

use std::collections::HashSet;

use thiserror::Error;

use crate::schemas::{ActorType, Catalog, ResultType, Stage, StageId, WorkflowDraft, WorkflowMeta};

/// A rule that blocked progression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("A role must be selected")]
    MissingActor,

    #[error("Role {0} does not exist in the role catalog")]
    UnknownRole(crate::schemas::RoleId),

    #[error("Actor count must be at least 1")]
    InvalidCount { actor_count: u32 },

    #[error("At least one document upload is required when documents are required")]
    InvalidDocumentCount,

    #[error("At least one action is required for this stage.")]
    NoActions,

    #[error("Action name is required for all actions")]
    MissingActionName { index: usize },

    #[error("Action result type must be \"next\", \"prev\", \"complete\", or \"specific\"")]
    InvalidResultType { action: String },

    #[error("A specific stage must be selected for action \"{action}\".")]
    MissingSpecificTarget { action: String },

    #[error("The selected specific stage {target} for action \"{action}\" does not exist.")]
    DanglingTarget { action: String, target: StageId },

    #[error("Required count must be between 1 and {actor_count}")]
    RequiredCountOutOfRange {
        action: String,
        required: u32,
        actor_count: u32,
    },

    #[error("At least one stage is required")]
    NoStages,

    #[error("Stage {position} ({stage}) must have at least one action.")]
    StageMissingActions { position: usize, stage: String },

    #[error("A specific stage must be selected for action \"{action}\" in Stage {position} ({stage}).")]
    StageMissingSpecificTarget {
        position: usize,
        stage: String,
        action: String,
    },

    #[error("At least one 'Complete' action is required to complete the workflow.")]
    MissingCompletionPath,
}

impl ValidationError {
    /// Name of the rule that failed
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MissingField",
            ValidationError::MissingActor => "MissingActor",
            ValidationError::UnknownRole(_) => "UnknownRole",
            ValidationError::InvalidCount { .. } => "InvalidCount",
            ValidationError::InvalidDocumentCount => "InvalidDocumentCount",
            ValidationError::NoActions => "NoActions",
            ValidationError::MissingActionName { .. } => "MissingActionName",
            ValidationError::InvalidResultType { .. } => "InvalidResultType",
            ValidationError::MissingSpecificTarget { .. } => "MissingSpecificTarget",
            ValidationError::DanglingTarget { .. } => "DanglingTarget",
            ValidationError::RequiredCountOutOfRange { .. } => "RequiredCountOutOfRange",
            ValidationError::NoStages => "NoStages",
            ValidationError::StageMissingActions { .. } => "StageMissingActions",
            ValidationError::StageMissingSpecificTarget { .. } => "StageMissingSpecificTarget",
            ValidationError::MissingCompletionPath => "MissingCompletionPath",
        }
    }
}

/// Outcome of a validation pass
pub type ValidationResult = std::result::Result<(), ValidationError>;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn committed_ids(stages: &[Stage]) -> HashSet<StageId> {
    stages.iter().filter_map(|s| s.id).collect()
}

/// Validate the workflow name and description
pub fn validate_workflow_meta(meta: &WorkflowMeta) -> ValidationResult {
    if is_blank(&meta.name) {
        return Err(ValidationError::MissingField { field: "Workflow name" });
    }
    if is_blank(&meta.description) {
        return Err(ValidationError::MissingField { field: "Workflow description" });
    }
    Ok(())
}

/// Validate the stage being authored against the stages already committed.
pub fn validate_stage_buffer(buffer: &Stage, committed: &[Stage]) -> ValidationResult {
    if is_blank(&buffer.name) {
        return Err(ValidationError::MissingField { field: "Stage name" });
    }
    if is_blank(&buffer.description) {
        return Err(ValidationError::MissingField { field: "Stage description" });
    }
    if buffer.actor_type == ActorType::Role && buffer.role_id.is_none() {
        return Err(ValidationError::MissingActor);
    }
    if buffer.actor_count < 1 {
        return Err(ValidationError::InvalidCount {
            actor_count: buffer.actor_count,
        });
    }
    if buffer.documents_required && buffer.document_count < 1 {
        return Err(ValidationError::InvalidDocumentCount);
    }
    if buffer.actions.is_empty() {
        return Err(ValidationError::NoActions);
    }

    let known = committed_ids(committed);
    for (index, action) in buffer.actions.iter().enumerate() {
        if is_blank(&action.name) {
            return Err(ValidationError::MissingActionName { index });
        }
        if !action.result_type.is_known() {
            return Err(ValidationError::InvalidResultType {
                action: action.name.clone(),
            });
        }
        if action.result_type == ResultType::Specific {
            let Some(target) = action.specific_target else {
                return Err(ValidationError::MissingSpecificTarget {
                    action: action.name.clone(),
                });
            };
            if !known.contains(&target) {
                return Err(ValidationError::DanglingTarget {
                    action: action.name.clone(),
                    target,
                });
            }
        }
        if action.required_count < 1 || action.required_count > buffer.actor_count {
            return Err(ValidationError::RequiredCountOutOfRange {
                action: action.name.clone(),
                required: action.required_count,
                actor_count: buffer.actor_count,
            });
        }
    }

    Ok(())
}

/// Check a role-assigned stage against the role catalog.
///
/// Passes when the catalog is unavailable; catalog failures never block editing.
pub fn validate_actor_in_catalog(buffer: &Stage, catalog: &Catalog) -> ValidationResult {
    if buffer.actor_type != ActorType::Role {
        return Ok(());
    }
    match buffer.role_id {
        Some(role) if catalog.has_role(role) == Some(false) => {
            Err(ValidationError::UnknownRole(role))
        }
        _ => Ok(()),
    }
}

/// Validate the full list of committed stages.
pub fn validate_stage_list(stages: &[Stage]) -> ValidationResult {
    if stages.is_empty() {
        return Err(ValidationError::NoStages);
    }

    let known = committed_ids(stages);
    for (i, stage) in stages.iter().enumerate() {
        let position = i + 1;
        if stage.actions.is_empty() {
            return Err(ValidationError::StageMissingActions {
                position,
                stage: stage.name.clone(),
            });
        }
        for action in stage
            .actions
            .iter()
            .filter(|a| a.result_type == ResultType::Specific)
        {
            let Some(target) = action.specific_target else {
                return Err(ValidationError::StageMissingSpecificTarget {
                    position,
                    stage: stage.name.clone(),
                    action: action.name.clone(),
                });
            };
            if !known.contains(&target) {
                return Err(ValidationError::DanglingTarget {
                    action: action.name.clone(),
                    target,
                });
            }
        }
    }

    if !stages.iter().any(Stage::has_complete_action) {
        return Err(ValidationError::MissingCompletionPath);
    }

    Ok(())
}

/// Everything `submit` checks before anything is sent
pub fn validate_draft(draft: &WorkflowDraft) -> ValidationResult {
    validate_workflow_meta(&draft.meta)?;
    validate_stage_list(&draft.stages)
}
