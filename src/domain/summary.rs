//! Review summary of a draft, with actor names and resolved transitions

use serde::Serialize;

use crate::schemas::{ActorType, Catalog, Quorum, ResultType, WorkflowDraft, WorkflowStatus};

use super::transitions::{outgoing, InvalidTransition, Transition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionSummary {
    pub name: String,
    pub result_type: ResultType,
    pub destination: String,
    pub required_count: u32,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub seq_no: u32,
    pub name: String,
    pub description: String,
    pub actor_type: ActorType,
    pub actor: String,
    pub actor_count: u32,
    pub quorum: Quorum,
    pub conflict_check: bool,
    /// Upload count when documents are required
    pub documents: Option<u32>,
    pub actions: Vec<ActionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub name: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub stages: Vec<StageSummary>,
}

fn describe(transition: &Transition<'_>) -> String {
    match transition {
        Transition::Stage { stage, .. } => format!("Stage {} ({})", stage.seq_no, stage.name),
        Transition::Complete => "Complete workflow".to_string(),
        Transition::Invalid(InvalidTransition::BrokenTarget(_)) => "Unknown Stage".to_string(),
        Transition::Invalid(InvalidTransition::MissingTarget) => {
            crate::schemas::NOT_APPLICABLE.to_string()
        }
        Transition::Invalid(other) => format!("Invalid ({})", other),
    }
}

/// Build the review view of a draft
pub fn summarize(draft: &WorkflowDraft, catalog: &Catalog) -> ReviewSummary {
    let stages = draft
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let actor = match stage.actor_type {
                ActorType::Role => catalog.role_name(stage.role_id),
                ActorType::User => catalog.user_name(stage.user_id),
            };
            let actions = outgoing(index, &draft.stages)
                .into_iter()
                .map(|(action, transition)| ActionSummary {
                    name: action.name.clone(),
                    result_type: action.result_type,
                    destination: describe(&transition),
                    required_count: action.required_count,
                    valid: transition.is_valid(),
                })
                .collect();

            StageSummary {
                seq_no: stage.seq_no,
                name: stage.name.clone(),
                description: stage.description.clone(),
                actor_type: stage.actor_type,
                actor: actor.to_string(),
                actor_count: stage.actor_count,
                quorum: stage.quorum,
                conflict_check: stage.conflict_check,
                documents: stage.documents_required.then_some(stage.document_count),
                actions,
            }
        })
        .collect();

    ReviewSummary {
        name: draft.meta.name.clone(),
        description: draft.meta.description.clone(),
        status: draft.meta.status,
        stages,
    }
}

impl std::fmt::Display for ReviewSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} [{}]", self.name, self.status)?;
        writeln!(f, "  {}", self.description)?;
        for stage in &self.stages {
            writeln!(f)?;
            writeln!(f, "Stage {}: {}", stage.seq_no, stage.name)?;
            writeln!(f, "  {}", stage.description)?;
            writeln!(
                f,
                "  Actor: {} ({}), count {}, quorum {}",
                stage.actor, stage.actor_type, stage.actor_count, stage.quorum
            )?;
            if stage.conflict_check {
                writeln!(f, "  Conflict check: yes")?;
            }
            if let Some(count) = stage.documents {
                writeln!(f, "  Documents required: {}", count)?;
            }
            for action in &stage.actions {
                writeln!(
                    f,
                    "  - {} [{}] -> {} (requires {})",
                    action.name, action.result_type, action.destination, action.required_count
                )?;
            }
        }
        Ok(())
    }
}
