//! Workflow management: listing, deletion, copies and draft files

use std::collections::HashMap;

use super::Designer;
use crate::backend::{StagePayload, WorkflowBackend};
use crate::domain::{validate_draft, Capabilities, ValidationError};
use crate::errors::{DesignerError, Result};
use crate::schemas::{ResultType, Stage, StageId, WorkflowDraft, WorkflowId, WorkflowMeta, WorkflowSummary};

/// Appended to the name of a copied workflow
pub const COPY_SUFFIX: &str = " (Copy)";

pub async fn list_workflows<B: WorkflowBackend + ?Sized>(backend: &B) -> Result<Vec<WorkflowSummary>> {
    backend
        .list_workflows()
        .await
        .map_err(|e| e.during("fetch workflows"))
}

pub async fn delete_workflow<B: WorkflowBackend + ?Sized>(
    backend: &B,
    capabilities: &Capabilities,
    id: WorkflowId,
) -> Result<()> {
    capabilities.require_designer("delete workflows")?;
    backend
        .delete_workflow(id)
        .await
        .map_err(|e| e.during("delete workflow"))?;
    tracing::info!(workflow = %id, "deleted workflow");
    Ok(())
}

/// Point every `specific` action at its new stage id.
///
/// Returns whether any target could not be mapped yet.
fn remap_targets(stage: &mut Stage, ids: &HashMap<StageId, StageId>) -> bool {
    let mut unresolved = false;
    for action in stage
        .actions
        .iter_mut()
        .filter(|a| a.result_type == ResultType::Specific)
    {
        if let Some(target) = action.specific_target {
            match ids.get(&target) {
                Some(new) => action.specific_target = Some(*new),
                None => unresolved = true,
            }
        }
    }
    unresolved
}

/// Duplicate a workflow and all its stages under `"<name> (Copy)"`.
///
/// Stages are re-created in order. Targets that point forward are fixed up
/// with a second update once every stage has its new id.
pub async fn copy_workflow<B: WorkflowBackend + ?Sized>(
    backend: &B,
    capabilities: &Capabilities,
    id: WorkflowId,
) -> Result<WorkflowId> {
    capabilities.require_designer("copy workflows")?;
    let source = backend
        .get_workflow(id)
        .await
        .map_err(|e| e.during("load workflow data"))?;

    let meta = WorkflowMeta {
        name: format!("{}{}", source.meta.name, COPY_SUFFIX),
        ..source.meta.clone()
    };
    let copy = backend
        .create_workflow(&meta)
        .await
        .map_err(|e| e.during("copy workflow"))?
        .id
        .ok_or_else(|| DesignerError::Backend {
            status: 200,
            message: "Failed to retrieve new workflow ID".to_string(),
        })?;

    let mut ids = HashMap::new();
    let mut pending = Vec::new();
    for (i, original) in source.stages.iter().enumerate() {
        let mut original = original.clone();
        original.seq_no = i as u32 + 1;
        let mut stage = original.clone();
        let unresolved = remap_targets(&mut stage, &ids);

        let stored = backend
            .create_stage(copy, &StagePayload::from(&stage))
            .await
            .map_err(|e| e.during("copy stage"))?;
        if let (Some(old), Some(new)) = (stage.id, stored.id) {
            ids.insert(old, new);
        }
        if unresolved {
            pending.push((original, stored.id));
        }
    }

    for (mut stage, new_id) in pending {
        let Some(new_id) = new_id else { continue };
        remap_targets(&mut stage, &ids);
        backend
            .update_stage(copy, new_id, &StagePayload::from(&stage))
            .await
            .map_err(|e| e.during("copy stage"))?;
    }

    tracing::info!(source = %id, copy = %copy, stages = source.stages.len(), "copied workflow");
    Ok(copy)
}

/// Push a draft file to the store through the normal commit path.
///
/// The file is validated offline first. `specific` targets may only point at
/// stages earlier in the file; they are rewritten to the ids the store assigns.
pub async fn apply_draft<B: WorkflowBackend>(
    backend: B,
    capabilities: Capabilities,
    draft: &WorkflowDraft,
) -> Result<WorkflowId> {
    capabilities.require_designer("save workflows")?;
    validate_draft(draft)?;

    let mut seen = Vec::new();
    for stage in &draft.stages {
        for action in stage
            .actions
            .iter()
            .filter(|a| a.result_type == ResultType::Specific)
        {
            if let Some(target) = action.specific_target {
                if !seen.contains(&target) {
                    return Err(ValidationError::DanglingTarget {
                        action: action.name.clone(),
                        target,
                    }
                    .into());
                }
            }
        }
        seen.extend(stage.id);
    }

    let mut designer = Designer::new(backend, capabilities, draft.meta.clone());
    designer.load_catalogs().await;

    let mut ids = HashMap::new();
    for stage in &draft.stages {
        let mut template = stage.clone();
        remap_targets(&mut template, &ids);
        designer.begin_stage_from(&template)?;
        designer.commit_stage().await?;

        let committed = designer.draft().stages.last().and_then(|s| s.id);
        if let (Some(old), Some(new)) = (stage.id, committed) {
            ids.insert(old, new);
        }
    }

    designer.submit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, Operation};
    use crate::domain::WORKFLOW_DESIGNER;
    use crate::errors::DesignerError;
    use crate::schemas::{Action, RoleId};
    use std::sync::Arc;

    fn caps() -> Capabilities {
        Capabilities::new([WORKFLOW_DESIGNER])
    }

    /// Three stages; Review can send the request back to the start
    fn file_draft() -> WorkflowDraft {
        let mut draft = WorkflowDraft::new(WorkflowMeta::new("Purchase", "Purchase approval"));
        draft.stages = vec![
            Stage::for_role("Request", "Raise", RoleId(1))
                .with_id(StageId(1))
                .with_action(Action::named("Submit", ResultType::Next)),
            Stage::for_role("Review", "Check", RoleId(1))
                .with_id(StageId(2))
                .with_action(Action::named("Reject", ResultType::Specific).with_target(StageId(1)))
                .with_action(Action::named("Accept", ResultType::Next)),
            Stage::for_role("Approve", "Sign off", RoleId(1))
                .with_id(StageId(3))
                .with_action(Action::named("Approve", ResultType::Complete)),
        ];
        draft.renumber();
        draft
    }

    #[tokio::test]
    async fn test_apply_remaps_backward_targets() {
        let store = Arc::new(InMemoryBackend::new().with_role(1, "Manager"));
        let id = apply_draft(Arc::clone(&store), caps(), &file_draft())
            .await
            .unwrap();

        let stored = store.workflow(id).unwrap();
        assert_eq!(stored.stages.len(), 3);
        let request_id = stored.stages[0].id;
        assert_eq!(stored.stages[1].actions[0].specific_target, request_id);
        assert_ne!(request_id, Some(StageId(1)));
        assert_eq!(store.call_count(Operation::CreateWorkflow), 1);
        assert_eq!(store.call_count(Operation::UpdateWorkflow), 1);
    }

    #[tokio::test]
    async fn test_apply_rejects_forward_targets_offline() {
        let store = Arc::new(InMemoryBackend::new());
        let mut draft = file_draft();
        draft.stages[0].actions[0] =
            Action::named("Skip", ResultType::Specific).with_target(StageId(3));

        let err = apply_draft(Arc::clone(&store), caps(), &draft)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DesignerError::Validation(ValidationError::DanglingTarget { .. })
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_apply_invalid_draft() {
        let store = Arc::new(InMemoryBackend::new());
        let mut draft = file_draft();
        draft.stages[2].actions[0].result_type = ResultType::Next;

        let err = apply_draft(Arc::clone(&store), caps(), &draft)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DesignerError::Validation(ValidationError::MissingCompletionPath)
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_copy_names_and_remaps() {
        let store = InMemoryBackend::new();
        let mut source = file_draft();
        source.stages[0].actions.push(
            Action::named("Fast track", ResultType::Specific).with_target(StageId(3)),
        );
        let original = store.insert_workflow(source);
        let original_stages = store.workflow(original).unwrap().stages;

        let copy = copy_workflow(&store, &caps(), original).await.unwrap();
        let copied = store.workflow(copy).unwrap();

        assert_eq!(copied.meta.name, "Purchase (Copy)");
        assert_eq!(copied.meta.description, "Purchase approval");
        assert_eq!(copied.stages.len(), original_stages.len());
        let new_ids: Vec<Option<StageId>> = copied.stages.iter().map(|s| s.id).collect();
        assert_eq!(copied.stages[1].actions[0].specific_target, new_ids[0]);
        assert_eq!(copied.stages[0].actions[1].specific_target, new_ids[2]);
        assert!(validate_draft(&copied).is_ok());
        assert_eq!(store.call_count(Operation::UpdateStage), 1);
    }

    #[tokio::test]
    async fn test_management_is_gated() {
        let store = InMemoryBackend::new();
        let id = store.insert_workflow(file_draft());
        let viewer = Capabilities::new(["viewer"]);

        assert!(matches!(
            delete_workflow(&store, &viewer, id).await,
            Err(DesignerError::AccessDenied(_))
        ));
        assert!(matches!(
            copy_workflow(&store, &viewer, id).await,
            Err(DesignerError::AccessDenied(_))
        ));
        assert!(store.calls().is_empty());

        assert_eq!(list_workflows(&store).await.unwrap().len(), 1);
        delete_workflow(&store, &caps(), id).await.unwrap();
        assert!(list_workflows(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_prefixed() {
        let store = InMemoryBackend::new();
        store.fail(Operation::ListWorkflows);
        let err = list_workflows(&store).await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch workflows"));
    }
}
