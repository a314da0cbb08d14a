//! Workflow draft assembly and submission
//!
//! A [`Designer`] is one wizard session over one draft. Stages are persisted
//! as they are committed (one store round trip each); `submit` then writes the
//! workflow metadata. Nothing is rolled back if a later step fails, so a
//! retry only has to repeat the step that failed.
//!
//! Every public operation records its outcome in a single error slot
//! (`current_error`) as well as returning it.

mod auth;
mod manage;

pub use auth::login;
pub use manage::{apply_draft, copy_workflow, delete_workflow, list_workflows, COPY_SUFFIX};

use crate::backend::{StagePayload, WorkflowBackend};
use crate::domain::{
    summarize, validate_actor_in_catalog, validate_draft, validate_stage_list,
    validate_workflow_meta, ActionField, Capabilities, CommitTarget, StageEditor, StageField,
    ReviewSummary,
};
use crate::errors::{DesignerError, Result};
use crate::schemas::{Catalog, Stage, WorkflowDraft, WorkflowId, WorkflowMeta};

/// Fetch the role and user catalogs, turning failures into warnings
pub async fn fetch_catalog<B: WorkflowBackend + ?Sized>(backend: &B) -> (Catalog, Vec<String>) {
    let mut warnings = Vec::new();
    let roles = match backend.list_roles().await {
        Ok(roles) => Some(roles),
        Err(e) => {
            tracing::warn!("failed to load roles: {}", e);
            warnings.push(format!("Failed to load roles: {}", e));
            None
        }
    };
    let users = match backend.list_users().await {
        Ok(users) => Some(users),
        Err(e) => {
            tracing::warn!("failed to load users: {}", e);
            warnings.push(format!("Failed to load users: {}", e));
            None
        }
    };
    (Catalog::new(roles, users), warnings)
}

/// The three wizard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Details,
    Stages,
    Review,
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardStep::Details => write!(f, "details"),
            WizardStep::Stages => write!(f, "stages"),
            WizardStep::Review => write!(f, "review"),
        }
    }
}

/// One authoring session over a workflow draft
pub struct Designer<B: WorkflowBackend> {
    backend: B,
    capabilities: Capabilities,
    draft: WorkflowDraft,
    editor: StageEditor,
    step: WizardStep,
    catalog: Catalog,
    warnings: Vec<String>,
    error: Option<String>,
}

impl<B: WorkflowBackend> Designer<B> {
    /// Start a new, unsaved draft
    pub fn new(backend: B, capabilities: Capabilities, meta: WorkflowMeta) -> Self {
        Designer {
            backend,
            capabilities,
            draft: WorkflowDraft::new(meta),
            editor: StageEditor::new(),
            step: WizardStep::Details,
            catalog: Catalog::default(),
            warnings: Vec::new(),
            error: None,
        }
    }

    /// Hydrate an existing workflow for editing.
    ///
    /// Stages keep the store's order; every action gets a fresh temporary id.
    pub async fn open(backend: B, capabilities: Capabilities, id: WorkflowId) -> Result<Self> {
        capabilities.require_designer("edit workflows")?;
        let mut draft = backend
            .get_workflow(id)
            .await
            .map_err(|e| e.during("load workflow data"))?;
        draft.id = Some(id);
        draft.stages = draft
            .stages
            .into_iter()
            .map(Stage::with_fresh_temp_ids)
            .collect();
        tracing::info!(workflow = %id, stages = draft.stages.len(), "opened workflow");

        Ok(Designer {
            draft,
            ..Self::new(backend, capabilities, WorkflowMeta::default())
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn draft(&self) -> &WorkflowDraft {
        &self.draft
    }

    pub fn editor(&self) -> &StageEditor {
        &self.editor
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Display-only notices, e.g. catalogs that failed to load
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Message from the most recent failed operation, cleared on success
    pub fn current_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn workflow_id(&self) -> Option<WorkflowId> {
        self.draft.id
    }

    /// Review view of the draft with resolved names and transitions
    pub fn summary(&self) -> ReviewSummary {
        summarize(&self.draft, &self.catalog)
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.error = None,
            Err(e) => {
                tracing::debug!(code = e.code(), "{}", e);
                self.error = Some(e.to_string());
            }
        }
        result
    }

    /// Fetch the role and user catalogs.
    ///
    /// Failures only add a warning; lookups then fall back to placeholder names.
    pub async fn load_catalogs(&mut self) {
        let (catalog, warnings) = fetch_catalog(&self.backend).await;
        self.catalog = catalog;
        self.warnings.extend(warnings);
    }

    // ===== WIZARD =====

    pub fn update_meta(&mut self, meta: WorkflowMeta) -> Result<()> {
        let result = self.capabilities.require_designer("edit workflow details");
        if result.is_ok() {
            self.draft.meta = meta;
        }
        self.record(result)
    }

    /// Advance one page, validating what the current page collected
    pub fn next_step(&mut self) -> Result<WizardStep> {
        let result = self.try_next_step();
        self.record(result)
    }

    fn try_next_step(&mut self) -> Result<WizardStep> {
        self.capabilities.require_designer("edit workflows")?;
        self.step = match self.step {
            WizardStep::Details => {
                validate_workflow_meta(&self.draft.meta)?;
                WizardStep::Stages
            }
            WizardStep::Stages => {
                validate_stage_list(&self.draft.stages)?;
                WizardStep::Review
            }
            WizardStep::Review => WizardStep::Review,
        };
        Ok(self.step)
    }

    pub fn previous_step(&mut self) -> Result<WizardStep> {
        let result = self.capabilities.require_designer("edit workflows").map(|_| {
            self.step = match self.step {
                WizardStep::Details | WizardStep::Stages => WizardStep::Details,
                WizardStep::Review => WizardStep::Stages,
            };
            self.step
        });
        self.record(result)
    }

    // ===== STAGE BUFFER =====

    /// Start composing a new stage. Without the designer capability this does nothing.
    pub fn begin_new_stage(&mut self) {
        if self.capabilities.can_design() {
            self.editor.begin_new();
        } else {
            tracing::debug!("begin_new_stage ignored: no design capability");
        }
    }

    /// Start composing a new stage pre-filled from `template`
    pub fn begin_stage_from(&mut self, template: &Stage) -> Result<()> {
        let result = self.try_begin_stage_from(template);
        self.record(result)
    }

    fn try_begin_stage_from(&mut self, template: &Stage) -> Result<()> {
        self.capabilities.require_designer("add stages")?;
        self.editor.begin_new();
        let fields = [
            StageField::Name(template.name.clone()),
            StageField::Description(template.description.clone()),
            StageField::ActorType(template.actor_type),
            StageField::Role(template.role_id),
            StageField::User(template.user_id),
            StageField::ActorCount(template.actor_count),
            StageField::Quorum(template.quorum),
            StageField::ConflictCheck(template.conflict_check),
            StageField::DocumentsRequired(template.documents_required),
            StageField::DocumentCount(template.document_count),
        ];
        for field in fields {
            self.editor.update_stage(field)?;
        }
        for action in &template.actions {
            let i = self.editor.add_action()?;
            let fields = [
                ActionField::Name(action.name.clone()),
                ActionField::Description(action.description.clone()),
                ActionField::ResultType(action.result_type),
                ActionField::SpecificTarget(action.specific_target),
                ActionField::RequiredCount(action.required_count),
            ];
            for field in fields {
                self.editor.update_action(i, field)?;
            }
        }
        Ok(())
    }

    pub fn begin_edit_stage(&mut self, index: usize) -> Result<()> {
        let result = self
            .capabilities
            .require_designer("edit stages")
            .and_then(|_| self.editor.begin_edit(&self.draft.stages, index));
        self.record(result)
    }

    pub fn cancel_stage(&mut self) {
        self.editor.cancel();
    }

    pub fn update_stage(&mut self, field: StageField) -> Result<()> {
        let result = self
            .capabilities
            .require_designer("edit stages")
            .and_then(|_| self.editor.update_stage(field));
        self.record(result)
    }

    /// Append a blank action to the buffer; returns its index
    pub fn add_action(&mut self) -> Result<usize> {
        let result = self
            .capabilities
            .require_designer("add actions")
            .and_then(|_| self.editor.add_action());
        self.record(result)
    }

    pub fn update_action(&mut self, index: usize, field: ActionField) -> Result<()> {
        let result = self
            .capabilities
            .require_designer("edit actions")
            .and_then(|_| self.editor.update_action(index, field));
        self.record(result)
    }

    pub fn remove_action(&mut self, index: usize) -> Result<()> {
        let result = self
            .capabilities
            .require_designer("delete actions")
            .and_then(|_| self.editor.remove_action(index).map(|_| ()));
        self.record(result)
    }

    // ===== INCREMENTAL COMMIT =====

    /// Create the workflow record if the draft has not been saved yet
    async fn ensure_workflow(&mut self) -> Result<WorkflowId> {
        if let Some(id) = self.draft.id {
            return Ok(id);
        }
        let record = self
            .backend
            .create_workflow(&self.draft.meta)
            .await
            .map_err(|e| e.during("create workflow"))?;
        let id = record.id.ok_or_else(|| DesignerError::Backend {
            status: 200,
            message: "Failed to retrieve new workflow ID".to_string(),
        })?;
        tracing::info!(workflow = %id, name = %self.draft.meta.name, "created workflow");
        self.draft.id = Some(id);
        Ok(id)
    }

    /// Validate the buffer, persist it, and apply the stored stage to the draft.
    ///
    /// On any failure the buffer and the draft's stage list are unchanged.
    pub async fn commit_stage(&mut self) -> Result<()> {
        let result = self.try_commit_stage().await;
        self.record(result)
    }

    async fn try_commit_stage(&mut self) -> Result<()> {
        self.capabilities.require_designer("add or edit stages")?;
        let pending = self.editor.prepare_commit(&self.draft.stages)?;
        validate_actor_in_catalog(&pending.stage, &self.catalog)?;

        let payload = StagePayload::from(&pending.stage);
        tracing::debug!(?payload, "stage payload");

        let stored = match pending.target {
            CommitTarget::Append => {
                let workflow = self.ensure_workflow().await?;
                self.backend
                    .create_stage(workflow, &payload)
                    .await
                    .map_err(|e| e.during("add stage"))?
            }
            CommitTarget::Replace { index } => {
                let workflow = self
                    .draft
                    .id
                    .ok_or_else(|| DesignerError::NotFound("Workflow ID not found".to_string()))?;
                let stage_id = pending
                    .stage
                    .id
                    .ok_or(DesignerError::InvalidIndex {
                        index,
                        len: self.draft.stages.len(),
                    })?;
                self.backend
                    .update_stage(workflow, stage_id, &payload)
                    .await
                    .map_err(|e| e.during("update stage"))?
            }
        };

        tracing::info!(stage = %stored.name, seq = stored.seq_no, "committed stage");
        self.editor
            .complete_commit(&mut self.draft, pending.target, stored.with_fresh_temp_ids())
    }

    /// Delete a committed stage from the store and the draft.
    ///
    /// `specific` targets pointing at it are left for validation to report.
    pub async fn remove_stage(&mut self, index: usize) -> Result<Stage> {
        let result = self.try_remove_stage(index).await;
        self.record(result)
    }

    async fn try_remove_stage(&mut self, index: usize) -> Result<Stage> {
        self.capabilities.require_designer("delete stages")?;
        let len = self.draft.stages.len();
        let stage_id = self
            .draft
            .stages
            .get(index)
            .ok_or(DesignerError::InvalidIndex { index, len })?
            .id;

        if let (Some(workflow), Some(stage_id)) = (self.draft.id, stage_id) {
            self.backend
                .delete_stage(workflow, stage_id)
                .await
                .map_err(|e| e.during("delete stage"))?;
        }
        let removed = self.editor.remove_stage(&mut self.draft, index)?;
        tracing::info!(stage = %removed.name, "removed stage");
        Ok(removed)
    }

    // ===== SUBMISSION =====

    /// Validate the whole draft and write the workflow metadata.
    ///
    /// Stages were already persisted by `commit_stage`; a failure here does
    /// not undo them.
    pub async fn submit(&mut self) -> Result<WorkflowId> {
        let result = self.try_submit().await;
        self.record(result)
    }

    async fn try_submit(&mut self) -> Result<WorkflowId> {
        self.capabilities.require_designer("save workflows")?;
        validate_draft(&self.draft)?;

        let id = match self.draft.id {
            Some(id) => {
                self.backend
                    .update_workflow(id, &self.draft.meta)
                    .await
                    .map_err(|e| e.during("update workflow"))?;
                id
            }
            None => self.ensure_workflow().await?,
        };
        tracing::info!(workflow = %id, "saved workflow");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{InMemoryBackend, Operation};
    use crate::domain::{ValidationError, WORKFLOW_DESIGNER};
    use crate::schemas::{ActorType, ResultType, RoleId, UserId};
    use std::sync::Arc;

    fn designer_caps() -> Capabilities {
        Capabilities::new([WORKFLOW_DESIGNER])
    }

    fn backend() -> Arc<InMemoryBackend> {
        Arc::new(
            InMemoryBackend::new()
                .with_role(1, "Manager")
                .with_role(2, "Finance")
                .with_user(7, "alice"),
        )
    }

    fn designer(backend: &Arc<InMemoryBackend>) -> Designer<Arc<InMemoryBackend>> {
        Designer::new(
            Arc::clone(backend),
            designer_caps(),
            WorkflowMeta::new("Purchase", "Purchase approval"),
        )
    }

    fn compose(d: &mut Designer<Arc<InMemoryBackend>>, name: &str, result_type: ResultType) {
        d.begin_new_stage();
        d.update_stage(StageField::Name(name.to_string())).unwrap();
        d.update_stage(StageField::Description(format!("{} stage", name)))
            .unwrap();
        d.update_stage(StageField::Role(Some(RoleId(1)))).unwrap();
        let i = d.add_action().unwrap();
        d.update_action(i, ActionField::Name(format!("{} done", name)))
            .unwrap();
        d.update_action(i, ActionField::ResultType(result_type))
            .unwrap();
    }

    #[tokio::test]
    async fn test_first_commit_creates_workflow() {
        let store = backend();
        let mut d = designer(&store);
        assert!(d.workflow_id().is_none());

        compose(&mut d, "Request", ResultType::Next);
        d.commit_stage().await.unwrap();

        let id = d.workflow_id().unwrap();
        assert_eq!(store.call_count(Operation::CreateWorkflow), 1);
        assert_eq!(store.workflow(id).unwrap().stages.len(), 1);
        assert_eq!(d.draft().stages[0].seq_no, 1);
        assert!(d.draft().stages[0].id.is_some());
        assert!(!d.editor().is_composing());

        compose(&mut d, "Approve", ResultType::Complete);
        d.commit_stage().await.unwrap();
        assert_eq!(store.call_count(Operation::CreateWorkflow), 1);
        assert_eq!(d.draft().stages[1].seq_no, 2);
    }

    #[tokio::test]
    async fn test_missing_workflow_id_is_reported() {
        let store = backend();
        store.omit_workflow_ids();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Complete);

        let err = d.commit_stage().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to retrieve new workflow ID");
        assert_eq!(d.current_error(), Some("Failed to retrieve new workflow ID"));
        assert!(d.editor().is_composing());
        assert_eq!(store.call_count(Operation::CreateStage), 0);
    }

    #[tokio::test]
    async fn test_invalid_buffer_never_reaches_store() {
        let store = backend();
        let mut d = designer(&store);
        d.begin_new_stage();
        d.update_stage(StageField::Name("Review".into())).unwrap();

        let err = d.commit_stage().await.unwrap_err();
        assert!(matches!(
            err,
            DesignerError::Validation(ValidationError::MissingField { .. })
        ));
        assert!(store.calls().is_empty());
        assert!(d.current_error().is_some());
    }

    #[tokio::test]
    async fn test_access_denied_before_any_request() {
        let store = backend();
        let mut d = Designer::new(
            Arc::clone(&store),
            Capabilities::new(["viewer"]),
            WorkflowMeta::new("A", "B"),
        );

        d.begin_new_stage();
        assert!(!d.editor().is_composing());

        let err = d.commit_stage().await.unwrap_err();
        assert!(matches!(err, DesignerError::AccessDenied(_)));
        assert_eq!(
            d.current_error(),
            Some("Access Denied: Only Workflow Designers can add or edit stages.")
        );
        assert!(matches!(d.submit().await, Err(DesignerError::AccessDenied(_))));
        assert!(matches!(d.remove_stage(0).await, Err(DesignerError::AccessDenied(_))));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_keeps_buffer_and_can_retry() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Complete);
        store.fail(Operation::CreateStage);

        let err = d.commit_stage().await.unwrap_err();
        assert!(err.to_string().contains("Failed to add stage"));
        assert!(d.editor().is_composing());
        assert!(d.draft().stages.is_empty());
        let created = d.workflow_id();
        assert!(created.is_some());

        store.recover(Operation::CreateStage);
        d.commit_stage().await.unwrap();
        assert!(d.current_error().is_none());
        assert_eq!(d.workflow_id(), created);
        assert_eq!(store.call_count(Operation::CreateWorkflow), 1);
        assert_eq!(d.draft().stages.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_role_rejected_when_catalog_loaded() {
        let store = backend();
        let mut d = designer(&store);
        d.load_catalogs().await;
        compose(&mut d, "Request", ResultType::Complete);
        d.update_stage(StageField::Role(Some(RoleId(99)))).unwrap();

        let err = d.commit_stage().await.unwrap_err();
        assert!(matches!(
            err,
            DesignerError::Validation(ValidationError::UnknownRole(RoleId(99)))
        ));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_a_warning() {
        let store = backend();
        store.fail(Operation::ListRoles);
        let mut d = designer(&store);
        d.load_catalogs().await;

        assert_eq!(d.warnings().len(), 1);
        assert!(d.current_error().is_none());
        assert!(d.catalog().roles.is_none());
        assert!(d.catalog().users.is_some());

        // Unknown roles are accepted while the catalog is unavailable
        compose(&mut d, "Request", ResultType::Complete);
        d.update_stage(StageField::Role(Some(RoleId(99)))).unwrap();
        d.commit_stage().await.unwrap();
        assert_eq!(d.summary().stages[0].actor, "Unknown Role");
    }

    #[tokio::test]
    async fn test_edit_stage_updates_in_place() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Next);
        d.commit_stage().await.unwrap();
        compose(&mut d, "Approve", ResultType::Complete);
        d.commit_stage().await.unwrap();
        let before = d.draft().stages[0].clone();

        d.begin_edit_stage(0).unwrap();
        d.update_stage(StageField::ActorType(ActorType::User)).unwrap();
        d.update_stage(StageField::User(Some(UserId(7)))).unwrap();
        d.commit_stage().await.unwrap();

        let stage = &d.draft().stages[0];
        assert_eq!(stage.id, before.id);
        assert_eq!(stage.seq_no, 1);
        assert_eq!(stage.actor_type, ActorType::User);
        assert_eq!(stage.role_id, None);
        assert_eq!(store.call_count(Operation::UpdateStage), 1);
        assert_eq!(d.draft().stages.len(), 2);
    }

    #[tokio::test]
    async fn test_edit_round_trip_through_store() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Complete);
        d.commit_stage().await.unwrap();
        let before = d.draft().stages[0].clone();

        d.begin_edit_stage(0).unwrap();
        d.commit_stage().await.unwrap();
        assert!(d.draft().stages[0].same_definition(&before));
    }

    #[tokio::test]
    async fn test_submit_requires_completion_path() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Next);
        d.commit_stage().await.unwrap();

        let err = d.submit().await.unwrap_err();
        assert!(matches!(
            err,
            DesignerError::Validation(ValidationError::MissingCompletionPath)
        ));
        assert_eq!(store.call_count(Operation::UpdateWorkflow), 0);
    }

    #[tokio::test]
    async fn test_specific_target_then_submit() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Approve", ResultType::Complete);
        d.commit_stage().await.unwrap();
        let target = d.draft().stages[0].id.unwrap();

        compose(&mut d, "Escalate", ResultType::Specific);
        d.update_action(0, ActionField::SpecificTarget(Some(target)))
            .unwrap();
        d.commit_stage().await.unwrap();

        let id = d.submit().await.unwrap();
        assert_eq!(Some(id), d.workflow_id());
        assert_eq!(store.call_count(Operation::UpdateWorkflow), 1);

        // Removing the target leaves the reference dangling until the next validation
        d.remove_stage(0).await.unwrap();
        assert_eq!(d.draft().stages[0].actions[0].specific_target, Some(target));
        assert!(matches!(
            d.submit().await,
            Err(DesignerError::Validation(ValidationError::DanglingTarget { .. }))
        ));
        assert_eq!(store.workflow(id).unwrap().stages.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_stages_creates_nothing() {
        let store = backend();
        let mut d = designer(&store);
        assert!(matches!(
            d.submit().await,
            Err(DesignerError::Validation(ValidationError::NoStages))
        ));
        assert_eq!(store.workflow_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_stages() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Complete);
        d.commit_stage().await.unwrap();
        let id = d.workflow_id().unwrap();
        store.fail(Operation::UpdateWorkflow);

        let err = d.submit().await.unwrap_err();
        assert!(err.to_string().contains("Failed to update workflow"));
        assert_eq!(store.workflow(id).unwrap().stages.len(), 1);
    }

    #[tokio::test]
    async fn test_wizard_steps_are_gated() {
        let store = backend();
        let mut d = Designer::new(
            Arc::clone(&store),
            designer_caps(),
            WorkflowMeta::new("", ""),
        );
        assert_eq!(d.step(), WizardStep::Details);
        assert!(d.next_step().is_err());

        d.update_meta(WorkflowMeta::new("Purchase", "Approval")).unwrap();
        assert_eq!(d.next_step().unwrap(), WizardStep::Stages);
        assert!(matches!(
            d.next_step(),
            Err(DesignerError::Validation(ValidationError::NoStages))
        ));

        compose(&mut d, "Request", ResultType::Complete);
        d.commit_stage().await.unwrap();
        assert_eq!(d.next_step().unwrap(), WizardStep::Review);
        assert_eq!(d.previous_step().unwrap(), WizardStep::Stages);
        assert_eq!(d.previous_step().unwrap(), WizardStep::Details);
        assert_eq!(d.previous_step().unwrap(), WizardStep::Details);
    }

    #[tokio::test]
    async fn test_open_hydrates_with_fresh_temp_ids() {
        let store = backend();
        let mut d = designer(&store);
        compose(&mut d, "Request", ResultType::Complete);
        d.commit_stage().await.unwrap();
        let id = d.workflow_id().unwrap();
        let old_temp = d.draft().stages[0].actions[0].temp_id.clone();

        let opened = Designer::open(Arc::clone(&store), designer_caps(), id)
            .await
            .unwrap();
        assert_eq!(opened.workflow_id(), Some(id));
        assert_eq!(opened.draft().meta.name, "Purchase");
        assert_eq!(opened.draft().stages.len(), 1);
        assert_ne!(opened.draft().stages[0].actions[0].temp_id, old_temp);

        let missing = Designer::open(Arc::clone(&store), designer_caps(), WorkflowId(999)).await;
        match missing {
            Err(err @ DesignerError::NotFound(_)) => assert_eq!(
                err.to_string(),
                "Not found: Failed to load workflow data: Workflow 999 not found"
            ),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_begin_stage_from_template() {
        let store = backend();
        let mut d = designer(&store);
        let template = Stage::for_role("Review", "Check", RoleId(2))
            .with_actor_count(2)
            .with_action(
                crate::schemas::Action::named("Approve", ResultType::Complete)
                    .with_required_count(2),
            );

        d.begin_stage_from(&template).unwrap();
        d.commit_stage().await.unwrap();
        let stage = &d.draft().stages[0];
        assert_eq!(stage.actor_count, 2);
        assert_eq!(stage.actions[0].required_count, 2);
        assert!(stage.id.is_some());
    }

    #[tokio::test]
    async fn test_remove_unknown_index() {
        let store = backend();
        let mut d = designer(&store);
        assert!(matches!(
            d.remove_stage(3).await,
            Err(DesignerError::InvalidIndex { index: 3, len: 0 })
        ));
    }
}
